//! Scan modes

use crate::error::{Result, ScanError};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Registry metadata only
    #[default]
    Ecr,
    /// Registry metadata, preserving images referenced by running pods
    K8s,
}

impl ScanMode {
    pub fn description(&self) -> &'static str {
        match self {
            ScanMode::Ecr => "Report stale images using ECR pull metadata",
            ScanMode::K8s => "Report stale images, skipping images used by Kubernetes pods",
        }
    }

    /// Whether a cluster connection is needed
    pub fn requires_cluster(&self) -> bool {
        matches!(self, ScanMode::K8s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::Ecr => "ecr",
            ScanMode::K8s => "k8s",
        }
    }
}

impl FromStr for ScanMode {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ecr" => Ok(ScanMode::Ecr),
            "k8s" => Ok(ScanMode::K8s),
            other => Err(ScanError::Validation(format!(
                "Invalid mode: {}. Must be 'ecr' or 'k8s'.",
                other
            ))),
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
