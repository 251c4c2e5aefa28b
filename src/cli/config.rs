//! Validated scan configuration

use crate::cli::args::Args;
use crate::cli::operation_mode::ScanMode;
use crate::error::{Result, ScanError};
use crate::scan::RetentionPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub threshold_days: u32,
    pub region: String,
    pub mode: ScanMode,
    pub verbose: bool,
}

impl ScanConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        let config = Self {
            threshold_days: args.days,
            region: args.region.trim().to_string(),
            mode: args.mode.parse()?,
            verbose: args.verbose,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.region.is_empty() {
            return Err(ScanError::Validation(
                "Region cannot be empty".to_string(),
            ));
        }
        if !self
            .region
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ScanError::Validation(format!(
                "Invalid region: {}",
                self.region
            )));
        }
        Ok(())
    }

    pub fn policy(&self) -> RetentionPolicy {
        RetentionPolicy::new(self.threshold_days)
    }
}
