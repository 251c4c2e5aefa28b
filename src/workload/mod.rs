//! Workload inspection: which image digests are referenced by running pods

pub mod client;

pub use client::KubeWorkloadClient;

use crate::error::Result;
use async_trait::async_trait;

/// Container image references of a single pod, in spec order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PodImages {
    pub namespace: String,
    pub name: String,
    pub images: Vec<String>,
}

impl PodImages {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, images: Vec<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            images,
        }
    }

    /// Whether any container in this pod references `digest`
    pub fn uses_digest(&self, digest: &str) -> bool {
        self.images
            .iter()
            .any(|image| reference_digest(image) == Some(digest))
    }
}

/// Source of pods running in the cluster
#[async_trait]
pub trait WorkloadInspector: Send + Sync {
    async fn list_pods(&self) -> Result<Vec<PodImages>>;
}

/// Digest part of a `repo@digest` reference. References that are not
/// exactly two `@`-separated parts have no digest.
pub fn reference_digest(reference: &str) -> Option<&str> {
    let mut parts = reference.split('@');
    let _name = parts.next()?;
    let digest = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some(digest)
}

/// True when any container of any pod references `digest`
pub fn is_image_used_by_pods(digest: &str, pods: &[PodImages]) -> bool {
    pods.iter().any(|pod| pod.uses_digest(digest))
}
