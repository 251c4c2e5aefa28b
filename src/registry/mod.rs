//! Registry access: the [`ImageRegistry`] seam and its ECR implementation

pub mod client;

pub use client::{EcrRegistryClient, EcrRegistryClientBuilder};

use crate::error::Result;
use crate::image::{ImageId, ImageRecord};
use async_trait::async_trait;

/// Read-only view of a container registry
#[async_trait]
pub trait ImageRegistry: Send + Sync {
    /// Names of all repositories visible to the caller
    async fn list_repositories(&self) -> Result<Vec<String>>;

    /// Identifiers of the images stored in `repository`
    async fn list_image_ids(&self, repository: &str) -> Result<Vec<ImageId>>;

    /// Pull/size metadata for a single image
    async fn describe_image(&self, repository: &str, id: &ImageId) -> Result<Vec<ImageRecord>>;
}
