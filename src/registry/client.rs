// ECR implementation of the ImageRegistry trait. Each call maps to exactly one
// ECR API request; results are converted into crate-level image types.

use crate::error::handlers::RegistryErrorHandler;
use crate::error::{Result, ScanError};
use crate::image::{ImageId, ImageRecord};
use crate::logging::Logger;
use crate::registry::ImageRegistry;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_ecr::Client;
use aws_sdk_ecr::primitives::DateTime as AwsDateTime;
use aws_sdk_ecr::types::{ImageDetail, ImageIdentifier};
use chrono::{DateTime, Utc};

pub struct EcrRegistryClientBuilder {
    region: String,
    logger: Logger,
}

impl EcrRegistryClientBuilder {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            logger: Logger::new(false),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Load the AWS shared configuration for the region and build the client
    pub async fn build(self) -> Result<EcrRegistryClient> {
        if self.region.trim().is_empty() {
            return Err(ScanError::Session(
                "Failed to create AWS session: region is empty".to_string(),
            ));
        }

        self.logger.debug(&format!("Loading AWS configuration for region {}", self.region));

        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .load()
            .await;

        Ok(EcrRegistryClient {
            client: Client::new(&shared_config),
            logger: self.logger,
        })
    }
}

pub struct EcrRegistryClient {
    client: Client,
    logger: Logger,
}

impl EcrRegistryClient {
    pub fn builder(region: impl Into<String>) -> EcrRegistryClientBuilder {
        EcrRegistryClientBuilder::new(region)
    }
}

#[async_trait]
impl ImageRegistry for EcrRegistryClient {
    async fn list_repositories(&self) -> Result<Vec<String>> {
        let output = self
            .client
            .describe_repositories()
            .send()
            .await
            .map_err(|e| RegistryErrorHandler::handle_sdk_error("describe repositories", e))?;

        let repositories: Vec<String> = output
            .repositories()
            .iter()
            .filter_map(|repo| repo.repository_name().map(str::to_string))
            .collect();

        self.logger.debug(&format!("Found {} repositories", repositories.len()));
        Ok(repositories)
    }

    async fn list_image_ids(&self, repository: &str) -> Result<Vec<ImageId>> {
        let output = self
            .client
            .list_images()
            .repository_name(repository)
            .send()
            .await
            .map_err(|e| RegistryErrorHandler::handle_sdk_error("list images", e))?;

        Ok(output
            .image_ids()
            .iter()
            .map(|id| ImageId {
                digest: id.image_digest().map(str::to_string),
                tag: id.image_tag().map(str::to_string),
            })
            .collect())
    }

    async fn describe_image(&self, repository: &str, id: &ImageId) -> Result<Vec<ImageRecord>> {
        let identifier = ImageIdentifier::builder()
            .set_image_digest(id.digest.clone())
            .set_image_tag(id.tag.clone())
            .build();

        let output = self
            .client
            .describe_images()
            .repository_name(repository)
            .image_ids(identifier)
            .send()
            .await
            .map_err(|e| RegistryErrorHandler::handle_sdk_error("describe images", e))?;

        let mut records = Vec::with_capacity(output.image_details().len());
        for detail in output.image_details() {
            match record_from_detail(repository, detail) {
                Some(record) => records.push(record),
                None => self.logger.warning(&format!(
                    "Skipping image without digest in repository {}",
                    repository
                )),
            }
        }
        Ok(records)
    }
}

/// Convert an ECR image detail. Returns `None` when the digest is missing.
pub(crate) fn record_from_detail(repository: &str, detail: &ImageDetail) -> Option<ImageRecord> {
    let digest = detail.image_digest()?;
    let size_bytes = detail
        .image_size_in_bytes()
        .map(|size| u64::try_from(size).unwrap_or(0))
        .unwrap_or(0);

    let mut record = ImageRecord::new(repository, digest, size_bytes)
        .with_tags(detail.image_tags().to_vec());
    record.last_pulled_at = detail.last_recorded_pull_time().and_then(to_chrono);
    Some(record)
}

fn to_chrono(at: &AwsDateTime) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(at.secs(), at.subsec_nanos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_with_pull_time_converts() {
        let detail = ImageDetail::builder()
            .image_digest("sha256:abc")
            .image_size_in_bytes(2048)
            .image_tags("v1")
            .last_recorded_pull_time(AwsDateTime::from_secs(1_700_000_000))
            .build();

        let record = record_from_detail("web", &detail).unwrap();
        assert_eq!(record.repository, "web");
        assert_eq!(record.digest, "sha256:abc");
        assert_eq!(record.size_bytes, 2048);
        assert_eq!(record.tags, vec!["v1".to_string()]);
        assert_eq!(record.last_pulled_at.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn detail_without_pull_time_is_never_pulled() {
        let detail = ImageDetail::builder().image_digest("sha256:def").build();

        let record = record_from_detail("api", &detail).unwrap();
        assert!(record.is_never_pulled());
        assert_eq!(record.size_bytes, 0);
    }

    #[test]
    fn detail_without_digest_is_skipped() {
        let detail = ImageDetail::builder().image_size_in_bytes(10).build();
        assert!(record_from_detail("api", &detail).is_none());
    }

    #[test]
    fn negative_size_clamps_to_zero() {
        let detail = ImageDetail::builder()
            .image_digest("sha256:neg")
            .image_size_in_bytes(-5)
            .build();
        assert_eq!(record_from_detail("api", &detail).unwrap().size_bytes, 0);
    }
}
