//! Registry scan: enumerate, cross-reference, classify and aggregate
//!
//! The [`Scanner`] walks repositories and images strictly in order, one request at
//! a time. Any collaborator error aborts the scan and is returned unchanged.

pub mod classifier;
pub mod stats;

pub use classifier::{Classification, DEFAULT_THRESHOLD_DAYS, RetentionPolicy};
pub use stats::ScanTotals;

use crate::error::Result;
use crate::image::ImageRecord;
use crate::logging::{Logger, format_gb};
use crate::registry::ImageRegistry;
use crate::workload::{PodImages, WorkloadInspector, is_image_used_by_pods};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// An image that counts towards the reclaimable totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlaggedImage {
    pub record: ImageRecord,
    pub classification: Classification,
}

impl FlaggedImage {
    /// The INFO line logged when this image was flagged
    pub fn log_message(&self, threshold_days: u32) -> String {
        image_message(&self.record, self.classification, threshold_days)
    }
}

/// Log line describing how an image was classified
pub fn image_message(
    record: &ImageRecord,
    classification: Classification,
    threshold_days: u32,
) -> String {
    match classification {
        Classification::NeverPulled => format!(
            "Image {} ({}) is never pulled, size: {}",
            record.digest, record.repository, record.size_bytes
        ),
        Classification::Stale => format!(
            "Image {} ({}) was last pulled over {} days ago, size: {}",
            record.digest, record.repository, threshold_days, record.size_bytes
        ),
        Classification::InUse => format!(
            "Image {} ({}) is used by running pods, skipping",
            record.digest, record.repository
        ),
        Classification::Fresh => format!(
            "Image {} ({}) was pulled within {} days, skipping",
            record.digest, record.repository, threshold_days
        ),
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub totals: ScanTotals,
    pub flagged: Vec<FlaggedImage>,
}

impl ScanReport {
    pub fn summary_lines(&self, threshold_days: u32) -> [String; 2] {
        [
            format!(
                "Total size of images never pulled: {}",
                format_gb(self.totals.never_pulled_bytes)
            ),
            format!(
                "Total size of images older than {} days: {}",
                threshold_days,
                format_gb(self.totals.stale_bytes)
            ),
        ]
    }
}

pub struct Scanner<'a> {
    registry: &'a dyn ImageRegistry,
    workloads: Option<&'a dyn WorkloadInspector>,
    policy: RetentionPolicy,
    logger: Logger,
}

impl<'a> Scanner<'a> {
    pub fn new(registry: &'a dyn ImageRegistry, policy: RetentionPolicy, logger: Logger) -> Self {
        Self {
            registry,
            workloads: None,
            policy,
            logger,
        }
    }

    /// Preserve images referenced by pods from this inspector
    pub fn with_workloads(mut self, workloads: &'a dyn WorkloadInspector) -> Self {
        self.workloads = Some(workloads);
        self
    }

    pub async fn run(&self) -> Result<ScanReport> {
        self.run_at(Utc::now()).await
    }

    /// Scan with an explicit reference time
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<ScanReport> {
        let pods = match self.workloads {
            Some(inspector) => Some(inspector.list_pods().await?),
            None => None,
        };

        let mut report = ScanReport::default();
        let repositories = self.registry.list_repositories().await?;

        for repository in &repositories {
            let image_ids = self.registry.list_image_ids(repository).await?;
            self.logger.debug(&format!(
                "Repository {} has {} images",
                repository,
                image_ids.len()
            ));

            for image_id in &image_ids {
                for record in self.registry.describe_image(repository, image_id).await? {
                    self.evaluate(record, pods.as_deref(), now, &mut report);
                }
            }
        }

        Ok(report)
    }

    fn evaluate(
        &self,
        record: ImageRecord,
        pods: Option<&[PodImages]>,
        now: DateTime<Utc>,
        report: &mut ScanReport,
    ) {
        let in_use = pods.is_some_and(|pods| is_image_used_by_pods(&record.digest, pods));
        let classification = self.policy.classify(&record, now, in_use);
        report.totals.record(classification, record.size_bytes);

        let message = image_message(&record, classification, self.policy.threshold_days);
        if classification.is_flagged() {
            self.logger.info(&message);
            report.flagged.push(FlaggedImage {
                record,
                classification,
            });
        } else {
            self.logger.debug(&message);
        }
    }
}
