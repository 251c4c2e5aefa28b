//! Wires the collaborators together and runs a scan

use crate::cli::args::Args;
use crate::cli::config::ScanConfig;
use crate::error::Result;
use crate::logging::Logger;
use crate::registry::{EcrRegistryClient, ImageRegistry};
use crate::scan::{ScanReport, Scanner};
use crate::workload::{KubeWorkloadClient, WorkloadInspector};

pub struct Runner {
    config: ScanConfig,
    logger: Logger,
}

impl Runner {
    pub fn new(args: Args) -> Result<Self> {
        let config = ScanConfig::from_args(&args)?;
        let logger = Logger::new(config.verbose);
        Ok(Self { config, logger })
    }

    pub fn from_config(config: ScanConfig, logger: Logger) -> Self {
        Self { config, logger }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Connect to ECR (and the cluster in k8s mode) and scan
    pub async fn run(&self) -> Result<ScanReport> {
        self.logger.debug(&format!(
            "Starting scan: {} (threshold {} days, region {})",
            self.config.mode.description(),
            self.config.threshold_days,
            self.config.region
        ));

        let registry = EcrRegistryClient::builder(&self.config.region)
            .with_logger(self.logger.clone())
            .build()
            .await?;

        let workloads = if self.config.mode.requires_cluster() {
            Some(KubeWorkloadClient::in_cluster(self.logger.clone())?)
        } else {
            None
        };

        self.run_with(
            &registry,
            workloads.as_ref().map(|w| w as &dyn WorkloadInspector),
        )
        .await
    }

    /// Scan against the given collaborators and log the summary
    pub async fn run_with(
        &self,
        registry: &dyn ImageRegistry,
        workloads: Option<&dyn WorkloadInspector>,
    ) -> Result<ScanReport> {
        let mut scanner = Scanner::new(registry, self.config.policy(), self.logger.clone());
        if let Some(workloads) = workloads {
            scanner = scanner.with_workloads(workloads);
        }

        let report = scanner.run().await?;

        for line in report.summary_lines(self.config.threshold_days) {
            self.logger.info(&line);
        }
        self.logger.debug(&format!(
            "Scanned {} images: {} never pulled, {} stale, {} in use, {} fresh",
            report.totals.scanned_images(),
            report.totals.never_pulled_images,
            report.totals.stale_images,
            report.totals.in_use_images,
            report.totals.fresh_images
        ));

        Ok(report)
    }
}
