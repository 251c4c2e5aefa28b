use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use ecr_stale_images::cli::{Runner, ScanConfig, ScanMode};
use ecr_stale_images::image::{ImageId, ImageRecord};
use ecr_stale_images::registry::ImageRegistry;
use ecr_stale_images::scan::{Classification, RetentionPolicy, Scanner};
use ecr_stale_images::workload::{PodImages, WorkloadInspector};
use ecr_stale_images::{Logger, Result, ScanError};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// In-memory registry keyed by repository
struct FakeRegistry {
    repositories: BTreeMap<String, Vec<ImageRecord>>,
    calls: Mutex<Vec<String>>,
    fail_on: Option<&'static str>,
}

impl FakeRegistry {
    fn new() -> Self {
        Self {
            repositories: BTreeMap::new(),
            calls: Mutex::new(Vec::new()),
            fail_on: None,
        }
    }

    fn with_image(mut self, record: ImageRecord) -> Self {
        self.repositories
            .entry(record.repository.clone())
            .or_default()
            .push(record);
        self
    }

    fn failing_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    fn check(&self, operation: &str) -> Result<()> {
        self.calls.lock().unwrap().push(operation.to_string());
        if self.fail_on == Some(operation) {
            return Err(ScanError::Registry(format!("Failed to {}", operation)));
        }
        Ok(())
    }
}

#[async_trait]
impl ImageRegistry for FakeRegistry {
    async fn list_repositories(&self) -> Result<Vec<String>> {
        self.check("describe repositories")?;
        Ok(self.repositories.keys().cloned().collect())
    }

    async fn list_image_ids(&self, repository: &str) -> Result<Vec<ImageId>> {
        self.check("list images")?;
        Ok(self
            .repositories
            .get(repository)
            .map(|images| images.iter().map(|i| ImageId::from_digest(&i.digest)).collect())
            .unwrap_or_default())
    }

    async fn describe_image(&self, repository: &str, id: &ImageId) -> Result<Vec<ImageRecord>> {
        self.check("describe images")?;
        Ok(self
            .repositories
            .get(repository)
            .into_iter()
            .flatten()
            .filter(|i| Some(&i.digest) == id.digest.as_ref())
            .cloned()
            .collect())
    }
}

struct FakeCluster {
    pods: Vec<PodImages>,
    fail: bool,
}

#[async_trait]
impl WorkloadInspector for FakeCluster {
    async fn list_pods(&self) -> Result<Vec<PodImages>> {
        if self.fail {
            return Err(ScanError::Cluster("Failed to list pods".to_string()));
        }
        Ok(self.pods.clone())
    }
}

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
}

const NOW: i64 = 100;

fn sample_registry() -> FakeRegistry {
    FakeRegistry::new()
        .with_image(ImageRecord::new("api", "sha256:never", 1_000))
        .with_image(ImageRecord::new("api", "sha256:old", 2_000).with_last_pull(day(65)))
        .with_image(ImageRecord::new("api", "sha256:recent", 4_000).with_last_pull(day(75)))
        .with_image(ImageRecord::new("web", "sha256:used", 8_000).with_last_pull(day(1)))
        .with_image(
            ImageRecord::new("web", "sha256:boundary", 16_000).with_last_pull(day(NOW - 30)),
        )
}

#[tokio::test]
async fn ecr_mode_flags_never_pulled_and_stale_images() {
    let registry = sample_registry();
    let scanner = Scanner::new(&registry, RetentionPolicy::new(30), Logger::new_quiet());

    let report = scanner.run_at(day(NOW)).await.unwrap();

    let flagged: Vec<(&str, Classification)> = report
        .flagged
        .iter()
        .map(|f| (f.record.digest.as_str(), f.classification))
        .collect();
    assert_eq!(
        flagged,
        vec![
            ("sha256:never", Classification::NeverPulled),
            ("sha256:old", Classification::Stale),
            ("sha256:used", Classification::Stale),
        ]
    );
    assert_eq!(report.totals.never_pulled_bytes, 1_000);
    assert_eq!(report.totals.stale_bytes, 10_000);
    assert_eq!(report.totals.fresh_images, 2);
    assert_eq!(report.totals.in_use_images, 0);

    let messages: Vec<String> = report.flagged.iter().map(|f| f.log_message(30)).collect();
    assert_eq!(
        messages,
        vec![
            "Image sha256:never (api) is never pulled, size: 1000",
            "Image sha256:old (api) was last pulled over 30 days ago, size: 2000",
            "Image sha256:used (web) was last pulled over 30 days ago, size: 8000",
        ]
    );
}

#[tokio::test]
async fn k8s_mode_preserves_images_used_by_pods() {
    let registry = sample_registry();
    let cluster = FakeCluster {
        pods: vec![
            PodImages::new(
                "apps",
                "web-0",
                vec!["acct.dkr.ecr.us-east-1.amazonaws.com/web@sha256:used".to_string()],
            ),
            PodImages::new("apps", "api-0", vec!["api:sha256:never".to_string()]),
        ],
        fail: false,
    };
    let scanner = Scanner::new(&registry, RetentionPolicy::new(30), Logger::new_quiet())
        .with_workloads(&cluster);

    let report = scanner.run_at(day(NOW)).await.unwrap();

    assert_eq!(report.totals.in_use_images, 1);
    assert_eq!(report.totals.stale_bytes, 2_000);
    // A tag reference without `@` does not protect the image
    assert_eq!(report.totals.never_pulled_bytes, 1_000);
    assert!(report.flagged.iter().all(|f| f.record.digest != "sha256:used"));
}

#[tokio::test]
async fn total_bytes_equal_sum_of_flagged_sizes() {
    let registry = sample_registry();
    for days in [0, 1, 30, 50, 365] {
        let scanner = Scanner::new(&registry, RetentionPolicy::new(days), Logger::new_quiet());
        let report = scanner.run_at(day(NOW)).await.unwrap();

        let flagged_sum: u64 = report.flagged.iter().map(|f| f.record.size_bytes).sum();
        assert_eq!(report.totals.flagged_bytes(), flagged_sum, "threshold {}", days);
        assert_eq!(report.totals.flagged_images(), report.flagged.len());
        assert_eq!(report.totals.scanned_images(), 5);
    }
}

#[tokio::test]
async fn registry_failure_aborts_scan() {
    let registry = sample_registry().failing_on("list images");
    let scanner = Scanner::new(&registry, RetentionPolicy::default(), Logger::new_quiet());

    let err = scanner.run_at(day(NOW)).await.unwrap_err();

    assert!(matches!(err, ScanError::Registry(_)));
    let calls = registry.calls.lock().unwrap();
    assert_eq!(calls.as_slice(), ["describe repositories", "list images"]);
}

#[tokio::test]
async fn cluster_failure_aborts_before_registry_calls() {
    let registry = sample_registry();
    let cluster = FakeCluster {
        pods: Vec::new(),
        fail: true,
    };
    let scanner = Scanner::new(&registry, RetentionPolicy::default(), Logger::new_quiet())
        .with_workloads(&cluster);

    let err = scanner.run_at(day(NOW)).await.unwrap_err();

    assert!(matches!(err, ScanError::Cluster(_)));
    assert!(registry.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn empty_registry_reports_zero() {
    let registry = FakeRegistry::new();
    let scanner = Scanner::new(&registry, RetentionPolicy::default(), Logger::new_quiet());

    let report = scanner.run().await.unwrap();

    assert!(report.flagged.is_empty());
    assert_eq!(
        report.summary_lines(365),
        [
            "Total size of images never pulled: 0.00 GB".to_string(),
            "Total size of images older than 365 days: 0.00 GB".to_string(),
        ]
    );
}

#[tokio::test]
async fn runner_uses_configured_threshold() {
    let config = ScanConfig {
        threshold_days: 100_000,
        region: "us-east-1".to_string(),
        mode: ScanMode::Ecr,
        verbose: false,
    };
    let registry = FakeRegistry::new()
        .with_image(ImageRecord::new("api", "sha256:never", 1_073_741_824))
        .with_image(ImageRecord::new("api", "sha256:ancient", 10).with_last_pull(day(-3_000)));
    let runner = Runner::from_config(config, Logger::new_quiet());

    let report = runner.run_with(&registry, None).await.unwrap();

    assert_eq!(report.totals.never_pulled_images, 1);
    assert_eq!(report.totals.stale_images, 0);
    assert_eq!(
        report.summary_lines(runner.config().threshold_days)[0],
        "Total size of images never pulled: 1.00 GB"
    );
}
