//! Age-based classification of registry images

use crate::image::ImageRecord;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

pub const DEFAULT_THRESHOLD_DAYS: u32 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// No pull was ever recorded
    NeverPulled,
    /// Last pull is older than the threshold
    Stale,
    /// Referenced by a running pod
    InUse,
    /// Pulled recently enough to keep
    Fresh,
}

impl Classification {
    /// Whether the image counts towards the reclaimable totals
    pub fn is_flagged(&self) -> bool {
        matches!(self, Classification::NeverPulled | Classification::Stale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub threshold_days: u32,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            threshold_days: DEFAULT_THRESHOLD_DAYS,
        }
    }
}

impl RetentionPolicy {
    pub fn new(threshold_days: u32) -> Self {
        Self { threshold_days }
    }

    /// Images last pulled strictly before this instant are stale
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(Duration::days(i64::from(self.threshold_days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub fn classify(
        &self,
        record: &ImageRecord,
        now: DateTime<Utc>,
        in_use: bool,
    ) -> Classification {
        if in_use {
            return Classification::InUse;
        }
        match record.last_pulled_at {
            None => Classification::NeverPulled,
            Some(pulled) if pulled < self.cutoff(now) => Classification::Stale,
            Some(_) => Classification::Fresh,
        }
    }
}
