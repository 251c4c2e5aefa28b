//! Running totals for a single scan

use crate::scan::classifier::Classification;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanTotals {
    pub never_pulled_bytes: u64,
    pub stale_bytes: u64,
    pub never_pulled_images: usize,
    pub stale_images: usize,
    pub in_use_images: usize,
    pub fresh_images: usize,
}

impl ScanTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one classified image
    pub fn record(&mut self, classification: Classification, size_bytes: u64) {
        match classification {
            Classification::NeverPulled => {
                self.never_pulled_bytes = self.never_pulled_bytes.saturating_add(size_bytes);
                self.never_pulled_images += 1;
            }
            Classification::Stale => {
                self.stale_bytes = self.stale_bytes.saturating_add(size_bytes);
                self.stale_images += 1;
            }
            Classification::InUse => self.in_use_images += 1,
            Classification::Fresh => self.fresh_images += 1,
        }
    }

    pub fn flagged_bytes(&self) -> u64 {
        self.never_pulled_bytes.saturating_add(self.stale_bytes)
    }

    pub fn flagged_images(&self) -> usize {
        self.never_pulled_images + self.stale_images
    }

    pub fn scanned_images(&self) -> usize {
        self.flagged_images() + self.in_use_images + self.fresh_images
    }
}
