//! Image records as reported by the registry

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Identifier returned by the list call and passed back to describe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageId {
    pub digest: Option<String>,
    pub tag: Option<String>,
}

impl ImageId {
    pub fn from_digest(digest: impl Into<String>) -> Self {
        Self {
            digest: Some(digest.into()),
            tag: None,
        }
    }
}

/// Metadata for one image in one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    pub digest: String,
    pub repository: String,
    pub size_bytes: u64,
    /// `None` means the registry never recorded a pull
    pub last_pulled_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

impl ImageRecord {
    pub fn new(repository: impl Into<String>, digest: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            digest: digest.into(),
            repository: repository.into(),
            size_bytes,
            last_pulled_at: None,
            tags: Vec::new(),
        }
    }

    pub fn with_last_pull(mut self, at: DateTime<Utc>) -> Self {
        self.last_pulled_at = Some(at);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn is_never_pulled(&self) -> bool {
        self.last_pulled_at.is_none()
    }
}
