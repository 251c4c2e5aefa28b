//! Error types and handlers for registry and cluster operations

pub mod handlers;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Debug, Clone, Error)]
pub enum ScanError {
    /// AWS session or credential setup failed
    #[error("Session error: {0}")]
    Session(String),
    /// Registry API errors (list/describe)
    #[error("Registry error: {0}")]
    Registry(String),
    /// Authentication or authorization errors
    #[error("Authentication error: {0}")]
    Auth(String),
    /// Transport level failures (DNS, connect, timeout)
    #[error("Network error: {0}")]
    Network(String),
    /// Cluster configuration or API errors
    #[error("Cluster error: {0}")]
    Cluster(String),
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),
    /// Invalid flags or configuration
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<kube::config::InClusterError> for ScanError {
    fn from(err: kube::config::InClusterError) -> Self {
        ScanError::Cluster(format!("Failed to create in-cluster config: {}", err))
    }
}
