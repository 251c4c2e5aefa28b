//! Standardized translation of collaborator errors into [`ScanError`]

use crate::error::ScanError;
use aws_sdk_ecr::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

/// Maps AWS SDK failures from the ECR client
pub struct RegistryErrorHandler;

impl RegistryErrorHandler {
    /// Handle an ECR operation error with the operation name as context
    pub fn handle_sdk_error<E, R>(operation: &str, err: SdkError<E, R>) -> ScanError
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: std::fmt::Debug,
    {
        match &err {
            SdkError::ConstructionFailure(_) => {
                return ScanError::Session(format!(
                    "Failed to build {} request: {}",
                    operation,
                    DisplayErrorContext(&err)
                ));
            }
            SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
                return ScanError::Network(format!(
                    "Failed to reach ECR during {}: {}",
                    operation,
                    DisplayErrorContext(&err)
                ));
            }
            _ => {}
        }

        let code = err.code().unwrap_or("Unknown").to_string();
        let message = err
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| DisplayErrorContext(&err).to_string());

        Self::from_error_code(operation, &code, &message)
    }

    /// Classify an ECR service error code
    pub fn from_error_code(operation: &str, code: &str, message: &str) -> ScanError {
        match code {
            "AccessDeniedException" | "UnrecognizedClientException" => {
                ScanError::Auth(format!("Not authorized to {}: {}", operation, message))
            }
            "ExpiredTokenException" | "InvalidClientTokenId" | "InvalidSignatureException" => {
                ScanError::Session(format!(
                    "AWS credentials rejected during {}: {}",
                    operation, message
                ))
            }
            "RepositoryNotFoundException" | "ImageNotFoundException" => {
                ScanError::NotFound(format!("{} during {}", message, operation))
            }
            "ThrottlingException" => {
                ScanError::Registry(format!("Rate limited during {}: {}", operation, message))
            }
            "ServerException" => {
                ScanError::Registry(format!("ECR server error during {}: {}", operation, message))
            }
            _ => ScanError::Registry(format!("Failed to {} ({}): {}", operation, code, message)),
        }
    }
}

/// Maps kube client failures
pub struct ClusterErrorHandler;

impl ClusterErrorHandler {
    pub fn handle_kube_error(operation: &str, err: kube::Error) -> ScanError {
        match err {
            kube::Error::Api(response) => {
                Self::from_status(operation, response.code, &response.message)
            }
            kube::Error::HyperError(e) => {
                ScanError::Network(format!("Failed to reach cluster during {}: {}", operation, e))
            }
            kube::Error::InferConfig(e) => {
                ScanError::Cluster(format!("Failed to load cluster config: {}", e))
            }
            other => ScanError::Cluster(format!("Failed to {}: {}", operation, other)),
        }
    }

    /// Classify a Kubernetes API status code
    pub fn from_status(operation: &str, status: u16, message: &str) -> ScanError {
        match status {
            401 => ScanError::Auth(format!("Unauthorized to {}: {}", operation, message)),
            403 => ScanError::Auth(format!(
                "Forbidden: service account cannot {}: {}",
                operation, message
            )),
            404 => ScanError::NotFound(format!(
                "Resource not found for {}: {}",
                operation, message
            )),
            429 => ScanError::Cluster(format!("Rate limited during {}: {}", operation, message)),
            500..=599 => ScanError::Cluster(format!(
                "API server error during {} (status {}): {}",
                operation, status, message
            )),
            _ => ScanError::Cluster(format!(
                "Failed to {} (status {}): {}",
                operation, status, message
            )),
        }
    }
}
