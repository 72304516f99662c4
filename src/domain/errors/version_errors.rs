use super::ValidationError;
use crate::domain::value_objects::{BucketName, ObjectKey};

/// Message shown to the user for any failure talking to the storage backend.
pub const BACKEND_FAILURE_MESSAGE: &str = "An error occurred accessing the S3 API/Endpoint - please check your credentials, bucket and prefix details and try again";

/// Errors surfaced by version enumeration and retention pruning
#[derive(Debug, Clone, PartialEq)]
pub enum VersionError {
    /// Invalid configuration detected before any backend call
    Config { message: String },

    /// A value handed over by the caller or the backend failed validation
    Validation(ValidationError),

    /// The key has no versions in the bucket
    NotFound { key: ObjectKey, bucket: BucketName },

    /// Any failure communicating with the storage backend
    Backend { operation: String, message: String },

    /// The run was stopped through its cancellation token
    Cancelled,
}

impl VersionError {
    pub fn backend(operation: impl Into<String>, message: impl Into<String>) -> Self {
        VersionError::Backend {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Terse line printed to the user; backend details are only logged.
    pub fn user_message(&self) -> String {
        match self {
            VersionError::Backend { .. } => BACKEND_FAILURE_MESSAGE.to_string(),
            VersionError::Cancelled => "Interrupted".to_string(),
            other => other.to_string(),
        }
    }

    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            VersionError::Config { .. } | VersionError::Validation(_) => 2,
            VersionError::Cancelled => 130,
            VersionError::NotFound { .. } | VersionError::Backend { .. } => 1,
        }
    }
}

impl std::fmt::Display for VersionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionError::Config { message } => {
                write!(f, "Configuration error: {}", message)
            }
            VersionError::Validation(err) => write!(f, "Validation error: {}", err),
            VersionError::NotFound { key, bucket } => {
                write!(f, "Key '{}' does not exist in bucket '{}'.", key, bucket)
            }
            VersionError::Backend { operation, message } => {
                write!(f, "Storage backend error during {}: {}", operation, message)
            }
            VersionError::Cancelled => write!(f, "Operation cancelled"),
        }
    }
}

impl std::error::Error for VersionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VersionError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for VersionError {
    fn from(err: ValidationError) -> Self {
        VersionError::Validation(err)
    }
}

/// Result type for version operations
pub type VersionResult<T> = Result<T, VersionError>;
