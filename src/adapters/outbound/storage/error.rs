use crate::domain::errors::{ValidationError, VersionError};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum StoreError {
    #[error("{operation} request failed: {message}")]
    Sdk {
        operation: &'static str,
        message: String,
    },

    #[error("Malformed {operation} response: {message}")]
    MalformedResponse {
        operation: &'static str,
        message: String,
    },

    #[error("Invalid value in {operation} response: {source}")]
    InvalidValue {
        operation: &'static str,
        #[source]
        source: ValidationError,
    },
}

impl StoreError {
    /// Wrap an SDK failure, keeping the whole error chain in the message
    pub fn sdk<E>(operation: &'static str, err: E) -> Self
    where
        E: std::error::Error + 'static,
    {
        StoreError::Sdk {
            operation,
            message: aws_sdk_s3::error::DisplayErrorContext(&err).to_string(),
        }
    }

    pub fn operation(&self) -> &'static str {
        match self {
            StoreError::Sdk { operation, .. }
            | StoreError::MalformedResponse { operation, .. }
            | StoreError::InvalidValue { operation, .. } => operation,
        }
    }
}

/// Every infrastructure failure surfaces as a backend error in the domain
impl From<StoreError> for VersionError {
    fn from(err: StoreError) -> Self {
        VersionError::backend(err.operation(), err.to_string())
    }
}
