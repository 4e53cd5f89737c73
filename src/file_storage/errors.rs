//! # File Storage Errors

use std::time::Duration;

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Object storage errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Object store error: {0}")]
    Remote(String),

    #[error("Storage {operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StorageError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            StorageError::ObjectNotFound(_) => 404,
            StorageError::InvalidKey(_) => 400,
            StorageError::IoError(_) => 500,
            StorageError::Remote(_) => 500,
            StorageError::Timeout { .. } => 504,
            StorageError::Internal(_) => 500,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::IoError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(StorageError::ObjectNotFound("k".into()).status_code(), 404);
        assert_eq!(StorageError::InvalidKey("..".into()).status_code(), 400);
        assert_eq!(StorageError::Remote("403 Forbidden".into()).status_code(), 500);
        assert_eq!(
            StorageError::Timeout {
                operation: "upload",
                after: Duration::from_secs(1)
            }
            .status_code(),
            504
        );
    }
}
