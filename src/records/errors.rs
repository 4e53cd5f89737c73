//! # Record Store Errors

use thiserror::Error;

/// Result type for record store operations
pub type RecordResult<T> = Result<T, RecordError>;

/// Record store errors
///
/// Both variants are expected, non-fatal conditions. A failed operation
/// leaves the store exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("AAR not found: {0}")]
    NotFound(String),

    #[error("AAR already exists: {0}")]
    AlreadyExists(String),
}

impl RecordError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            RecordError::NotFound(_) => 404,
            RecordError::AlreadyExists(_) => 409,
        }
    }

    /// Identifier the failed operation was about
    pub fn id(&self) -> &str {
        match self {
            RecordError::NotFound(id) | RecordError::AlreadyExists(id) => id,
        }
    }
}
