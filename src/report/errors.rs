//! # Report Errors

use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

/// Result type for report generation
pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Could not start PDF renderer {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF renderer exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("PDF renderer timed out after {0:?}")]
    Timeout(Duration),

    #[error("Report I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ReportError::Spawn { .. } => 500,
            ReportError::Failed { .. } => 502,
            ReportError::Timeout(_) => 504,
            ReportError::Io(_) => 500,
        }
    }
}
