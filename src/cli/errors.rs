//! CLI-specific error types
//!
//! Every CLI error is fatal: the process prints it and exits non-zero.
//! The code prefix is stable so scripts can match on it.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file or flag error
    #[error("AAR_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// I/O error (stdout, storage root)
    #[error("AAR_CLI_IO_ERROR: {0}")]
    Io(String),

    /// Startup checks or server failed
    #[error("AAR_CLI_BOOT_FAILED: {0}")]
    BootFailed(String),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::BootFailed(msg.into())
    }

    /// Stable error code
    pub fn code_str(&self) -> &'static str {
        match self {
            Self::Config(_) => "AAR_CLI_CONFIG_ERROR",
            Self::Io(_) => "AAR_CLI_IO_ERROR",
            Self::BootFailed(_) => "AAR_CLI_BOOT_FAILED",
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
