//! # API Errors
//!
//! Every handler failure becomes a JSON body `{"error": ..., "code": ...}`.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::file_storage::StorageError;
use crate::records::model::UnknownValue;
use crate::records::RecordError;
use crate::report::ReportError;

/// Error body returned by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Attachment not found: {0}")]
    AttachmentNotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Error parsing form: {message}")]
    Multipart { status: u16, message: String },
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Record(e) => e.status_code(),
            ApiError::Storage(e) => e.status_code(),
            ApiError::Report(e) => e.status_code(),
            ApiError::AttachmentNotFound(_) => 404,
            ApiError::BadRequest(_) => 400,
            ApiError::Multipart { status, .. } => *status,
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        // Keeps 413 when the body limit cut the upload short
        ApiError::Multipart {
            status: e.status().as_u16(),
            message: e.body_text(),
        }
    }
}

impl From<UnknownValue> for ApiError {
    fn from(e: UnknownValue) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.status_code();
        if code >= 500 {
            error!(code, error = %self, "request failed");
        } else {
            debug!(code, error = %self, "request rejected");
        }

        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse {
            error: self.to_string(),
            code,
        };
        (status, Json(body)).into_response()
    }
}
