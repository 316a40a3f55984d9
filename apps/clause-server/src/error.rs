//! Error types for the clause server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared_pdf::ExtractError;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Upload exceeds {0} bytes")]
    PayloadTooLarge(usize),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Analysis timeout after {0}ms")]
    Timeout(u64),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::UnsupportedFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ServerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::ExtractionFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ServerError::UnsupportedFileType(_) => "UNSUPPORTED_FILE_TYPE",
            ServerError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ServerError::InvalidRequest(_) => "INVALID_REQUEST",
            ServerError::ExtractionFailed(_) => "EXTRACTION_FAILED",
            ServerError::Timeout(_) => "TIMEOUT",
            ServerError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ServerError::UnsupportedFileType(ext) => format!(
                "File type '{}' is not supported. Upload a text-based PDF or a .txt file",
                ext
            ),
            other => other.to_string(),
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: self.code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ExtractError> for ServerError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedFormat(ext) => ServerError::UnsupportedFileType(ext),
            ExtractError::IoError(e) => ServerError::Internal(e.to_string()),
            other => ServerError::ExtractionFailed(other.to_string()),
        }
    }
}
