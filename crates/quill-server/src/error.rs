//! Error handling for the REST API server.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quill_core::QuillError;
use quill_extractors::ExtractError;
use quill_render::RenderError;
use serde::Serialize;
use std::fmt;
use tracing::{error, warn};

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    // Common error constructors
    pub fn unsupported_file_type() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "UNSUPPORTED_FILE_TYPE",
            "Unsupported file type",
        )
    }

    pub fn no_file() -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "VALIDATION_ERROR",
            "No file uploaded",
        )
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", message)
    }

    /// Unexpected failure, reported as `Internal error: <message>`.
    pub fn internal(err: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            format!("Internal error: {}", err),
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(code = %self.code, message = %self.message, "Request failed");
        }

        let body = ErrorResponse {
            detail: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<QuillError> for ApiError {
    fn from(err: QuillError) -> Self {
        let code = err.code().as_str();
        if let Some(hint) = err.suggestion() {
            warn!(code, hint, "Review step failed");
        }
        let mut api = ApiError::internal(&err);
        api.code = code.to_string();
        api
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedType(_) => ApiError::unsupported_file_type(),
            other => ApiError::internal(other),
        }
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        ApiError::internal(err)
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::payload_too_large(err.body_text())
        } else {
            ApiError::internal(err)
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::internal(err)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::internal(err)
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
