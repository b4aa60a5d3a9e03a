//! Daemon and API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nfd_deployment::DispatchError;
use serde::Serialize;
use thiserror::Error;

/// Daemon lifecycle errors
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type for daemon operations
pub type DaemonResult<T> = std::result::Result<T, DaemonError>;

/// Errors returned to API callers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Dispatch(#[from] DispatchError),
}

/// Result type for API handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Error body sent to callers
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (400, message),
            ApiError::Dispatch(e) => (e.status_code(), e.to_string()),
        };
        let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if code.is_server_error() {
            tracing::error!(status, %message, "request failed");
        }
        (code, Json(ErrorBody { status, message })).into_response()
    }
}
