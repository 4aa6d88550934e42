//! Error types for the HTTP server.
//!
//! Every error becomes a JSON body `{"error": "..."}` with a status code:
//! validation problems are 400, unknown ids and routes are 404, anything
//! else is 500 with a short, path-free detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving requests or starting up.
#[derive(Debug, Error)]
pub enum Error {
    /// Catalog or progress error
    #[error(transparent)]
    Core(#[from] threads_core::Error),

    /// No route for this method and path
    #[error("Not found")]
    RouteNotFound,

    /// Request body over the size ceiling
    #[error("Request too large")]
    PayloadTooLarge,

    /// Body is not a JSON object
    #[error("{0}")]
    InvalidBody(String),

    /// Invalid environment configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Blocking store task panicked or was cancelled
    #[error("Store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Core(threads_core::Error::Validation(_))
            | Self::PayloadTooLarge
            | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Core(threads_core::Error::NotFound(_)) | Self::RouteNotFound => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short detail for 500 responses. Never includes paths or payloads.
    fn detail(&self) -> &'static str {
        match self {
            Self::Core(threads_core::Error::Io(_)) | Self::Io(_) => "I/O failure",
            Self::Core(threads_core::Error::Serialization(_)) => "serialization failure",
            Self::Core(threads_core::Error::Storage(_)) => "failed to persist progress",
            Self::Config(_) => "server misconfigured",
            Self::Task(_) => "store task failed",
            _ => "unexpected failure",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            json!({ "error": "Internal server error", "detail": self.detail() })
        } else {
            tracing::debug!(%status, error = %self, "request rejected");
            json!({ "error": self.to_string() })
        };
        (status, Json(body)).into_response()
    }
}
