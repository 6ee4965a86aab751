//! Error types for the admin server.

use axum::http::header::HeaderMap;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;
use wordl_core::{IndexError, StoreError, SyncError};

/// Result type for server setup.
pub type ServerResult<T> = Result<T, ServerError>;

/// Result type for request handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised while building or running the server.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The configuration cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A primary store could not be opened.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Stored records could not be loaded into a search index at startup.
    #[error("index rebuild failed: {0}")]
    Rebuild(#[from] SyncError),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned to HTTP clients.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request broke a precondition; carries the alert headers the
    /// client expects.
    #[error("{message}")]
    Rejected {
        /// Human-readable reason.
        message: String,
        /// Error alert headers.
        headers: HeaderMap,
    },

    /// A sync service failure.
    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl ApiError {
    /// Returns the HTTP status and error type for this error.
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Rejected { .. } => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Sync(err) => match err {
                SyncError::InvalidArgument { .. } => (StatusCode::BAD_REQUEST, "bad_request"),
                SyncError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
                SyncError::Index(IndexError::MalformedQuery(_)) => {
                    (StatusCode::BAD_REQUEST, "malformed_query")
                }
                SyncError::Index(IndexError::InvalidDocument(_)) => {
                    (StatusCode::BAD_REQUEST, "invalid_document")
                }
                SyncError::Index(_) => (StatusCode::SERVICE_UNAVAILABLE, "index_unavailable"),
                SyncError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": self.to_string(),
            }
        }));

        match self {
            ApiError::Rejected { headers, .. } => (status, headers, body).into_response(),
            ApiError::Sync(_) => (status, body).into_response(),
        }
    }
}
