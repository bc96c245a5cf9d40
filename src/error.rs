//! Error types for the document cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Doc Cache Error Enum ==
/// Unified error type for the document cache.
#[derive(Error, Debug)]
pub enum DocCacheError {
    /// Malformed or missing request fields, raised before any I/O
    #[error("Validation error: {0}")]
    Validation(String),

    /// The document store has no such document
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Failure reported by the document store, passed through unchanged
    #[error("Store error: {0}")]
    Store(#[source] anyhow::Error),

    /// Cached payload could not be serialized or deserialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DocCacheError {
    /// Shorthand for a validation failure.
    pub fn validation(msg: impl Into<String>) -> Self {
        DocCacheError::Validation(msg.into())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for DocCacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            DocCacheError::Validation(_) => StatusCode::BAD_REQUEST,
            DocCacheError::NotFound(_) => StatusCode::NOT_FOUND,
            DocCacheError::Store(_) => StatusCode::BAD_GATEWAY,
            DocCacheError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the document cache.
pub type Result<T> = std::result::Result<T, DocCacheError>;
