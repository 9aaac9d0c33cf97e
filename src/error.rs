//! Error types for the product API
//!
//! Provides unified error handling using thiserror. Cache errors never reach
//! the HTTP layer; store errors are converted into `ApiError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Failure reaching or operating the cache server.
///
/// Always recovered locally by the product service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Connection refused, protocol error, or no connection at all
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// Operation did not complete within the configured timeout
    #[error("Cache operation timed out after {0}ms")]
    Timeout(u64),

    /// Value could not be encoded or decoded
    #[error("Cache serialization error: {0}")]
    Serialization(String),
}

// == Store Error Enum ==
/// Errors reported by the product store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Product does not exist
    #[error("Product not found: {0}")]
    NotFound(u64),

    /// Update payload rejected
    #[error("Invalid update: {0}")]
    Validation(String),

    /// Any other store-level failure
    #[error("Store failure: {0}")]
    Backend(String),
}

// == API Error Enum ==
/// Unified error type surfaced by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Product not found
    #[error("Product not found: {0}")]
    NotFound(u64),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Store failure
    #[error("Store error: {0}")]
    Store(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(id),
            StoreError::Validation(msg) => ApiError::Validation(msg),
            StoreError::Backend(msg) => ApiError::Store(msg),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the API layer.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_conversion() {
        assert!(matches!(
            ApiError::from(StoreError::NotFound(7)),
            ApiError::NotFound(7)
        ));
        assert!(matches!(
            ApiError::from(StoreError::Validation("bad".into())),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from(StoreError::Backend("down".into())),
            ApiError::Store(_)
        ));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::NotFound(1).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Validation("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Store("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
