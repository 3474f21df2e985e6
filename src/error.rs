//! Error types for the catalog server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::{ErrorResponse, ItemId, ValidationError};
use crate::store::StoreError;

// == Catalog Error Enum ==
/// Errors raised by catalog operations. None of them is retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// The operation targets an id the Store does not know
    #[error("Widget not found: {0}")]
    NotFound(ItemId),

    /// The draft or patch broke one or more field constraints
    #[error("Invalid widget: {0}")]
    Validation(#[from] ValidationError),

    /// The Store failed; passed through unchanged
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => CatalogError::NotFound(id),
            StoreError::Unavailable(reason) => CatalogError::StoreUnavailable(reason),
        }
    }
}

/// Convenience Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

// == API Error Enum ==
/// Errors surfaced by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            ApiError::Catalog(CatalogError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, ErrorResponse::new(message))
            }
            ApiError::Catalog(CatalogError::Validation(err)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new(message).with_violations(err.violations),
            ),
            ApiError::Catalog(CatalogError::StoreUnavailable(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, ErrorResponse::new(message))
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(message)),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for HTTP handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
