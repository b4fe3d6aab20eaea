//! Error types for the catalog cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Catalog Error Enum ==
/// Unified error type for the catalog cache.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Product (or other keyed resource) not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Cache view name that is not one of the known slots
    #[error("Unknown view: {0}")]
    UnknownView(String),

    /// Invalid request or external record
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A single read or write against the catalog failed
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// A history entry or feed record references a product that does not exist
    #[error("No product matches id {0}")]
    JoinMismatch(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::NotFound(_) | CatalogError::UnknownView(_) => StatusCode::NOT_FOUND,
            CatalogError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CatalogError::JoinMismatch(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CatalogError::Persistence(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog cache.
pub type Result<T> = std::result::Result<T, CatalogError>;
