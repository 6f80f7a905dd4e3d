//! Error types for the admin HTTP surface
//!
//! Cache operations themselves never fail; only requests to the admin
//! endpoints do.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == API Error Enum ==
/// Errors returned by the admin endpoints.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Shared secret missing or wrong in production mode
    #[error("Unauthorized")]
    Unauthorized,

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "success": false,
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the admin handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
