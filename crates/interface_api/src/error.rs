//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_registration::ValidationError;

/// Message returned for any failure the caller cannot fix
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Erreur serveur inattendue.";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// The submitted batch was refused
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A request parameter is missing or malformed
    #[error("{0}")]
    BadRequest(String),

    /// Anything else; the detail is logged, never returned
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Unexpected server error");
                (StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_ERROR_MESSAGE.to_string())
            }
        };

        let body = ErrorResponse {
            success: false,
            message,
        };

        (status, Json(body)).into_response()
    }
}
