use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::{ServiceError, ValidationErrors};
use thiserror::Error;
use tracing::{error, warn};

/// Boundary error for HTTP handlers and middleware.
/// Internal details are logged, never returned to the client.
#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationErrors),
    BadRequest(String),
    NotFound(String),
    Unauthorized(&'static str),
    TooManyRequests,
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::ValidationFailed(errors) => ApiError::Validation(errors),
            ServiceError::NotFound(msg) => ApiError::NotFound(msg),
            ServiceError::InvalidArgument(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                warn!(%errors, "validation error");
                (StatusCode::BAD_REQUEST, Json(serde_json::json!({"error": "Validation Error", "errors": errors}))).into_response()
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, Json(serde_json::json!({"error": msg}))).into_response(),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, Json(serde_json::json!({"error": msg}))).into_response(),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, Json(serde_json::json!({"error": msg}))).into_response(),
            ApiError::TooManyRequests => {
                (StatusCode::TOO_MANY_REQUESTS, Json(serde_json::json!({"error": "Too Many Requests"}))).into_response()
            }
            ApiError::Internal(detail) => {
                error!(error = %detail, "unhandled error");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({"error": "Internal Server Error"}))).into_response()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
