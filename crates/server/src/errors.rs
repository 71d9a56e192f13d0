use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use service::validation::ValidationErrors;

use crate::response::ErrorEnvelope;

pub const INVALID_PAYLOAD: &str = "Invalid request payload";
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Client-facing failures, each rendered into the `errors` envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Payload could not be bound; not attributable to a field.
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// Business-rule violation scoped to fields, e.g. a duplicate email.
    #[error("unprocessable: {0}")]
    Unprocessable(ValidationErrors),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_payload() -> Self {
        ApiError::BadRequest(INVALID_PAYLOAD.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) | ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest(msg) | ApiError::Forbidden(msg) => ErrorEnvelope::message(msg),
            ApiError::Validation(errors) | ApiError::Unprocessable(errors) => ErrorEnvelope::fields(errors),
            ApiError::Internal(msg) => {
                error!(error = %msg, "request failed");
                ErrorEnvelope::message(msg)
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Failures that abort process startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("schema setup failed: {0}")]
    Migration(String),
    #[error("cannot bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },
}
