//! Response envelope: every body has exactly one top-level key,
//! `data` on success or `errors` on failure.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use service::validation::ValidationErrors;

#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self { Self { data } }
}

impl<T: Serialize> IntoResponse for DataEnvelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub errors: ErrorBody,
}

/// `{"message": ...}` for failures that are not tied to a field,
/// otherwise the field map.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Message { message: String },
    Fields(ValidationErrors),
}

impl ErrorEnvelope {
    pub fn message(message: impl Into<String>) -> Self {
        Self { errors: ErrorBody::Message { message: message.into() } }
    }

    pub fn fields(errors: ValidationErrors) -> Self {
        Self { errors: ErrorBody::Fields(errors) }
    }
}
