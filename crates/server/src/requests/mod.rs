//! Request payloads: binding from a JSON or form body, then rule-table validation.
use axum::async_trait;
use axum::extract::{FromRequest, Request as HttpRequest};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::de::DeserializeOwned;
use tracing::debug;

use service::validation::Validate;

use crate::errors::ApiError;

pub mod login;
pub mod register;

pub use login::LoginRequest;
pub use register::RegisterRequest;

/// Body bound as `application/x-www-form-urlencoded` when the content type
/// says so, as JSON otherwise. Any binding failure is a 400.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

fn is_form(req: &HttpRequest) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().starts_with("application/x-www-form-urlencoded"))
}

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: HttpRequest, state: &S) -> Result<Self, Self::Rejection> {
        let bound = if is_form(&req) {
            Form::<T>::from_request(req, state).await.map(|Form(v)| v).map_err(|e| e.body_text())
        } else {
            Json::<T>::from_request(req, state).await.map(|Json(v)| v).map_err(|e| e.body_text())
        };
        match bound {
            Ok(value) => Ok(Payload(value)),
            Err(reason) => {
                debug!(error = %reason, "payload rejected");
                Err(ApiError::invalid_payload())
            }
        }
    }
}

/// A payload that passed its rule table.
#[derive(Debug, Clone)]
pub struct Valid<T>(T);

impl<T> Valid<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

pub trait Request: Validate + DeserializeOwned + Sized {
    fn validated(self) -> Result<Valid<Self>, ApiError> {
        self.validate().map_err(ApiError::Validation)?;
        Ok(Valid(self))
    }
}
