use std::sync::Arc;

use axum::extract::State;
use serde::Serialize;
use tracing::{error, warn};

use service::auth::{AuthError, AuthService};
use service::users::{UserRepository, UserView};
use service::validation::ValidationErrors;

use crate::errors::{ApiError, INTERNAL_ERROR, INVALID_CREDENTIALS};
use crate::requests::{LoginRequest, Payload, RegisterRequest, Request};
use crate::response::DataEnvelope;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<dyn UserRepository>>,
    /// Whether internal failure details reach the client; off in production.
    pub expose_internal_errors: bool,
}

impl AppState {
    pub fn new(repo: Arc<dyn UserRepository>, production: bool) -> Self {
        Self { auth: Arc::new(AuthService::new(repo)), expose_internal_errors: !production }
    }

    fn map_auth_error(&self, err: AuthError) -> ApiError {
        let code = err.code();
        match err {
            AuthError::Unauthorized => ApiError::Forbidden(INVALID_CREDENTIALS.into()),
            AuthError::EmailTaken => {
                ApiError::Unprocessable(ValidationErrors::single("email", "The email already exists"))
            }
            AuthError::UsernameTaken => {
                ApiError::Unprocessable(ValidationErrors::single("username", "The username already exists"))
            }
            AuthError::Repository(inner) => {
                error!(code, error = %inner, "auth repository failure");
                if self.expose_internal_errors {
                    ApiError::Internal(inner.to_string())
                } else {
                    ApiError::Internal(INTERNAL_ERROR.into())
                }
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenOutput {
    pub token: String,
}

pub async fn login(
    State(state): State<AppState>,
    Payload(req): Payload<LoginRequest>,
) -> Result<DataEnvelope<TokenOutput>, ApiError> {
    let req = req.validated()?;
    let session = state.auth.login(req.into_inner().into()).await.map_err(|e| state.map_auth_error(e))?;
    Ok(DataEnvelope::new(TokenOutput { token: session.token }))
}

pub async fn register(
    State(state): State<AppState>,
    Payload(req): Payload<RegisterRequest>,
) -> Result<DataEnvelope<UserView>, ApiError> {
    let req = req.validated()?;
    let user = state.auth.register(req.into_inner().into()).await.map_err(|e| {
        if !matches!(e, AuthError::Repository(_)) {
            warn!(code = e.code(), "registration refused");
        }
        state.map_auth_error(e)
    })?;
    Ok(DataEnvelope::new(user.view()))
}
