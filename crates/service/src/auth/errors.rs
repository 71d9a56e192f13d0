use thiserror::Error;

use crate::users::{RepositoryError, UniqueField};

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username and wrong password are deliberately the same error.
    #[error("invalid username or password")]
    Unauthorized,
    #[error("email already exists")]
    EmailTaken,
    #[error("username already exists")]
    UsernameTaken,
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Unauthorized => 1004,
            AuthError::EmailTaken => 1002,
            AuthError::UsernameTaken => 1003,
            AuthError::Repository(_) => 1200,
        }
    }
}

impl From<RepositoryError> for AuthError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Conflict(UniqueField::Email) => AuthError::EmailTaken,
            RepositoryError::Conflict(UniqueField::Username) => AuthError::UsernameTaken,
            other => AuthError::Repository(other),
        }
    }
}
