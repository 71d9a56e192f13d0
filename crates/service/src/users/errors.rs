use std::fmt;

use models::errors::ModelError;
use thiserror::Error;

use crate::password::PasswordError;

/// Column guarded by a unique constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
}

impl UniqueField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UniqueField::Username => "username",
            UniqueField::Email => "email",
        }
    }

    /// Recover the column from a backend's unique-violation message,
    /// e.g. `UNIQUE constraint failed: users.email` or `... "users_username_key"`.
    pub fn from_constraint_message(msg: &str) -> Option<Self> {
        let lower = msg.to_lowercase();
        if lower.contains("email") {
            Some(UniqueField::Email)
        } else if lower.contains("username") {
            Some(UniqueField::Username)
        } else {
            None
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0} already exists")]
    Conflict(UniqueField),
    #[error("user not found")]
    NotFound,
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("storage error: {0}")]
    Io(String),
}

impl From<ModelError> for RepositoryError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::UniqueViolation(msg) => match UniqueField::from_constraint_message(&msg) {
                Some(field) => RepositoryError::Conflict(field),
                None => RepositoryError::Io(msg),
            },
            ModelError::NotFound => RepositoryError::NotFound,
            ModelError::Validation(msg) | ModelError::Db(msg) => RepositoryError::Io(msg),
        }
    }
}
