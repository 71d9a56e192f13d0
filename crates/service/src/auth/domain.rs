use uuid::Uuid;

use crate::users::{NewUser, User};

/// Login input
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Registration input; `password` is plaintext until the repository hashes it.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub name: String,
    pub password: String,
}

impl From<RegisterInput> for NewUser {
    fn from(input: RegisterInput) -> Self {
        NewUser { username: input.username, email: input.email, name: input.name, password: input.password }
    }
}

/// Login result. The token is an opaque placeholder, not a verifiable session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

pub fn placeholder_token() -> String {
    Uuid::new_v4().simple().to_string()
}
