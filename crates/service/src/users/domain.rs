use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::password::{self, PasswordError};

/// Stored user. `password_hash` always holds a hash, never plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl User {
    pub fn check_password(&self, plaintext: &str) -> bool {
        password::verify_password(&self.password_hash, plaintext)
    }

    /// Public view without credentials.
    pub fn view(&self) -> UserView {
        UserView { username: self.username.clone(), name: self.name.clone(), email: self.email.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub username: String,
    pub name: String,
    pub email: String,
}

/// User about to be created; `password` is still plaintext.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Row contents ready for insertion.
#[derive(Debug, Clone)]
pub struct PreparedUser {
    pub username: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

impl NewUser {
    /// Pre-persist step run by every repository `create`: replaces the
    /// plaintext password with its hash.
    pub fn prepare(self) -> Result<PreparedUser, PasswordError> {
        let password_hash = password::hash_password(&self.password)?;
        Ok(PreparedUser { username: self.username, email: self.email, name: self.name, password_hash })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(password: &str) -> NewUser {
        NewUser { username: "jdoe".into(), email: "jdoe@example.com".into(), name: "John Doe".into(), password: password.into() }
    }

    #[test]
    fn prepare_hashes_the_password() {
        let prepared = new_user("secret").prepare().unwrap();
        assert_eq!(prepared.username, "jdoe");
        assert_ne!(prepared.password_hash, "secret");
        assert!(password::verify_password(&prepared.password_hash, "secret"));
    }

    #[test]
    fn prepare_rejects_empty_password() {
        assert_eq!(new_user("").prepare().unwrap_err(), PasswordError::Empty);
    }

    #[test]
    fn view_omits_credentials() {
        let now = chrono::Utc::now().into();
        let user = User {
            id: 1,
            username: "jdoe".into(),
            email: "jdoe@example.com".into(),
            name: "John Doe".into(),
            password_hash: "$argon2id$...".into(),
            created_at: now,
            updated_at: now,
        };
        let view = user.view();
        assert_eq!(view, UserView { username: "jdoe".into(), name: "John Doe".into(), email: "jdoe@example.com".into() });
    }
}
