//! One-way salted password hashing (argon2).
use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use rand::rngs::OsRng;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("password must not be empty")]
    Empty,
    #[error("hashing error: {0}")]
    Hash(String),
}

/// Hash `plaintext` with a fresh random salt. The salt and parameters are
/// embedded in the returned PHC string, so equal inputs give different outputs.
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    if plaintext.is_empty() {
        return Err(PasswordError::Empty);
    }
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check `plaintext` against a stored hash. A malformed hash yields `false`.
pub fn verify_password(hash: &str, plaintext: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(plaintext.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}
