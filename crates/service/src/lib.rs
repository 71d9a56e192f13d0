//! Service layer: business rules for user registration and login.
//! - Password hashing and request validation live here, independent of the web framework.
//! - `users` defines the repository contract with SeaORM and in-memory implementations.
//! - `auth` orchestrates both into the login/register workflows.

pub mod password;
pub mod validation;
pub mod users;
pub mod auth;
#[cfg(test)]
pub mod test_support;
