//! Auth module: login and registration workflows over a [`UserRepository`].
//!
//! [`UserRepository`]: crate::users::UserRepository

pub mod domain;
pub mod errors;
pub mod service;

pub use errors::AuthError;
pub use service::AuthService;
