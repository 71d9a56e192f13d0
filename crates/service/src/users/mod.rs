//! User entity, its repository contract and the storage backends.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod repo;

pub use domain::{NewUser, PreparedUser, User, UserView};
pub use errors::{RepositoryError, UniqueField};
pub use repository::UserRepository;
