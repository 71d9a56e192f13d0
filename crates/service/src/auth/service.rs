use std::sync::{Arc, OnceLock};

use tracing::{debug, info, instrument, warn};

use super::domain::{placeholder_token, AuthSession, LoginInput, RegisterInput};
use super::errors::AuthError;
use crate::password;
use crate::users::{User, UserRepository};

/// Hash checked when the username does not exist, so both rejection paths
/// cost one verification.
fn decoy_hash() -> &'static str {
    static DECOY: OnceLock<String> = OnceLock::new();
    DECOY.get_or_init(|| password::hash_password("decoy-password").unwrap_or_default())
}

/// Auth business service independent of web framework
pub struct AuthService<R: UserRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub fn repository(&self) -> &Arc<R> { &self.repo }

    /// Register a new user. The repository hashes the password on create.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, domain::RegisterInput};
    /// use service::users::repository::mock::MockUserRepository;
    /// let svc = AuthService::new(Arc::new(MockUserRepository::default()));
    /// let input = RegisterInput { username: "alice".into(), email: "alice@x.io".into(), name: "Alice".into(), password: "secret1".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.username, "alice");
    /// assert_ne!(user.password_hash, "secret1");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username, email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<User, AuthError> {
        if let Some(existing) = self.repo.by_email(&input.email).await? {
            debug!(user_id = existing.id, "email already registered");
            return Err(AuthError::EmailTaken);
        }
        // The pre-check is advisory; a concurrent insert is caught by the
        // unique constraint and converted into the same error.
        let user = self.repo.create(input.into()).await?;
        info!(user_id = user.id, "user_registered");
        Ok(user)
    }

    /// Authenticate a user and hand out a placeholder token.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, AuthError, domain::{LoginInput, RegisterInput}};
    /// use service::users::repository::mock::MockUserRepository;
    /// let svc = AuthService::new(Arc::new(MockUserRepository::default()));
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { username: "alice".into(), email: "alice@x.io".into(), name: "Alice".into(), password: "secret1".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { username: "alice".into(), password: "secret1".into() })).unwrap();
    /// assert!(!session.token.is_empty());
    /// let denied = tokio_test::block_on(svc.login(LoginInput { username: "alice".into(), password: "nope".into() }));
    /// assert!(matches!(denied, Err(AuthError::Unauthorized)));
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let found = self.repo.by_username(&input.username).await?;
        let verified = match &found {
            Some(user) => user.check_password(&input.password),
            None => {
                let _ = password::verify_password(decoy_hash(), &input.password);
                false
            }
        };
        match found {
            Some(user) if verified => {
                info!(user_id = user.id, "login_succeeded");
                Ok(AuthSession { user, token: placeholder_token() })
            }
            _ => {
                warn!("login_rejected");
                Err(AuthError::Unauthorized)
            }
        }
    }
}
