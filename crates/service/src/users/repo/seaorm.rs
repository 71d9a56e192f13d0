use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::user;

use crate::users::domain::{NewUser, User};
use crate::users::errors::RepositoryError;
use crate::users::repository::UserRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_domain(m: user::Model) -> User {
    User {
        id: m.id,
        username: m.username,
        email: m.email,
        name: m.name,
        password_hash: m.password_hash,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        Ok(user::find_by_id(&self.db, id).await?.map(to_domain))
    }

    async fn by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(user::find_by_username(&self.db, username).await?.map(to_domain))
    }

    async fn by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(user::find_by_email(&self.db, email).await?.map(to_domain))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let prepared = new_user.prepare()?;
        let created = user::create(
            &self.db,
            &prepared.username,
            &prepared.email,
            &prepared.name,
            &prepared.password_hash,
        )
        .await?;
        Ok(to_domain(created))
    }

    async fn update(&self, u: &User) -> Result<User, RepositoryError> {
        let changes = user::Changes {
            username: non_empty(&u.username),
            email: non_empty(&u.email),
            name: non_empty(&u.name),
            password_hash: non_empty(&u.password_hash),
        };
        Ok(to_domain(user::update(&self.db, u.id, changes).await?))
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        Ok(user::soft_delete(&self.db, id).await?)
    }

    async fn hard_delete(&self, id: i32) -> Result<(), RepositoryError> {
        Ok(user::hard_delete(&self.db, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use crate::users::errors::UniqueField;

    fn jdoe() -> NewUser {
        NewUser { username: "jdoe".into(), email: "jdoe@example.com".into(), name: "John Doe".into(), password: "secret".into() }
    }

    async fn repo() -> Result<SeaOrmUserRepository, anyhow::Error> {
        Ok(SeaOrmUserRepository::new(get_db().await?))
    }

    #[tokio::test]
    async fn create_hashes_before_write() -> Result<(), anyhow::Error> {
        let repo = repo().await?;
        let created = repo.create(jdoe()).await?;
        assert!(created.id > 0);

        let stored = user::find_by_id(&repo.db, created.id).await?.expect("row");
        assert_ne!(stored.password_hash, "secret");
        assert!(created.check_password("secret"));
        assert!(!created.check_password("wrongpassword"));
        Ok(())
    }

    #[tokio::test]
    async fn lookups_return_the_same_user() -> Result<(), anyhow::Error> {
        let repo = repo().await?;
        let created = repo.create(jdoe()).await?;

        let by_id = repo.by_id(created.id).await?.expect("by id");
        let by_username = repo.by_username("jdoe").await?.expect("by username");
        let by_email = repo.by_email("jdoe@example.com").await?.expect("by email");
        for found in [&by_id, &by_username, &by_email] {
            assert_eq!(found.view(), created.view());
            assert_ne!(found.password_hash, "secret");
        }
        assert!(repo.by_email("nobody@example.com").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn update_does_not_rehash_or_blank_fields() -> Result<(), anyhow::Error> {
        let repo = repo().await?;
        let created = repo.create(jdoe()).await?;

        let mut changed = created.clone();
        changed.username = String::new();
        changed.name = "Mary Jane Doe".into();
        let updated = repo.update(&changed).await?;
        assert_eq!(updated.username, "jdoe");
        assert_eq!(updated.name, "Mary Jane Doe");
        assert_eq!(updated.password_hash, created.password_hash);
        assert!(updated.check_password("secret"));

        // a plaintext written through update is stored as given
        let mut raw = updated.clone();
        raw.password_hash = "plain".into();
        let stored = repo.update(&raw).await?;
        assert_eq!(stored.password_hash, "plain");
        Ok(())
    }

    #[tokio::test]
    async fn unique_constraints_surface_as_conflicts() -> Result<(), anyhow::Error> {
        let repo = repo().await?;
        repo.create(jdoe()).await?;

        let mut same_email = jdoe();
        same_email.username = "other".into();
        assert!(matches!(repo.create(same_email).await, Err(RepositoryError::Conflict(UniqueField::Email))));

        let mut same_username = jdoe();
        same_username.email = "other@example.com".into();
        assert!(matches!(repo.create(same_username).await, Err(RepositoryError::Conflict(UniqueField::Username))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_soft_then_hard() -> Result<(), anyhow::Error> {
        let repo = repo().await?;
        let created = repo.create(jdoe()).await?;

        repo.delete(created.id).await?;
        assert!(repo.by_username("jdoe").await?.is_none());
        assert!(matches!(repo.update(&created).await, Err(RepositoryError::NotFound)));

        repo.hard_delete(created.id).await?;
        assert!(matches!(repo.hard_delete(created.id).await, Err(RepositoryError::NotFound)));
        Ok(())
    }
}
