use async_trait::async_trait;

use super::domain::{NewUser, User};
use super::errors::RepositoryError;

/// Persistence contract for the user table.
///
/// Lookups return `Ok(None)` for absent (or soft-deleted) users; `Err` means
/// the lookup itself failed. `create` hashes the password via
/// [`NewUser::prepare`] before writing. `update` writes the given fields
/// verbatim (empty strings are left untouched) and never hashes: callers
/// changing a password must store a hash themselves.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn by_id(&self, id: i32) -> Result<Option<User>, RepositoryError>;
    async fn by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
    async fn by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;
    async fn update(&self, user: &User) -> Result<User, RepositoryError>;
    /// Soft delete.
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
    async fn hard_delete(&self, id: i32) -> Result<(), RepositoryError>;
}

/// In-memory repository for tests and doc examples.
pub mod mock {
    use super::*;
    use super::super::errors::UniqueField;
    use chrono::Utc;
    use tokio::sync::Mutex;

    struct Row {
        user: User,
        deleted: bool,
    }

    #[derive(Default)]
    struct Table {
        next_id: i32,
        rows: Vec<Row>,
    }

    impl Table {
        /// Unique checks include soft-deleted rows, as a database constraint would.
        fn conflict(&self, except_id: Option<i32>, username: &str, email: &str) -> Option<UniqueField> {
            let others = self.rows.iter().filter(|r| Some(r.user.id) != except_id);
            for row in others {
                if row.user.email == email {
                    return Some(UniqueField::Email);
                }
                if row.user.username == username {
                    return Some(UniqueField::Username);
                }
            }
            None
        }

        fn live(&self) -> impl Iterator<Item = &User> {
            self.rows.iter().filter(|r| !r.deleted).map(|r| &r.user)
        }
    }

    #[derive(Default)]
    pub struct MockUserRepository {
        table: Mutex<Table>,
    }

    impl MockUserRepository {
        /// Number of users not soft-deleted.
        pub async fn count(&self) -> usize {
            self.table.lock().await.live().count()
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
            Ok(self.table.lock().await.live().find(|u| u.id == id).cloned())
        }

        async fn by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
            Ok(self.table.lock().await.live().find(|u| u.username == username).cloned())
        }

        async fn by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
            Ok(self.table.lock().await.live().find(|u| u.email == email).cloned())
        }

        async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
            let prepared = user.prepare()?;
            let mut table = self.table.lock().await;
            if let Some(field) = table.conflict(None, &prepared.username, &prepared.email) {
                return Err(RepositoryError::Conflict(field));
            }
            table.next_id += 1;
            let now = Utc::now().into();
            let user = User {
                id: table.next_id,
                username: prepared.username,
                email: prepared.email,
                name: prepared.name,
                password_hash: prepared.password_hash,
                created_at: now,
                updated_at: now,
            };
            table.rows.push(Row { user: user.clone(), deleted: false });
            Ok(user)
        }

        async fn update(&self, user: &User) -> Result<User, RepositoryError> {
            let mut table = self.table.lock().await;
            let current = table
                .live()
                .find(|u| u.id == user.id)
                .cloned()
                .ok_or(RepositoryError::NotFound)?;
            let pick = |new: &str, old: &str| if new.is_empty() { old.to_string() } else { new.to_string() };
            let merged = User {
                username: pick(&user.username, &current.username),
                email: pick(&user.email, &current.email),
                name: pick(&user.name, &current.name),
                password_hash: pick(&user.password_hash, &current.password_hash),
                updated_at: Utc::now().into(),
                ..current
            };
            if let Some(field) = table.conflict(Some(merged.id), &merged.username, &merged.email) {
                return Err(RepositoryError::Conflict(field));
            }
            if let Some(row) = table.rows.iter_mut().find(|r| r.user.id == merged.id) {
                row.user = merged.clone();
            }
            Ok(merged)
        }

        async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
            let mut table = self.table.lock().await;
            let row = table
                .rows
                .iter_mut()
                .find(|r| r.user.id == id && !r.deleted)
                .ok_or(RepositoryError::NotFound)?;
            row.deleted = true;
            Ok(())
        }

        async fn hard_delete(&self, id: i32) -> Result<(), RepositoryError> {
            let mut table = self.table.lock().await;
            let before = table.rows.len();
            table.rows.retain(|r| r.user.id != id);
            if table.rows.len() == before {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn jane() -> NewUser {
            NewUser { username: "jane".into(), email: "jane@example.com".into(), name: "Jane Doe".into(), password: "secret".into() }
        }

        #[tokio::test]
        async fn create_hashes_and_enforces_uniqueness() {
            let repo = MockUserRepository::default();
            let created = repo.create(jane()).await.unwrap();
            assert!(created.check_password("secret"));
            assert_ne!(created.password_hash, "secret");

            let mut dup = jane();
            dup.username = "other".into();
            assert!(matches!(repo.create(dup).await, Err(RepositoryError::Conflict(UniqueField::Email))));

            let mut dup = jane();
            dup.email = "other@example.com".into();
            assert!(matches!(repo.create(dup).await, Err(RepositoryError::Conflict(UniqueField::Username))));
            assert_eq!(repo.count().await, 1);
        }

        #[tokio::test]
        async fn update_skips_empty_fields_and_keeps_hash() {
            let repo = MockUserRepository::default();
            let created = repo.create(jane()).await.unwrap();
            let mut changed = created.clone();
            changed.username = String::new();
            changed.name = "Mary Jane Doe".into();
            let updated = repo.update(&changed).await.unwrap();
            assert_eq!(updated.username, "jane");
            assert_eq!(updated.name, "Mary Jane Doe");
            assert!(updated.check_password("secret"));
        }

        #[tokio::test]
        async fn soft_deleted_users_are_invisible() {
            let repo = MockUserRepository::default();
            let created = repo.create(jane()).await.unwrap();
            repo.delete(created.id).await.unwrap();
            assert!(repo.by_id(created.id).await.unwrap().is_none());
            assert!(matches!(repo.delete(created.id).await, Err(RepositoryError::NotFound)));
            // the row still holds the unique email
            assert!(matches!(repo.create(jane()).await, Err(RepositoryError::Conflict(_))));
            repo.hard_delete(created.id).await.unwrap();
            assert!(repo.create(jane()).await.is_ok());
        }
    }
}
