use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Select, Set};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Column values to overwrite; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct Changes {
    pub username: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub password_hash: Option<String>,
}

/// Rows that have not been soft-deleted.
fn live() -> Select<Entity> {
    Entity::find().filter(Column::DeletedAt.is_null())
}

pub async fn create(
    db: &DatabaseConnection,
    username: &str,
    email: &str,
    name: &str,
    password_hash: &str,
) -> Result<Model, ModelError> {
    if password_hash.trim().is_empty() {
        return Err(ModelError::Validation("password hash required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        name: Set(name.to_string()),
        password_hash: Set(password_hash.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(live().filter(Column::Id.eq(id)).one(db).await?)
}

pub async fn find_by_username(db: &DatabaseConnection, username: &str) -> Result<Option<Model>, ModelError> {
    Ok(live().filter(Column::Username.eq(username)).one(db).await?)
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, ModelError> {
    Ok(live().filter(Column::Email.eq(email)).one(db).await?)
}

pub async fn update(db: &DatabaseConnection, id: i32, changes: Changes) -> Result<Model, ModelError> {
    let mut am: ActiveModel = find_by_id(db, id).await?.ok_or(ModelError::NotFound)?.into();
    if let Some(username) = changes.username {
        am.username = Set(username);
    }
    if let Some(email) = changes.email {
        am.email = Set(email);
    }
    if let Some(name) = changes.name {
        am.name = Set(name);
    }
    if let Some(hash) = changes.password_hash {
        am.password_hash = Set(hash);
    }
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await?)
}

pub async fn soft_delete(db: &DatabaseConnection, id: i32) -> Result<(), ModelError> {
    let mut found: ActiveModel = find_by_id(db, id).await?.ok_or(ModelError::NotFound)?.into();
    found.deleted_at = Set(Some(Utc::now().into()));
    found.update(db).await?;
    Ok(())
}

pub async fn hard_delete(db: &DatabaseConnection, id: i32) -> Result<(), ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ModelError::NotFound);
    }
    Ok(())
}
