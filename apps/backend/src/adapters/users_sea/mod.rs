//! SeaORM adapter for user repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::users;

pub mod dto;

pub use dto::UserCreate;

// Adapter functions return DbErr; repos layer maps to DomainError.

pub async fn count_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<u64, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .count(conn)
        .await
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(id.to_string()).one(conn).await
}

/// Insert a user with a fresh UUID. A duplicate email surfaces as the
/// database's unique-violation error.
pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let user_active = users::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(dto.name),
        email: Set(dto.email),
        password_hash: Set(dto.password_hash),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    user_active.insert(conn).await
}
