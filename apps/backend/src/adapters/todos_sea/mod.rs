//! SeaORM adapter for todo repository. Every query is filtered by owner.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::todos;

pub mod dto;

pub use dto::{TodoCreate, TodoUpdate};

pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
) -> Result<Vec<todos::Model>, sea_orm::DbErr> {
    todos::Entity::find()
        .filter(todos::Column::UserId.eq(user_id))
        .order_by_asc(todos::Column::CreatedAt)
        .order_by_asc(todos::Column::Id)
        .all(conn)
        .await
}

pub async fn find_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    todo_id: &str,
) -> Result<Option<todos::Model>, sea_orm::DbErr> {
    todos::Entity::find_by_id(todo_id.to_string())
        .filter(todos::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

pub async fn create_todo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TodoCreate,
) -> Result<todos::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let todo_active = todos::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(dto.user_id),
        title: Set(dto.title),
        completed: Set(dto.completed),
        created_at: Set(now),
        updated_at: Set(now),
    };

    todo_active.insert(conn).await
}

/// Apply `dto` to the caller's todo. `Ok(None)` when no such todo is owned by `user_id`.
pub async fn update_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    todo_id: &str,
    dto: TodoUpdate,
) -> Result<Option<todos::Model>, sea_orm::DbErr> {
    let Some(existing) = find_for_user(conn, user_id, todo_id).await? else {
        return Ok(None);
    };

    let mut active: todos::ActiveModel = existing.into();
    if let Some(title) = dto.title {
        active.title = Set(title);
    }
    if let Some(completed) = dto.completed {
        active.completed = Set(completed);
    }
    active.updated_at = Set(time::OffsetDateTime::now_utc());

    active.update(conn).await.map(Some)
}

/// Rows removed (0 or 1).
pub async fn delete_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    todo_id: &str,
) -> Result<u64, sea_orm::DbErr> {
    let result = todos::Entity::delete_many()
        .filter(todos::Column::Id.eq(todo_id))
        .filter(todos::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete_all_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
) -> Result<u64, sea_orm::DbErr> {
    let result = todos::Entity::delete_many()
        .filter(todos::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
