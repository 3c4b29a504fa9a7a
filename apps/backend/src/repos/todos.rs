//! Todo repository. Every function takes the owner id; rows owned by anyone
//! else are invisible.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::todos_sea::{self as todos_adapter, TodoCreate, TodoUpdate};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
) -> Result<Vec<Todo>, DomainError> {
    let rows = todos_adapter::list_for_user(conn, user_id).await?;
    Ok(rows.into_iter().map(Todo::from).collect())
}

pub async fn find_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    todo_id: &str,
) -> Result<Option<Todo>, DomainError> {
    let row = todos_adapter::find_for_user(conn, user_id, todo_id).await?;
    Ok(row.map(Todo::from))
}

pub async fn create_todo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    title: &str,
    completed: bool,
) -> Result<Todo, DomainError> {
    let dto = TodoCreate {
        user_id: user_id.to_string(),
        title: title.to_string(),
        completed,
    };
    Ok(Todo::from(todos_adapter::create_todo(conn, dto).await?))
}

pub async fn update_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    todo_id: &str,
    update: TodoUpdate,
) -> Result<Option<Todo>, DomainError> {
    let row = todos_adapter::update_for_user(conn, user_id, todo_id, update).await?;
    Ok(row.map(Todo::from))
}

/// `true` when a todo was removed.
pub async fn delete_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    todo_id: &str,
) -> Result<bool, DomainError> {
    Ok(todos_adapter::delete_for_user(conn, user_id, todo_id).await? > 0)
}

pub async fn delete_all_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
) -> Result<u64, DomainError> {
    Ok(todos_adapter::delete_all_for_user(conn, user_id).await?)
}

impl From<crate::entities::todos::Model> for Todo {
    fn from(model: crate::entities::todos::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            completed: model.completed,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
