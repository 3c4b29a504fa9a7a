//! Task service. The owner id always comes from the verified session.

use crate::adapters::todos_sea::TodoUpdate;
use crate::error::AppError;
use crate::errors::domain::NotFoundKind;
use crate::errors::{DomainError, ErrorCode};
use crate::infra::db::with_timeout;
use crate::repos::todos::{self as todos_repo, Todo};
use crate::state::app_state::AppState;

pub const MAX_TITLE_LEN: usize = 500;

fn clean_title(raw: &str) -> Result<String, AppError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "Title cannot be empty",
        ));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            format!("Title must be at most {MAX_TITLE_LEN} characters"),
        ));
    }
    Ok(title.to_string())
}

fn todo_not_found(todo_id: &str) -> AppError {
    DomainError::not_found(NotFoundKind::Todo, format!("Todo {todo_id} not found")).into()
}

pub async fn list(state: &AppState, owner: &str) -> Result<Vec<Todo>, AppError> {
    let db = state.require_db()?;
    Ok(with_timeout(state.db_timeout, todos_repo::list_for_user(db, owner)).await?)
}

pub async fn get(state: &AppState, owner: &str, todo_id: &str) -> Result<Todo, AppError> {
    let db = state.require_db()?;
    with_timeout(state.db_timeout, todos_repo::find_for_user(db, owner, todo_id))
        .await?
        .ok_or_else(|| todo_not_found(todo_id))
}

pub async fn create(
    state: &AppState,
    owner: &str,
    title: &str,
    completed: bool,
) -> Result<Todo, AppError> {
    let title = clean_title(title)?;
    let db = state.require_db()?;
    Ok(with_timeout(
        state.db_timeout,
        todos_repo::create_todo(db, owner, &title, completed),
    )
    .await?)
}

pub async fn update(
    state: &AppState,
    owner: &str,
    todo_id: &str,
    title: Option<&str>,
    completed: Option<bool>,
) -> Result<Todo, AppError> {
    let update = TodoUpdate {
        title: title.map(clean_title).transpose()?,
        completed,
    };
    if update.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "Nothing to update",
        ));
    }

    let db = state.require_db()?;
    with_timeout(
        state.db_timeout,
        todos_repo::update_for_user(db, owner, todo_id, update),
    )
    .await?
    .ok_or_else(|| todo_not_found(todo_id))
}

pub async fn delete(state: &AppState, owner: &str, todo_id: &str) -> Result<(), AppError> {
    let db = state.require_db()?;
    let removed = with_timeout(
        state.db_timeout,
        todos_repo::delete_for_user(db, owner, todo_id),
    )
    .await?;
    if removed {
        Ok(())
    } else {
        Err(todo_not_found(todo_id))
    }
}

pub async fn clear(state: &AppState, owner: &str) -> Result<u64, AppError> {
    let db = state.require_db()?;
    Ok(with_timeout(state.db_timeout, todos_repo::delete_all_for_user(db, owner)).await?)
}
