use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::session_user::SessionUser;
use crate::extractors::validated_json::ValidatedJson;
use crate::services::todos;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub inserted_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearedResponse {
    pub deleted: u64,
}

async fn list(user: SessionUser, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let items = todos::list(&state, user.user_id()).await?;
    Ok(HttpResponse::Ok().json(items))
}

async fn create(
    user: SessionUser,
    body: ValidatedJson<CreateTodoRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let todo = todos::create(&state, user.user_id(), &body.title, body.completed).await?;
    Ok(HttpResponse::Created().json(CreatedResponse {
        inserted_id: todo.id,
    }))
}

async fn get_one(
    user: SessionUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let todo = todos::get(&state, user.user_id(), &path).await?;
    Ok(HttpResponse::Ok().json(todo))
}

async fn update(
    user: SessionUser,
    path: web::Path<String>,
    body: ValidatedJson<UpdateTodoRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let todo = todos::update(
        &state,
        user.user_id(),
        &path,
        body.title.as_deref(),
        body.completed,
    )
    .await?;
    Ok(HttpResponse::Ok().json(todo))
}

async fn delete_one(
    user: SessionUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    todos::delete(&state, user.user_id(), &path).await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn clear(user: SessionUser, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let deleted = todos::clear(&state, user.user_id()).await?;
    Ok(HttpResponse::Ok().json(ClearedResponse { deleted }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list))
            .route(web::post().to(create))
            .route(web::delete().to(clear)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_one))
            .route(web::patch().to(update))
            .route(web::delete().to(delete_one)),
    );
}
