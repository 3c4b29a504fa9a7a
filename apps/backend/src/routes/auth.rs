use actix_web::{web, HttpRequest, HttpResponse, HttpResponseBuilder};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, error};

use crate::auth::cookies::{cleared_cookies, identity_cookies, session_cookies, TOKEN_COOKIE};
use crate::auth::jwt::mint_session_token;
use crate::auth::renewal::{should_renew, Renewal};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::session_user::SessionUser;
use crate::extractors::validated_json::ValidatedJson;
use crate::repos::users::User;
use crate::services::users::{self, NewAccount};
use crate::state::app_state::AppState;
use crate::trace_ctx;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

fn set_fresh_session(
    resp: &mut HttpResponseBuilder,
    user: &User,
    state: &AppState,
    now: OffsetDateTime,
) -> Result<(), AppError> {
    let minted = mint_session_token(&user.id, state.security.session_ttl, now, &state.security)?;
    for cookie in session_cookies(&minted, &user.id, &user.name) {
        resp.cookie(cookie);
    }
    Ok(())
}

async fn signup(
    body: ValidatedJson<SignupRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let account = NewAccount::parse(&body.name, &body.email, &body.password)?;
    let user = users::register(&state, account).await?;

    let mut resp = HttpResponse::Created();
    set_fresh_session(&mut resp, &user, &state, OffsetDateTime::now_utc())?;

    Ok(resp.json(AuthResponse {
        message: "Registration successful".to_string(),
        user_id: user.id,
    }))
}

/// Check credentials, then reuse the presented session unless it is close to
/// lapsing or belongs to someone else.
async fn login(
    req: HttpRequest,
    body: ValidatedJson<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = users::authenticate(&state, &body.email, &body.password).await?;

    let now = OffsetDateTime::now_utc();
    let cookie = req.cookie(TOKEN_COOKIE);
    let renewal = should_renew(cookie.as_ref().map(|c| c.value()), now, &state.security)
        .map_err(|e| {
            error!(trace_id = %trace_ctx::trace_id(), user_id = %user.id, error = %e, "renewal check failed");
            AppError::internal_with_code(ErrorCode::SessionError, e.to_string())
        })?;

    let mut resp = HttpResponse::Ok();
    match renewal {
        Renewal {
            renew: false,
            current_expiry: Some(expires_at),
            subject: Some(subject),
        } if subject == user.id => {
            debug!(user_id = %user.id, "session kept");
            for cookie in identity_cookies(&user.id, &user.name, expires_at) {
                resp.cookie(cookie);
            }
        }
        _ => {
            debug!(user_id = %user.id, "session issued");
            set_fresh_session(&mut resp, &user, &state, now)?;
        }
    }

    Ok(resp.json(AuthResponse {
        message: "Login successful".to_string(),
        user_id: user.id,
    }))
}

async fn logout() -> HttpResponse {
    let mut resp = HttpResponse::NoContent();
    for cookie in cleared_cookies() {
        resp.cookie(cookie);
    }
    resp.finish()
}

async fn session(user: SessionUser) -> Result<HttpResponse, AppError> {
    let expires_at = user
        .claims
        .expires_at()
        .ok_or_else(|| AppError::internal_with_code(ErrorCode::SessionError, "expiry out of range"))?;

    Ok(HttpResponse::Ok().json(SessionResponse {
        user_id: user.claims.sub,
        expires_at,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/signup", web::post().to(signup))
        .route("/login", web::post().to(login))
        .route("/logout", web::post().to(logout))
        .route("/session", web::get().to(session));
}
