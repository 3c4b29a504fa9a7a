use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use time::OffsetDateTime;
use tracing::{error, warn};

use crate::auth::claims::Claims;
use crate::auth::cookies::TOKEN_COOKIE;
use crate::auth::session::{validate_session, SessionRejection};
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::trace_ctx;

/// Caller identity taken from a verified session token.
///
/// Rejection happens during extraction, so a handler that takes `SessionUser`
/// never runs (and never reaches storage) for an invalid session.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub claims: Claims,
}

impl SessionUser {
    /// Owner id for every storage query made on the caller's behalf.
    pub fn user_id(&self) -> &str {
        &self.claims.sub
    }
}

impl FromRequest for SessionUser {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        std::future::ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<SessionUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not found"))?;

    let cookie = req.cookie(TOKEN_COOKIE);
    let token = cookie.as_ref().map(|c| c.value());

    match validate_session(token, OffsetDateTime::now_utc(), &state.security) {
        Ok(claims) => Ok(SessionUser { claims }),
        Err(rejection) => {
            let trace_id = trace_ctx::trace_id();
            match rejection {
                SessionRejection::Internal => {
                    error!(trace_id = %trace_id, kind = rejection.as_str(), path = %req.path(), "session rejected");
                }
                _ => {
                    warn!(trace_id = %trace_id, kind = rejection.as_str(), path = %req.path(), "session rejected");
                }
            }
            Err(rejection.into())
        }
    }
}
