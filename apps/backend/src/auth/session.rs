//! Session gate run before any protected handler touches storage.

use thiserror::Error;
use time::OffsetDateTime;

use super::claims::Claims;
use super::jwt::{decode_session_token, TokenError};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::security_config::SecurityConfig;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionRejection {
    /// No usable session: carrier missing/empty or token expired
    #[error("unauthenticated")]
    Unauthenticated,
    /// Token present but its signature does not verify
    #[error("unauthorized")]
    Unauthorized,
    /// Token present but could not be processed at all
    #[error("session could not be processed")]
    Internal,
}

impl SessionRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionRejection::Unauthenticated => "unauthenticated",
            SessionRejection::Unauthorized => "unauthorized",
            SessionRejection::Internal => "internal",
        }
    }
}

impl From<TokenError> for SessionRejection {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Expired => SessionRejection::Unauthenticated,
            TokenError::BadSignature => SessionRejection::Unauthorized,
            TokenError::Malformed => SessionRejection::Internal,
        }
    }
}

/// Both 401 kinds render identically; only logs tell them apart.
impl From<SessionRejection> for AppError {
    fn from(r: SessionRejection) -> Self {
        match r {
            SessionRejection::Unauthenticated | SessionRejection::Unauthorized => {
                AppError::unauthorized()
            }
            SessionRejection::Internal => {
                AppError::internal_with_code(ErrorCode::SessionError, "undecodable session token")
            }
        }
    }
}

/// Validate the token carried by the request, if any.
pub fn validate_session(
    carrier_token: Option<&str>,
    now: OffsetDateTime,
    security: &SecurityConfig,
) -> Result<Claims, SessionRejection> {
    let token = match carrier_token {
        Some(t) if !t.is_empty() => t,
        _ => return Err(SessionRejection::Unauthenticated),
    };

    decode_session_token(token, now, security).map_err(SessionRejection::from)
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use time::macros::datetime;
    use time::Duration;

    use super::*;
    use crate::auth::jwt::mint_session_token;

    const NOW: OffsetDateTime = datetime!(2025-06-01 12:00:00 UTC);

    #[test]
    fn missing_or_empty_carrier_is_unauthenticated() {
        let security = SecurityConfig::new("s");
        assert_eq!(
            validate_session(None, NOW, &security),
            Err(SessionRejection::Unauthenticated)
        );
        assert_eq!(
            validate_session(Some(""), NOW, &security),
            Err(SessionRejection::Unauthenticated)
        );
    }

    #[test]
    fn valid_token_yields_claims() {
        let security = SecurityConfig::new("s");
        let minted = mint_session_token("user-1", Duration::minutes(5), NOW, &security).unwrap();

        let claims = validate_session(Some(&minted.token), NOW, &security).unwrap();
        assert_eq!(claims.sub, "user-1");
    }

    #[test]
    fn expired_is_unauthenticated() {
        let security = SecurityConfig::new("s");
        let minted = mint_session_token("user-1", Duration::seconds(-1), NOW, &security).unwrap();

        assert_eq!(
            validate_session(Some(&minted.token), NOW, &security),
            Err(SessionRejection::Unauthenticated)
        );
    }

    #[test]
    fn forged_is_unauthorized() {
        let minted =
            mint_session_token("user-1", Duration::minutes(5), NOW, &SecurityConfig::new("a"))
                .unwrap();

        assert_eq!(
            validate_session(Some(&minted.token), NOW, &SecurityConfig::new("b")),
            Err(SessionRejection::Unauthorized)
        );
    }

    #[test]
    fn undecodable_is_internal() {
        assert_eq!(
            validate_session(Some("garbage"), NOW, &SecurityConfig::new("s")),
            Err(SessionRejection::Internal)
        );
    }

    #[test]
    fn both_401_kinds_render_the_same() {
        let a = AppError::from(SessionRejection::Unauthenticated);
        let b = AppError::from(SessionRejection::Unauthorized);
        assert_eq!(a.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(a.status(), b.status());
        assert_eq!(a.code(), b.code());
        assert_eq!(a.to_string(), b.to_string());

        let c = AppError::from(SessionRejection::Internal);
        assert_eq!(c.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(c.code(), ErrorCode::SessionError);
    }
}
