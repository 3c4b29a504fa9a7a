//! Sliding renewal: reissue the session token once it is close to lapsing.

use time::OffsetDateTime;

use super::jwt::{verify_signature, TokenError};
use crate::state::security_config::SecurityConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renewal {
    pub renew: bool,
    /// Expiry of the presented token when it is authentic
    pub current_expiry: Option<OffsetDateTime>,
    /// Subject of the presented token when it is authentic
    pub subject: Option<String>,
}

impl Renewal {
    fn fresh() -> Self {
        Self {
            renew: true,
            current_expiry: None,
            subject: None,
        }
    }
}

/// Decide whether login must mint a new token.
///
/// Only the signature is checked: an authentic but expired token has negative
/// remaining lifetime and therefore renews. A token that fails to parse is an
/// error, never a renewal.
pub fn should_renew(
    carrier_token: Option<&str>,
    now: OffsetDateTime,
    security: &SecurityConfig,
) -> Result<Renewal, TokenError> {
    let token = match carrier_token {
        Some(t) if !t.is_empty() => t,
        _ => return Ok(Renewal::fresh()),
    };

    let claims = match verify_signature(token, security) {
        Ok(claims) => claims,
        Err(TokenError::BadSignature) => return Ok(Renewal::fresh()),
        Err(e) => return Err(e),
    };

    let current_expiry = claims.expires_at().ok_or(TokenError::Malformed)?;
    let renew = claims.remaining_secs(now) < security.renewal_slack.whole_seconds();

    Ok(Renewal {
        renew,
        current_expiry: Some(current_expiry),
        subject: Some(claims.sub),
    })
}
