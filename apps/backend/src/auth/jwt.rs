use jsonwebtoken::{crypto, decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use time::{Duration, OffsetDateTime};

use super::claims::Claims;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// A freshly signed session token and the instant it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintedToken {
    pub token: String,
    pub expires_at: OffsetDateTime,
}

/// Why a token was refused, in the order the checks run.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token could not be parsed")]
    Malformed,
    #[error("token signature is invalid")]
    BadSignature,
    #[error("token has expired")]
    Expired,
}

/// Mint a signed token for `subject` expiring at `now + ttl`.
///
/// A non-positive `ttl` produces a token that is already expired.
pub fn mint_session_token(
    subject: &str,
    ttl: Duration,
    now: OffsetDateTime,
    security: &SecurityConfig,
) -> Result<MintedToken, AppError> {
    let iat = now.unix_timestamp();
    let exp = iat
        .checked_add(ttl.whole_seconds())
        .ok_or_else(|| AppError::internal("token expiry overflows"))?;
    let expires_at = OffsetDateTime::from_unix_timestamp(exp)
        .map_err(|e| AppError::internal(format!("token expiry out of range: {e}")))?;

    let claims = Claims {
        sub: subject.to_string(),
        iat,
        exp,
    };

    let token = encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))?;

    Ok(MintedToken { token, expires_at })
}

/// Verify the signature only and return the claims, even when expired.
///
/// The MAC is checked over the raw `header.payload` bytes before either
/// segment is parsed, so any edit to an authentic token is a bad signature.
pub fn verify_signature(token: &str, security: &SecurityConfig) -> Result<Claims, TokenError> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed);
    };

    let key = DecodingKey::from_secret(&security.jwt_secret);
    let message = &token[..header.len() + 1 + payload.len()];
    match crypto::verify(signature, message.as_bytes(), &key, security.algorithm) {
        Ok(true) => {}
        // Undecodable signature bytes are a forgery too.
        Ok(false) | Err(_) => return Err(TokenError::BadSignature),
    }

    // Expiry is compared against the caller's clock, not the library's.
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|_| TokenError::Malformed)
}

/// Verify signature, then expiry. Valid strictly before `exp`.
pub fn decode_session_token(
    token: &str,
    now: OffsetDateTime,
    security: &SecurityConfig,
) -> Result<Claims, TokenError> {
    let claims = verify_signature(token, security)?;
    if now.unix_timestamp() >= claims.exp {
        return Err(TokenError::Expired);
    }
    Ok(claims)
}
