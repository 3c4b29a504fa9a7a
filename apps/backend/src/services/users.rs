//! Account service: registration and credential checks.

use actix_web::web;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::errors::ErrorCode;
use crate::infra::db::with_timeout;
use crate::logging::pii::Redacted;
use crate::repos::users::{self as users_repo, User};
use crate::state::app_state::AppState;

pub const MIN_PASSWORD_LEN: usize = 8;

#[allow(clippy::unwrap_used)]
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Trimmed, lowercased form used for storage and lookups.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewAccount {
    pub fn parse(name: &str, email: &str, password: &str) -> Result<Self, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid(
                ErrorCode::ValidationError,
                "Name cannot be empty",
            ));
        }

        let email = normalize_email(email);
        if !EMAIL_SHAPE.is_match(&email) {
            return Err(AppError::invalid(
                ErrorCode::InvalidEmail,
                "Email address is not valid",
            ));
        }

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::invalid(
                ErrorCode::InvalidPassword,
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            email,
            password: password.to_string(),
        })
    }
}

/// Register a new account.
///
/// The count check rejects the common duplicate early; the unique index on
/// `users.email` decides concurrent races.
pub async fn register(state: &AppState, account: NewAccount) -> Result<User, AppError> {
    let db = state.require_db()?;

    let existing = with_timeout(state.db_timeout, users_repo::count_by_email(db, &account.email)).await?;
    if existing > 0 {
        info!(email = %Redacted(&account.email), "registration rejected: email taken");
        return Err(DomainError::conflict(ConflictKind::UniqueEmail, "Email already registered").into());
    }

    let cost = state.security.hash_cost;
    let password = account.password;
    let password_hash = web::block(move || hash_password(&password, cost))
        .await
        .map_err(|_| AppError::internal("password hashing task was cancelled"))??;

    let user = with_timeout(
        state.db_timeout,
        users_repo::create_user(db, &account.name, &account.email, &password_hash),
    )
    .await?;

    info!(user_id = %user.id, "user registered");
    Ok(user)
}

/// Look up the account and check the password.
///
/// An unknown email and a wrong password produce the same error.
pub async fn authenticate(state: &AppState, email: &str, password: &str) -> Result<User, AppError> {
    let db = state.require_db()?;
    let email = normalize_email(email);

    let Some(user) = with_timeout(state.db_timeout, users_repo::find_by_email(db, &email)).await? else {
        info!(email = %Redacted(&email), "login rejected: unknown email");
        return Err(AppError::invalid_credentials());
    };

    let stored = user.password_hash.clone();
    let password = password.to_string();
    let matches = web::block(move || verify_password(&password, &stored))
        .await
        .map_err(|_| AppError::internal("password verification task was cancelled"))?;

    match matches {
        Ok(true) => Ok(user),
        Ok(false) => {
            info!(user_id = %user.id, "login rejected: wrong password");
            Err(AppError::invalid_credentials())
        }
        Err(e) => {
            warn!(user_id = %user.id, error = %e, "stored password hash unusable");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::*;
    use crate::config::db::DbKind;
    use crate::infra::state::build_state;

    async fn state() -> AppState {
        build_state().with_db(DbKind::SqliteMemory).build().await.unwrap()
    }

    #[test]
    fn parse_normalizes_email() {
        let acct = NewAccount::parse(" Ada ", "  Ada@Example.COM ", "longenough").unwrap();
        assert_eq!(acct.name, "Ada");
        assert_eq!(acct.email, "ada@example.com");
    }

    #[test]
    fn parse_rejects_bad_input() {
        let cases = [
            ("", "a@b.co", "longenough", ErrorCode::ValidationError),
            ("Ada", "not-an-email", "longenough", ErrorCode::InvalidEmail),
            ("Ada", "a@b", "longenough", ErrorCode::InvalidEmail),
            ("Ada", "a@b.co", "short", ErrorCode::InvalidPassword),
        ];
        for (name, email, password, code) in cases {
            let err = NewAccount::parse(name, email, password).unwrap_err();
            assert_eq!(err.code(), code, "{name:?} {email:?}");
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[actix_web::test]
    async fn register_then_authenticate() {
        let state = state().await;
        let acct = NewAccount::parse("Ada", "ada@example.com", "correct horse").unwrap();

        let user = register(&state, acct).await.unwrap();
        assert!(user.password_hash.starts_with("$argon2id$"));

        let logged_in = authenticate(&state, "ADA@example.com", "correct horse").await.unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[actix_web::test]
    async fn unknown_email_and_wrong_password_look_the_same() {
        let state = state().await;
        let acct = NewAccount::parse("Ada", "ada@example.com", "correct horse").unwrap();
        register(&state, acct).await.unwrap();

        let unknown = authenticate(&state, "nobody@example.com", "correct horse")
            .await
            .unwrap_err();
        let wrong = authenticate(&state, "ada@example.com", "wrong horse")
            .await
            .unwrap_err();

        assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown.code(), wrong.code());
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[actix_web::test]
    async fn duplicate_registration_conflicts() {
        let state = state().await;
        register(&state, NewAccount::parse("Ada", "ada@example.com", "password1").unwrap())
            .await
            .unwrap();

        let err = register(&state, NewAccount::parse("Ada 2", "ADA@example.com", "password2").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.code(), ErrorCode::UniqueEmail);
    }
}
