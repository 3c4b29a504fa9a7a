use std::env;

use crate::error::AppError;

/// Which database the service connects to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// Postgres, configured from the environment
    Postgres,
    /// Private in-memory SQLite database (tests)
    SqliteMemory,
}

/// Resolve the connection URL for `kind`.
///
/// For Postgres, `DATABASE_URL` wins when set; otherwise the URL is assembled
/// from `POSTGRES_HOST`, `POSTGRES_PORT`, `PROD_DB`, `APP_DB_USER` and
/// `APP_DB_PASSWORD`.
pub fn db_url(kind: DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
        DbKind::Postgres => {
            if let Some(url) = non_empty_var("DATABASE_URL") {
                return Ok(url);
            }
            let host = non_empty_var("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_string());
            let port = non_empty_var("POSTGRES_PORT").unwrap_or_else(|| "5432".to_string());
            let db_name = must_var("PROD_DB")?;
            let username = must_var("APP_DB_USER")?;
            let password = must_var("APP_DB_PASSWORD")?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    non_empty_var(name)
        .ok_or_else(|| AppError::config(format!("Required environment variable '{name}' is not set")))
}
