use std::time::Duration;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::error::AppError;

/// Default deadline for a single storage operation.
pub const DEFAULT_DB_TIMEOUT: Duration = Duration::from_secs(10);

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    db: Option<DatabaseConnection>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Per-operation storage deadline
    pub db_timeout: Duration,
}

impl AppState {
    /// Create a new AppState with the given database connection and security config
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
            db_timeout: DEFAULT_DB_TIMEOUT,
        }
    }

    /// Create a new AppState without a database connection
    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            db_timeout: DEFAULT_DB_TIMEOUT,
        }
    }

    pub fn with_db_timeout(mut self, timeout: Duration) -> Self {
        self.db_timeout = timeout;
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    /// Database connection or a `DB_UNAVAILABLE` error when the state was built without one.
    pub fn require_db(&self) -> Result<&DatabaseConnection, AppError> {
        self.db.as_ref().ok_or_else(|| AppError::DbUnavailable {
            detail: "no database configured".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_db_without_connection_is_unavailable() {
        let state = AppState::new_without_db(SecurityConfig::for_tests());
        let err = state.require_db().unwrap_err();
        assert_eq!(err.status(), actix_web::http::StatusCode::SERVICE_UNAVAILABLE);
    }
}
