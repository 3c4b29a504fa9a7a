use std::time::Duration;

use crate::config::db::DbKind;
use crate::error::AppError;
use crate::infra::db::connect_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_kind: Option<DbKind>,
    db_timeout: Option<Duration>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::for_tests(),
            db_kind: None,
            db_timeout: None,
        }
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_db_timeout(mut self, timeout: Duration) -> Self {
        self.db_timeout = Some(timeout);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let state = match self.db_kind {
            // single entrypoint: connect + migrate
            Some(kind) => AppState::new(connect_db(kind).await?, self.security_config),
            None => AppState::new_without_db(self.security_config),
        };
        Ok(match self.db_timeout {
            Some(timeout) => state.with_db_timeout(timeout),
            None => state,
        })
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn build_without_db() {
        let state = build_state().build().await.unwrap();
        assert!(state.db().is_none());
    }

    #[tokio::test]
    async fn build_with_sqlite_memory() {
        let state = build_state()
            .with_db(DbKind::SqliteMemory)
            .with_db_timeout(Duration::from_millis(500))
            .build()
            .await
            .unwrap();
        assert!(state.db().is_some());
        assert_eq!(state.db_timeout, Duration::from_millis(500));
    }
}
