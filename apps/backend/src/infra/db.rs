use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{db_url, DbKind};
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind};

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_INTERVAL: Duration = Duration::from_millis(500);

fn connect_options(kind: DbKind, url: String) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false);
    match kind {
        // Each pooled connection would get its own private in-memory database.
        DbKind::SqliteMemory => {
            opts.max_connections(1).min_connections(1);
        }
        DbKind::Postgres => {
            opts.max_connections(10)
                .min_connections(1)
                .connect_timeout(Duration::from_secs(5))
                .acquire_timeout(Duration::from_secs(5));
        }
    }
    opts
}

/// Connect to the configured database and bring its schema up to date.
pub async fn connect_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind)?;

    let mut attempt = 1;
    let conn = loop {
        match Database::connect(connect_options(kind, url.clone())).await {
            Ok(conn) => break conn,
            Err(e) if attempt < CONNECT_ATTEMPTS && kind == DbKind::Postgres => {
                warn!(attempt, error = %e, "database connection failed; retrying");
                attempt += 1;
                tokio::time::sleep(CONNECT_RETRY_INTERVAL).await;
            }
            Err(e) => return Err(AppError::from(e)),
        }
    };

    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::db(format!("migration failed: {e}")))?;

    info!(db_kind = ?kind, "database ready");
    Ok(conn)
}

/// Bound a storage operation by `limit`. Elapsed maps to `InfraErrorKind::Timeout`.
pub async fn with_timeout<T, F>(limit: Duration, fut: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(DomainError::infra(
            InfraErrorKind::Timeout,
            "storage operation timed out",
        )),
    }
}
