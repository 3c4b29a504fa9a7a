//! Schema for the to-do backend: `users` and their `todos`.
//!
//! The backend runs [`migrate`] with [`MigrationCommand::Up`] on startup; the
//! migration CLI exposes the remaining commands.

pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20250901_000001_init;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250901_000001_init::Migration)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

/// Applied versus defined migrations for one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaStatus {
    pub applied: usize,
    pub defined: usize,
}

impl SchemaStatus {
    pub fn pending(&self) -> usize {
        self.defined.saturating_sub(self.applied)
    }
}

/// Report how far `db` is migrated. A database without the migrations table
/// counts as nothing applied.
pub async fn schema_status(db: &DatabaseConnection) -> Result<SchemaStatus, DbErr> {
    let applied = match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => migrations.len(),
        Err(DbErr::Exec(_)) => 0,
        Err(e) => return Err(e),
    };

    Ok(SchemaStatus {
        applied,
        defined: Migrator::migrations().len(),
    })
}

/// Run `command` against an existing connection.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let before = schema_status(db).await?;
    tracing::info!(
        ?command,
        ?backend,
        applied = before.applied,
        pending = before.pending(),
        "migration starting"
    );

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    if let Err(e) = result {
        tracing::error!(?command, ?backend, error = %e, "migration failed");
        return Err(e);
    }

    let after = schema_status(db).await?;
    tracing::info!(
        ?command,
        applied = after.applied,
        pending = after.pending(),
        "migration finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use sea_orm_migration::sea_orm::{ConnectOptions, Database};

    use super::*;

    #[tokio::test]
    async fn up_applies_everything_and_down_reverts() {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1);
        let db = Database::connect(opts).await.unwrap();

        let fresh = schema_status(&db).await.unwrap();
        assert_eq!(fresh.applied, 0);
        assert_eq!(fresh.pending(), fresh.defined);

        migrate(&db, MigrationCommand::Up).await.unwrap();
        assert_eq!(schema_status(&db).await.unwrap().pending(), 0);

        // Up is idempotent
        migrate(&db, MigrationCommand::Up).await.unwrap();

        migrate(&db, MigrationCommand::Down).await.unwrap();
        assert_eq!(schema_status(&db).await.unwrap().applied, 0);
    }
}
