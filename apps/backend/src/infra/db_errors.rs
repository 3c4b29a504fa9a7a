//! SeaORM -> DomainError translation.
//!
//! Repositories convert `sea_orm::DbErr` here; higher layers then map
//! `DomainError` to `AppError` via `From`.

use sea_orm::{DbErr, SqlErr};
use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Constraint names / SQLite column references that identify the email index.
const EMAIL_UNIQUE_MARKERS: [&str; 2] = ["ux_users_email", "users.email"];

fn conflict_for_unique(msg: &str) -> DomainError {
    if EMAIL_UNIQUE_MARKERS.iter().any(|m| msg.contains(m)) {
        DomainError::conflict(ConflictKind::UniqueEmail, "Email already registered")
    } else {
        DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        )
    }
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: DbErr) -> DomainError {
    let trace_id = trace_ctx::trace_id();

    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Unique constraint violation");
            return conflict_for_unique(&msg);
        }
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Foreign key constraint violation");
            return DomainError::validation("Referenced record does not exist");
        }
        _ => {}
    }

    let error_msg = e.to_string();
    match &e {
        DbErr::RecordNotFound(_) => {
            DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found")
        }
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable")
        }
        _ if error_msg.contains("UNIQUE constraint failed")
            || error_msg.contains("duplicate key value violates unique constraint") =>
        {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");
            conflict_for_unique(&error_msg)
        }
        _ => {
            error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
            DomainError::infra(
                InfraErrorKind::Other("DbErr".into()),
                "Database operation failed",
            )
        }
    }
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        map_db_err(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_email_message_maps_to_unique_email() {
        let err = map_db_err(DbErr::Custom(
            "UNIQUE constraint failed: users.email".to_string(),
        ));
        assert_eq!(
            err,
            DomainError::conflict(ConflictKind::UniqueEmail, "Email already registered")
        );
    }

    #[test]
    fn postgres_index_name_maps_to_unique_email() {
        let err = map_db_err(DbErr::Custom(
            "duplicate key value violates unique constraint \"ux_users_email\"".to_string(),
        ));
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::UniqueEmail, _)
        ));
    }

    #[test]
    fn record_not_found_is_not_found() {
        let err = map_db_err(DbErr::RecordNotFound("todos".into()));
        assert!(matches!(err, DomainError::NotFound(_, _)));
    }

    #[test]
    fn anything_else_is_infra() {
        let err = map_db_err(DbErr::Custom("boom".into()));
        assert!(matches!(err, DomainError::Infra(InfraErrorKind::Other(_), _)));
    }
}
