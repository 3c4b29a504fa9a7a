//! Storage- and service-level failures, free of HTTP concerns.
//!
//! Repositories return [`DomainError`]; handlers convert it into
//! `crate::error::AppError`, which picks the status and Problem Details code.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    /// Operation exceeded the configured storage deadline
    Timeout,
    DbUnavailable,
    Other(String),
}

/// Which record was missing. Todos owned by another user report as missing too.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Todo,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    UniqueEmail,
    Other(String),
}

macro_rules! kind_display {
    ($ty:ty { $($variant:ident => $label:literal),* $(,)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($label),)*
                    Self::Other(label) => f.write_str(label),
                }
            }
        }
    };
}

kind_display!(InfraErrorKind { Timeout => "timeout", DbUnavailable => "db unavailable" });
kind_display!(NotFoundKind { Todo => "todo" });
kind_display!(ConflictKind { UniqueEmail => "unique email" });

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict ({0}): {1}")]
    Conflict(ConflictKind, String),
    #[error("{0} not found: {1}")]
    NotFound(NotFoundKind, String),
    #[error("infra failure ({0}): {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }

    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
}
