//! Error codes for the to-do backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes. Every code is
//! SCREAMING_SNAKE_CASE and maps 1:1 to the `code` field of Problem Details
//! responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Missing, expired or forged session. One code for all three so the
    /// response never tells a client which check failed.
    Unauthorized,
    /// Login with an unknown email or a wrong password
    InvalidCredentials,

    // Request Validation
    /// Invalid email address
    InvalidEmail,
    /// Password does not meet the minimum policy
    InvalidPassword,
    /// General validation error
    ValidationError,
    /// Body could not be read or parsed
    BadRequest,

    // Resource Not Found
    /// Todo not found (or not owned by the caller)
    TodoNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Email already registered
    UniqueEmail,
    /// Generic conflict (fallback for unmatched unique violations)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Storage operation exceeded its deadline
    DbTimeout,
    /// Session cookie present but could not be processed
    SessionError,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// The exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",

            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::TodoNotFound => "TODO_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::SessionError => "SESSION_ERROR",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::Unauthorized.as_str(), "UNAUTHORIZED");
        assert_eq!(ErrorCode::InvalidCredentials.as_str(), "INVALID_CREDENTIALS");
        assert_eq!(ErrorCode::InvalidEmail.as_str(), "INVALID_EMAIL");
        assert_eq!(ErrorCode::UniqueEmail.as_str(), "UNIQUE_EMAIL");
        assert_eq!(ErrorCode::TodoNotFound.as_str(), "TODO_NOT_FOUND");
        assert_eq!(ErrorCode::DbTimeout.as_str(), "DB_TIMEOUT");
        assert_eq!(ErrorCode::SessionError.as_str(), "SESSION_ERROR");
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", ErrorCode::Unauthorized), "UNAUTHORIZED");
        assert_eq!(format!("{}", ErrorCode::ConfigError), "CONFIG_ERROR");
    }
}
