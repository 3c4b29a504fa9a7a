//! Claims carried inside a session token.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Identity assertion signed into every session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Storage-assigned user id
    pub sub: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch); the token is valid strictly before this instant
    pub exp: i64,
}

impl Claims {
    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.exp).ok()
    }

    /// Whole seconds left before expiry at `now`; zero or negative once expired.
    pub fn remaining_secs(&self, now: OffsetDateTime) -> i64 {
        self.exp - now.unix_timestamp()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn remaining_secs_counts_down_to_zero() {
        let now = datetime!(2025-01-01 00:00:00 UTC);
        let claims = Claims {
            sub: "u1".into(),
            iat: now.unix_timestamp(),
            exp: now.unix_timestamp() + 30,
        };

        assert_eq!(claims.remaining_secs(now), 30);
        assert_eq!(claims.remaining_secs(now + time::Duration::seconds(30)), 0);
        assert_eq!(claims.expires_at(), Some(now + time::Duration::seconds(30)));
    }
}
