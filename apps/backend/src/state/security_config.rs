use std::fmt;

use jsonwebtoken::Algorithm;
use time::Duration;

use crate::auth::password::HashCost;

/// Default lifetime of a minted session token.
pub const DEFAULT_SESSION_TTL: Duration = Duration::minutes(5);
/// Remaining lifetime below which login reissues the token.
pub const DEFAULT_RENEWAL_SLACK: Duration = Duration::seconds(30);

/// Signing and session settings, read once at startup and shared read-only.
#[derive(Clone)]
pub struct SecurityConfig {
    /// Shared HMAC secret for signing and verifying session tokens
    pub jwt_secret: Vec<u8>,
    /// Signing algorithm (HS256); verification accepts nothing else
    pub algorithm: Algorithm,
    pub session_ttl: Duration,
    pub renewal_slack: Duration,
    /// Work factor for the credential hasher
    pub hash_cost: HashCost,
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("session_ttl", &self.session_ttl)
            .field("renewal_slack", &self.renewal_slack)
            .field("hash_cost", &self.hash_cost)
            .finish()
    }
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret and default session policy
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            session_ttl: DEFAULT_SESSION_TTL,
            renewal_slack: DEFAULT_RENEWAL_SLACK,
            hash_cost: HashCost::default(),
        }
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn with_renewal_slack(mut self, slack: Duration) -> Self {
        self.renewal_slack = slack;
        self
    }

    pub fn with_hash_cost(mut self, cost: HashCost) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Random secret and the cheapest hash cost; for tests only.
    pub fn for_tests() -> Self {
        let secret = uuid::Uuid::new_v4().to_string();
        Self::new(secret.into_bytes()).with_hash_cost(HashCost::minimal())
    }
}
