//! Process configuration read once from the environment in `main`.

use std::env;
use std::time::Duration as StdDuration;

use time::Duration;

use crate::auth::password::HashCost;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_DB_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub security: SecurityConfig,
    pub db_timeout: StdDuration,
    /// Origins allowed to send credentialed requests; empty falls back to local dev origins
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source. A missing or blank secret is fatal.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let secret = var("BACKEND_JWT_SECRET").ok_or_else(|| {
            AppError::config("BACKEND_JWT_SECRET must be set to a non-empty value")
        })?;

        let host = var("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&var, "BACKEND_PORT", DEFAULT_PORT)?;

        let ttl_secs = parse_or(&var, "SESSION_TTL_SECS", 300i64)?;
        let slack_secs = parse_or(&var, "SESSION_RENEWAL_SLACK_SECS", 30i64)?;
        if ttl_secs <= 0 {
            return Err(AppError::config("SESSION_TTL_SECS must be positive"));
        }
        if slack_secs < 0 {
            return Err(AppError::config(
                "SESSION_RENEWAL_SLACK_SECS must not be negative",
            ));
        }

        let defaults = HashCost::default();
        let hash_cost = HashCost {
            memory_kib: parse_or(&var, "PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or(&var, "PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
            parallelism: parse_or(&var, "PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
        };
        hash_cost
            .params()
            .map_err(|e| AppError::config(format!("invalid password hash cost: {e}")))?;

        let db_timeout_ms = parse_or(&var, "DB_OP_TIMEOUT_MS", DEFAULT_DB_TIMEOUT_MS)?;

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let security = SecurityConfig::new(secret.into_bytes())
            .with_session_ttl(Duration::seconds(ttl_secs))
            .with_renewal_slack(Duration::seconds(slack_secs))
            .with_hash_cost(hash_cost);

        Ok(Self {
            host,
            port,
            security,
            db_timeout: StdDuration::from_millis(db_timeout_ms),
            cors_allowed_origins,
        })
    }
}

fn parse_or<T, V>(var: &V, name: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    V: Fn(&str) -> Option<String>,
{
    match var(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::config(format!("{name} has an invalid value: '{raw}'"))),
    }
}
