#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod health;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use auth::claims::Claims;
pub use auth::jwt::{decode_session_token, mint_session_token, MintedToken, TokenError};
pub use auth::password::{hash_password, verify_password, HashCost, PasswordError};
pub use auth::renewal::{should_renew, Renewal};
pub use auth::session::{validate_session, SessionRejection};
pub use config::db::DbKind;
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::session_user::SessionUser;
pub use extractors::validated_json::ValidatedJson;
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
