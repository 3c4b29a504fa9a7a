//! Logging bootstrap for the backend's unit tests.
//!
//! Installed once per test binary by the `ctor` hook in `lib.rs`. The filter is
//! taken from `TEST_LOG`, then `RUST_LOG`, and defaults to `warn` so test output
//! stays quiet unless asked for.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Idempotent; later calls are no-ops and never panic.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
