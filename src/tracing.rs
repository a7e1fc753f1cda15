//! Tracing initialization for host binaries and tests.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize the global tracing subscriber. Safe to call multiple times.
///
/// Under a test runner the subscriber logs at DEBUG through the capture
/// writer; otherwise it logs compactly to stderr at INFO. `RUST_LOG`
/// overrides either default.
pub fn init() {
    INIT.call_once(|| {
        let under_test = std::env::var_os("NEXTEST").is_some()
            || std::env::var_os("CARGO_TARGET_TMPDIR").is_some();
        let default_level = if under_test { "debug" } else { "info" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .compact();

        if under_test {
            builder.with_test_writer().finish().set_default();
        } else if let Err(e) = builder.with_writer(std::io::stderr).try_init() {
            eprintln!("failed to initialize tracing: {e}");
        }
    });
}
