//! Tracing setup shared by the fitlog binaries.
//!
//! Events are written to stderr; stdout belongs to the menu prompts and
//! command output.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber, filtering at `default_level` unless
/// RUST_LOG says otherwise.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Route events into the test harness output
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
