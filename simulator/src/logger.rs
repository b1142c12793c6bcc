//! Console output for the engine's `log` records.
//!
//! `tracing-subscriber` installs a `LogTracer` bridge on init, so records from
//! the `log` facade come out through the `fmt` layer. `RUST_LOG` overrides the
//! default filter.

use tracing_subscriber::EnvFilter;

/// Install the subscriber. Calling it twice keeps the first one.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .ok();
}
