//! Tracing setup for the binary.
//!
//! Everything goes to stderr so interactive prompts on stdout stay readable.

use tracing_subscriber::{EnvFilter, fmt};

/// Maps the `-v` count to a default filter directive.
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over
/// `verbosity` when set. Later calls are no-ops.
pub fn init(verbosity: u8) {
    let level = default_level(verbosity);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
