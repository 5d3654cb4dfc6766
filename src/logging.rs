//! Tracing setup for the server binary.
//!
//! stdout carries the protocol, so every log line goes to stderr.  Editors
//! usually show stderr of a language server in their output panel.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Filter used when neither `--log-level` nor `RUST_LOG` is given.
const DEFAULT_FILTER: &str = "info";

/// Build the filter: `--log-level` wins, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`].
pub fn env_filter(log_level: Option<&str>) -> EnvFilter {
    match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Install the global subscriber.
///
/// Returns an error if a subscriber was already installed.
pub fn init_logger(
    no_color: bool,
    log_level: Option<&str>,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .with_filter(env_filter(log_level));

    tracing_subscriber::registry().with(stderr_layer).try_init()
}
