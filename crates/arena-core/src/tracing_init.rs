//! Logging setup for the `arena` binary.
//!
//! Everything goes to stderr: stdout carries the rendered views, and tests
//! compare it line by line.

use std::io;

use tracing_subscriber::fmt;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `default_filter` applies, normally the
/// output of [`default_filter`] for the configured `log_level`. With
/// `log_json` each event is one JSON object per line, which is what
/// `--log-json` and `ARENA_LOG_JSON` select.
pub fn init_tracing(default_filter: &str, log_json: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let json = log_json.then(|| fmt::layer().json().with_writer(io::stderr));
    let plain = (!log_json).then(|| fmt::layer().with_writer(io::stderr));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(json)
        .with(plain)
        .init();
}

/// Filter directive enabling `level` for the binary and the three arena
/// library crates, and nothing else (reqwest and hyper stay quiet).
pub fn default_filter(level: &str) -> String {
    format!("arena={level},arena_cli={level},arena_client={level},arena_core={level}")
}
