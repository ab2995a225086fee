//! Logging setup
//!
//! Logs go to stderr so they never mix with command output on stdout.
//! `RUST_LOG` takes precedence over the `--verbose` default.

use anyhow::{anyhow, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber
///
/// # Errors
/// Returns an error if a global subscriber is already installed
pub fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };

    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
