//! Tracing setup.
//!
//! The terminal belongs to the UI, so events only go to a file. Without a
//! log file no subscriber is installed and events are dropped.

use crate::error::{ArcadeError, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "snake_arcade=info";

/// Install a global fmt subscriber appending to `path`.
///
/// `RUST_LOG` overrides the default `snake_arcade=info` filter.
pub fn init(path: &Path) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| ArcadeError::Logging(e.to_string()))?;

    tracing::info!(log_file = %path.display(), "logging started");
    Ok(())
}
