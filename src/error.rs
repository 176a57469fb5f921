//! Errors from the arcade's outer layers (config, logging, terminal).
//!
//! The engine and session never fail; a collision is game state.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArcadeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Could not parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, ArcadeError>;
