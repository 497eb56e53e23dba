//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while decoding a trace
///
/// Any of these fails the whole load; no partial graph is exposed.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid trace format: {0}")]
    InvalidFormat(String),

    #[error("Record {index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("Malformed address token: {0:?}")]
    InvalidAddress(String),
}

/// Errors that can occur while reading a trace file from disk
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read trace file: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} doesn't seem to be a JSON file created by the Squirrel tracer")]
    NotATrace(PathBuf),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
