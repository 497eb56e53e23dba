//! Reading trace files from disk.

use super::repair::repair_truncated;
use crate::parser::{parse_trace, ParsedTrace};
use crate::utils::error::{LoadError, ParseError};
use log::{debug, info};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// Read a trace file as raw JSON
///
/// **Public** - truncation is repaired in memory; the file is left as is
///
/// # Errors
/// * `LoadError::Io` - File cannot be read
/// * `LoadError::NotATrace` - File doesn't end like a tracer file
/// * `LoadError::Parse` - Content is not valid JSON
pub fn read_trace_file(path: impl AsRef<Path>) -> Result<serde_json::Value, LoadError> {
    let path = path.as_ref();
    debug!("Reading trace from: {}", path.display());

    let text = fs::read_to_string(path)?;
    let repaired =
        repair_truncated(&text).ok_or_else(|| LoadError::NotATrace(path.to_path_buf()))?;

    if let Cow::Owned(_) = repaired {
        info!("{} was truncated, closed the record list", path.display());
    }

    let raw = serde_json::from_str(&repaired).map_err(ParseError::from)?;
    Ok(raw)
}

/// Read, parse and resolve a trace file
///
/// **Public** - one-shot load used by the commands
pub fn load_trace_file(path: impl AsRef<Path>) -> Result<ParsedTrace, LoadError> {
    let path = path.as_ref();
    let raw = read_trace_file(path)?;
    let trace = parse_trace(&raw)?;

    info!(
        "Loaded {} instructions and {} objects from {}",
        trace.summary().instructions,
        trace.summary().object_records,
        path.display()
    );

    Ok(trace)
}
