//! JSON export writer.
//!
//! Writes rendered instruction rows to JSON files with proper formatting.

use crate::parser::schema::TraceExport;
use crate::parser::ParsedTrace;
use crate::utils::config::EXPORT_SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Build an export of selected instructions
///
/// **Public** - used by the export command
///
/// # Arguments
/// * `trace` - Resolved trace
/// * `indices` - Instructions to include, in output order
/// * `source` - Trace file name recorded in the export
/// * `filter` - Filter that produced `indices`, if any
pub fn build_export(
    trace: &ParsedTrace,
    indices: &[usize],
    source: impl Into<String>,
    filter: Option<String>,
) -> TraceExport {
    use chrono::Utc;

    TraceExport {
        version: EXPORT_SCHEMA_VERSION.to_string(),
        source: source.into(),
        filter,
        summary: trace.summary().clone(),
        rows: indices.iter().filter_map(|&index| trace.row(index)).collect(),
        generated_at: Utc::now().to_rfc3339(),
    }
}

/// Write an export to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `export` - Export data to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_export(export: &TraceExport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing export to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, export).map_err(OutputError::SerializationFailed)?;

    info!(
        "Export written successfully ({} rows, {} bytes)",
        export.rows.len(),
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Read an export back from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_export(input_path: impl AsRef<Path>) -> Result<TraceExport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading export from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let export: TraceExport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Export loaded: version {}, {} rows",
        export.version,
        export.rows.len()
    );

    Ok(export)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
