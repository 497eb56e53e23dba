//! Recovery of trace files truncated mid-write.
//!
//! The tracer opens the file with `[` and appends `,\n` after every record,
//! so a trace cut off by the traced process never gets its closing bracket.
//! Closing it means turning the last separator into `]`.

use crate::utils::config::TRUNCATION_SCAN_BYTES;
use crate::utils::error::LoadError;
use log::{debug, info};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// Close a truncated trace
///
/// **Public** - used when reading traces and by the `repair` command
///
/// # Arguments
/// * `text` - Whole trace file content
///
/// # Returns
/// * `Some(Cow::Borrowed)` - Already closed; the text is unchanged
/// * `Some(Cow::Owned)` - The trailing separator replaced by `]` (or `]`
///   appended after an opening bracket with no records)
/// * `None` - No bracket or separator near the end; not a tracer file
pub fn repair_truncated(text: &str) -> Option<Cow<'_, str>> {
    let bytes = text.as_bytes();
    let start = bytes.len().saturating_sub(TRUNCATION_SCAN_BYTES);

    for i in (start..bytes.len()).rev() {
        match bytes[i] {
            b']' => return Some(Cow::Borrowed(text)),
            b',' => {
                debug!("Replacing trailing separator at byte {}", i);
                let mut repaired = String::with_capacity(text.len());
                repaired.push_str(&text[..i]);
                repaired.push(']');
                repaired.push_str(&text[i + 1..]);
                return Some(Cow::Owned(repaired));
            }
            b'[' => {
                debug!("Closing empty record list at byte {}", i);
                let mut repaired = String::with_capacity(text.len() + 1);
                repaired.push_str(&text[..=i]);
                repaired.push(']');
                repaired.push_str(&text[i + 1..]);
                return Some(Cow::Owned(repaired));
            }
            _ => {}
        }
    }

    None
}

/// Repair a trace file on disk
///
/// **Public** - backs the `repair` command
///
/// # Returns
/// `true` if the file was rewritten, `false` if it was already closed
///
/// # Errors
/// * `LoadError::Io` - File cannot be read or written
/// * `LoadError::NotATrace` - File doesn't end like a tracer file
pub fn repair_file_in_place(path: impl AsRef<Path>) -> Result<bool, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;

    match repair_truncated(&text) {
        Some(Cow::Borrowed(_)) => {
            debug!("{} is already closed", path.display());
            Ok(false)
        }
        Some(Cow::Owned(repaired)) => {
            fs::write(path, repaired)?;
            info!("Closed truncated trace: {}", path.display());
            Ok(true)
        }
        None => Err(LoadError::NotATrace(path.to_path_buf())),
    }
}
