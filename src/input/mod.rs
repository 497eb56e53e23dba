//! Trace file input.
//!
//! This module handles:
//! - Reading trace files written by the Squirrel tracer
//! - Closing traces truncated mid-write

pub mod reader;
pub mod repair;

// Re-export main functions
pub use reader::{load_trace_file, read_trace_file};
pub use repair::{repair_file_in_place, repair_truncated};
