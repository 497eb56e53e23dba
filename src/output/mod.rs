//! Output writers for trace data.
//!
//! This module handles:
//! - JSON exports of rendered instruction rows
//! - Text tables and expanded outlines for the terminal

pub mod json;
pub mod text;

// Re-export main functions
pub use json::{build_export, read_export, write_export};
pub use text::{render_outline, render_table};
