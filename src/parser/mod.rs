//! Trace parsing and the decoded value model.
//!
//! This module handles:
//! - Decoding raw JSON values into typed values
//! - Scanning instruction and object records
//! - Defining the export schema

pub mod decoder;
pub mod schema;
pub mod trace;
pub mod value;

// Re-export main types
pub use decoder::{decode, parse_address};
pub use schema::{Instruction, InstructionRow, TraceExport, TraceSummary};
pub use trace::{ingest, parse_trace, IngestedTrace, ParsedTrace};
pub use value::{Object, ObjectArena, RefState, Reference, Value, ValueId};
