//! Instruction records and the serializable shapes written by exports.
//!
//! Export schema is versioned to allow future evolution.

use super::value::{ObjectArena, Value};
use crate::search::instruction_contains;
use serde::{Deserialize, Serialize};

/// One executed VM instruction
///
/// The only root-visible entity of a trace: one per trace row.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Source file of the running closure
    pub function: String,

    /// Opcode name
    pub op: String,

    /// Decoded operands, `arg0` to `arg3`
    pub args: [Value; 4],
}

impl Instruction {
    pub fn new(function: impl Into<String>, op: impl Into<String>, args: [Value; 4]) -> Self {
        Self {
            function: function.into(),
            op: op.into(),
            args,
        }
    }

    /// Cycle-safe substring search over the row and its resolved operands
    pub fn contains(&self, arena: &ObjectArena, text: &str) -> bool {
        instruction_contains(self, arena, text)
    }

    /// Flatten into a display row
    pub fn to_row(&self, index: usize, arena: &ObjectArena) -> InstructionRow {
        InstructionRow {
            index,
            function: self.function.clone(),
            op: self.op.clone(),
            args: self.args.iter().map(|arg| arg.render(arena)).collect(),
        }
    }
}

/// An instruction flattened to its rendered operands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionRow {
    /// Position in the trace
    pub index: usize,

    #[serde(rename = "fn")]
    pub function: String,

    pub op: String,

    /// Compact rendering of `arg0` to `arg3`
    pub args: Vec<String>,
}

/// Counters gathered while loading a trace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    /// Instruction records kept
    pub instructions: usize,

    /// Object records ingested (duplicates included)
    pub object_records: usize,

    /// Distinct addresses in the address table
    pub addresses: usize,

    /// Object records that overwrote an earlier one at the same address
    pub duplicate_addresses: usize,

    /// Records with an unrecognized `type`
    pub skipped_records: usize,

    /// References that settled on a dumped object
    pub resolved_references: usize,

    /// References to addresses never dumped
    pub missing_references: usize,
}

/// Top-level structure written by `export`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceExport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace file the rows were read from
    pub source: String,

    /// Filter applied to the rows, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    pub summary: TraceSummary,

    pub rows: Vec<InstructionRow>,

    /// Timestamp when the export was generated
    pub generated_at: String,
}
