//! Main trace parser for Squirrel tracer output.
//!
//! Scans the flat record list into instructions and an address table, then
//! runs the resolve phase so every reachable reference is settled before the
//! trace is handed out.

use super::decoder::{decode, parse_address};
use super::schema::{Instruction, InstructionRow, TraceSummary};
use super::value::{ObjectArena, Value};
use crate::resolver::{resolve, AddressTable, MissingReference};
use crate::search::filter_instructions;
use crate::utils::config::{
    ADDRESS_FIELD, ARG_FIELDS, CONTENT_FIELD, FN_FIELD, OP_FIELD, RECORD_INSTRUCTION,
    RECORD_OBJECT, RECORD_TYPE_FIELD,
};
use crate::utils::error::ParseError;
use crate::view::outline::{instruction_outline, OutlineNode};
use log::{debug, warn};

type RecordFields = serde_json::Map<String, serde_json::Value>;

/// Records scanned from a trace, before resolution
#[derive(Debug, Clone, Default)]
pub struct IngestedTrace {
    pub instructions: Vec<Instruction>,
    pub arena: ObjectArena,
    pub table: AddressTable,
    pub summary: TraceSummary,
}

/// A fully resolved trace
///
/// Read-only once built; a new load replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct ParsedTrace {
    instructions: Vec<Instruction>,
    arena: ObjectArena,
    table: AddressTable,
    summary: TraceSummary,
    missing: Vec<MissingReference>,
}

impl ParsedTrace {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn instruction(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    pub fn arena(&self) -> &ObjectArena {
        &self.arena
    }

    pub fn table(&self) -> &AddressTable {
        &self.table
    }

    pub fn summary(&self) -> &TraceSummary {
        &self.summary
    }

    /// Diagnostics for references whose address was never dumped
    pub fn missing_references(&self) -> &[MissingReference] {
        &self.missing
    }

    /// Decoded content dumped at `address`
    pub fn object_at(&self, address: u32) -> Option<&Value> {
        self.table.get(address).map(|id| self.arena.get(id))
    }

    pub fn row(&self, index: usize) -> Option<InstructionRow> {
        self.instruction(index)
            .map(|instruction| instruction.to_row(index, &self.arena))
    }

    /// Operand nodes of one instruction
    pub fn outline(&self, index: usize) -> Option<Vec<OutlineNode<'_>>> {
        self.instruction(index)
            .map(|instruction| instruction_outline(instruction, &self.arena))
    }

    /// Indices of the instructions containing `text`
    pub fn filter(&self, text: &str) -> Vec<usize> {
        filter_instructions(&self.instructions, &self.arena, text)
    }
}

/// Parse and resolve a raw trace
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `raw_trace` - The whole trace file as JSON
///
/// # Returns
/// The resolved trace. References to addresses that were never dumped do not
/// fail the load; they settle as missing and are listed as diagnostics.
///
/// # Errors
/// * `ParseError::InvalidFormat` - Root is not an array, or a record is malformed
/// * `ParseError::MissingField` - A record lacks a required field
/// * `ParseError::InvalidAddress` - A malformed address token anywhere
pub fn parse_trace(raw_trace: &serde_json::Value) -> Result<ParsedTrace, ParseError> {
    let IngestedTrace {
        mut instructions,
        mut arena,
        table,
        mut summary,
    } = ingest(raw_trace)?;

    let report = resolve(&mut instructions, &mut arena, &table);
    summary.resolved_references = report.resolved;
    summary.missing_references = report.missing.len();

    debug!(
        "Parsed {} instructions, {} objects at {} addresses",
        summary.instructions, summary.object_records, summary.addresses
    );

    Ok(ParsedTrace {
        instructions,
        arena,
        table,
        summary,
        missing: report.missing,
    })
}

/// Scan every record, in file order
///
/// **Public** - first phase of a load; `parse_trace` runs both phases
///
/// # Errors
/// Same as [`parse_trace`]
pub fn ingest(raw_trace: &serde_json::Value) -> Result<IngestedTrace, ParseError> {
    let serde_json::Value::Array(records) = raw_trace else {
        return Err(ParseError::InvalidFormat(format!(
            "Trace root must be an array (is {})",
            json_kind(raw_trace)
        )));
    };

    let mut trace = IngestedTrace::default();

    for (index, record) in records.iter().enumerate() {
        let serde_json::Value::Object(fields) = record else {
            return Err(ParseError::InvalidFormat(format!(
                "Record {} must be an object (is {})",
                index,
                json_kind(record)
            )));
        };

        match required_str(fields, index, RECORD_TYPE_FIELD)? {
            RECORD_INSTRUCTION => {
                trace.instructions.push(decode_instruction(fields, index)?);
            }
            RECORD_OBJECT => {
                let (address, content) = decode_object_record(fields, index)?;
                let id = trace.arena.push(content);
                if trace.table.insert(address, id).is_some() {
                    debug!(
                        "Address {:08X} dumped again at record {}, keeping the latest",
                        address, index
                    );
                    trace.summary.duplicate_addresses += 1;
                }
                trace.summary.object_records += 1;
            }
            other => {
                warn!("Skipping record {} with unknown type '{}'", index, other);
                trace.summary.skipped_records += 1;
            }
        }
    }

    trace.summary.instructions = trace.instructions.len();
    trace.summary.addresses = trace.table.len();
    Ok(trace)
}

/// **Private** - `fn`, `op` and four operands; absent operands are null
fn decode_instruction(fields: &RecordFields, index: usize) -> Result<Instruction, ParseError> {
    let function = required_str(fields, index, FN_FIELD)?;
    let op = required_str(fields, index, OP_FIELD)?;

    let mut args: [Value; 4] = Default::default();
    for (slot, name) in args.iter_mut().zip(ARG_FIELDS) {
        if let Some(raw) = fields.get(name) {
            *slot = decode(raw)?;
        }
    }

    Ok(Instruction::new(function, op, args))
}

/// **Private** - address plus content; absent content is null
fn decode_object_record(fields: &RecordFields, index: usize) -> Result<(u32, Value), ParseError> {
    let token = required_str(fields, index, ADDRESS_FIELD)?;
    let address =
        parse_address(token)?.ok_or_else(|| ParseError::InvalidAddress(token.to_string()))?;

    let content = match fields.get(CONTENT_FIELD) {
        Some(raw) => decode(raw)?,
        None => Value::Null,
    };

    Ok((address, content))
}

/// **Private** - a string field that must be present
fn required_str<'a>(
    fields: &'a RecordFields,
    index: usize,
    field: &'static str,
) -> Result<&'a str, ParseError> {
    match fields.get(field) {
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(other) => Err(ParseError::InvalidFormat(format!(
            "Record {}: field '{}' must be a string (is {})",
            index,
            field,
            json_kind(other)
        ))),
        None => Err(ParseError::MissingField { index, field }),
    }
}

/// **Private** - JSON type name for error messages
fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
