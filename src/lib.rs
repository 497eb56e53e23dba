//! Squirrel Trace Explorer
//!
//! Reconstructs a navigable object graph from the execution traces written
//! by the Squirrel tracer, and searches it.
//!
//! A trace is a flat JSON array of `instruction` and `object` records.
//! Loading one decodes every record, maps each dumped object to its address,
//! and resolves the `POINTER:XXXXXXXX` tokens found in instruction operands
//! into references to those objects, cycles included.
//!
//! ## Getting Started
//!
//! ```bash
//! sq-trace list --file trace.json --filter load
//! sq-trace show --file trace.json --index 42
//! ```

pub mod commands;
pub mod input;
pub mod output;
pub mod parser;
pub mod resolver;
pub mod search;
pub mod session;
pub mod utils;
pub mod view;

pub use parser::{parse_trace, Instruction, ObjectArena, ParsedTrace, Value};
pub use session::TraceSession;
