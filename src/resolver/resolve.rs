//! Resolve phase: settle every reference reachable from the instructions.
//!
//! References only carry an address until this runs, so forward references
//! (an object dumped after the instruction that uses it) need no special case.
//! Each reference is settled before its target is visited and every dumped
//! object is walked at most once, which is what terminates cyclic graphs.

use super::address_table::AddressTable;
use crate::parser::schema::Instruction;
use crate::parser::value::{ObjectArena, RefState, Value, ValueId};
use log::{debug, warn};

/// A reference whose address was never dumped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingReference {
    pub address: u32,

    /// Instruction whose operands first reached the reference
    pub instruction: usize,
}

/// Outcome of one resolve pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveReport {
    /// References settled on a dumped object during this pass
    pub resolved: usize,

    /// References settled as missing during this pass
    pub missing: Vec<MissingReference>,
}

/// Resolve every reference reachable from `instructions`
///
/// **Public** - second phase of a load, after ingest
///
/// # Arguments
/// * `instructions` - Decoded instructions, mutated in place
/// * `arena` - Decoded object contents, mutated in place
/// * `table` - Fully populated address table
///
/// # Returns
/// Counters and diagnostics for this pass. Running it again over a resolved
/// graph changes nothing and reports nothing.
pub fn resolve(
    instructions: &mut [Instruction],
    arena: &mut ObjectArena,
    table: &AddressTable,
) -> ResolveReport {
    let mut resolver = Resolver {
        table,
        visited: vec![false; arena.len()],
        pending: Vec::new(),
        report: ResolveReport::default(),
    };

    for (index, instruction) in instructions.iter_mut().enumerate() {
        for arg in instruction.args.iter_mut() {
            resolver.link(arg, index);
        }
        resolver.drain(arena, index);
    }

    debug!(
        "Resolved {} references, {} missing",
        resolver.report.resolved,
        resolver.report.missing.len()
    );

    resolver.report
}

/// **Private** - depth-first walk state for one pass
struct Resolver<'t> {
    table: &'t AddressTable,
    visited: Vec<bool>,
    pending: Vec<ValueId>,
    report: ResolveReport,
}

impl Resolver<'_> {
    /// Settle the references inside `value` and queue their targets
    fn link(&mut self, value: &mut Value, instruction: usize) {
        match value {
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_) => {}
            Value::Array(items) => {
                for item in items {
                    self.link(item, instruction);
                }
            }
            Value::Object(object) => {
                for (key, field) in object.fields_mut() {
                    self.link(key, instruction);
                    self.link(field, instruction);
                }
            }
            Value::HashTable(view) => {
                for (key, field) in view.object_mut().fields_mut() {
                    self.link(key, instruction);
                    self.link(field, instruction);
                }
            }
            Value::Reference(reference) => match reference.state() {
                RefState::Resolved(id) => self.pending.push(id),
                RefState::Missing => {}
                RefState::Unresolved => match self.table.get(reference.address()) {
                    Some(id) => {
                        reference.settle(RefState::Resolved(id));
                        self.report.resolved += 1;
                        self.pending.push(id);
                    }
                    None => {
                        reference.settle(RefState::Missing);
                        warn!(
                            "Unknown object at address {} (instruction {})",
                            reference.token(),
                            instruction
                        );
                        self.report.missing.push(MissingReference {
                            address: reference.address(),
                            instruction,
                        });
                    }
                },
            },
        }
    }

    /// Walk every queued object that has not been walked yet
    fn drain(&mut self, arena: &mut ObjectArena, instruction: usize) {
        while let Some(id) = self.pending.pop() {
            let Some(seen) = self.visited.get_mut(id.index()) else {
                continue;
            };
            if *seen {
                continue;
            }
            *seen = true;

            let mut content = arena.take(id);
            self.link(&mut content, instruction);
            arena.put(id, content);
        }
    }
}
