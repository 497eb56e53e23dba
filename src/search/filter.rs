//! Substring search over resolved values and instructions.
//!
//! A value matches when its own compact rendering contains the text, when any
//! key or child matches, or when the target of a resolved reference matches.
//! Hash tables are searched through their entries, as the outline shows them.
//! Every arena object is searched at most once per call; the visited set is
//! passed down explicitly, so cycles terminate and shared subgraphs stay linear.

use crate::parser::schema::Instruction;
use crate::parser::value::{ObjectArena, RefState, Value, ValueId};
use std::collections::HashSet;

/// Whether `value` or anything it reaches contains `text`
///
/// **Public** - search entry point for a single value
///
/// Matching is case-sensitive and exact. Missing references never match.
pub fn value_contains(value: &Value, arena: &ObjectArena, text: &str) -> bool {
    let mut visited = HashSet::new();
    contains_in(value, arena, text, &mut visited)
}

/// Whether an instruction's `fn`, `op` or any operand contains `text`
///
/// **Public** - the predicate behind instruction filtering
pub fn instruction_contains(instruction: &Instruction, arena: &ObjectArena, text: &str) -> bool {
    if instruction.function.contains(text) || instruction.op.contains(text) {
        return true;
    }

    let mut visited = HashSet::new();
    instruction
        .args
        .iter()
        .any(|arg| contains_in(arg, arena, text, &mut visited))
}

/// Indices of the instructions matching `text`, in trace order
///
/// **Public** - used by the session filter, `list` and `export`
///
/// # Arguments
/// * `instructions` - Resolved instructions
/// * `arena` - Arena their references point into
/// * `text` - Substring to look for; empty matches every instruction
pub fn filter_instructions(
    instructions: &[Instruction],
    arena: &ObjectArena,
    text: &str,
) -> Vec<usize> {
    instructions
        .iter()
        .enumerate()
        .filter(|(_, instruction)| text.is_empty() || instruction_contains(instruction, arena, text))
        .map(|(index, _)| index)
        .collect()
}

/// **Private** - recursive walk with an explicit visited set
fn contains_in(
    value: &Value,
    arena: &ObjectArena,
    text: &str,
    visited: &mut HashSet<ValueId>,
) -> bool {
    match value {
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_) => {
            value.render(arena).contains(text)
        }
        Value::Array(items) => {
            "[...]".contains(text) || items.iter().any(|item| contains_in(item, arena, text, visited))
        }
        Value::Object(object) => {
            "{...}".contains(text)
                || object.fields().iter().any(|(key, field)| {
                    contains_in(key, arena, text, visited) || contains_in(field, arena, text, visited)
                })
        }
        Value::HashTable(view) => {
            if "{...}".contains(text) {
                return true;
            }
            match view.nodes(arena) {
                Some(nodes) => nodes.iter().any(|node| {
                    contains_in(node.key, arena, text, visited)
                        || contains_in(node.val, arena, text, visited)
                }),
                None => view.object().fields().iter().any(|(key, field)| {
                    contains_in(key, arena, text, visited) || contains_in(field, arena, text, visited)
                }),
            }
        }
        Value::Reference(reference) => match reference.state() {
            RefState::Missing => false,
            RefState::Unresolved => reference.token().contains(text),
            RefState::Resolved(id) => {
                if !visited.insert(id) {
                    return false;
                }
                contains_in(arena.get(id), arena, text, visited)
            }
        },
    }
}
