//! Hash-table view over a generically decoded `SQTable` object.
//!
//! The tracer dumps a table as its raw node slots:
//! `{"ObjectType": "SQTable", "_nodes": [{"key": .., "val": ..}, ..]}`.
//! The view reads that layout back as key/value pairs, and reports a shape
//! mismatch instead of failing so callers can fall back to the plain object.

use crate::parser::value::{Object, ObjectArena, Value};
use crate::utils::config::{HASH_KEY_FIELD, HASH_NODES_FIELD, HASH_VAL_FIELD};

/// An `SQTable` object read as a hash table
#[derive(Debug, Clone, PartialEq)]
pub struct HashTableView {
    object: Object,
}

/// One node slot of a hash table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashNode<'a> {
    pub key: &'a Value,
    pub val: &'a Value,
}

impl HashTableView {
    pub fn new(object: Object) -> Self {
        Self { object }
    }

    /// The generic object underneath
    pub fn object(&self) -> &Object {
        &self.object
    }

    pub(crate) fn object_mut(&mut self) -> &mut Object {
        &mut self.object
    }

    pub fn type_label(&self) -> &str {
        self.object.type_label()
    }

    /// Node slots in dump order
    ///
    /// Returns `None` when `_nodes` is absent or not an array, or when any
    /// slot is not an object carrying both `key` and `val`.
    pub fn nodes<'a>(&'a self, arena: &'a ObjectArena) -> Option<Vec<HashNode<'a>>> {
        let Value::Array(slots) = arena.deref(self.object.get(HASH_NODES_FIELD)?) else {
            return None;
        };

        slots
            .iter()
            .map(|slot| {
                let Value::Object(node) = arena.deref(slot) else {
                    return None;
                };
                Some(HashNode {
                    key: node.get(HASH_KEY_FIELD)?,
                    val: node.get(HASH_VAL_FIELD)?,
                })
            })
            .collect()
    }

    /// Look up the value stored under a string key
    ///
    /// Keys are compared after following resolved references, since the
    /// tracer dumps strings as separate objects.
    pub fn get<'a>(&'a self, arena: &'a ObjectArena, key: &str) -> Option<&'a Value> {
        self.nodes(arena)?
            .into_iter()
            .find(|node| matches!(arena.deref(node.key), Value::Str(s) if s == key))
            .map(|node| node.val)
    }
}
