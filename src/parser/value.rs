//! Value model for decoded trace entities.
//!
//! Every entity read from a trace decodes into one closed [`Value`] variant.
//! Containers own their children inline; only [`Reference`] points elsewhere,
//! by [`ValueId`] into the [`ObjectArena`] that holds each dumped object once.

use crate::search::value_contains;
use crate::utils::config::{MISSING_REFERENCE_TEXT, POINTER_PREFIX, UNKNOWN_TYPE};
use crate::view::hash_table::HashTableView;
use crate::view::outline::{children_of, OutlineNode};
use std::collections::HashMap;

/// Index of a dumped object inside an [`ObjectArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueId(usize);

impl ValueId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Resolution state of a [`Reference`]
///
/// Starts `Unresolved` and moves exactly once to a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefState {
    Unresolved,
    Resolved(ValueId),
    /// The address was never dumped by the tracer
    Missing,
}

impl RefState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RefState::Unresolved)
    }
}

/// A pointer-style reference to another dumped object
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    address: u32,
    state: RefState,
}

impl Reference {
    pub fn new(address: u32) -> Self {
        Self {
            address,
            state: RefState::Unresolved,
        }
    }

    pub fn address(&self) -> u32 {
        self.address
    }

    pub fn state(&self) -> RefState {
        self.state
    }

    /// The address token this reference was decoded from
    pub fn token(&self) -> String {
        format!("{}{:08X}", POINTER_PREFIX, self.address)
    }

    /// Move an unresolved reference to a terminal state
    ///
    /// Returns false (and changes nothing) if the reference already settled.
    pub(crate) fn settle(&mut self, state: RefState) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        debug_assert!(state.is_terminal());
        self.state = state;
        true
    }
}

/// A generic dumped container with arbitrary keys
///
/// Fields keep file order. Keys are values themselves (the tracer may emit
/// address tokens as keys); string keys are additionally indexed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    fields: Vec<(Value, Value)>,
    names: HashMap<String, usize>,
    declared_type: Option<String>,
}

impl Object {
    pub fn new(declared_type: Option<String>) -> Self {
        Self {
            declared_type,
            ..Self::default()
        }
    }

    /// Append a field, replacing the value of an existing string key
    pub fn insert(&mut self, key: Value, value: Value) {
        if let Value::Str(name) = &key {
            if let Some(&slot) = self.names.get(name) {
                self.fields[slot].1 = value;
                return;
            }
            self.names.insert(name.clone(), self.fields.len());
        }
        self.fields.push((key, value));
    }

    /// Look up a string-keyed field
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.names.get(name).map(|&slot| &self.fields[slot].1)
    }

    pub fn fields(&self) -> &[(Value, Value)] {
        &self.fields
    }

    /// Keys are never rewritten in place except for reference settling,
    /// which leaves string keys (and so the name index) untouched.
    pub(crate) fn fields_mut(&mut self) -> &mut [(Value, Value)] {
        &mut self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref()
    }

    /// Declared type, or the "Unknown type" sentinel
    pub fn type_label(&self) -> &str {
        self.declared_type().unwrap_or(UNKNOWN_TYPE)
    }
}

/// A decoded trace entity
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// Narrowed to 32 bits on decode, matching the VM's float width
    Float(f32),
    Str(String),
    Object(Object),
    Array(Vec<Value>),
    Reference(Reference),
    HashTable(HashTableView),
}

impl Value {
    /// Compact inline rendering
    pub fn render(&self, arena: &ObjectArena) -> String {
        match arena.deref(self) {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Str(s) => format!("\"{}\"", s),
            Value::Object(_) | Value::HashTable(_) => "{...}".to_string(),
            Value::Array(_) => "[...]".to_string(),
            // Only missing, unresolved or self-referencing chains are left here
            Value::Reference(reference) => match reference.state() {
                RefState::Missing => MISSING_REFERENCE_TEXT.to_string(),
                _ => reference.token(),
            },
        }
    }

    /// Plain text: strings without quotes, everything else as rendered
    pub fn text(&self, arena: &ObjectArena) -> String {
        match arena.deref(self) {
            Value::Str(s) => s.clone(),
            other => other.render(arena),
        }
    }

    /// Label of this value as an outline node
    pub fn label(&self, arena: &ObjectArena) -> String {
        match arena.deref(self) {
            Value::Object(object) => object.type_label().to_string(),
            Value::HashTable(view) => view.type_label().to_string(),
            Value::Array(items) => format!("Array ({})", items.len()),
            other => other.render(arena),
        }
    }

    /// Declared type of an object behind this value, if any
    pub fn short_label(&self, arena: &ObjectArena) -> Option<String> {
        match arena.deref(self) {
            Value::Object(object) => object.declared_type().map(str::to_string),
            Value::HashTable(view) => Some(view.type_label().to_string()),
            _ => None,
        }
    }

    /// Ordered child nodes for an outline view
    pub fn children<'a>(&'a self, arena: &'a ObjectArena) -> Vec<OutlineNode<'a>> {
        children_of(self, arena, &[])
    }

    /// Cycle-safe substring search over this value and everything it reaches
    pub fn contains(&self, arena: &ObjectArena, text: &str) -> bool {
        value_contains(self, arena, text)
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Value::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }
}

/// Storage for the decoded content of every object record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectArena {
    values: Vec<Value>,
}

impl ObjectArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: Value) -> ValueId {
        self.values.push(value);
        ValueId(self.values.len() - 1)
    }

    /// Ids are only minted by [`ObjectArena::push`], so lookups cannot miss.
    pub fn get(&self, id: ValueId) -> &Value {
        &self.values[id.0]
    }

    pub(crate) fn take(&mut self, id: ValueId) -> Value {
        std::mem::take(&mut self.values[id.0])
    }

    pub(crate) fn put(&mut self, id: ValueId, value: Value) {
        self.values[id.0] = value;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Follow resolved references to the value they stand for
    ///
    /// Stops at the first non-reference, at a missing or unresolved reference,
    /// or when a chain of references loops back on itself.
    pub fn deref<'a>(&'a self, value: &'a Value) -> &'a Value {
        let mut current = value;
        let mut seen: Vec<ValueId> = Vec::new();
        while let Value::Reference(reference) = current {
            let RefState::Resolved(id) = reference.state() else {
                break;
            };
            if seen.contains(&id) {
                break;
            }
            seen.push(id);
            current = self.get(id);
        }
        current
    }
}
