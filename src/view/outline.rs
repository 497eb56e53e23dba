//! Traversal adapter producing outline nodes for a tree view.
//!
//! Children are computed one level at a time, only when a node is expanded.
//! Each node carries the arena ids of the references expanded on the way down
//! to it; meeting one of those ids again yields a cycle placeholder instead of
//! recursing. The path is per node, so several traversals can share a graph.

use crate::parser::schema::Instruction;
use crate::parser::value::{Object, ObjectArena, RefState, Value, ValueId};
use crate::utils::config::{ARG_FIELDS, CYCLE_TEXT, MISSING_REFERENCE_TEXT};
use crate::view::hash_table::HashNode;
use log::debug;

/// Stand-in child for a value that cannot be expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    MissingReference,
    Cycle,
}

impl Placeholder {
    pub fn text(self) -> &'static str {
        match self {
            Placeholder::MissingReference => MISSING_REFERENCE_TEXT,
            Placeholder::Cycle => CYCLE_TEXT,
        }
    }
}

/// What an outline node shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeContent<'a> {
    Value(&'a Value),
    Placeholder(Placeholder),
}

/// One node of an outline
#[derive(Debug, Clone)]
pub struct OutlineNode<'a> {
    label: String,
    content: NodeContent<'a>,
    leaf_text: Option<String>,
    path: Vec<ValueId>,
}

impl<'a> OutlineNode<'a> {
    fn of_value(label: String, value: &'a Value, arena: &'a ObjectArena, path: &[ValueId]) -> Self {
        let mut probe = path.to_vec();
        let leaf_text = (!has_children(value, arena, &mut probe)).then(|| value.render(arena));
        Self {
            label,
            content: NodeContent::Value(value),
            leaf_text,
            path: path.to_vec(),
        }
    }

    fn placeholder(placeholder: Placeholder, path: &[ValueId]) -> Self {
        Self {
            label: placeholder.text().to_string(),
            content: NodeContent::Placeholder(placeholder),
            leaf_text: None,
            path: path.to_vec(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn content(&self) -> NodeContent<'a> {
        self.content
    }

    pub fn value(&self) -> Option<&'a Value> {
        match self.content {
            NodeContent::Value(value) => Some(value),
            NodeContent::Placeholder(_) => None,
        }
    }

    pub fn placeholder_kind(&self) -> Option<Placeholder> {
        match self.content {
            NodeContent::Placeholder(placeholder) => Some(placeholder),
            NodeContent::Value(_) => None,
        }
    }

    /// Compact rendering, present only when the node has no children
    pub fn leaf_text(&self) -> Option<&str> {
        self.leaf_text.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        match self.content {
            NodeContent::Value(_) => self.leaf_text.is_some(),
            NodeContent::Placeholder(_) => true,
        }
    }

    /// Label with the value's rendering appended for leaves
    pub fn display_label(&self) -> String {
        match &self.leaf_text {
            Some(text) => format!("{}: {}", self.label, text),
            None => self.label.clone(),
        }
    }

    /// Expand this node one level
    pub fn children(&self, arena: &'a ObjectArena) -> Vec<OutlineNode<'a>> {
        match self.content {
            NodeContent::Value(value) => children_of(value, arena, &self.path),
            NodeContent::Placeholder(_) => Vec::new(),
        }
    }
}

/// Ordered children of `value`
///
/// **Public** - core of the traversal adapter
///
/// # Arguments
/// * `value` - Value being expanded
/// * `arena` - Arena the value's references point into
/// * `path` - Arena ids of the references already expanded above `value`
///
/// # Returns
/// One node per child: array elements labeled by declared type or index,
/// object fields labeled by key, hash-table entries flattened by key, and the
/// target's children for a resolved reference. A missing reference yields a
/// single placeholder, and so does a reference whose target is on `path`.
pub fn children_of<'a>(
    value: &'a Value,
    arena: &'a ObjectArena,
    path: &[ValueId],
) -> Vec<OutlineNode<'a>> {
    match value {
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_) => {
            Vec::new()
        }
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let label = item
                    .short_label(arena)
                    .unwrap_or_else(|| format!("[{}]", index));
                OutlineNode::of_value(label, item, arena, path)
            })
            .collect(),
        Value::Object(object) => field_children(object, arena, path),
        Value::HashTable(view) => match view.nodes(arena) {
            Some(nodes) => node_children(&nodes, arena, path),
            None => {
                debug!("Hash table layout not recognized, showing raw fields");
                field_children(view.object(), arena, path)
            }
        },
        Value::Reference(reference) => match reference.state() {
            RefState::Unresolved => Vec::new(),
            RefState::Missing => vec![OutlineNode::placeholder(Placeholder::MissingReference, path)],
            RefState::Resolved(id) if path.contains(&id) => {
                vec![OutlineNode::placeholder(Placeholder::Cycle, path)]
            }
            RefState::Resolved(id) => {
                let mut inner = path.to_vec();
                inner.push(id);
                children_of(arena.get(id), arena, &inner)
            }
        },
    }
}

/// Top-level nodes of an instruction: its four operands
pub fn instruction_outline<'a>(
    instruction: &'a Instruction,
    arena: &'a ObjectArena,
) -> Vec<OutlineNode<'a>> {
    ARG_FIELDS
        .iter()
        .zip(instruction.args.iter())
        .map(|(name, arg)| OutlineNode::of_value(name.to_string(), arg, arena, &[]))
        .collect()
}

/// **Private** - one child per field, labeled by key text
fn field_children<'a>(
    object: &'a Object,
    arena: &'a ObjectArena,
    path: &[ValueId],
) -> Vec<OutlineNode<'a>> {
    object
        .fields()
        .iter()
        .map(|(key, field)| OutlineNode::of_value(key.text(arena), field, arena, path))
        .collect()
}

/// **Private** - string and null keys label their value directly; any other
/// key is shown as a `key`/`val` pair
fn node_children<'a>(
    nodes: &[HashNode<'a>],
    arena: &'a ObjectArena,
    path: &[ValueId],
) -> Vec<OutlineNode<'a>> {
    let mut children = Vec::with_capacity(nodes.len());
    for node in nodes {
        let key = arena.deref(node.key);
        if matches!(key, Value::Str(_) | Value::Null) {
            children.push(OutlineNode::of_value(key.text(arena), node.val, arena, path));
        } else {
            children.push(OutlineNode::of_value("key".to_string(), node.key, arena, path));
            children.push(OutlineNode::of_value("val".to_string(), node.val, arena, path));
        }
    }
    children
}

/// **Private** - whether expanding `value` would yield at least one node
fn has_children(value: &Value, arena: &ObjectArena, path: &mut Vec<ValueId>) -> bool {
    match value {
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_) => false,
        Value::Array(items) => !items.is_empty(),
        Value::Object(object) => !object.is_empty(),
        Value::HashTable(view) => match view.nodes(arena) {
            Some(nodes) => !nodes.is_empty(),
            None => !view.object().is_empty(),
        },
        Value::Reference(reference) => match reference.state() {
            RefState::Unresolved => false,
            RefState::Missing => true,
            RefState::Resolved(id) if path.contains(&id) => true,
            RefState::Resolved(id) => {
                path.push(id);
                let found = has_children(arena.get(id), arena, path);
                path.pop();
                found
            }
        },
    }
}
