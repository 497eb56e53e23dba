//! Mapping from dumped addresses to decoded objects.

use crate::parser::value::ValueId;
use std::collections::HashMap;

/// Address of every object record, pointing into the arena
///
/// Built once per load. A later record at the same address replaces the
/// earlier one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressTable {
    entries: HashMap<u32, ValueId>,
}

impl AddressTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the one it replaced
    pub fn insert(&mut self, address: u32, id: ValueId) -> Option<ValueId> {
        self.entries.insert(address, id)
    }

    pub fn get(&self, address: u32) -> Option<ValueId> {
        self.entries.get(&address).copied()
    }

    pub fn contains(&self, address: u32) -> bool {
        self.entries.contains_key(&address)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::value::{ObjectArena, Value};

    #[test]
    fn test_later_entry_replaces_earlier() {
        let mut arena = ObjectArena::new();
        let first = arena.push(Value::Int(1));
        let second = arena.push(Value::Int(2));

        let mut table = AddressTable::new();
        assert_eq!(table.insert(0x10, first), None);
        assert_eq!(table.insert(0x10, second), Some(first));

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0x10), Some(second));
        assert!(!table.contains(0x20));
    }
}
