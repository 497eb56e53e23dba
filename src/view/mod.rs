//! Presentation-facing views over a resolved trace.
//!
//! This module handles:
//! - Reading `SQTable` objects as hash tables
//! - Producing lazy, cycle-guarded outline nodes for any value

pub mod hash_table;
pub mod outline;

// Re-export main types and functions
pub use hash_table::{HashNode, HashTableView};
pub use outline::{children_of, instruction_outline, NodeContent, OutlineNode, Placeholder};
