//! Address table and reference resolution.
//!
//! This module handles:
//! - Mapping dumped addresses to decoded objects
//! - Settling every reachable reference as resolved or missing

pub mod address_table;
pub mod resolve;

// Re-export main types
pub use address_table::AddressTable;
pub use resolve::{resolve, MissingReference, ResolveReport};
