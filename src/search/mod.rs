//! Search and filtering over a resolved trace.

pub mod cursor;
pub mod filter;

// Re-export main types and functions
pub use cursor::SearchCursor;
pub use filter::{filter_instructions, instruction_contains, value_contains};
