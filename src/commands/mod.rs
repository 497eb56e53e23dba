//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod inspect;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use inspect::{
    execute_export, execute_list, execute_search, execute_show, validate_export_args,
    validate_search_args, validate_show_args,
};
pub use models::{ExportArgs, ListArgs, SearchArgs, ShowArgs};
pub use utils::{display_version, repair_trace_file, validate_trace_file};
