use crate::utils::config::DEFAULT_OUTLINE_DEPTH;
use std::path::PathBuf;

/// Arguments for the list command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ListArgs {
    /// Trace file to load
    pub file: PathBuf,

    /// Only list instructions containing this text
    pub filter: Option<String>,

    /// Maximum number of rows to print
    pub limit: Option<usize>,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            file: PathBuf::from("trace.json"),
            filter: None,
            limit: None,
        }
    }
}

/// Arguments for the show command
#[derive(Debug, Clone)]
pub struct ShowArgs {
    /// Trace file to load
    pub file: PathBuf,

    /// Instruction to expand
    pub index: usize,

    /// Levels to expand below the operands
    pub depth: usize,
}

impl Default for ShowArgs {
    fn default() -> Self {
        Self {
            file: PathBuf::from("trace.json"),
            index: 0,
            depth: DEFAULT_OUTLINE_DEPTH,
        }
    }
}

/// Arguments for the search command
#[derive(Debug, Clone)]
pub struct SearchArgs {
    /// Trace file to load
    pub file: PathBuf,

    /// Text to search for
    pub text: String,

    /// Filter applied before searching
    pub filter: Option<String>,

    /// Match to select and expand (zero-based, clamped)
    pub nth: usize,

    /// Levels to expand below the operands of the selected match
    pub depth: usize,
}

impl Default for SearchArgs {
    fn default() -> Self {
        Self {
            file: PathBuf::from("trace.json"),
            text: String::new(),
            filter: None,
            nth: 0,
            depth: DEFAULT_OUTLINE_DEPTH,
        }
    }
}

/// Arguments for the export command
#[derive(Debug, Clone)]
pub struct ExportArgs {
    /// Trace file to load
    pub file: PathBuf,

    /// Output path for the JSON export
    pub output: PathBuf,

    /// Only export instructions containing this text
    pub filter: Option<String>,
}

impl Default for ExportArgs {
    fn default() -> Self {
        Self {
            file: PathBuf::from("trace.json"),
            output: PathBuf::from("export.json"),
            filter: None,
        }
    }
}
