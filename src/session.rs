//! The currently loaded trace plus the filter and search state over it.
//!
//! A load either fully succeeds and replaces the previous trace, or fails and
//! leaves the previous trace, filter and search untouched.

use crate::input::load_trace_file;
use crate::parser::{parse_trace, ParsedTrace};
use crate::search::SearchCursor;
use crate::utils::error::{LoadError, ParseError};
use log::debug;
use std::path::{Path, PathBuf};

/// State behind the instruction list of a viewer
#[derive(Debug, Default)]
pub struct TraceSession {
    trace: Option<ParsedTrace>,
    source: Option<PathBuf>,
    filter: String,
    visible: Vec<usize>,
    cursor: SearchCursor,
}

impl TraceSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an already-parsed JSON document
    pub fn load_value(&mut self, raw: &serde_json::Value) -> Result<&ParsedTrace, ParseError> {
        let trace = parse_trace(raw)?;
        Ok(self.install(trace, None))
    }

    /// Load trace text
    pub fn load_str(&mut self, text: &str) -> Result<&ParsedTrace, ParseError> {
        let raw: serde_json::Value = serde_json::from_str(text)?;
        self.load_value(&raw)
    }

    /// Load a trace file, repairing truncation in memory
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&ParsedTrace, LoadError> {
        let path = path.as_ref();
        let trace = load_trace_file(path)?;
        Ok(self.install(trace, Some(path.to_path_buf())))
    }

    pub fn trace(&self) -> Option<&ParsedTrace> {
        self.trace.as_ref()
    }

    /// File the active trace was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn filter_text(&self) -> &str {
        &self.filter
    }

    /// Instruction indices passing the current filter
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    /// Restrict the visible instructions to those containing `text`
    ///
    /// Resets the search, which runs over visible instructions only.
    pub fn set_filter(&mut self, text: &str) -> &[usize] {
        self.filter = text.to_string();
        self.visible = match &self.trace {
            Some(trace) => trace.filter(text),
            None => Vec::new(),
        };
        self.cursor = SearchCursor::default();
        debug!("Filter {:?} keeps {} instructions", text, self.visible.len());
        &self.visible
    }

    /// Find the visible instructions containing `text` and select the first
    pub fn search(&mut self, text: &str) -> &mut SearchCursor {
        let matches = match &self.trace {
            Some(trace) => self
                .visible
                .iter()
                .copied()
                .filter(|&index| {
                    trace
                        .instruction(index)
                        .is_some_and(|instruction| instruction.contains(trace.arena(), text))
                })
                .collect(),
            None => Vec::new(),
        };
        self.cursor = SearchCursor::new(matches);
        &mut self.cursor
    }

    pub fn cursor(&self) -> &SearchCursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut SearchCursor {
        &mut self.cursor
    }

    /// **Private** - swap in a new trace and reset the views over it
    fn install(&mut self, trace: ParsedTrace, source: Option<PathBuf>) -> &ParsedTrace {
        self.visible = (0..trace.instructions().len()).collect();
        self.filter.clear();
        self.cursor = SearchCursor::default();
        self.source = source;
        self.trace.insert(trace)
    }
}
