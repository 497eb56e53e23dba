//! Inspection command implementations.
//!
//! Every command:
//! 1. Loads and resolves the trace
//! 2. Selects instructions (filter, index or search)
//! 3. Prints rows or outlines, or writes an export

use super::models::{ExportArgs, ListArgs, SearchArgs, ShowArgs};
use crate::output::{build_export, render_outline, render_table, write_export};
use crate::session::TraceSession;
use crate::utils::config::MAX_OUTLINE_DEPTH;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Execute the list command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Trace file cannot be read or decoded
pub fn execute_list(args: ListArgs) -> Result<()> {
    let mut session = load_session(&args.file)?;

    let mut visible = session
        .set_filter(args.filter.as_deref().unwrap_or_default())
        .to_vec();
    let total = visible.len();
    if let Some(limit) = args.limit {
        visible.truncate(limit);
    }

    let trace = session.trace().context("No trace loaded")?;
    print!("{}", render_table(trace, &visible));

    if visible.len() < total {
        println!("... {} more", total - visible.len());
    }
    info!(
        "{} of {} instructions match",
        total,
        trace.instructions().len()
    );

    Ok(())
}

/// Execute the show command
///
/// **Public** - prints the expanded operands of one instruction
///
/// # Errors
/// * Trace file cannot be read or decoded
/// * Index out of range
pub fn execute_show(args: ShowArgs) -> Result<()> {
    let session = load_session(&args.file)?;
    let trace = session.trace().context("No trace loaded")?;

    let row = trace.row(args.index).with_context(|| {
        format!(
            "Instruction {} out of range (trace has {})",
            args.index,
            trace.instructions().len()
        )
    })?;
    let nodes = trace.outline(args.index).context("Instruction vanished")?;

    println!("#{} {} {}", row.index, row.function, row.op);
    print!("{}", render_outline(&nodes, trace.arena(), args.depth));

    Ok(())
}

/// Execute the search command
///
/// **Public** - lists matches and expands the selected one
pub fn execute_search(args: SearchArgs) -> Result<()> {
    let mut session = load_session(&args.file)?;
    if let Some(filter) = &args.filter {
        session.set_filter(filter);
    }

    let cursor = session.search(&args.text);
    let selected = cursor.seek(args.nth);
    let matches = cursor.matches().to_vec();
    let position = cursor.position();

    let trace = session.trace().context("No trace loaded")?;
    println!("{} matches for {:?}", matches.len(), args.text);
    print!("{}", render_table(trace, &matches));

    if let Some(index) = selected {
        println!();
        println!("Match {}/{}: instruction #{}", position + 1, matches.len(), index);
        if let Some(nodes) = trace.outline(index) {
            print!("{}", render_outline(&nodes, trace.arena(), args.depth));
        }
    }

    Ok(())
}

/// Execute the export command
///
/// **Public** - writes rendered rows as JSON
pub fn execute_export(args: ExportArgs) -> Result<()> {
    let start_time = Instant::now();
    let mut session = load_session(&args.file)?;

    let visible = session
        .set_filter(args.filter.as_deref().unwrap_or_default())
        .to_vec();
    let trace = session.trace().context("No trace loaded")?;

    let export = build_export(
        trace,
        &visible,
        args.file.display().to_string(),
        args.filter.clone(),
    );
    write_export(&export, &args.output).context("Failed to write export JSON")?;

    info!("✓ Export written to: {}", args.output.display());
    debug!("Export completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(())
}

/// Validate show arguments
///
/// **Public** - can be called before execute_show for early validation
pub fn validate_show_args(args: &ShowArgs) -> Result<()> {
    validate_file_arg(&args.file)?;
    validate_depth(args.depth)
}

/// Validate search arguments
pub fn validate_search_args(args: &SearchArgs) -> Result<()> {
    validate_file_arg(&args.file)?;

    if args.text.is_empty() {
        anyhow::bail!("Search text cannot be empty");
    }

    validate_depth(args.depth)
}

/// Validate export arguments
pub fn validate_export_args(args: &ExportArgs) -> Result<()> {
    validate_file_arg(&args.file)?;

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.output == args.file {
        anyhow::bail!("Output path would overwrite the trace file");
    }

    Ok(())
}

/// **Private** - shared trace path check
fn validate_file_arg(file: &Path) -> Result<()> {
    if file.as_os_str().is_empty() {
        anyhow::bail!("Trace file path cannot be empty");
    }
    Ok(())
}

/// **Private** - outline depth bounds
fn validate_depth(depth: usize) -> Result<()> {
    if depth == 0 {
        anyhow::bail!("depth must be greater than 0");
    }

    if depth > MAX_OUTLINE_DEPTH {
        anyhow::bail!("depth is too large (max {})", MAX_OUTLINE_DEPTH);
    }

    Ok(())
}

/// **Private** - load a trace file into a fresh session
fn load_session(file: &Path) -> Result<TraceSession> {
    let mut session = TraceSession::new();
    session
        .load_file(file)
        .with_context(|| format!("Failed to load trace {}", file.display()))?;
    Ok(session)
}
