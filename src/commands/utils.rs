use crate::input::{load_trace_file, repair_file_in_place};
use crate::utils::config::EXPORT_SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// How many missing references `validate` lists before summarizing
const MISSING_SHOWN: usize = 10;

/// Validate a trace file and print its load summary
pub fn validate_trace_file(file_path: PathBuf) -> Result<()> {
    println!("Validating trace: {}", file_path.display());

    let trace = load_trace_file(&file_path)
        .with_context(|| format!("Failed to load trace {}", file_path.display()))?;
    let summary = trace.summary();

    println!("✓ Valid trace JSON");
    println!("  Instructions: {}", summary.instructions);
    println!("  Object records: {}", summary.object_records);
    println!("  Addresses: {}", summary.addresses);
    println!("  Duplicate addresses: {}", summary.duplicate_addresses);
    println!("  Skipped records: {}", summary.skipped_records);
    println!("  Resolved references: {}", summary.resolved_references);
    println!("  Missing references: {}", summary.missing_references);

    let missing = trace.missing_references();
    for diagnostic in missing.iter().take(MISSING_SHOWN) {
        println!(
            "    POINTER:{:08X} (first used by instruction {})",
            diagnostic.address, diagnostic.instruction
        );
    }
    if missing.len() > MISSING_SHOWN {
        println!("    ... {} more", missing.len() - MISSING_SHOWN);
    }

    Ok(())
}

/// Close a truncated trace file on disk
pub fn repair_trace_file(file_path: PathBuf) -> Result<()> {
    let rewritten = repair_file_in_place(&file_path)
        .with_context(|| format!("Failed to repair {}", file_path.display()))?;

    if rewritten {
        println!("✓ Closed truncated trace: {}", file_path.display());
    } else {
        println!("✓ Trace already closed: {}", file_path.display());
    }

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Squirrel Trace Explorer v{}", env!("CARGO_PKG_VERSION"));
    println!("Export Schema: v{}", EXPORT_SCHEMA_VERSION);
    println!();
    println!("Object-graph reconstruction and search for Squirrel VM execution traces.");
}
