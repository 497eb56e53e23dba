//! Squirrel Trace Explorer CLI
//!
//! Browses and searches the execution traces written by the Squirrel tracer.
//! Every command loads the whole trace and resolves it before answering.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use squirrel_trace_explorer::commands::{
    display_version, execute_export, execute_list, execute_search, execute_show,
    repair_trace_file, validate_export_args, validate_search_args, validate_show_args,
    validate_trace_file, ExportArgs, ListArgs, SearchArgs, ShowArgs,
};
use squirrel_trace_explorer::utils::config::DEFAULT_OUTLINE_DEPTH;

/// Squirrel Trace Explorer - object graphs from Squirrel VM traces
#[derive(Parser, Debug)]
#[command(name = "sq-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// List instructions, optionally filtered
    List {
        /// Trace file written by the tracer
        #[arg(short, long, env = "SQ_TRACE_FILE", default_value = "trace.json")]
        file: PathBuf,

        /// Only list instructions containing this text (case-sensitive)
        #[arg(long)]
        filter: Option<String>,

        /// Maximum number of rows to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Expand the operands of one instruction
    Show {
        /// Trace file written by the tracer
        #[arg(short, long, env = "SQ_TRACE_FILE", default_value = "trace.json")]
        file: PathBuf,

        /// Instruction index
        #[arg(short, long)]
        index: usize,

        /// Levels to expand below the operands
        #[arg(short, long, default_value_t = DEFAULT_OUTLINE_DEPTH)]
        depth: usize,
    },

    /// Search instructions and expand one match
    Search {
        /// Trace file written by the tracer
        #[arg(short, long, env = "SQ_TRACE_FILE", default_value = "trace.json")]
        file: PathBuf,

        /// Text to search for (case-sensitive)
        #[arg(short, long)]
        text: String,

        /// Filter applied before searching
        #[arg(long)]
        filter: Option<String>,

        /// Match to expand (zero-based)
        #[arg(long, default_value_t = 0)]
        nth: usize,

        /// Levels to expand below the operands
        #[arg(short, long, default_value_t = DEFAULT_OUTLINE_DEPTH)]
        depth: usize,
    },

    /// Export rendered instructions as JSON
    Export {
        /// Trace file written by the tracer
        #[arg(short, long, env = "SQ_TRACE_FILE", default_value = "trace.json")]
        file: PathBuf,

        /// Output path for the JSON export
        #[arg(short, long, default_value = "export.json")]
        output: PathBuf,

        /// Only export instructions containing this text
        #[arg(long)]
        filter: Option<String>,
    },

    /// Load a trace and report what it contains
    Validate {
        /// Trace file written by the tracer
        #[arg(short, long, env = "SQ_TRACE_FILE", default_value = "trace.json")]
        file: PathBuf,
    },

    /// Close a trace file truncated mid-write (rewrites the file)
    Repair {
        /// Trace file written by the tracer
        #[arg(short, long, env = "SQ_TRACE_FILE", default_value = "trace.json")]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::List {
            file,
            filter,
            limit,
        } => {
            execute_list(ListArgs {
                file,
                filter,
                limit,
            })?;
        }

        Commands::Show { file, index, depth } => {
            let args = ShowArgs { file, index, depth };
            validate_show_args(&args)?;
            execute_show(args)?;
        }

        Commands::Search {
            file,
            text,
            filter,
            nth,
            depth,
        } => {
            let args = SearchArgs {
                file,
                text,
                filter,
                nth,
                depth,
            };
            validate_search_args(&args)?;
            execute_search(args)?;
        }

        Commands::Export {
            file,
            output,
            filter,
        } => {
            let args = ExportArgs {
                file,
                output,
                filter,
            };
            validate_export_args(&args)?;
            execute_export(args)?;
        }

        Commands::Validate { file } => {
            validate_trace_file(file)?;
        }

        Commands::Repair { file } => {
            repair_trace_file(file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
