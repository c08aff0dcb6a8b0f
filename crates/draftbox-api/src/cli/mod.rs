//! CLI command definitions for the `draftbox` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod draft;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Local draft store: save, list and recover drafts by type.
#[derive(Parser)]
#[command(name = "draftbox", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Only log errors. Command results are still printed.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save a draft. Creates a new draft unless --id names an existing one.
    Save {
        /// Draft type (e.g. "blog", "article").
        draft_type: String,

        /// Human-readable title.
        title: String,

        /// Draft payload as JSON. Anything that is not valid JSON is stored as a string.
        data: String,

        /// Update this draft instead of creating a new one.
        #[arg(long)]
        id: Option<String>,
    },

    /// Show one draft.
    Get {
        /// Draft id.
        id: String,
    },

    /// List drafts of one type, most recently updated first.
    #[command(alias = "ls")]
    List {
        /// Draft type.
        draft_type: String,
    },

    /// List drafts of every type.
    #[command(name = "list-all")]
    ListAll,

    /// Find drafts of one type by exact title.
    Find {
        /// Draft type.
        draft_type: String,

        /// Title to match.
        title: String,
    },

    /// List the draft types in the store with their counts.
    Types,

    /// Delete a draft. Deleting an unknown id is not an error.
    #[command(alias = "rm")]
    Delete {
        /// Draft id.
        id: String,
    },

    /// Delete every draft of every type.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Tracing filter for the requested verbosity.
pub fn log_filter(verbose: u8, quiet: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info,draftbox=debug",
        _ => "trace",
    }
}
