//! Revision call graph CLI.
//!
//! Provides the `revgraph` binary with subcommands for working with encoded
//! call graph documents: `validate` checks a document against the wire
//! format and its structural invariants, `canonicalize` rewrites it in
//! canonical form, and `stats` summarizes its contents.
//!
//! All three go through the same decode path the pipeline uses, so a
//! document the CLI accepts is a document the pipeline accepts.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use revgraph_core::{FormatError, RevisionCallGraph};

/// Revision call graph tools.
#[derive(Parser)]
#[command(name = "revgraph", about = "Revision call graph tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Check a document against the wire format and its invariants.
    Validate {
        /// Path to the encoded document.
        input: PathBuf,
    },

    /// Rewrite a document in canonical form.
    Canonicalize {
        /// Path to the encoded document.
        input: PathBuf,

        /// Write the result here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarize a document's contents.
    Stats {
        /// Path to the encoded document.
        input: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Validate { input } => run_validate(&input),
        Commands::Canonicalize { input, output } => run_canonicalize(&input, output),
        Commands::Stats { input } => run_stats(&input),
    };
    process::exit(exit_code);
}

/// Exit codes: 0 = success, 1 = format error, 2 = invariant violation,
/// 3 = I/O error.
fn decode_error_code(err: &FormatError) -> i32 {
    match err {
        FormatError::Invariant(_) => 2,
        _ => 1,
    }
}

fn load(input: &PathBuf) -> Result<RevisionCallGraph, i32> {
    let raw = match fs::read_to_string(input) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Error: failed to read '{}': {}", input.display(), e);
            return Err(3);
        }
    };
    RevisionCallGraph::from_json_str(&raw).map_err(|e| {
        eprintln!("Error: {}", e);
        decode_error_code(&e)
    })
}

/// Execute the validate subcommand.
fn run_validate(input: &PathBuf) -> i32 {
    match load(input) {
        Ok(graph) => {
            println!("{} is valid", graph.revision_id());
            0
        }
        Err(code) => code,
    }
}

/// Execute the canonicalize subcommand.
fn run_canonicalize(input: &PathBuf, output: Option<PathBuf>) -> i32 {
    let mut graph = match load(input) {
        Ok(graph) => graph,
        Err(code) => return code,
    };
    graph.sort_internal_calls();
    let encoded = graph.to_json_string();

    match output {
        Some(path) => {
            if let Err(e) = fs::write(&path, encoded) {
                eprintln!("Error: failed to write '{}': {}", path.display(), e);
                return 3;
            }
            0
        }
        None => {
            println!("{}", encoded);
            0
        }
    }
}

/// Execute the stats subcommand.
///
/// Prints a small JSON summary to stdout for machine-readable output.
fn run_stats(input: &PathBuf) -> i32 {
    let graph = match load(input) {
        Ok(graph) => graph,
        Err(code) => return code,
    };

    let summary = serde_json::json!({
        "revision": graph.revision_id(),
        "generator": graph.generator(),
        "timestamp": graph.timestamp(),
        "types": graph.hierarchy().len(),
        "methods": graph.all_methods().len(),
        "internalCalls": graph.graph().internal_calls().len(),
        "externalCalls": graph.graph().external_calls().len(),
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: failed to serialize summary: {}", e);
            1
        }
    }
}
