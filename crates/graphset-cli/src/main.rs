//! Graphset CLI - inspection tool for graph collections.
//!
//! Reads collections from JSON documents, runs algebra operators on them
//! and writes the result back as a document or prints a summary.

mod commands;
mod document;
mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Graphset collection tool.
///
/// A command-line interface for inspecting, validating and combining
/// graph collections stored as JSON documents.
#[derive(Parser)]
#[command(name = "graphset")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Worker threads (0 = one per core, 1 = sequential)
    #[arg(long, global = true, default_value_t = 0)]
    threads: usize,

    /// Suppress info messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

/// Output format options.
#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// Machine-readable JSON format
    Json,
}

/// Sort direction on the command line.
#[derive(Clone, Copy, ValueEnum, Default)]
enum Order {
    /// Smallest first
    Asc,
    /// Largest first
    #[default]
    Desc,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Display collection information (graph, vertex and edge counts)
    Info {
        /// Path to the collection document
        input: PathBuf,
    },

    /// Validate collection integrity
    Validate {
        /// Path to the collection document
        input: PathBuf,
    },

    /// Keep one graph per isomorphism class
    Distinct {
        /// Path to the collection document
        input: PathBuf,

        /// Write the result document here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Graphs of either collection
    Union(SetOpArgs),

    /// Graphs present in both collections
    Intersect(SetOpArgs),

    /// Graphs of the first collection not present in the second
    Difference(SetOpArgs),

    /// Keep the first N graphs, optionally sorted by a head property
    Top {
        /// Path to the collection document
        input: PathBuf,

        /// Number of graphs to keep
        #[arg(short, long, allow_negative_numbers = true)]
        n: i64,

        /// Head property to sort by
        #[arg(long)]
        key: Option<String>,

        /// Sort direction
        #[arg(long, default_value = "desc")]
        order: Order,

        /// Write the result document here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List registered algorithms
    Algorithms,
}

/// Arguments of the binary set operators.
#[derive(Args)]
struct SetOpArgs {
    /// Path to the first collection document
    left: PathBuf,

    /// Path to the second collection document
    right: PathBuf,

    /// Write the result document here
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    } else if !cli.quiet {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::stderr)
            .init();
    }

    let ctx = commands::Context {
        format: cli.format,
        threads: cli.threads,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::Info { input } => commands::info::run(&input, &ctx),
        Commands::Validate { input } => commands::validate::run(&input, &ctx),
        Commands::Distinct { input, output } => {
            commands::distinct::run(&input, output.as_deref(), &ctx)
        }
        Commands::Union(args) => {
            commands::set_ops::run(commands::set_ops::SetOp::Union, &args, &ctx)
        }
        Commands::Intersect(args) => {
            commands::set_ops::run(commands::set_ops::SetOp::Intersect, &args, &ctx)
        }
        Commands::Difference(args) => {
            commands::set_ops::run(commands::set_ops::SetOp::Difference, &args, &ctx)
        }
        Commands::Top {
            input,
            n,
            key,
            order,
            output,
        } => commands::top::run(&input, n, key.as_deref(), order, output.as_deref(), &ctx),
        Commands::Algorithms => commands::algorithms::run(&ctx),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
