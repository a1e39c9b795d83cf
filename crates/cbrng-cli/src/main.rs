//! cbrng command-line interface.
//!
//! Counter-based random streams you can reproduce, fast-forward and split.
//!
//! # Quick Start
//!
//! ```bash
//! # Eight words from Threefry 4x64 seeded with 42
//! cbrng generate --seed 42
//!
//! # Four child streams, one per worker
//! cbrng derive --seed 42 --keys 0,1,2,3 --count 4
//!
//! # Persist a stream and resume it later
//! cbrng state save --seed 42 --skip 1000
//! cbrng state next --count 4
//! ```
//!
//! Defaults come from `cbrng.toml`, `cbrng.local.toml` and `CBRNG_*`
//! environment variables; flags override them.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use cbrng_config::OutputFormat;
use cbrng_mapper::EngineKind;
use clap::{Args, Parser, Subcommand};

/// cbrng - counter-based random number streams.
#[derive(Parser)]
#[command(name = "cbrng")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information.
    Version,

    /// Print words from a seeded engine.
    Generate {
        #[command(flatten)]
        stream: StreamArgs,
    },

    /// Derive child streams and print words from each.
    Derive {
        #[command(flatten)]
        stream: StreamArgs,

        /// Derivation keys, one child stream per key.
        #[arg(short, long, value_delimiter = ',')]
        keys: Vec<u64>,
    },

    /// Check every engine against its published known-answer vectors.
    Vectors,

    /// Save, inspect and resume persisted engine state.
    #[command(subcommand)]
    State(StateCommands),

    /// Show the effective configuration.
    Config {
        /// Project directory holding cbrng.toml.
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// Output format (toml, json).
        #[arg(short, long, default_value = "toml")]
        format: String,
    },
}

#[derive(Subcommand)]
enum StateCommands {
    /// Build an engine and write its state.
    Save {
        #[command(flatten)]
        stream: StreamArgs,

        /// State file (defaults to state.path from the configuration).
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Print a saved state as JSON.
    Show {
        /// Project directory holding cbrng.toml.
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// State file (defaults to state.path from the configuration).
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Resume a saved engine, print words, and write the advanced state back.
    Next {
        #[command(flatten)]
        output: ResumeArgs,

        /// State file (defaults to state.path from the configuration).
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

/// Engine and output settings shared by the stream commands.
#[derive(Args, Debug, Clone)]
pub struct StreamArgs {
    /// Project directory holding cbrng.toml.
    #[arg(short, long, default_value = ".")]
    project: PathBuf,

    /// Engine (threefry2x32, threefry4x32, threefry2x64, threefry4x64).
    #[arg(short = 'e', long)]
    kind: Option<EngineKind>,

    /// Scalar seed broadcast to every key word.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Words to print per stream.
    #[arg(short = 'n', long)]
    count: Option<u64>,

    /// Words to discard before printing.
    #[arg(long)]
    skip: Option<u64>,

    /// Output format (hex, decimal, json).
    #[arg(short, long)]
    format: Option<OutputFormat>,
}

/// Output settings for resuming a saved engine. The state file fixes the
/// engine, so engine flags are not accepted.
#[derive(Args, Debug, Clone)]
pub struct ResumeArgs {
    /// Project directory holding cbrng.toml.
    #[arg(short, long, default_value = ".")]
    project: PathBuf,

    /// Words to print.
    #[arg(short = 'n', long)]
    count: Option<u64>,

    /// Output format (hex, decimal, json).
    #[arg(short, long)]
    format: Option<OutputFormat>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Version => {
            commands::version::run();
            Ok(())
        }
        Commands::Generate { stream } => commands::generate::run(&stream),
        Commands::Derive { stream, keys } => commands::derive::run(&stream, &keys),
        Commands::Vectors => commands::vectors::run(),
        Commands::State(cmd) => match cmd {
            StateCommands::Save { stream, path } => commands::state::save(&stream, path),
            StateCommands::Show { project, path } => commands::state::show(&project, path),
            StateCommands::Next { output, path } => commands::state::next(&output, path),
        },
        Commands::Config { project, format } => commands::config::show(&project, &format),
    }
}
