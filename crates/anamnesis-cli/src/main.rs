//! # anamnesis CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use anamnesis_cli::create::{run_create, CreateArgs};
use anamnesis_cli::hash::{run_hash, HashArgs};
use anamnesis_cli::validate::{
    run_attestation, run_capability, run_memory, run_validate, DocumentArgs, KindArgs,
};
use anamnesis_cli::{resolve_config, OutputFormat, RunContext};

/// Anamnesis document validator.
///
/// Checks memory entries, attestations, and capability declarations
/// against their schemas, and computes the content hashes that tie a
/// memory entry to its content.
#[derive(Parser, Debug)]
#[command(name = "anamnesis", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Path to a YAML rule configuration file.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Check attestation and capability dates against strict ISO-8601.
    #[arg(long, global = true)]
    strict_dates: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a memory entry (reads standard input when no path is given).
    Memory(DocumentArgs),

    /// Validate an attestation (runs a demo when no path is given).
    Attestation(DocumentArgs),

    /// Validate a capability declaration (runs a demo when no path is given).
    Capability(DocumentArgs),

    /// Validate a document whose kind is given with --kind.
    Validate(KindArgs),

    /// Print the content hash of text, a file, or standard input.
    Hash(HashArgs),

    /// Create a memory entry with a computed content hash.
    Create(CreateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("anamnesis CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = resolve_config(cli.config.as_deref(), cli.strict_dates).and_then(|config| {
        let ctx = RunContext {
            format: cli.format,
            config,
        };
        match &cli.command {
            Commands::Memory(args) => run_memory(args, &ctx),
            Commands::Attestation(args) => run_attestation(args, &ctx),
            Commands::Capability(args) => run_capability(args, &ctx),
            Commands::Validate(args) => run_validate(args, &ctx),
            Commands::Hash(args) => run_hash(args, &ctx),
            Commands::Create(args) => run_create(args, &ctx),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
