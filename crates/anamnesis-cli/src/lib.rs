//! # anamnesis-cli — Command-Line Validator for Anamnesis Documents
//!
//! Provides the `anamnesis` binary: a thin layer that reads a document,
//! hands it to the rule engine in `anamnesis-schema`, and renders the
//! result.
//!
//! ## Subcommands
//!
//! - `anamnesis memory [PATH]` — validate a memory entry (stdin if no path).
//! - `anamnesis attestation [PATH]` — validate an attestation (demo if no path).
//! - `anamnesis capability [PATH]` — validate a capability declaration
//!   (demo if no path).
//! - `anamnesis hash [TEXT]` — print the content hash of text, a file, or stdin.
//! - `anamnesis create ...` — print a new, conforming memory entry.
//!
//! ```bash
//! anamnesis memory entry.json
//! cat entry.json | anamnesis --format json memory
//! anamnesis --strict-dates attestation claim.json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handlers return the process exit code: 0 when the document is valid,
//!   1 otherwise. Read and parse failures propagate as `anyhow::Error`.

pub mod create;
pub mod demo;
pub mod hash;
pub mod render;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

use anamnesis_schema::{DatePolicy, RuleConfig};

pub use render::OutputFormat;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunContext {
    pub format: OutputFormat,
    pub config: RuleConfig,
}

/// Build the rule configuration from the `--config` file and flags.
///
/// `--strict-dates` wins over whatever the file says.
pub fn resolve_config(path: Option<&Path>, strict_dates: bool) -> Result<RuleConfig> {
    let mut config = match path {
        Some(path) => RuleConfig::load(path)
            .with_context(|| format!("failed to load rule configuration {}", path.display()))?,
        None => RuleConfig::default(),
    };
    if strict_dates {
        config.date_policy = DatePolicy::Strict;
    }
    tracing::debug!(date_policy = ?config.date_policy, "resolved rule configuration");
    Ok(config)
}
