//! # Document Validation Subcommands
//!
//! `anamnesis memory`, `anamnesis attestation`, and `anamnesis capability`,
//! plus `anamnesis validate --kind <KIND>` for callers that pick the kind
//! at run time.
//!
//! A memory entry with no path is read from standard input, so entries
//! can be piped from other tools. Attestations and capability
//! declarations with no path validate a built-in demo document instead.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::Args;
use serde_json::Value;

use anamnesis_schema::{load_document, read_document, DocumentKind};

use crate::demo;
use crate::render::Report;
use crate::RunContext;

/// Arguments for the document validation subcommands.
#[derive(Args, Debug)]
pub struct DocumentArgs {
    /// JSON document to validate.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

/// Arguments for `anamnesis validate`.
#[derive(Args, Debug)]
pub struct KindArgs {
    /// Document kind: memory, attestation, or capability.
    #[arg(long, value_name = "KIND", value_parser = DocumentKind::from_str)]
    pub kind: DocumentKind,

    #[command(flatten)]
    pub document: DocumentArgs,
}

/// Where a document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Stdin,
    Demo,
}

impl Source {
    /// The source used when no path is given for `kind`.
    pub fn fallback(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Memory => Self::Stdin,
            DocumentKind::Attestation | DocumentKind::Capability => Self::Demo,
        }
    }

    fn resolve(path: Option<&PathBuf>, kind: DocumentKind) -> Self {
        path.map_or_else(|| Self::fallback(kind), |p| Self::File(p.clone()))
    }

    fn label(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Stdin => "<stdin>".to_string(),
            Self::Demo => "<demo>".to_string(),
        }
    }

    fn load(&self, kind: DocumentKind) -> Result<Value> {
        let doc = match self {
            Self::File(path) => load_document(path)?,
            Self::Stdin => read_document(std::io::stdin().lock(), "<stdin>")?,
            Self::Demo => match kind {
                DocumentKind::Attestation => demo::attestation(),
                DocumentKind::Capability => demo::capability(),
                DocumentKind::Memory => anyhow::bail!("no demo document for memory entries"),
            },
        };
        Ok(doc)
    }
}

/// Execute `anamnesis memory`.
pub fn run_memory(args: &DocumentArgs, ctx: &RunContext) -> Result<u8> {
    run_document(DocumentKind::Memory, args, ctx)
}

/// Execute `anamnesis attestation`.
pub fn run_attestation(args: &DocumentArgs, ctx: &RunContext) -> Result<u8> {
    run_document(DocumentKind::Attestation, args, ctx)
}

/// Execute `anamnesis capability`.
pub fn run_capability(args: &DocumentArgs, ctx: &RunContext) -> Result<u8> {
    run_document(DocumentKind::Capability, args, ctx)
}

/// Execute `anamnesis validate --kind <KIND>`.
pub fn run_validate(args: &KindArgs, ctx: &RunContext) -> Result<u8> {
    run_document(args.kind, &args.document, ctx)
}

fn run_document(kind: DocumentKind, args: &DocumentArgs, ctx: &RunContext) -> Result<u8> {
    let source = Source::resolve(args.path.as_ref(), kind);
    tracing::info!(%kind, source = %source.label(), "validating document");

    let doc = source.load(kind)?;
    let (output, code) = check_document(kind, &source, &doc, ctx)?;
    println!("{output}");
    Ok(code)
}

/// Validate an already-loaded document and render the report.
///
/// Returns the rendered output and the exit code.
pub fn check_document(
    kind: DocumentKind,
    source: &Source,
    doc: &Value,
    ctx: &RunContext,
) -> Result<(String, u8)> {
    let result = kind.validate(doc, &ctx.config);
    let label = source.label();
    let mut output = String::new();

    if *source == Source::Demo && ctx.format == crate::OutputFormat::Text {
        output.push_str("Running demo validation...\n\n");
        output.push_str(&serde_json::to_string_pretty(doc)?);
        output.push_str("\n\n");
    }
    output.push_str(&Report::new(kind, &label, doc, &result).render(ctx.format)?);

    let code = if result.is_valid() { 0 } else { 1 };
    Ok((output, code))
}
