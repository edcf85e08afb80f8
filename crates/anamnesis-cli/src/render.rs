//! # Result Rendering
//!
//! Turns a [`ValidationResult`] into the text or JSON printed on stdout.
//! Rendering is pure: handlers print the returned string.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;

use anamnesis_schema::primitives::{display_value, truthy};
use anamnesis_schema::{DocumentKind, Finding, ValidationResult};

/// Characters of content shown in the memory entry summary.
const SUMMARY_CONTENT_CHARS: usize = 50;
/// Hex characters of the content hash shown in the memory entry summary.
const SUMMARY_HASH_CHARS: usize = 16;

/// Output format for validation reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// Machine-readable JSON object.
    Json,
}

/// One validated document, ready to render.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub kind: DocumentKind,
    /// Where the document came from: a path, `<stdin>`, or `<demo>`.
    pub source: &'a str,
    #[serde(skip)]
    pub document: &'a Value,
    #[serde(flatten)]
    pub result: &'a ValidationResult,
}

impl<'a> Report<'a> {
    pub fn new(
        kind: DocumentKind,
        source: &'a str,
        document: &'a Value,
        result: &'a ValidationResult,
    ) -> Self {
        Self {
            kind,
            source,
            document,
            result,
        }
    }

    /// Render in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Human-readable report: header, verdict, errors, warnings, and for a
    /// valid memory entry a short summary.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let result = self.result;

        out.push_str(&format!("Anamnesis {} Validator\n", self.kind.title()));
        out.push_str(&format!("Validating: {}\n", self.source));
        out.push_str(&"-".repeat(40));
        out.push('\n');
        out.push_str(if result.is_valid() { "VALID\n" } else { "INVALID\n" });

        push_findings(&mut out, "Errors", result.errors());
        push_findings(&mut out, "Warnings", result.warnings());

        if result.is_valid() && self.kind == DocumentKind::Memory {
            out.push_str(&memory_summary(self.document));
        }

        if result.is_valid() && result.warnings().is_empty() {
            out.push_str(&format!(
                "\nOK: {} is valid and complete\n",
                self.kind.title().to_lowercase()
            ));
        }
        out
    }
}

fn push_findings(out: &mut String, heading: &str, findings: &[Finding]) {
    if findings.is_empty() {
        return;
    }
    out.push_str(&format!("\n{heading}:\n"));
    for finding in findings {
        out.push_str(&format!("  - {}\n", finding.message));
    }
}

/// Summary block for a valid memory entry.
pub fn memory_summary(entry: &Value) -> String {
    let author = entry
        .get("author")
        .and_then(|a| truthy(a, "name"))
        .map_or_else(|| "unknown".to_string(), display_value);
    let memory_type = truthy(entry, "memory_type")
        .map_or_else(|| "episodic".to_string(), display_value);
    let content: String = entry
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .chars()
        .take(SUMMARY_CONTENT_CHARS)
        .collect();
    let hash: String = entry
        .get("content_hash")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .chars()
        .take(SUMMARY_HASH_CHARS)
        .collect();

    format!(
        "\nEntry summary:\n  Author: {author}\n  Type: {memory_type}\n  Content: {content}...\n  Hash: {hash}...\n"
    )
}
