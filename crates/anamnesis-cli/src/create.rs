//! # Create Subcommand
//!
//! Builds a memory entry from flags and prints it as JSON. The content
//! hash is computed here; the printed entry passes `anamnesis memory`.

use anyhow::Result;
use clap::Args;
use serde_json::Value;

use anamnesis_core::{is_iso8601_timestamp, AnamnesisError, ContentHash, MemoryType};
use anamnesis_schema::{create_memory, validate_memory, Author, MemoryEntry, NewMemory};

use crate::RunContext;

/// Arguments for `anamnesis create`.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Memory content.
    #[arg(long)]
    pub content: String,

    /// Author identifier.
    #[arg(long)]
    pub author_id: String,

    /// Author display name.
    #[arg(long)]
    pub author_name: String,

    /// One of: episodic, semantic, procedural, insight.
    #[arg(long, value_name = "TYPE")]
    pub memory_type: Option<MemoryType>,

    /// Confidence in [0, 1]. Defaults to 0.5.
    #[arg(long, value_parser = parse_confidence)]
    pub confidence: Option<f64>,

    /// Tag for retrieval. Repeatable.
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Content hash of a parent entry. Repeatable.
    #[arg(long = "parent-ref", value_name = "HASH", value_parser = parse_hash)]
    pub parent_refs: Vec<ContentHash>,

    /// Content hash of the entry that replaces this one.
    #[arg(long, value_name = "HASH", value_parser = parse_hash)]
    pub superseded_by: Option<ContentHash>,

    /// Free-form context: JSON, or plain text.
    #[arg(long)]
    pub context: Option<String>,

    /// ISO-8601 timestamp. Defaults to now.
    #[arg(long, value_parser = parse_timestamp)]
    pub timestamp: Option<String>,
}

impl CreateArgs {
    fn to_new_memory(&self) -> NewMemory {
        NewMemory {
            content: self.content.clone(),
            author: Author::new(&self.author_id, &self.author_name),
            timestamp: self.timestamp.clone(),
            memory_type: self.memory_type,
            parent_refs: self.parent_refs.clone(),
            vouchers: Vec::new(),
            confidence: self.confidence,
            tags: self.tags.clone(),
            context: self.context.as_deref().map(parse_context),
            superseded_by: self.superseded_by.clone(),
        }
    }
}

/// Execute `anamnesis create`.
pub fn run_create(args: &CreateArgs, _ctx: &RunContext) -> Result<u8> {
    let (entry, code) = build_entry(args)?;
    println!("{}", serde_json::to_string_pretty(&entry)?);
    Ok(code)
}

/// Build the entry and check it against the memory rules.
///
/// Returns the entry and the exit code: 1 if the entry is invalid, which
/// only happens for empty or oversized content.
pub fn build_entry(args: &CreateArgs) -> Result<(MemoryEntry, u8)> {
    let entry = create_memory(args.to_new_memory());
    let result = validate_memory(&entry.to_value());
    for finding in result.errors() {
        tracing::error!(path = %finding.path, "{}", finding.message);
    }
    tracing::info!(hash = entry.content_hash.prefix(16), "created memory entry");
    Ok((entry, if result.is_valid() { 0 } else { 1 }))
}

fn parse_context(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn parse_hash(s: &str) -> Result<ContentHash, AnamnesisError> {
    ContentHash::parse(s)
}

fn parse_confidence(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("confidence must be between 0 and 1, got {value}"))
    }
}

fn parse_timestamp(s: &str) -> Result<String, String> {
    if is_iso8601_timestamp(s) {
        Ok(s.to_string())
    } else {
        Err(format!(
            "timestamp must be ISO 8601 format (e.g., 2026-02-03T16:00:00Z), got {s:?}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anamnesis_core::compute_hash;

    fn args(content: &str) -> CreateArgs {
        CreateArgs {
            content: content.to_string(),
            author_id: "a1".to_string(),
            author_name: "Babel".to_string(),
            memory_type: None,
            confidence: None,
            tags: Vec::new(),
            parent_refs: Vec::new(),
            superseded_by: None,
            context: None,
            timestamp: None,
        }
    }

    #[test]
    fn created_entry_is_valid() {
        let (entry, code) = build_entry(&args("Identity is the pruning function")).unwrap();
        assert_eq!(code, 0);
        assert_eq!(entry.content_hash, compute_hash("Identity is the pruning function"));
        assert_eq!(entry.author.name, "Babel");
    }

    #[test]
    fn empty_content_exits_one() {
        let (_, code) = build_entry(&args("")).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn context_accepts_json_or_text() {
        assert_eq!(parse_context(r#"{"session": 1}"#)["session"], 1);
        assert_eq!(parse_context("plain words"), Value::String("plain words".into()));
    }

    #[test]
    fn flag_parsers() {
        assert_eq!(parse_confidence("0.9"), Ok(0.9));
        assert!(parse_confidence("1.5").is_err());
        assert!(parse_confidence("high").is_err());
        assert!(parse_timestamp("2026-02-07T10:00:00Z").is_ok());
        assert!(parse_timestamp("2026-02-07").is_err());
        assert!(parse_hash(compute_hash("x").as_str()).is_ok());
        assert!(parse_hash("abc").is_err());
    }

    #[test]
    fn optional_fields_flow_through() {
        let parent = compute_hash("earlier");
        let a = CreateArgs {
            memory_type: Some(MemoryType::Insight),
            confidence: Some(0.9),
            tags: vec!["identity".into()],
            parent_refs: vec![parent.clone()],
            context: Some("talk with Silia".into()),
            timestamp: Some("2026-02-07T10:00:00Z".into()),
            ..args("thought")
        };
        let (entry, code) = build_entry(&a).unwrap();
        assert_eq!(code, 0);
        assert_eq!(entry.memory_type, MemoryType::Insight);
        assert_eq!(entry.parent_refs, vec![parent]);
        assert_eq!(entry.timestamp, "2026-02-07T10:00:00Z");
        assert_eq!(entry.context, Some(Value::String("talk with Silia".into())));
    }
}
