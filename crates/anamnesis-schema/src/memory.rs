//! # Memory Entry Rules
//!
//! Validates memory entries: the content-addressed unit of the shared
//! knowledge base.
//!
//! ## Integrity Invariant
//!
//! When both `content` and a well-formed `content_hash` are present, the
//! hash must equal `compute_hash(content)`. A mismatch is an error, never
//! a warning: it means the content diverged from what was attested.
//!
//! ## Referential fields
//!
//! `parent_refs[i]` and `superseded_by` hold the content hashes of other
//! entries. They are format-checked here but never resolved.
//!
//! ## Check order
//!
//! Findings are reported in this order: content, author, timestamp,
//! content_hash, memory_type, parent_refs, vouchers, confidence, tags,
//! superseded_by, then the advisory warnings.

use anamnesis_core::{compute_hash, ContentHash, MemoryType, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::primitives::{
    check_confidence, check_term, is_hash_value, is_strict_timestamp, is_truthy, truthy,
};
use crate::result::{RuleCode, ValidationResult};

/// Maximum length of `content`, in characters.
pub const MAX_CONTENT_LENGTH: usize = 10_000;

/// Confidence assigned by [`create_memory`] when none is supplied.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Validate a memory entry.
///
/// A non-object input yields a single error and no further checks.
pub fn validate_memory(entry: &Value) -> ValidationResult {
    if !entry.is_object() {
        return ValidationResult::fatal(RuleCode::NotAnObject, "", "Entry must be a JSON object");
    }

    let mut result = ValidationResult::new();

    check_content(&mut result, entry);
    check_author(&mut result, entry);
    check_timestamp(&mut result, entry);
    check_content_hash(&mut result, entry);

    if let Some(memory_type) = entry.get("memory_type") {
        check_term::<MemoryType>(&mut result, memory_type, "memory_type", |_, allowed| {
            format!("memory_type must be one of: {allowed}")
        });
    }

    check_parent_refs(&mut result, entry);
    check_vouchers(&mut result, entry);

    if let Some(confidence) = entry.get("confidence") {
        check_confidence(
            &mut result,
            confidence,
            "confidence",
            "confidence must be a number between 0 and 1",
        );
    }

    check_tags(&mut result, entry);

    if let Some(superseded_by) = entry.get("superseded_by") {
        if !is_hash_value(superseded_by) {
            result.add_error(
                RuleCode::MalformedHash,
                "superseded_by",
                "superseded_by must be a valid SHA-256 hash",
            );
        }
    }

    // Advisories.
    if truthy(entry, "memory_type").is_none() {
        result.add_warning(
            "memory_type",
            "Consider adding memory_type for better categorization",
        );
    }
    let tags_missing = truthy(entry, "tags")
        .map_or(true, |tags| tags.as_array().is_some_and(Vec::is_empty));
    if tags_missing {
        result.add_warning("tags", "Consider adding tags for better retrieval");
    }
    if entry.get("confidence").is_none() {
        result.add_warning("confidence", "Consider adding confidence score");
    }

    tracing::debug!(
        errors = result.errors().len(),
        warnings = result.warnings().len(),
        "validated memory entry"
    );

    result
}

fn check_content(result: &mut ValidationResult, entry: &Value) {
    match entry.get("content") {
        Some(Value::String(content)) if content.is_empty() => {
            result.add_error(RuleCode::EmptyContent, "content", "content cannot be empty");
        }
        Some(Value::String(content)) => {
            let len = content.chars().count();
            if len > MAX_CONTENT_LENGTH {
                result.add_error(
                    RuleCode::ContentTooLong,
                    "content",
                    format!("content exceeds maximum length ({len}/{MAX_CONTENT_LENGTH})"),
                );
            }
        }
        Some(other) if is_truthy(other) => {
            result.add_error(RuleCode::WrongType, "content", "content must be a string");
        }
        _ => {
            result.add_error(
                RuleCode::MissingField,
                "content",
                "Missing required field: content",
            );
        }
    }
}

fn check_author(result: &mut ValidationResult, entry: &Value) {
    match truthy(entry, "author") {
        None => {
            result.add_error(RuleCode::MissingField, "author", "Missing required field: author");
        }
        Some(author) if !author.is_object() => {
            result.add_error(RuleCode::WrongType, "author", "author must be an object");
        }
        Some(author) => {
            for key in ["id", "name"] {
                if truthy(author, key).is_none() {
                    result.add_error(
                        RuleCode::MissingField,
                        format!("author.{key}"),
                        format!("Missing required field: author.{key}"),
                    );
                }
            }
        }
    }
}

fn check_timestamp(result: &mut ValidationResult, entry: &Value) {
    match truthy(entry, "timestamp") {
        None => {
            result.add_error(
                RuleCode::MissingField,
                "timestamp",
                "Missing required field: timestamp",
            );
        }
        Some(ts) if !is_strict_timestamp(ts) => {
            result.add_error(
                RuleCode::InvalidTimestamp,
                "timestamp",
                "timestamp must be ISO 8601 format (e.g., 2026-02-03T16:00:00Z)",
            );
        }
        Some(_) => {}
    }
}

fn check_content_hash(result: &mut ValidationResult, entry: &Value) {
    let Some(claimed) = truthy(entry, "content_hash") else {
        result.add_error(
            RuleCode::MissingField,
            "content_hash",
            "Missing required field: content_hash",
        );
        return;
    };

    // A malformed hash short-circuits the integrity comparison.
    let Some(claimed) = claimed.as_str().and_then(|s| ContentHash::parse(s).ok()) else {
        result.add_error(
            RuleCode::MalformedHash,
            "content_hash",
            "content_hash must be a 64-character hex string (SHA-256)",
        );
        return;
    };

    if let Some(content) = truthy(entry, "content").and_then(Value::as_str) {
        if !claimed.matches(content) {
            let expected = compute_hash(content);
            result.add_error(
                RuleCode::HashMismatch,
                "content_hash",
                format!("content_hash mismatch: expected {expected}, got {claimed}"),
            );
        }
    }
}

fn check_parent_refs(result: &mut ValidationResult, entry: &Value) {
    let Some(refs) = entry.get("parent_refs") else {
        return;
    };
    let Some(refs) = refs.as_array() else {
        result.add_error(RuleCode::NotAnArray, "parent_refs", "parent_refs must be an array");
        return;
    };
    for (i, parent) in refs.iter().enumerate() {
        if !is_hash_value(parent) {
            result.add_error(
                RuleCode::MalformedHash,
                format!("parent_refs[{i}]"),
                format!("parent_refs[{i}] must be a valid SHA-256 hash"),
            );
        }
    }
}

fn check_vouchers(result: &mut ValidationResult, entry: &Value) {
    let Some(vouchers) = entry.get("vouchers") else {
        return;
    };
    let Some(vouchers) = vouchers.as_array() else {
        result.add_error(RuleCode::NotAnArray, "vouchers", "vouchers must be an array");
        return;
    };
    for (i, voucher) in vouchers.iter().enumerate() {
        if truthy(voucher, "id").is_none() {
            result.add_error(
                RuleCode::MissingField,
                format!("vouchers[{i}].id"),
                format!("vouchers[{i}] missing required field: id"),
            );
        }
        match truthy(voucher, "timestamp") {
            None => result.add_error(
                RuleCode::MissingField,
                format!("vouchers[{i}].timestamp"),
                format!("vouchers[{i}] missing required field: timestamp"),
            ),
            Some(ts) if !is_strict_timestamp(ts) => result.add_error(
                RuleCode::InvalidTimestamp,
                format!("vouchers[{i}].timestamp"),
                format!("vouchers[{i}].timestamp must be ISO 8601 format"),
            ),
            Some(_) => {}
        }
        if let Some(confidence) = voucher.get("confidence") {
            check_confidence(
                result,
                confidence,
                format!("vouchers[{i}].confidence"),
                format!("vouchers[{i}].confidence must be a number between 0 and 1"),
            );
        }
    }
}

fn check_tags(result: &mut ValidationResult, entry: &Value) {
    let Some(tags) = entry.get("tags") else {
        return;
    };
    let Some(tags) = tags.as_array() else {
        result.add_error(RuleCode::NotAnArray, "tags", "tags must be an array");
        return;
    };
    for (i, tag) in tags.iter().enumerate() {
        if !tag.is_string() {
            result.add_error(
                RuleCode::WrongType,
                format!("tags[{i}]"),
                format!("tags[{i}] must be a string"),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// The agent that wrote a memory entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A third party vouching for a memory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// A memory entry as produced by [`create_memory`].
///
/// Field order matches the published document layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub content: String,
    pub author: Author,
    pub timestamp: String,
    pub content_hash: ContentHash,
    pub memory_type: MemoryType,
    pub parent_refs: Vec<ContentHash>,
    pub vouchers: Vec<Voucher>,
    pub confidence: f64,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<ContentHash>,
}

impl MemoryEntry {
    /// The entry as a JSON value, ready for [`validate_memory`].
    pub fn to_value(&self) -> Value {
        // Every field is a string, number, hash, or nested plain struct.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Input to [`create_memory`]. Only `content` and `author` are required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewMemory {
    pub content: String,
    pub author: Author,
    pub timestamp: Option<String>,
    pub memory_type: Option<MemoryType>,
    pub parent_refs: Vec<ContentHash>,
    pub vouchers: Vec<Voucher>,
    pub confidence: Option<f64>,
    pub tags: Vec<String>,
    pub context: Option<Value>,
    pub superseded_by: Option<ContentHash>,
}

impl NewMemory {
    pub fn new(content: impl Into<String>, author: Author) -> Self {
        Self {
            content: content.into(),
            author,
            ..Self::default()
        }
    }
}

/// Build a memory entry whose `content_hash` matches its content.
///
/// Defaults: `timestamp` is now (UTC, `Z` suffix), `memory_type` is
/// `episodic`, `confidence` is 0.5. `context` and `superseded_by` are
/// only carried when supplied.
pub fn create_memory(params: NewMemory) -> MemoryEntry {
    let content_hash = compute_hash(&params.content);
    MemoryEntry {
        timestamp: params
            .timestamp
            .unwrap_or_else(|| Timestamp::now().to_iso8601()),
        content_hash,
        memory_type: params.memory_type.unwrap_or_default(),
        confidence: params.confidence.unwrap_or(DEFAULT_CONFIDENCE),
        content: params.content,
        author: params.author,
        parent_refs: params.parent_refs,
        vouchers: params.vouchers,
        tags: params.tags,
        context: params.context,
        superseded_by: params.superseded_by,
    }
}
