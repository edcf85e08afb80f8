//! # Validation Results
//!
//! The output contract of every validator: a verdict plus ordered error
//! and warning lists.
//!
//! ## Invariant
//!
//! `is_valid()` is exactly `errors().is_empty()`. Warnings never affect
//! validity. The invariant holds by construction: findings can only be
//! added through [`ValidationResult::add_error`] and
//! [`ValidationResult::add_warning`], and the verdict is derived, not
//! stored.
//!
//! ## Findings
//!
//! Each finding carries a severity, a stable [`RuleCode`], the field path
//! it concerns, and a human-readable message. Consumers that only want
//! the plain `{valid, errors, warnings}` strings get them from the
//! serialized form; consumers that want to act on a specific rule match
//! on the code instead of the text.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Schema violation. Makes the document invalid.
    Error,
    /// Best-practice advisory. Never affects validity.
    Warning,
}

/// Stable, machine-readable identifier of the rule that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCode {
    /// The document (or a nested block) is not a JSON object.
    NotAnObject,
    /// The top-level wrapper key is absent.
    MissingWrapper,
    /// A required field is absent or empty.
    MissingField,
    /// A field has the wrong JSON type.
    WrongType,
    /// `content` is the empty string.
    EmptyContent,
    /// `content` exceeds the maximum length.
    ContentTooLong,
    /// A timestamp does not match the strict ISO-8601 pattern.
    InvalidTimestamp,
    /// A date does not parse under the active date policy.
    InvalidDate,
    /// A hash-shaped field is not 64 lowercase hex characters.
    MalformedHash,
    /// `content_hash` does not match the recomputed digest.
    HashMismatch,
    /// A value is outside its closed vocabulary.
    InvalidEnum,
    /// A number is outside its permitted range (or not a number).
    OutOfRange,
    /// A field that must be an array is not.
    NotAnArray,
    /// Advisory: recommended metadata is missing.
    Recommended,
}

impl RuleCode {
    /// Returns the snake_case identifier, matching the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAnObject => "not_an_object",
            Self::MissingWrapper => "missing_wrapper",
            Self::MissingField => "missing_field",
            Self::WrongType => "wrong_type",
            Self::EmptyContent => "empty_content",
            Self::ContentTooLong => "content_too_long",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::InvalidDate => "invalid_date",
            Self::MalformedHash => "malformed_hash",
            Self::HashMismatch => "hash_mismatch",
            Self::InvalidEnum => "invalid_enum",
            Self::OutOfRange => "out_of_range",
            Self::NotAnArray => "not_an_array",
            Self::Recommended => "recommended",
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Error or warning.
    pub severity: Severity,
    /// Rule that produced the finding.
    pub code: RuleCode,
    /// Dotted path to the field (e.g. `vouchers[0].timestamp`). Empty for
    /// the document root.
    pub path: String,
    /// Human-readable description, including expected vs. actual where
    /// that applies.
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root) [{}]: {}", self.code, self.message)
        } else {
            write!(f, "{} [{}]: {}", self.path, self.code, self.message)
        }
    }
}

/// Result of validating one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<Finding>,
    warnings: Vec<Finding>,
}

impl ValidationResult {
    /// An empty (valid) result.
    pub fn new() -> Self {
        Self::default()
    }

    /// A result holding a single fatal error and no warnings.
    ///
    /// Used when the document's shape makes further checks meaningless.
    pub fn fatal(code: RuleCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        let mut result = Self::new();
        result.add_error(code, path, message);
        result
    }

    /// Whether the document is valid (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error. Makes the result invalid.
    pub fn add_error(
        &mut self,
        code: RuleCode,
        path: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.errors.push(Finding {
            severity: Severity::Error,
            code,
            path: path.into(),
            message: message.into(),
        });
    }

    /// Add a best-practice warning (does not affect validity).
    pub fn add_warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(Finding {
            severity: Severity::Warning,
            code: RuleCode::Recommended,
            path: path.into(),
            message: message.into(),
        });
    }

    /// Errors in check order.
    pub fn errors(&self) -> &[Finding] {
        &self.errors
    }

    /// Warnings in check order.
    pub fn warnings(&self) -> &[Finding] {
        &self.warnings
    }

    /// Error messages in check order.
    pub fn error_messages(&self) -> Vec<&str> {
        self.errors.iter().map(|f| f.message.as_str()).collect()
    }

    /// Warning messages in check order.
    pub fn warning_messages(&self) -> Vec<&str> {
        self.warnings.iter().map(|f| f.message.as_str()).collect()
    }

    /// All findings: errors first, then warnings.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Returns true if any error carries `code`.
    pub fn has_error(&self, code: RuleCode) -> bool {
        self.errors.iter().any(|f| f.code == code)
    }
}

/// Serializes as `{valid, errors: [string], warnings: [string], findings}`.
impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let findings: Vec<&Finding> = self.findings().collect();
        let mut state = serializer.serialize_struct("ValidationResult", 4)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.error_messages())?;
        state.serialize_field("warnings", &self.warning_messages())?;
        state.serialize_field("findings", &findings)?;
        state.end()
    }
}
