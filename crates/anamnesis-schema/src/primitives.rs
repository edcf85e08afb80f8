//! # Shared Rule Primitives
//!
//! Small checks reused by all three document validators: presence,
//! timestamp and date grammars, confidence range, vocabulary membership,
//! and the wrapper-key guard.
//!
//! ## Presence
//!
//! Agents publish documents from many runtimes, and "missing" has always
//! meant *absent or empty*: a field that is absent, `null`, `false`, `0`
//! or `""` counts as missing for required-field checks ([`is_truthy`]).
//! Optional fields that are range- or type-checked "when present" use
//! plain key presence instead (`Value::get`), so `"confidence": null` is
//! reported as a type error rather than silently skipped.

use anamnesis_core::{is_iso8601_timestamp, is_valid_hash, parse_permissive_date, Vocabulary};
use serde_json::Value;

use crate::config::DatePolicy;
use crate::result::{RuleCode, ValidationResult};

/// Largest magnitude of an epoch-millisecond date, ±100,000,000 days.
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

/// Returns true if the value counts as present.
///
/// `null`, `false`, `0`, `NaN` and `""` are absent; every array and
/// object is present, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Look up `key` on `parent`, returning it only if it is present.
///
/// Returns `None` when `parent` is not an object.
pub fn truthy<'a>(parent: &'a Value, key: &str) -> Option<&'a Value> {
    parent.get(key).filter(|v| is_truthy(v))
}

/// Render a value for a message: strings bare, everything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Returns true if the value is a string of 64 lowercase hex characters.
pub fn is_hash_value(value: &Value) -> bool {
    value.as_str().is_some_and(is_valid_hash)
}

/// Returns true if the value is a string matching the strict ISO-8601
/// timestamp pattern.
pub fn is_strict_timestamp(value: &Value) -> bool {
    value.as_str().is_some_and(is_iso8601_timestamp)
}

/// Returns true if the value is a date under `policy`.
///
/// Under the permissive policy, JSON numbers are epoch milliseconds and
/// booleans coerce to 0 / 1 ms; objects, arrays and `null` never parse.
pub fn is_date_value(value: &Value, policy: DatePolicy) -> bool {
    match policy {
        DatePolicy::Strict => is_strict_timestamp(value),
        DatePolicy::Permissive => match value {
            Value::String(s) => parse_permissive_date(s).is_some(),
            Value::Number(n) => n.as_f64().is_some_and(|ms| ms.abs() <= MAX_EPOCH_MILLIS),
            Value::Bool(_) => true,
            Value::Null | Value::Array(_) | Value::Object(_) => false,
        },
    }
}

/// Returns true if the value is a JSON number in the closed interval [0, 1].
pub fn is_confidence(value: &Value) -> bool {
    value
        .as_f64()
        .is_some_and(|c| (0.0..=1.0).contains(&c))
}

/// Record an `OutOfRange` error unless the value is a confidence in [0, 1].
pub fn check_confidence(
    result: &mut ValidationResult,
    value: &Value,
    path: impl Into<String>,
    message: impl Into<String>,
) {
    if !is_confidence(value) {
        result.add_error(RuleCode::OutOfRange, path, message);
    }
}

/// Check vocabulary membership.
///
/// Returns the parsed term when the value is a string in `V`. Otherwise
/// records an `InvalidEnum` error whose text is built by `message`, which
/// receives the rendered value and the comma-separated allowed terms.
pub fn check_term<V: Vocabulary>(
    result: &mut ValidationResult,
    value: &Value,
    path: impl Into<String>,
    message: impl FnOnce(&str, &str) -> String,
) -> Option<V> {
    let term = value.as_str().and_then(V::lookup);
    if term.is_none() {
        result.add_error(
            RuleCode::InvalidEnum,
            path,
            message(&display_value(value), &V::allowed()),
        );
    }
    term
}

/// Unwrap the single top-level key of a wrapped document.
///
/// On failure returns the fatal result the validator must hand back
/// unchanged: a missing or empty wrapper (or a document that is not an
/// object at all) yields `MissingWrapper`; a wrapper that is not an object
/// yields `NotAnObject`.
pub fn unwrap_document<'a>(doc: &'a Value, key: &str) -> Result<&'a Value, ValidationResult> {
    match truthy(doc, key) {
        None => Err(ValidationResult::fatal(
            RuleCode::MissingWrapper,
            "",
            format!("Missing top-level \"{key}\" field"),
        )),
        Some(inner) if !inner.is_object() => Err(ValidationResult::fatal(
            RuleCode::NotAnObject,
            key,
            format!("{key} must be an object"),
        )),
        Some(inner) => Ok(inner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anamnesis_core::ClaimType;
    use serde_json::json;

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_truthy_on_non_object_parent() {
        assert_eq!(truthy(&json!("a string"), "id"), None);
        assert_eq!(truthy(&json!([1, 2]), "id"), None);
        assert_eq!(truthy(&json!({"id": ""}), "id"), None);
        assert_eq!(truthy(&json!({"id": "a1"}), "id"), Some(&json!("a1")));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("hypothesis")), "hypothesis");
        assert_eq!(display_value(&json!(5)), "5");
        assert_eq!(display_value(&json!(null)), "null");
    }

    #[test]
    fn test_confidence_bounds() {
        assert!(is_confidence(&json!(0.0)));
        assert!(is_confidence(&json!(1.0)));
        assert!(is_confidence(&json!(0)));
        assert!(is_confidence(&json!(1)));
        assert!(is_confidence(&json!(0.5)));
        assert!(!is_confidence(&json!(1.0001)));
        assert!(!is_confidence(&json!(-0.01)));
        assert!(!is_confidence(&json!("high")));
        assert!(!is_confidence(&json!(null)));
        assert!(!is_confidence(&json!(true)));
    }

    #[test]
    fn test_date_value_permissive() {
        let p = DatePolicy::Permissive;
        assert!(is_date_value(&json!("2026-02-07"), p));
        assert!(is_date_value(&json!("2026-02-07T10:00:00Z"), p));
        assert!(is_date_value(&json!(1770458400000_i64), p));
        assert!(is_date_value(&json!(true), p));
        assert!(!is_date_value(&json!("not-a-date"), p));
        assert!(!is_date_value(&json!({}), p));
        assert!(!is_date_value(&json!(1e20), p));
    }

    #[test]
    fn test_date_value_strict() {
        let s = DatePolicy::Strict;
        assert!(is_date_value(&json!("2026-02-07T10:00:00Z"), s));
        assert!(!is_date_value(&json!("2026-02-07"), s));
        assert!(!is_date_value(&json!(1770458400000_i64), s));
    }

    #[test]
    fn test_hash_value() {
        assert!(is_hash_value(&json!("a".repeat(64))));
        assert!(!is_hash_value(&json!("A".repeat(64))));
        assert!(!is_hash_value(&json!(42)));
    }

    #[test]
    fn test_check_term_accepts_member() {
        let mut r = ValidationResult::new();
        let term = check_term::<ClaimType>(&mut r, &json!("insight"), "claim.type", |v, a| {
            format!("bad {v}; allowed {a}")
        });
        assert_eq!(term, Some(ClaimType::Insight));
        assert!(r.is_valid());
    }

    #[test]
    fn test_check_term_rejects_non_member() {
        let mut r = ValidationResult::new();
        let term = check_term::<ClaimType>(&mut r, &json!("hypothesis"), "claim.type", |v, a| {
            format!("bad {v}; allowed {a}")
        });
        assert_eq!(term, None);
        assert_eq!(
            r.error_messages(),
            vec!["bad hypothesis; allowed event, fact, observation, insight, relationship"]
        );
        assert!(r.has_error(RuleCode::InvalidEnum));
    }

    #[test]
    fn test_unwrap_document() {
        let doc = json!({"attestation": {"id": "x"}});
        assert_eq!(unwrap_document(&doc, "attestation").unwrap(), &json!({"id": "x"}));

        let missing = unwrap_document(&json!({}), "attestation").unwrap_err();
        assert!(missing.has_error(RuleCode::MissingWrapper));

        let not_object = unwrap_document(&json!({"attestation": "x"}), "attestation").unwrap_err();
        assert!(not_object.has_error(RuleCode::NotAnObject));
        assert_eq!(not_object.errors().len(), 1);
    }
}
