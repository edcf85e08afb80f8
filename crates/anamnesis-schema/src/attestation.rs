//! # Attestation Rules
//!
//! Validates salience attestations: a claim an agent chose to keep, why
//! it was kept, and where it came from.
//!
//! Documents are wrapped: `{"attestation": {...}}`. A missing wrapper is
//! fatal. Everything inside accumulates.

use anamnesis_core::{ClaimType, DecayType, ProvenanceSource, SalienceCategory};
use serde_json::Value;

use crate::config::RuleConfig;
use crate::primitives::{check_confidence, check_term, is_date_value, truthy, unwrap_document};
use crate::result::{RuleCode, ValidationResult};

/// Top-level wrapper key.
pub const WRAPPER_KEY: &str = "attestation";

/// Validate an attestation document.
pub fn validate_attestation(doc: &Value, config: &RuleConfig) -> ValidationResult {
    let attestation = match unwrap_document(doc, WRAPPER_KEY) {
        Ok(inner) => inner,
        Err(fatal) => return fatal,
    };

    let mut result = ValidationResult::new();

    for key in ["id", "agent", "created_at"] {
        if truthy(attestation, key).is_none() {
            result.add_error(
                RuleCode::MissingField,
                key,
                format!("Missing attestation.{key}"),
            );
        }
    }

    check_claim(&mut result, attestation);
    check_salience(&mut result, attestation);
    check_provenance(&mut result, attestation);

    if let Some(created_at) = truthy(attestation, "created_at") {
        if !is_date_value(created_at, config.date_policy) {
            result.add_error(
                RuleCode::InvalidDate,
                "created_at",
                "Invalid created_at timestamp - must be ISO-8601 format",
            );
        }
    }

    tracing::debug!(
        errors = result.errors().len(),
        warnings = result.warnings().len(),
        "validated attestation"
    );

    result
}

fn check_claim(result: &mut ValidationResult, attestation: &Value) {
    let Some(claim) = truthy(attestation, "claim") else {
        result.add_error(RuleCode::MissingField, "claim", "Missing attestation.claim");
        return;
    };

    match truthy(claim, "type") {
        None => result.add_error(RuleCode::MissingField, "claim.type", "Missing claim.type"),
        Some(kind) => {
            check_term::<ClaimType>(result, kind, "claim.type", |shown, allowed| {
                format!("Invalid claim.type: \"{shown}\". Must be one of: {allowed}")
            });
        }
    }

    if truthy(claim, "content").is_none() {
        result.add_error(RuleCode::MissingField, "claim.content", "Missing claim.content");
    }
}

fn check_salience(result: &mut ValidationResult, attestation: &Value) {
    let Some(salience) = truthy(attestation, "salience") else {
        result.add_warning(
            "salience",
            "Missing attestation.salience - salience metadata is recommended",
        );
        return;
    };

    if truthy(salience, "why_kept").is_none() {
        result.add_warning(
            "salience.why_kept",
            "Missing salience.why_kept - explaining why this was kept is valuable",
        );
    }

    if let Some(category) = truthy(salience, "category") {
        check_term::<SalienceCategory>(result, category, "salience.category", |shown, allowed| {
            format!("Invalid salience.category: \"{shown}\". Must be one of: {allowed}")
        });
    }

    if let Some(confidence) = salience.get("confidence") {
        check_confidence(
            result,
            confidence,
            "salience.confidence",
            "salience.confidence must be a number between 0.0 and 1.0",
        );
    }

    if let Some(decay) = truthy(salience, "expected_decay") {
        let kind = decay.get("type").unwrap_or(&Value::Null);
        check_term::<DecayType>(result, kind, "salience.expected_decay.type", |shown, allowed| {
            format!("Invalid expected_decay.type: \"{shown}\". Must be one of: {allowed}")
        });
    }
}

fn check_provenance(result: &mut ValidationResult, attestation: &Value) {
    let Some(provenance) = truthy(attestation, "provenance") else {
        result.add_warning(
            "provenance",
            "Missing attestation.provenance - provenance is important for trust",
        );
        return;
    };

    if let Some(source) = truthy(provenance, "source") {
        check_term::<ProvenanceSource>(result, source, "provenance.source", |shown, allowed| {
            format!("Invalid provenance.source: \"{shown}\". Must be one of: {allowed}")
        });
    }

    if truthy(provenance, "witnesses").is_some_and(|w| !w.is_array()) {
        result.add_error(
            RuleCode::NotAnArray,
            "provenance.witnesses",
            "provenance.witnesses must be an array",
        );
    }
}
