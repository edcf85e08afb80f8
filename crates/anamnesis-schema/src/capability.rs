//! # Capability Declaration Rules
//!
//! Validates capability declarations: the domains an agent claims
//! competence in, the evidence behind those claims, and what it is
//! looking to learn.
//!
//! Documents are wrapped: `{"capability": {...}}`. Domain findings are
//! labelled by the domain's name when it has one, else by its index.

use anamnesis_core::{CapabilityLevel, EvidenceType};
use serde_json::Value;

use crate::config::RuleConfig;
use crate::primitives::{check_term, display_value, is_date_value, truthy, unwrap_document};
use crate::result::{RuleCode, ValidationResult};

/// Top-level wrapper key.
pub const WRAPPER_KEY: &str = "capability";

/// Validate a capability declaration.
pub fn validate_capability(doc: &Value, config: &RuleConfig) -> ValidationResult {
    let capability = match unwrap_document(doc, WRAPPER_KEY) {
        Ok(inner) => inner,
        Err(fatal) => return fatal,
    };

    let mut result = ValidationResult::new();

    for key in ["id", "agent", "created_at"] {
        if truthy(capability, key).is_none() {
            result.add_error(
                RuleCode::MissingField,
                key,
                format!("Missing capability.{key}"),
            );
        }
    }

    check_domains(&mut result, capability);
    check_evidence(&mut result, capability);
    check_status(&mut result, capability, config);
    check_seeking(&mut result, capability);

    for key in ["created_at", "updated_at"] {
        if let Some(date) = truthy(capability, key) {
            if !is_date_value(date, config.date_policy) {
                result.add_error(
                    RuleCode::InvalidDate,
                    key,
                    format!("Invalid {key} timestamp - must be ISO-8601 format"),
                );
            }
        }
    }

    tracing::debug!(
        errors = result.errors().len(),
        warnings = result.warnings().len(),
        "validated capability declaration"
    );

    result
}

fn check_domains(result: &mut ValidationResult, capability: &Value) {
    let Some(domains) = truthy(capability, "domains") else {
        result.add_error(RuleCode::MissingField, "domains", "Missing capability.domains");
        return;
    };
    let Some(domains) = domains.as_array() else {
        result.add_error(
            RuleCode::NotAnArray,
            "domains",
            "capability.domains must be an array",
        );
        return;
    };
    if domains.is_empty() {
        result.add_warning(
            "domains",
            "capability.domains is empty - at least one domain recommended",
        );
        return;
    }

    for (i, domain) in domains.iter().enumerate() {
        let path = format!("domains[{i}]");
        let name = truthy(domain, "name");
        let label = name.map_or_else(|| i.to_string(), display_value);

        if name.is_none() {
            result.add_error(
                RuleCode::MissingField,
                format!("{path}.name"),
                format!("Domain {i}: missing name"),
            );
        }
        if truthy(domain, "description").is_none() {
            result.add_warning(
                format!("{path}.description"),
                format!("Domain \"{label}\": missing description"),
            );
        }
        match truthy(domain, "level") {
            None => result.add_warning(
                format!("{path}.level"),
                format!("Domain \"{label}\": missing level"),
            ),
            Some(level) => {
                check_term::<CapabilityLevel>(
                    result,
                    level,
                    format!("{path}.level"),
                    |shown, allowed| {
                        format!("Domain \"{label}\": invalid level \"{shown}\". Must be one of: {allowed}")
                    },
                );
            }
        }
        if truthy(domain, "keywords").is_some_and(|k| !k.is_array()) {
            result.add_error(
                RuleCode::NotAnArray,
                format!("{path}.keywords"),
                format!("Domain \"{label}\": keywords must be an array"),
            );
        }
    }
}

fn check_evidence(result: &mut ValidationResult, capability: &Value) {
    let Some(evidence) = truthy(capability, "evidence") else {
        result.add_warning(
            "evidence",
            "Missing capability.evidence - evidence strengthens claims",
        );
        return;
    };

    if let Some(declared) = truthy(evidence, "self_declared") {
        if truthy(declared, "summary").is_none() {
            result.add_warning(
                "evidence.self_declared.summary",
                "evidence.self_declared.summary recommended",
            );
        }
        if let Some(examples) = truthy(declared, "examples") {
            match examples.as_array() {
                None => result.add_error(
                    RuleCode::NotAnArray,
                    "evidence.self_declared.examples",
                    "evidence.self_declared.examples must be an array",
                ),
                Some(examples) => {
                    for (i, example) in examples.iter().enumerate() {
                        check_example(result, i, example);
                    }
                }
            }
        }
    }

    if let Some(vouched) = truthy(evidence, "vouched") {
        let Some(vouched) = vouched.as_array() else {
            result.add_error(
                RuleCode::NotAnArray,
                "evidence.vouched",
                "evidence.vouched must be an array",
            );
            return;
        };
        for (i, vouch) in vouched.iter().enumerate() {
            let path = format!("evidence.vouched[{i}]");
            if truthy(vouch, "voucher").is_none() {
                result.add_error(
                    RuleCode::MissingField,
                    format!("{path}.voucher"),
                    format!("Vouch {i}: missing voucher"),
                );
            }
            if truthy(vouch, "domain").is_none() {
                result.add_warning(
                    format!("{path}.domain"),
                    format!("Vouch {i}: missing domain (what are they vouching for?)"),
                );
            }
            if truthy(vouch, "claim").is_none() {
                result.add_warning(format!("{path}.claim"), format!("Vouch {i}: missing claim"));
            }
        }
    }
}

fn check_example(result: &mut ValidationResult, i: usize, example: &Value) {
    let path = format!("evidence.self_declared.examples[{i}]");
    match truthy(example, "type") {
        None => result.add_warning(
            format!("{path}.type"),
            format!("Evidence example {i}: missing type"),
        ),
        Some(kind) => {
            check_term::<EvidenceType>(result, kind, format!("{path}.type"), |shown, allowed| {
                format!("Evidence example {i}: invalid type \"{shown}\". Must be one of: {allowed}")
            });
        }
    }
    if truthy(example, "reference").is_none() {
        result.add_warning(
            format!("{path}.reference"),
            format!("Evidence example {i}: missing reference"),
        );
    }
}

fn check_status(result: &mut ValidationResult, capability: &Value, config: &RuleConfig) {
    let Some(status) = truthy(capability, "status") else {
        result.add_warning(
            "status",
            "Missing capability.status - active status and decay info useful",
        );
        return;
    };

    if status.get("active").is_none() {
        result.add_warning("status.active", "status.active not specified");
    }
    if let Some(exercised) = truthy(status, "last_exercised") {
        if !is_date_value(exercised, config.date_policy) {
            result.add_error(
                RuleCode::InvalidDate,
                "status.last_exercised",
                "Invalid status.last_exercised timestamp - must be ISO-8601 format",
            );
        }
    }
}

fn check_seeking(result: &mut ValidationResult, capability: &Value) {
    let Some(seeking) = truthy(capability, "seeking") else {
        return;
    };
    let Some(seeking) = seeking.as_array() else {
        result.add_error(
            RuleCode::NotAnArray,
            "seeking",
            "capability.seeking must be an array",
        );
        return;
    };
    for (i, seek) in seeking.iter().enumerate() {
        if truthy(seek, "domain").is_none() {
            result.add_warning(
                format!("seeking[{i}].domain"),
                format!("Seeking {i}: missing domain"),
            );
        }
    }
}
