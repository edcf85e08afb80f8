//! # Rule Configuration
//!
//! Knobs that change how rules are applied, without changing which rules
//! exist. Loaded from an optional YAML file:
//!
//! ```yaml
//! date_policy: strict   # or: permissive (default)
//! ```
//!
//! ## Date policy
//!
//! Memory entry timestamps are always checked against the strict ISO-8601
//! pattern. Attestation and capability dates (`created_at`, `updated_at`,
//! `status.last_exercised`) are parsed permissively by default, so a bare
//! `2026-02-07` is accepted there. `DatePolicy::Strict` applies the
//! memory-entry pattern to those fields as well.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DocumentError, DocumentResult};

/// How attestation and capability date fields are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePolicy {
    /// Generous date parse (date-only, offset-less, RFC 2822, epoch numbers).
    #[default]
    Permissive,
    /// Strict ISO-8601 with mandatory `Z` or `±hh:mm` offset.
    Strict,
}

/// Configuration passed to every validator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
    /// Date grammar for attestation and capability documents.
    pub date_policy: DatePolicy,
}

impl RuleConfig {
    /// Configuration that checks every date strictly.
    pub fn strict() -> Self {
        Self {
            date_policy: DatePolicy::Strict,
        }
    }

    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(text: &str, origin: &str) -> DocumentResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|source| DocumentError::Config {
            origin: origin.to_string(),
            source,
        })
    }

    /// Load a configuration from a YAML file.
    pub fn load(path: &Path) -> DocumentResult<Self> {
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            origin: origin.clone(),
            source,
        })?;
        Self::from_yaml_str(&text, &origin)
    }
}
