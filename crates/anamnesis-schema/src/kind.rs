//! Document kinds and validator dispatch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attestation::validate_attestation;
use crate::capability::validate_capability;
use crate::config::RuleConfig;
use crate::memory::validate_memory;
use crate::result::ValidationResult;

/// The three document kinds the rule engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// A content-addressed memory entry.
    Memory,
    /// A salience attestation, wrapped in `{"attestation": ...}`.
    Attestation,
    /// A capability declaration, wrapped in `{"capability": ...}`.
    Capability,
}

impl DocumentKind {
    /// All kinds, in display order.
    pub const ALL: [DocumentKind; 3] = [Self::Memory, Self::Attestation, Self::Capability];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Attestation => "attestation",
            Self::Capability => "capability",
        }
    }

    /// Heading used when rendering a result for this kind.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Memory => "Memory Entry",
            Self::Attestation => "Attestation",
            Self::Capability => "Capability Declaration",
        }
    }

    /// Run the validator for this kind.
    ///
    /// Memory entries ignore `config`: their timestamps are always strict.
    pub fn validate(&self, doc: &Value, config: &RuleConfig) -> ValidationResult {
        let _span = tracing::debug_span!("validate", kind = self.as_str()).entered();
        match self {
            Self::Memory => validate_memory(doc),
            Self::Attestation => validate_attestation(doc, config),
            Self::Capability => validate_capability(doc, config),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown document kind {s:?}"))
    }
}
