//! # Closed Vocabularies
//!
//! Every enumerated field in Anamnesis documents draws from one of the
//! fixed vocabularies defined here. Each is a Rust enum whose variant
//! order is the canonical order used in diagnostics ("Must be one of:
//! ...").
//!
//! | Vocabulary | Field | Terms |
//! |------------|-------|-------|
//! | [`MemoryType`] | `memory_type` | episodic, semantic, procedural, insight |
//! | [`ClaimType`] | `claim.type` | event, fact, observation, insight, relationship |
//! | [`SalienceCategory`] | `salience.category` | foundational, operational, ephemeral, experimental |
//! | [`DecayType`] | `expected_decay.type` | permanent, time-bound, conditional |
//! | [`ProvenanceSource`] | `provenance.source` | direct-experience, inference, received, aggregated |
//! | [`CapabilityLevel`] | `domains[].level` | learning, competent, expert, authority |
//! | [`EvidenceType`] | `examples[].type` | code, document, post, interaction, attestation |
//!
//! The [`Vocabulary`] trait lets the rule engine check membership with a
//! single generic primitive instead of one hand-written check per field.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AnamnesisError;

/// A closed, ordered set of string terms.
pub trait Vocabulary: Sized + Copy + 'static {
    /// Human-readable vocabulary name, used in error messages.
    const NAME: &'static str;

    /// All terms in canonical order.
    const ALL: &'static [Self];

    /// The wire string for this term.
    fn as_str(&self) -> &'static str;

    /// Look up a term by its exact (case-sensitive) wire string.
    fn lookup(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|term| term.as_str() == s)
    }

    /// All wire strings joined with `", "`, in canonical order.
    fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|term| term.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

macro_rules! closed_vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant, )+
        }

        impl Vocabulary for $name {
            const NAME: &'static str = $label;
            const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

            fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = AnamnesisError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::lookup(s).ok_or_else(|| AnamnesisError::UnknownTerm {
                    vocabulary: $label,
                    value: s.to_string(),
                })
            }
        }
    };
}

closed_vocabulary! {
    /// Kind of knowledge a memory entry records.
    MemoryType ("memory_type") {
        /// Something that happened.
        Episodic => "episodic",
        /// A general fact.
        Semantic => "semantic",
        /// How to do something.
        Procedural => "procedural",
        /// A realisation that is not obvious from the raw events.
        Insight => "insight",
    }
}

impl Default for MemoryType {
    fn default() -> Self {
        Self::Episodic
    }
}

closed_vocabulary! {
    /// Kind of claim an attestation makes.
    ClaimType ("claim.type") {
        Event => "event",
        Fact => "fact",
        Observation => "observation",
        Insight => "insight",
        Relationship => "relationship",
    }
}

closed_vocabulary! {
    /// Why an attested memory is worth keeping.
    SalienceCategory ("salience.category") {
        /// Identity-defining; rarely revisited.
        Foundational => "foundational",
        /// Needed for day-to-day work.
        Operational => "operational",
        /// Useful briefly.
        Ephemeral => "ephemeral",
        /// Kept to test an idea.
        Experimental => "experimental",
    }
}

closed_vocabulary! {
    /// How an attested memory is expected to lose relevance.
    DecayType ("expected_decay.type") {
        Permanent => "permanent",
        TimeBound => "time-bound",
        Conditional => "conditional",
    }
}

closed_vocabulary! {
    /// Where an attested claim came from.
    ProvenanceSource ("provenance.source") {
        DirectExperience => "direct-experience",
        Inference => "inference",
        Received => "received",
        Aggregated => "aggregated",
    }
}

closed_vocabulary! {
    /// Self-assessed proficiency in a capability domain.
    CapabilityLevel ("level") {
        Learning => "learning",
        Competent => "competent",
        Expert => "expert",
        Authority => "authority",
    }
}

closed_vocabulary! {
    /// Kind of artefact offered as capability evidence.
    EvidenceType ("evidence type") {
        Code => "code",
        Document => "document",
        Post => "post",
        Interaction => "interaction",
        Attestation => "attestation",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_roundtrip<V: Vocabulary + FromStr + PartialEq + std::fmt::Debug>() {
        for term in V::ALL {
            let parsed = V::lookup(term.as_str());
            assert_eq!(parsed, Some(*term), "{} did not round-trip", term.as_str());
        }
    }

    #[test]
    fn test_vocabulary_sizes() {
        assert_eq!(MemoryType::ALL.len(), 4);
        assert_eq!(ClaimType::ALL.len(), 5);
        assert_eq!(SalienceCategory::ALL.len(), 4);
        assert_eq!(DecayType::ALL.len(), 3);
        assert_eq!(ProvenanceSource::ALL.len(), 4);
        assert_eq!(CapabilityLevel::ALL.len(), 4);
        assert_eq!(EvidenceType::ALL.len(), 5);
    }

    #[test]
    fn test_lookup_roundtrip() {
        assert_roundtrip::<MemoryType>();
        assert_roundtrip::<ClaimType>();
        assert_roundtrip::<SalienceCategory>();
        assert_roundtrip::<DecayType>();
        assert_roundtrip::<ProvenanceSource>();
        assert_roundtrip::<CapabilityLevel>();
        assert_roundtrip::<EvidenceType>();
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(ClaimType::lookup("Insight"), None);
        assert_eq!(ClaimType::lookup("insight"), Some(ClaimType::Insight));
        assert_eq!(ClaimType::lookup("hypothesis"), None);
        assert_eq!(ClaimType::lookup(""), None);
    }

    #[test]
    fn test_allowed_is_canonical_order() {
        assert_eq!(
            MemoryType::allowed(),
            "episodic, semantic, procedural, insight"
        );
        assert_eq!(DecayType::allowed(), "permanent, time-bound, conditional");
        assert_eq!(
            ProvenanceSource::allowed(),
            "direct-experience, inference, received, aggregated"
        );
    }

    #[test]
    fn test_from_str_error_names_vocabulary() {
        let err = "mythic".parse::<CapabilityLevel>().unwrap_err();
        assert_eq!(err.to_string(), "unknown level value \"mythic\"");
    }

    #[test]
    fn test_serde_matches_as_str() {
        for term in DecayType::ALL {
            let json = serde_json::to_string(term).unwrap();
            assert_eq!(json, format!("\"{}\"", term.as_str()));
            let back: DecayType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *term);
        }
    }

    #[test]
    fn test_memory_type_default_is_episodic() {
        assert_eq!(MemoryType::default(), MemoryType::Episodic);
    }
}
