//! # anamnesis-core — Foundational Types for Anamnesis
//!
//! This crate is the leaf of the Anamnesis workspace. It defines the
//! primitives every document validator relies on and depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **`ContentHash` newtype.** A memory entry's `content_hash` is the
//!    integrity anchor of the knowledge base and the addressing key for
//!    `parent_refs` and `superseded_by`. The only way to obtain one is to
//!    hash content ([`compute_hash`]) or to parse a string that is already
//!    64 lowercase hex characters ([`ContentHash::parse`]).
//!
//! 2. **Two timestamp grammars, named.** [`is_iso8601_timestamp`] is the
//!    strict pattern used for memory entries; [`parse_permissive_date`] is
//!    the generous parse used for attestation and capability dates. Both
//!    live here so the asymmetry is visible in one place.
//!
//! 3. **Closed vocabularies as enums.** Claim types, salience categories,
//!    decay types, provenance sources, capability levels, evidence types
//!    and memory types each have one definition in [`vocab`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `anamnesis-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod digest;
pub mod error;
pub mod temporal;
pub mod vocab;

// Re-export primary types for ergonomic imports.
pub use digest::{compute_hash, is_valid_hash, verify, ContentHash, HASH_HEX_LEN};
pub use error::AnamnesisError;
pub use temporal::{is_iso8601_timestamp, parse_permissive_date, Timestamp};
pub use vocab::{
    CapabilityLevel, ClaimType, DecayType, EvidenceType, MemoryType, ProvenanceSource,
    SalienceCategory, Vocabulary,
};
