//! # anamnesis-schema — Document Rules for the Anamnesis Knowledge Base
//!
//! Structural and semantic validation of the three document kinds agents
//! publish: memory entries, salience attestations, and capability
//! declarations.
//!
//! ## Rules (`memory`, `attestation`, `capability`)
//!
//! Each kind has one entry point taking a parsed `serde_json::Value`:
//!
//! - [`validate_memory`] — required fields, content length, strict
//!   timestamps, and the content-hash integrity invariant.
//! - [`validate_attestation`] — claim, salience, and provenance blocks.
//! - [`validate_capability`] — domains, evidence, status, and seeking.
//!
//! [`DocumentKind::validate`] dispatches by kind. [`create_memory`] builds
//! a memory entry that passes its own rules.
//!
//! ## Results (`result`)
//!
//! Every violation is a [`Finding`] with a severity, a stable
//! [`RuleCode`], a field path, and a message. The rules never return
//! `Err` for a malformed document.
//!
//! ## Loading and configuration (`load`, `config`)
//!
//! Reading and parsing happen before any rule runs, and are the only
//! operations that fail with [`DocumentError`]. [`RuleConfig`] selects
//! the date grammar for attestation and capability dates.
//!
//! ## Crate Policy
//!
//! - Depends only on `anamnesis-core` internally.
//! - Validators are pure functions of their input: no I/O, no state
//!   across calls.

pub mod attestation;
pub mod capability;
pub mod config;
pub mod error;
pub mod kind;
pub mod load;
pub mod memory;
pub mod primitives;
pub mod result;

pub use attestation::validate_attestation;
pub use capability::validate_capability;
pub use config::{DatePolicy, RuleConfig};
pub use error::{DocumentError, DocumentResult};
pub use kind::DocumentKind;
pub use load::{load_document, parse_document, read_document};
pub use memory::{
    create_memory, validate_memory, Author, MemoryEntry, NewMemory, Voucher, MAX_CONTENT_LENGTH,
};
pub use result::{Finding, RuleCode, Severity, ValidationResult};
