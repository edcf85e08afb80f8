//! # Error Types
//!
//! Errors raised by the core primitives. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! Document *content* problems are never errors at this level: validators
//! report them as findings. These variants cover constructor misuse and
//! the surrounding plumbing.

use thiserror::Error;

/// Top-level error type for Anamnesis primitives.
#[derive(Error, Debug)]
pub enum AnamnesisError {
    /// A string was offered as a content hash but is not 64 lowercase hex.
    #[error("invalid content hash {0:?}: expected 64 lowercase hex characters")]
    InvalidHash(String),

    /// A vocabulary term was not recognised.
    #[error("unknown {vocabulary} value {value:?}")]
    UnknownTerm {
        /// Name of the closed vocabulary (e.g. `claim.type`).
        vocabulary: &'static str,
        /// The rejected input.
        value: String,
    },
}
