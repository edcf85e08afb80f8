//! Loader and configuration errors.
//!
//! These are the only failures the schema crate propagates. They fire
//! before any rule runs: a document that cannot be read or parsed never
//! reaches a validator. Rule violations are findings, not errors.

use thiserror::Error;

/// Errors raised while obtaining a document or configuration.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document source could not be read.
    #[error("error reading {origin}: {source}")]
    Read {
        origin: String,
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("invalid JSON in {origin}: {source}")]
    Parse {
        origin: String,
        source: serde_json::Error,
    },

    /// The rule configuration file is not valid.
    #[error("invalid rule configuration in {origin}: {source}")]
    Config {
        origin: String,
        source: serde_yaml::Error,
    },
}

/// Result type for loader operations.
pub type DocumentResult<T> = Result<T, DocumentError>;
