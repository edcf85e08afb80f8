//! # Document Loading
//!
//! Turns raw text into a `serde_json::Value` for the validators. Read and
//! parse failures are reported as [`DocumentError`] so callers can tell
//! "this is not a document" apart from "this document is invalid".

use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::error::{DocumentError, DocumentResult};

/// Parse document text. `origin` names the source in error messages.
pub fn parse_document(text: &str, origin: &str) -> DocumentResult<Value> {
    serde_json::from_str(text).map_err(|source| DocumentError::Parse {
        origin: origin.to_string(),
        source,
    })
}

/// Read and parse a document from a file.
pub fn load_document(path: &Path) -> DocumentResult<Value> {
    let origin = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        origin: origin.clone(),
        source,
    })?;
    parse_document(&text, &origin)
}

/// Read a document to end-of-stream and parse it.
pub fn read_document(mut reader: impl Read, origin: &str) -> DocumentResult<Value> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| DocumentError::Read {
            origin: origin.to_string(),
            source,
        })?;
    parse_document(&text, origin)
}
