//! # Content Hashing
//!
//! Defines `ContentHash`, the SHA-256 fingerprint of a memory entry's
//! `content`, and the two engine operations built on it: [`compute_hash`]
//! and [`verify`].
//!
//! ## Integrity Invariant
//!
//! A memory entry's `content_hash` must equal `compute_hash(content)`.
//! The same hash string is the addressing key used by `parent_refs` and
//! `superseded_by`, so every hash-shaped field in the system is checked
//! with the same predicate, [`is_valid_hash`].
//!
//! The digest is taken over the UTF-8 bytes of the content exactly as
//! given: no canonicalization, no salt, no nonce.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::AnamnesisError;

/// Length of a hex-encoded SHA-256 digest.
pub const HASH_HEX_LEN: usize = 64;

/// A SHA-256 content hash, rendered as 64 lowercase hex characters.
///
/// Constructed either by hashing content ([`compute_hash`]) or by parsing
/// an already well-formed hash string ([`ContentHash::parse`]). Uppercase
/// hex is rejected: comparisons are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentHash(String);

impl ContentHash {
    /// Parse a hash string, accepting only 64 lowercase hex characters.
    pub fn parse(s: &str) -> Result<Self, AnamnesisError> {
        if is_valid_hash(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(AnamnesisError::InvalidHash(s.to_string()))
        }
    }

    /// The hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first `n` hex characters, for display.
    pub fn prefix(&self, n: usize) -> &str {
        &self.0[..n.min(HASH_HEX_LEN)]
    }

    /// Returns true if this hash matches the digest of `content`.
    pub fn matches(&self, content: &str) -> bool {
        compute_hash(content) == *self
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ContentHash {
    type Error = AnamnesisError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if is_valid_hash(&s) {
            Ok(Self(s))
        } else {
            Err(AnamnesisError::InvalidHash(s))
        }
    }
}

impl From<ContentHash> for String {
    fn from(hash: ContentHash) -> Self {
        hash.0
    }
}

/// Returns true if `s` is exactly 64 lowercase hex characters.
pub fn is_valid_hash(s: &str) -> bool {
    s.len() == HASH_HEX_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Compute the SHA-256 content hash of a string.
///
/// Pure and deterministic: the same content always yields the same hash.
pub fn compute_hash(content: &str) -> ContentHash {
    let digest = Sha256::digest(content.as_bytes());
    ContentHash(digest.iter().map(|b| format!("{b:02x}")).collect())
}

/// Recompute the hash of `content` and compare it to `claimed`.
///
/// The comparison is case-sensitive; an uppercase rendering of the right
/// digest does not verify.
pub fn verify(claimed: &str, content: &str) -> bool {
    ContentHash::parse(claimed).is_ok_and(|hash| hash.matches(content))
}
