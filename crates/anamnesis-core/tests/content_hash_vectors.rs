//! # Content Hash Test Vectors
//!
//! Pins `compute_hash` to published SHA-256 vectors. Entries written by
//! other agents carry hashes computed by other implementations; if these
//! vectors drift, every stored `content_hash`, `parent_refs` entry and
//! `superseded_by` pointer stops resolving.

use anamnesis_core::{compute_hash, is_valid_hash, verify, ContentHash};

// ---------------------------------------------------------------------------
// NIST / widely published vectors
// ---------------------------------------------------------------------------

#[test]
fn test_vector_empty_string() {
    assert_eq!(
        compute_hash("").as_str(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_vector_abc() {
    assert_eq!(
        compute_hash("abc").as_str(),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn test_vector_hello() {
    assert_eq!(
        compute_hash("hello").as_str(),
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

#[test]
fn test_hash_is_over_utf8_bytes() {
    // Multi-byte characters must hash their UTF-8 encoding, not code units.
    let content = "記憶 — memory";
    let hash = compute_hash(content);
    assert!(is_valid_hash(hash.as_str()));
    assert!(verify(hash.as_str(), content));
    assert_ne!(hash, compute_hash("memory"));
}

#[test]
fn test_whitespace_is_significant() {
    assert_ne!(compute_hash("hello"), compute_hash("hello\n"));
    assert_ne!(compute_hash("hello"), compute_hash(" hello"));
}

// ---------------------------------------------------------------------------
// Addressing
// ---------------------------------------------------------------------------

#[test]
fn test_computed_hash_is_a_valid_reference() {
    // The hash of one entry is the reference another entry stores in
    // parent_refs / superseded_by; it must parse as a reference.
    let parent = compute_hash("Identity is the pruning function");
    let reference = ContentHash::parse(parent.as_str()).unwrap();
    assert_eq!(reference, parent);
}
