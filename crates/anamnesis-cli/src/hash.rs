//! # Hash Subcommand
//!
//! Prints the content hash of text, a file, or standard input. The hash
//! covers the exact bytes given: a trailing newline changes it.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use anamnesis_core::compute_hash;

use crate::{OutputFormat, RunContext};

/// Arguments for `anamnesis hash`.
#[derive(Args, Debug)]
pub struct HashArgs {
    /// Text to hash.
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Hash the contents of a file instead.
    #[arg(long, value_name = "FILE", conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

/// Execute `anamnesis hash`.
pub fn run_hash(args: &HashArgs, ctx: &RunContext) -> Result<u8> {
    let content = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read file: {}", path.display()))?,
        (None, None) => {
            let mut text = String::new();
            std::io::stdin()
                .lock()
                .read_to_string(&mut text)
                .context("failed to read standard input")?;
            text
        }
    };

    println!("{}", render_hash(&content, ctx.format)?);
    Ok(0)
}

/// Render the hash of `content`: bare hex for text, an object for JSON.
pub fn render_hash(content: &str, format: OutputFormat) -> Result<String> {
    let hash = compute_hash(content);
    tracing::debug!(bytes = content.len(), %hash, "computed content hash");
    match format {
        OutputFormat::Text => Ok(hash.to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "content_hash": hash.as_str(),
            "length": content.chars().count(),
        }))?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn text_format_is_bare_hex() {
        assert_eq!(render_hash("hello", OutputFormat::Text).unwrap(), HELLO_SHA256);
    }

    #[test]
    fn json_format_names_the_field() {
        let rendered = render_hash("hello", OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["content_hash"], HELLO_SHA256);
        assert_eq!(value["length"], 5);
    }

    #[test]
    fn trailing_newline_changes_the_hash() {
        let plain = render_hash("hello", OutputFormat::Text).unwrap();
        let newline = render_hash("hello\n", OutputFormat::Text).unwrap();
        assert_ne!(plain, newline);
    }

    #[test]
    fn hashes_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.txt");
        std::fs::write(&path, "hello").unwrap();

        let args = HashArgs {
            text: None,
            file: Some(path),
        };
        assert_eq!(run_hash(&args, &RunContext::default()).unwrap(), 0);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = HashArgs {
            text: None,
            file: Some(dir.path().join("absent.txt")),
        };
        assert!(run_hash(&args, &RunContext::default()).is_err());
    }
}
