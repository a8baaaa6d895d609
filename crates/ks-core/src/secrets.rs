//! Secret list loading.
//!
//! The encrypted password store lives outside this core; what crosses
//! the boundary is a plaintext list, either newline-delimited or a JSON
//! string array. Secret content is never logged - only counts.

use ks_common::{Error, Result};
use std::collections::HashSet;
use std::path::Path;

/// Load the secrets to protect from a file.
///
/// A leading `[` selects JSON-array parsing; anything else is treated
/// as one secret per line (trailing CR stripped, blank lines skipped).
/// Duplicates are dropped, first occurrence wins. An empty result is
/// legal and simply matches nothing.
pub fn load_secrets<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;

    let raw: Vec<String> = if content.trim_start().starts_with('[') {
        serde_json::from_str(&content)
            .map_err(|e| Error::SecretList(format!("invalid JSON array: {}", e)))?
    } else {
        content
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect()
    };

    let mut seen = HashSet::new();
    let secrets: Vec<String> = raw
        .into_iter()
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect();

    tracing::debug!(count = secrets.len(), "secret list loaded");
    Ok(secrets)
}
