//! Sanitizer configuration.
//!
//! Defaults mirror the matcher's documented behavior: fuzzy similarity
//! threshold 0.8, window tolerance of 2 characters, case-sensitive
//! comparison.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration recognized by the sanitization core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanitizeConfig {
    /// Minimum normalized similarity for a fuzzy candidate.
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,

    /// Fuzzy search windows span `len(secret) ± tolerance` characters.
    #[serde(default = "default_fuzzy_tolerance")]
    pub fuzzy_tolerance: usize,

    /// Whether secrets are compared case-sensitively.
    #[serde(default = "default_true")]
    pub case_sensitive: bool,

    /// Secrets shorter than this skip the fuzzy strategy (exact and
    /// word-boundary matching still apply).
    #[serde(default = "default_min_fuzzy_len")]
    pub min_fuzzy_len: usize,
}

fn default_fuzzy_threshold() -> f64 {
    0.8
}

fn default_fuzzy_tolerance() -> usize {
    2
}

fn default_true() -> bool {
    true
}

fn default_min_fuzzy_len() -> usize {
    4
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: default_fuzzy_threshold(),
            fuzzy_tolerance: default_fuzzy_tolerance(),
            case_sensitive: true,
            min_fuzzy_len: default_min_fuzzy_len(),
        }
    }
}

impl SanitizeConfig {
    /// Load configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SanitizeConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if !(self.fuzzy_threshold > 0.0 && self.fuzzy_threshold <= 1.0) {
            return Err(Error::Config(format!(
                "fuzzy_threshold must be in (0.0, 1.0], got {}",
                self.fuzzy_threshold
            )));
        }
        if self.fuzzy_tolerance > 16 {
            return Err(Error::Config(format!(
                "fuzzy_tolerance must be at most 16, got {}",
                self.fuzzy_tolerance
            )));
        }
        if self.min_fuzzy_len == 0 {
            return Err(Error::Config(
                "min_fuzzy_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
