//! Session log boundary.
//!
//! Recorded sessions arrive as JSON files of the capture layer's
//! `{timestamp, events}` shape; sanitized sessions go back out as JSON
//! records that are safe to persist: redacted events, the sanitized
//! text, and match counts - never raw reconstructed text, never secret
//! content.

use crate::SanitizeOutcome;
use chrono::{DateTime, Utc};
use ks_common::{Error, KeystrokeEvent, Result, SanitizedEvent, SCHEMA_VERSION};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A recorded keystroke session as written by the capture layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLog {
    /// When the recording was saved, if the recorder stamped it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Captured events in arrival order.
    #[serde(default)]
    pub events: Vec<KeystrokeEvent>,
}

impl SessionLog {
    /// Load a session log from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| Error::SessionLog {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Match counts for a sanitized session. Counts only - offsets and
/// secret indices stay in memory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Matches resolved against the final text.
    pub final_text: usize,
    /// Matches found only while tracing the snapshot history.
    pub snapshots: usize,
    /// Events redacted in the output stream.
    pub redacted_events: usize,
}

/// The persistable result of sanitizing one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizedSession {
    /// When sanitization ran.
    pub timestamp: DateTime<Utc>,

    /// Output schema version.
    pub schema_version: String,

    /// Sanitized events, same order and count as the input session.
    pub events: Vec<SanitizedEvent>,

    /// Final text with matched spans replaced by the marker.
    pub sanitized_text: String,

    /// Match counts.
    pub matches: MatchSummary,
}

impl SanitizedSession {
    /// Build the persistable record from a sanitize outcome.
    ///
    /// Takes the outcome by value on purpose: the raw reconstruction it
    /// carries is dropped here and never leaves this function.
    pub fn from_outcome(outcome: SanitizeOutcome, timestamp: DateTime<Utc>) -> Self {
        let matches = MatchSummary {
            final_text: outcome.report.final_text.len(),
            snapshots: outcome.report.snapshots.len(),
            redacted_events: outcome.redacted_count(),
        };
        Self {
            timestamp,
            schema_version: SCHEMA_VERSION.to_string(),
            events: outcome.events,
            sanitized_text: outcome.sanitized_text,
            matches,
        }
    }

    /// Write the record as pretty JSON to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Write the record as pretty JSON to a writer.
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        writeln!(writer, "{}", content)?;
        Ok(())
    }
}

/// Write sanitized events as JSON Lines, one event per line.
pub fn write_events_jsonl<W: Write>(mut writer: W, events: &[SanitizedEvent]) -> Result<()> {
    for event in events {
        let line = serde_json::to_string(event)?;
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}

/// Collect the `.json` session logs directly inside a directory,
/// sorted by file name for deterministic batch order.
pub fn session_files_in<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json")
        })
        .collect();
    files.sort();
    Ok(files)
}
