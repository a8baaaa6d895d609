//! Keystroke event model.
//!
//! Events are produced by the OS-level capture layer and consumed
//! read-only by the sanitization core. The core never mutates a captured
//! event; redaction produces a new [`SanitizedEvent`] wrapper.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Replacement string for the key identifier of a redacted event.
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Kind of a captured input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Key pressed.
    KeyDown,
    /// Key released.
    KeyUp,
    /// Mouse button click.
    MouseClick,
    /// Scroll wheel movement.
    Scroll,
    /// Anything the capture layer emitted that this core does not model.
    /// Replays as a no-op, never as an error.
    #[serde(other)]
    Other,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventKind::KeyDown => "key_down",
            EventKind::KeyUp => "key_up",
            EventKind::MouseClick => "mouse_click",
            EventKind::Scroll => "scroll",
            EventKind::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// A single captured input event.
///
/// `key` follows the capture layer's identifier convention: printable
/// keys carry the literal character(s), special keys carry a
/// `Key.<name>` identifier (`Key.backspace`, `Key.left`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeystrokeEvent {
    /// Capture timestamp.
    pub timestamp: DateTime<Utc>,

    /// Key identifier (or `[REDACTED]` in an already-sanitized stream).
    pub key: String,

    /// Event kind.
    pub kind: EventKind,

    /// Active modifier names ("shift", "ctrl", ...). Ordered for stable
    /// serialization.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub modifiers: BTreeSet<String>,

    /// For mouse clicks: the text offset the click resolved to, when the
    /// capture layer could determine one. Clicks without an offset do not
    /// move the reconstruction cursor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_offset: Option<usize>,
}

impl KeystrokeEvent {
    /// Create a key-down event. Primarily a convenience for tests and
    /// synthetic replay.
    pub fn key_down(timestamp: DateTime<Utc>, key: impl Into<String>) -> Self {
        Self {
            timestamp,
            key: key.into(),
            kind: EventKind::KeyDown,
            modifiers: BTreeSet::new(),
            text_offset: None,
        }
    }

    /// Create a mouse-click event carrying a resolved text offset.
    pub fn mouse_click(timestamp: DateTime<Utc>, text_offset: Option<usize>) -> Self {
        Self {
            timestamp,
            key: String::new(),
            kind: EventKind::MouseClick,
            modifiers: BTreeSet::new(),
            text_offset,
        }
    }

    /// Whether this event can mutate the text reconstruction.
    pub fn is_input(&self) -> bool {
        matches!(self.kind, EventKind::KeyDown | EventKind::MouseClick)
    }
}

/// A keystroke event annotated with the redaction decision.
///
/// Redacted events keep their timing, kind, and modifier metadata; only
/// the key identifier is replaced, so downstream consumers can still
/// study typing cadence without seeing what was typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanitizedEvent {
    #[serde(flatten)]
    pub event: KeystrokeEvent,

    /// Whether this event was redacted.
    pub redacted: bool,
}

impl SanitizedEvent {
    /// Pass an event through unredacted.
    pub fn passthrough(event: KeystrokeEvent) -> Self {
        Self {
            event,
            redacted: false,
        }
    }

    /// Redact an event: the key identifier is replaced with
    /// [`REDACTION_MARKER`], everything else is preserved.
    pub fn redacted(mut event: KeystrokeEvent) -> Self {
        event.key = REDACTION_MARKER.to_string();
        Self {
            event,
            redacted: true,
        }
    }
}
