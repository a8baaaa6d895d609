//! Shared types for the keystroke sanitization pipeline.
//!
//! This crate holds everything the other `ks-*` crates agree on: the
//! keystroke event model produced by the capture layer, the sanitized
//! event model emitted after redaction, the sanitizer configuration,
//! and the unified error type.

pub mod config;
pub mod error;
pub mod event;
pub mod output;

pub use config::SanitizeConfig;
pub use error::{Error, ErrorCategory, Result};
pub use event::{EventKind, KeystrokeEvent, SanitizedEvent, REDACTION_MARKER};
pub use output::OutputFormat;

/// Schema version stamped into sanitized session records.
pub const SCHEMA_VERSION: &str = "1.0.0";
