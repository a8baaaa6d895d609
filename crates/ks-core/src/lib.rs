//! Keystroke sanitization engine.
//!
//! Ties the pipeline together: replay events through a
//! [`ks_buffer::TextBuffer`], hunt for secrets in the final text and in
//! every intermediate buffer state with [`ks_match::FuzzyMatcher`], map
//! each match back to the keystroke events that produced it, and emit a
//! redacted event stream plus a sanitized text reconstruction.
//!
//! The binary target wraps this in a small CLI over recorded session
//! log files; see `main.rs`.

pub mod logging;
pub mod sanitizer;
pub mod secrets;
pub mod session;

pub use sanitizer::{SanitizeOutcome, Sanitizer};
pub use secrets::load_secrets;
pub use session::{MatchSummary, SanitizedSession, SessionLog};
