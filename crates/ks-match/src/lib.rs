//! Secret detection in reconstructed text.
//!
//! Given a text (and optionally the history of intermediate buffer
//! states), [`FuzzyMatcher`] locates every occurrence of a set of
//! secrets (literal, word-bounded, and approximate within an
//! edit-distance threshold) and resolves overlapping candidates into a
//! deterministic, position-sorted match set.
//!
//! The matcher is stateless per call: it reads text and secrets, returns
//! matches, and retains nothing. Match results carry secret *indices*,
//! never secret text, so reports and logs built from them cannot leak
//! what they were protecting.

pub mod candidate;
pub mod matcher;
pub mod resolve;
pub mod similarity;

pub use candidate::{MatchCandidate, MatchSource, MatchStrategy, ResolvedMatch};
pub use matcher::{FuzzyMatcher, MatchReport};
pub use resolve::resolve_overlaps;
pub use similarity::{fold_chars, levenshtein, similarity};
