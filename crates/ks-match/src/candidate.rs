//! Match candidate types.

use serde::{Deserialize, Serialize};

/// Strategy that produced a match candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Literal substring occurrence.
    Exact,
    /// Literal occurrence not flanked by alphanumeric characters.
    WordBoundary,
    /// Approximate occurrence within the similarity threshold.
    Fuzzy,
}

impl MatchStrategy {
    /// Tie-break rank: exact > word_boundary > fuzzy.
    pub fn rank(&self) -> u8 {
        match self {
            MatchStrategy::Exact => 2,
            MatchStrategy::WordBoundary => 1,
            MatchStrategy::Fuzzy => 0,
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MatchStrategy::Exact => "exact",
            MatchStrategy::WordBoundary => "word_boundary",
            MatchStrategy::Fuzzy => "fuzzy",
        };
        write!(f, "{}", s)
    }
}

/// Which text a candidate was found in. Snapshot offsets are only
/// meaningful within that snapshot's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// The final reconstructed text.
    FinalText,
    /// The buffer state after the event at this history index.
    Snapshot(usize),
}

/// A candidate occurrence of one secret in one source text.
///
/// Carries the index of the secret in the caller's list, never the
/// secret itself: serialized match reports must stay safe to persist.
/// Offsets are char offsets with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Index into the secret list handed to the matcher.
    pub secret_index: usize,
    /// Start offset (inclusive), in chars of the source text.
    pub start: usize,
    /// End offset (exclusive), in chars of the source text.
    pub end: usize,
    /// Strategy that produced this candidate.
    pub strategy: MatchStrategy,
    /// Similarity score in (0.0, 1.0]; 1.0 for literal strategies.
    pub score: f64,
    /// Text this candidate was found in.
    pub source: MatchSource,
}

/// A candidate that survived overlap resolution.
pub type ResolvedMatch = MatchCandidate;

impl MatchCandidate {
    /// Span length in chars.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty (never true for emitted candidates).
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether two candidates share at least one offset. Only
    /// meaningful for candidates from the same source.
    pub fn overlaps(&self, other: &MatchCandidate) -> bool {
        self.start < other.end && other.start < self.end
    }
}
