//! Overlap resolution.
//!
//! A pure function over a candidate list: no matcher state, no
//! mutation of the input, deterministic output. Keeping it isolated
//! makes the tie-break chain testable on hand-built candidates.

use crate::MatchCandidate;

/// Resolve overlapping candidates from one source pool.
///
/// Candidates are ranked by score (descending), then strategy
/// (exact > word_boundary > fuzzy), then span length (longer first),
/// then start offset (earlier first), then secret index. Greedy
/// selection in that order keeps a candidate only if it shares no
/// offset with an already-kept one. The survivors are returned sorted
/// by position.
pub fn resolve_overlaps(candidates: &[MatchCandidate]) -> Vec<MatchCandidate> {
    let mut ranked: Vec<&MatchCandidate> = candidates.iter().filter(|c| !c.is_empty()).collect();
    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.strategy.rank().cmp(&a.strategy.rank()))
            .then_with(|| b.len().cmp(&a.len()))
            .then_with(|| a.start.cmp(&b.start))
            .then_with(|| a.secret_index.cmp(&b.secret_index))
    });

    let mut kept: Vec<MatchCandidate> = Vec::new();
    for candidate in ranked {
        if !kept.iter().any(|existing| existing.overlaps(candidate)) {
            kept.push(*candidate);
        }
    }

    kept.sort_by_key(|c| (c.start, c.end));
    kept
}
