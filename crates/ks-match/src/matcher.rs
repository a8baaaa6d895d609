//! Candidate generation across the three match strategies.

use crate::{
    fold_chars, resolve_overlaps, similarity, MatchCandidate, MatchSource, MatchStrategy,
    ResolvedMatch,
};
use ks_common::SanitizeConfig;
use serde::Serialize;
use std::collections::HashSet;

/// Resolved matches against the final text and the snapshot history.
///
/// Snapshot matches are the leak vector for text that was typed and
/// later deleted: their offsets only mean anything inside the snapshot
/// they were found in, so they are kept apart from final-text matches
/// instead of being merged into one span list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchReport {
    /// Matches in the final reconstructed text, position-sorted.
    pub final_text: Vec<ResolvedMatch>,

    /// Matches found in intermediate buffer states, deduplicated by
    /// (secret, span) across snapshots, earliest snapshot kept.
    pub snapshots: Vec<ResolvedMatch>,
}

impl MatchReport {
    /// Total number of resolved matches.
    pub fn total(&self) -> usize {
        self.final_text.len() + self.snapshots.len()
    }

    /// Whether nothing matched anywhere.
    pub fn is_empty(&self) -> bool {
        self.final_text.is_empty() && self.snapshots.is_empty()
    }
}

/// Locates secrets in text using exact, word-boundary, and fuzzy
/// strategies. Stateless per call; the struct only holds configuration.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    config: SanitizeConfig,
}

impl FuzzyMatcher {
    /// Create a matcher with the given configuration.
    pub fn new(config: SanitizeConfig) -> Self {
        Self { config }
    }

    /// Create a matcher with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SanitizeConfig::default())
    }

    /// Find all resolved matches in a single text.
    ///
    /// Empty secrets are dropped at validation and never matched.
    pub fn find_matches(&self, text: &str, secrets: &[String]) -> Vec<ResolvedMatch> {
        let prepared = self.prepare_secrets(secrets);
        if prepared.is_empty() || text.is_empty() {
            return Vec::new();
        }
        let chars = fold_chars(text, !self.config.case_sensitive);
        let candidates = self.candidates_in(&chars, &prepared, MatchSource::FinalText);
        resolve_overlaps(&candidates)
    }

    /// Find resolved matches in the final text and in every snapshot
    /// text. Snapshot index in the result is the position in
    /// `snapshot_texts`.
    pub fn find_all_matches(
        &self,
        text: &str,
        secrets: &[String],
        snapshot_texts: &[String],
    ) -> MatchReport {
        let prepared = self.prepare_secrets(secrets);
        if prepared.is_empty() {
            return MatchReport::default();
        }

        let mut report = MatchReport::default();

        if !text.is_empty() {
            let chars = fold_chars(text, !self.config.case_sensitive);
            let candidates = self.candidates_in(&chars, &prepared, MatchSource::FinalText);
            report.final_text = resolve_overlaps(&candidates);
        }

        // A secret that lingers in the buffer shows up in a run of
        // consecutive snapshots; one sighting per (secret, span) is
        // enough, and the earliest names the moment it appeared.
        let mut seen: HashSet<(usize, usize, usize)> = HashSet::new();
        for (snapshot_index, snapshot_text) in snapshot_texts.iter().enumerate() {
            if snapshot_text.is_empty() {
                continue;
            }
            let chars = fold_chars(snapshot_text, !self.config.case_sensitive);
            let candidates =
                self.candidates_in(&chars, &prepared, MatchSource::Snapshot(snapshot_index));
            for resolved in resolve_overlaps(&candidates) {
                if seen.insert((resolved.secret_index, resolved.start, resolved.end)) {
                    report.snapshots.push(resolved);
                }
            }
        }

        report
    }

    /// Drop empty secrets and fold the rest, remembering their original
    /// indices.
    fn prepare_secrets(&self, secrets: &[String]) -> Vec<(usize, Vec<char>)> {
        secrets
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_empty())
            .map(|(i, s)| (i, fold_chars(s, !self.config.case_sensitive)))
            .collect()
    }

    fn candidates_in(
        &self,
        text: &[char],
        secrets: &[(usize, Vec<char>)],
        source: MatchSource,
    ) -> Vec<MatchCandidate> {
        let mut candidates = Vec::new();
        for &(secret_index, ref secret) in secrets {
            self.literal_candidates(text, secret_index, secret, source, &mut candidates);
            if secret.len() >= self.config.min_fuzzy_len {
                self.fuzzy_candidates(text, secret_index, secret, source, &mut candidates);
            }
        }
        candidates
    }

    /// Exact occurrences, plus a word-boundary candidate for each one
    /// whose flanks are not alphanumeric.
    fn literal_candidates(
        &self,
        text: &[char],
        secret_index: usize,
        secret: &[char],
        source: MatchSource,
        out: &mut Vec<MatchCandidate>,
    ) {
        let m = secret.len();
        if m == 0 || m > text.len() {
            return;
        }
        for start in 0..=(text.len() - m) {
            if &text[start..start + m] != secret {
                continue;
            }
            let end = start + m;
            out.push(MatchCandidate {
                secret_index,
                start,
                end,
                strategy: MatchStrategy::Exact,
                score: 1.0,
                source,
            });

            let left_ok = start == 0 || !text[start - 1].is_alphanumeric();
            let right_ok = end == text.len() || !text[end].is_alphanumeric();
            if left_ok && right_ok {
                out.push(MatchCandidate {
                    secret_index,
                    start,
                    end,
                    strategy: MatchStrategy::WordBoundary,
                    score: 1.0,
                    source,
                });
            }
        }
    }

    /// Sliding windows sized `len(secret) ± tolerance`, scored by
    /// normalized edit distance; whitespace flanks are trimmed before a
    /// window becomes a candidate.
    fn fuzzy_candidates(
        &self,
        text: &[char],
        secret_index: usize,
        secret: &[char],
        source: MatchSource,
        out: &mut Vec<MatchCandidate>,
    ) {
        let m = secret.len();
        let min_window = m.saturating_sub(self.config.fuzzy_tolerance).max(1);
        let max_window = (m + self.config.fuzzy_tolerance).min(text.len());

        for window in min_window..=max_window {
            if window > text.len() {
                break;
            }
            for start in 0..=(text.len() - window) {
                let end = start + window;
                let score = similarity(secret, &text[start..end]);
                if score < self.config.fuzzy_threshold {
                    continue;
                }

                let (mut start, mut end) = (start, end);
                while start < end && text[start].is_whitespace() {
                    start += 1;
                }
                while end > start && text[end - 1].is_whitespace() {
                    end -= 1;
                }
                if start < end {
                    out.push(MatchCandidate {
                        secret_index,
                        start,
                        end,
                        strategy: MatchStrategy::Fuzzy,
                        score,
                        source,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secrets(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn matcher() -> FuzzyMatcher {
        FuzzyMatcher::with_defaults()
    }

    #[test]
    fn test_exact_match_offsets() {
        let matches = matcher().find_matches("say hunter2 twice: hunter2", &secrets(&["hunter2"]));
        assert_eq!(matches.len(), 2);
        assert_eq!((matches[0].start, matches[0].end), (4, 11));
        assert_eq!((matches[1].start, matches[1].end), (19, 26));
        assert_eq!(matches[0].strategy, MatchStrategy::Exact);
        assert_eq!(matches[0].score, 1.0);
    }

    #[test]
    fn test_no_match_returns_empty() {
        assert!(matcher()
            .find_matches("nothing to see here", &secrets(&["hunter2"]))
            .is_empty());
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matcher().find_matches("anything", &secrets(&[""])).is_empty());
    }

    #[test]
    fn test_empty_text_returns_empty() {
        assert!(matcher().find_matches("", &secrets(&["hunter2"])).is_empty());
    }

    #[test]
    fn test_case_insensitive_exact() {
        let mut config = SanitizeConfig::default();
        config.case_sensitive = false;
        let matches =
            FuzzyMatcher::new(config).find_matches("xyzABC123qrs", &secrets(&["abc123"]));
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].start, matches[0].end), (3, 9));
        assert_eq!(matches[0].strategy, MatchStrategy::Exact);
    }

    #[test]
    fn test_case_sensitive_by_default() {
        assert!(matcher()
            .find_matches("xyzABC123qrs", &secrets(&["abc123"]))
            .is_empty());
    }

    #[test]
    fn test_fuzzy_catches_typo() {
        let matches = matcher().find_matches("typed passward123 here", &secrets(&["password123"]));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].strategy, MatchStrategy::Fuzzy);
        assert!((matches[0].score - 10.0 / 11.0).abs() < 1e-9);
        assert_eq!((matches[0].start, matches[0].end), (6, 17));
    }

    #[test]
    fn test_fuzzy_respects_threshold() {
        // "qwerty99" vs "hunter22" is far below 0.8.
        assert!(matcher()
            .find_matches("typed qwerty99 here", &secrets(&["hunter22"]))
            .is_empty());
    }

    #[test]
    fn test_short_secret_skips_fuzzy_but_matches_exact() {
        let matches = matcher().find_matches("pin is 42", &secrets(&["42"]));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].strategy, MatchStrategy::Exact);
        // One edit away, but below min_fuzzy_len: no fuzzy candidate.
        assert!(matcher().find_matches("pin is 43", &secrets(&["42"])).is_empty());
    }

    #[test]
    fn test_fuzzy_window_trims_whitespace() {
        let matches = matcher().find_matches("xx zecretpass99 yy", &secrets(&["secretpass99"]));
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].start, matches[0].end), (3, 15));
    }

    #[test]
    fn test_overlapping_secrets_resolved_to_one() {
        let matches = matcher().find_matches("abcdefgh", &secrets(&["abcdef", "cdefgh"]));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].secret_index, 0);
        assert_eq!((matches[0].start, matches[0].end), (0, 6));
    }

    #[test]
    fn test_word_boundary_emitted_only_at_boundaries() {
        let m = matcher();
        let prepared = m.prepare_secrets(&secrets(&["hunter2"]));

        let embedded: Vec<char> = "myhunter2x".chars().collect();
        let candidates = m.candidates_in(&embedded, &prepared, MatchSource::FinalText);
        assert!(candidates
            .iter()
            .all(|c| c.strategy != MatchStrategy::WordBoundary));

        let bounded: Vec<char> = "my hunter2!".chars().collect();
        let candidates = m.candidates_in(&bounded, &prepared, MatchSource::FinalText);
        assert!(candidates
            .iter()
            .any(|c| c.strategy == MatchStrategy::WordBoundary));
    }

    #[test]
    fn test_exact_preferred_over_word_boundary_in_resolution() {
        let matches = matcher().find_matches("my hunter2!", &secrets(&["hunter2"]));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].strategy, MatchStrategy::Exact);
    }

    #[test]
    fn test_snapshot_matches_tagged_and_deduplicated() {
        // The secret lives in snapshots 1-3 at the same span, then is
        // gone from the final text.
        let snapshots = vec![
            "hunte".to_string(),
            "hunter2".to_string(),
            "hunter2".to_string(),
            "hunter2".to_string(),
            "".to_string(),
        ];
        let report = matcher().find_all_matches("", &secrets(&["hunter2"]), &snapshots);

        assert!(report.final_text.is_empty());
        assert_eq!(report.snapshots.len(), 1);
        assert_eq!(report.snapshots[0].source, MatchSource::Snapshot(1));
        assert_eq!(
            (report.snapshots[0].start, report.snapshots[0].end),
            (0, 7)
        );
    }

    #[test]
    fn test_final_and_snapshot_matches_coexist() {
        let snapshots = vec!["old-secret".to_string(), "".to_string(), "new1234".to_string()];
        let report = matcher().find_all_matches(
            "new1234",
            &secrets(&["old-secret", "new1234"]),
            &snapshots,
        );

        assert_eq!(report.final_text.len(), 1);
        assert_eq!(report.final_text[0].secret_index, 1);
        // Snapshot sightings: the deleted secret and the kept one.
        assert!(report
            .snapshots
            .iter()
            .any(|m| m.secret_index == 0 && m.source == MatchSource::Snapshot(0)));
    }

    #[test]
    fn test_report_serializes_without_secret_text() {
        let report = matcher().find_all_matches("hunter2", &secrets(&["hunter2"]), &[]);
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(json.contains("secret_index"));
    }
}
