//! The sanitization engine.

use ks_buffer::TextBuffer;
use ks_common::{KeystrokeEvent, Result, SanitizeConfig, SanitizedEvent, REDACTION_MARKER};
use ks_match::{FuzzyMatcher, MatchReport, MatchSource};
use std::collections::BTreeSet;

/// Result of sanitizing one session's event stream.
///
/// Deliberately not serializable as a whole: `text` is the raw
/// reconstruction and may contain every secret the user typed. The
/// session layer picks out the fields that are safe to persist.
#[derive(Debug, Clone)]
pub struct SanitizeOutcome {
    /// One entry per input event, in input order.
    pub events: Vec<SanitizedEvent>,

    /// The raw reconstructed final text. Handle with care.
    pub text: String,

    /// The final text with every resolved match replaced by the
    /// redaction marker.
    pub sanitized_text: String,

    /// Resolved matches against the final text and snapshot history.
    pub report: MatchReport,
}

impl SanitizeOutcome {
    /// Number of redacted events.
    pub fn redacted_count(&self) -> usize {
        self.events.iter().filter(|e| e.redacted).count()
    }
}

/// Orchestrates replay, matching, and event-level redaction for one
/// session at a time. Owns no cross-session state.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    matcher: FuzzyMatcher,
}

impl Sanitizer {
    /// Create a sanitizer, validating the configuration first.
    pub fn new(config: SanitizeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            matcher: FuzzyMatcher::new(config),
        })
    }

    /// Create a sanitizer with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            matcher: FuzzyMatcher::with_defaults(),
        }
    }

    /// Sanitize an event stream against a list of secrets.
    ///
    /// Never fails: malformed events replay as no-ops, an empty secret
    /// list yields an all-passthrough result. Output length and order
    /// always equal the input's.
    pub fn sanitize(&self, events: &[KeystrokeEvent], secrets: &[String]) -> SanitizeOutcome {
        let buffer = TextBuffer::replay(events);
        let (text, provenance, history) = buffer.into_parts();

        let snapshot_texts: Vec<String> = history.iter().map(|s| s.text.clone()).collect();
        let report = self.matcher.find_all_matches(&text, secrets, &snapshot_texts);

        let mut to_redact: BTreeSet<usize> = BTreeSet::new();

        // Final-text matches: the provenance array names exactly the
        // events whose insertions produced the matched characters.
        for matched in &report.final_text {
            mark_provenance_span(&provenance, matched.start, matched.end, None, &mut to_redact);
        }

        // Snapshot matches: trace through that snapshot's provenance,
        // plus the event the snapshot follows. Covers secrets that were
        // typed and later deleted.
        for matched in &report.snapshots {
            let MatchSource::Snapshot(snapshot_index) = matched.source else {
                continue;
            };
            let Some(snapshot) = history.get(snapshot_index) else {
                tracing::warn!(snapshot_index, "match against unknown snapshot; skipping trace");
                continue;
            };
            to_redact.insert(snapshot.event_index);
            mark_provenance_span(
                &snapshot.provenance,
                matched.start,
                matched.end,
                Some(snapshot.event_index),
                &mut to_redact,
            );
        }

        let sanitized_text = redact_spans(
            &text,
            &report
                .final_text
                .iter()
                .map(|m| (m.start, m.end))
                .collect::<Vec<_>>(),
        );

        let events = events
            .iter()
            .enumerate()
            .map(|(i, event)| {
                if to_redact.contains(&i) {
                    SanitizedEvent::redacted(event.clone())
                } else {
                    SanitizedEvent::passthrough(event.clone())
                }
            })
            .collect();

        tracing::debug!(
            final_matches = report.final_text.len(),
            snapshot_matches = report.snapshots.len(),
            redacted_events = to_redact.len(),
            "session sanitized"
        );

        SanitizeOutcome {
            events,
            text,
            sanitized_text,
            report,
        }
    }
}

/// Collect the event indices that inserted the characters of
/// `[start, end)` per the provenance array.
///
/// A span offset outside the provenance array means attribution is
/// broken; redaction then widens to `fallback` (the snapshot's own
/// event) instead of silently narrowing.
fn mark_provenance_span(
    provenance: &[usize],
    start: usize,
    end: usize,
    fallback: Option<usize>,
    out: &mut BTreeSet<usize>,
) {
    if end > provenance.len() {
        tracing::warn!(
            start,
            end,
            provenance_len = provenance.len(),
            "match span exceeds provenance; widening redaction"
        );
        if let Some(event_index) = fallback {
            out.insert(event_index);
        }
    }
    for &event_index in &provenance[start.min(provenance.len())..end.min(provenance.len())] {
        out.insert(event_index);
    }
}

/// Replace each span of `text` with the redaction marker. Spans are
/// char offsets, already non-overlapping and position-sorted.
fn redact_spans(text: &str, spans: &[(usize, usize)]) -> String {
    if spans.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut result = String::new();
    let mut last_end = 0usize;

    for &(start, end) in spans {
        if start < last_end {
            continue;
        }
        result.extend(&chars[last_end..start.min(chars.len())]);
        result.push_str(REDACTION_MARKER);
        last_end = end.min(chars.len());
    }
    result.extend(&chars[last_end..]);
    result
}
