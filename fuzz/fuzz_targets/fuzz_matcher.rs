//! Fuzz target for the fuzzy matcher.
//!
//! Matching must never panic and every resolved span must be a valid,
//! non-overlapping char range of the text it was found in.

#![no_main]

use arbitrary::Arbitrary;
use ks_match::{FuzzyMatcher, MatchSource};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    secrets: Vec<String>,
    snapshot: String,
}

fuzz_target!(|input: Input| {
    let matcher = FuzzyMatcher::with_defaults();
    let report = matcher.find_all_matches(
        &input.text,
        &input.secrets,
        std::slice::from_ref(&input.snapshot),
    );

    let text_len = input.text.chars().count();
    let mut last_end = 0;
    for m in &report.final_text {
        assert!(m.start < m.end);
        assert!(m.end <= text_len);
        assert!(m.start >= last_end, "final-text spans overlap");
        assert_eq!(m.source, MatchSource::FinalText);
        last_end = m.end;
    }

    let snapshot_len = input.snapshot.chars().count();
    for m in &report.snapshots {
        assert!(m.start < m.end);
        assert!(m.end <= snapshot_len);
        assert_eq!(m.source, MatchSource::Snapshot(0));
    }
});
