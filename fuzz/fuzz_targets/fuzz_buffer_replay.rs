//! Fuzz target for keystroke replay.
//!
//! The buffer must hold its cursor/provenance invariants for any event
//! sequence: arbitrary key identifiers, kinds, and click offsets.

#![no_main]

use arbitrary::Arbitrary;
use chrono::{TimeZone, Utc};
use ks_buffer::TextBuffer;
use ks_common::{EventKind, KeystrokeEvent};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzEvent {
    key: String,
    kind: u8,
    click_offset: Option<u16>,
}

fuzz_target!(|events: Vec<FuzzEvent>| {
    let events: Vec<KeystrokeEvent> = events
        .into_iter()
        .map(|e| {
            let kind = match e.kind % 5 {
                0 => EventKind::KeyDown,
                1 => EventKind::KeyUp,
                2 => EventKind::MouseClick,
                3 => EventKind::Scroll,
                _ => EventKind::Other,
            };
            KeystrokeEvent {
                timestamp: Utc.timestamp_opt(0, 0).unwrap(),
                key: e.key,
                kind,
                modifiers: Default::default(),
                text_offset: e.click_offset.map(usize::from),
            }
        })
        .collect();

    let buffer = TextBuffer::replay(&events);

    // Invariants that must hold for any input.
    assert!(buffer.cursor() <= buffer.len());
    assert_eq!(buffer.provenance().len(), buffer.len());
    assert_eq!(buffer.history().len(), events.len());
});
