//! Editable text model replaying captured keystrokes.

use crate::{BufferSnapshot, Key};
use ks_common::{EventKind, KeystrokeEvent};

/// Replays keystroke events into text, tracking the cursor, the event
/// provenance of every character, and a snapshot per processed event.
///
/// Invariants:
/// - `0 <= cursor <= text.len()` at all times;
/// - `provenance.len() == text.len()`, element `k` naming the event that
///   inserted the character now at offset `k`;
/// - `history[i]` is the state immediately after event `i`, for every
///   event fed in, no-ops included.
///
/// Text is a `Vec<char>` so cursor arithmetic is char-atomic; byte
/// offsets never appear in this crate.
#[derive(Debug, Default)]
pub struct TextBuffer {
    text: Vec<char>,
    provenance: Vec<usize>,
    cursor: usize,
    history: Vec<BufferSnapshot>,
}

impl TextBuffer {
    /// Create an empty buffer with the cursor at offset 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay a whole event stream through a fresh buffer.
    pub fn replay(events: &[KeystrokeEvent]) -> Self {
        let mut buffer = Self::new();
        for event in events {
            buffer.process(event);
        }
        buffer
    }

    /// Process one event, mutating text/cursor as its kind and key
    /// dictate and appending a snapshot. Events the buffer does not
    /// understand (unknown kinds, unknown keys, clicks without a
    /// resolved offset) change nothing but still snapshot, so history
    /// offsets stay aligned with the event stream.
    pub fn process(&mut self, event: &KeystrokeEvent) {
        let event_index = self.history.len();

        match event.kind {
            EventKind::KeyDown => self.apply_key(event_index, Key::decode(&event.key)),
            EventKind::MouseClick => {
                if let Some(offset) = event.text_offset {
                    self.cursor = offset.min(self.text.len());
                }
            }
            EventKind::KeyUp | EventKind::Scroll | EventKind::Other => {}
        }

        self.history.push(BufferSnapshot {
            event_index,
            text: self.text.iter().collect(),
            cursor: self.cursor,
            provenance: self.provenance.clone(),
        });
    }

    fn apply_key(&mut self, event_index: usize, key: Key) {
        match key {
            Key::Printable(s) => {
                for ch in s.chars() {
                    self.text.insert(self.cursor, ch);
                    self.provenance.insert(self.cursor, event_index);
                    self.cursor += 1;
                }
            }
            Key::Backspace => {
                if self.cursor > 0 {
                    self.text.remove(self.cursor - 1);
                    self.provenance.remove(self.cursor - 1);
                    self.cursor -= 1;
                }
            }
            Key::Delete => {
                if self.cursor < self.text.len() {
                    self.text.remove(self.cursor);
                    self.provenance.remove(self.cursor);
                }
            }
            Key::Left => self.cursor = self.cursor.saturating_sub(1),
            Key::Right => self.cursor = (self.cursor + 1).min(self.text.len()),
            Key::Up => self.move_vertical(true),
            Key::Down => self.move_vertical(false),
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.text.len(),
            Key::Ignored => {}
        }
    }

    /// Move the cursor to the same column of the previous/next line,
    /// clamped to that line's length. At the first/last line the cursor
    /// stays put.
    fn move_vertical(&mut self, up: bool) {
        let start = self.line_start(self.cursor);
        let column = self.cursor - start;

        if up {
            if start == 0 {
                return;
            }
            // Char at start-1 is the newline ending the previous line.
            let prev_start = self.line_start(start - 1);
            let prev_len = start - 1 - prev_start;
            self.cursor = prev_start + column.min(prev_len);
        } else {
            let end = self.line_end(self.cursor);
            if end == self.text.len() {
                return;
            }
            let next_start = end + 1;
            let next_len = self.line_end(next_start) - next_start;
            self.cursor = next_start + column.min(next_len);
        }
    }

    /// Offset of the first character of the line containing `pos`.
    fn line_start(&self, pos: usize) -> usize {
        self.text[..pos]
            .iter()
            .rposition(|&c| c == '\n')
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    /// Offset one past the last character of the line containing `pos`
    /// (the position of its newline, or the end of the text).
    fn line_end(&self, pos: usize) -> usize {
        self.text[pos..]
            .iter()
            .position(|&c| c == '\n')
            .map(|i| pos + i)
            .unwrap_or(self.text.len())
    }

    /// Current text content.
    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    /// Current cursor offset, in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of characters in the buffer.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Event index that inserted each character, parallel to the text.
    pub fn provenance(&self) -> &[usize] {
        &self.provenance
    }

    /// Snapshot history, one entry per processed event.
    pub fn history(&self) -> &[BufferSnapshot] {
        &self.history
    }

    /// Consume the buffer into its final text, final provenance, and
    /// snapshot history.
    pub fn into_parts(self) -> (String, Vec<usize>, Vec<BufferSnapshot>) {
        (self.text.iter().collect(), self.provenance, self.history)
    }
}
