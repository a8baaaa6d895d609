//! Key identifier decoding.
//!
//! The capture layer emits printable keys as their literal character(s)
//! and special keys as `Key.<name>` identifiers. Decoding is total:
//! anything unrecognized becomes [`Key::Ignored`] and replays as a
//! no-op.

use ks_common::REDACTION_MARKER;

/// Decoded editing action for a key identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Printable text to insert at the cursor. Usually a single
    /// character; composite identifiers (e.g. paste events) insert
    /// every character.
    Printable(String),
    /// Delete the character before the cursor.
    Backspace,
    /// Delete the character at the cursor.
    Delete,
    /// Move the cursor one character left.
    Left,
    /// Move the cursor one character right.
    Right,
    /// Move the cursor to the same column of the previous line.
    Up,
    /// Move the cursor to the same column of the next line.
    Down,
    /// Move the cursor to the start of the text.
    Home,
    /// Move the cursor to the end of the text.
    End,
    /// No effect on text or cursor.
    Ignored,
}

impl Key {
    /// Decode a capture-layer key identifier.
    ///
    /// The redaction marker decodes as [`Key::Ignored`] so an
    /// already-sanitized stream replays to an empty (or unchanged)
    /// reconstruction instead of leaking marker text into it.
    pub fn decode(identifier: &str) -> Key {
        if identifier.is_empty() || identifier == REDACTION_MARKER {
            return Key::Ignored;
        }
        if let Some(name) = identifier.strip_prefix("Key.") {
            return match name {
                "space" => Key::Printable(" ".to_string()),
                "enter" => Key::Printable("\n".to_string()),
                "tab" => Key::Printable("\t".to_string()),
                "backspace" => Key::Backspace,
                "delete" => Key::Delete,
                "left" => Key::Left,
                "right" => Key::Right,
                "up" => Key::Up,
                "down" => Key::Down,
                "home" => Key::Home,
                "end" => Key::End,
                _ => Key::Ignored,
            };
        }
        Key::Printable(identifier.to_string())
    }
}
