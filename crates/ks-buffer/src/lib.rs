//! Text reconstruction from keystroke streams.
//!
//! [`TextBuffer`] replays an ordered sequence of captured events into an
//! editable text model: insertions at the cursor, backspace/delete,
//! cursor movement, and click repositioning. After every processed event
//! it appends a [`BufferSnapshot`], so the history stays index-aligned
//! with the event stream, including for events that change nothing.
//!
//! Alongside the text the buffer maintains a parallel provenance array
//! tagging every character with the index of the event that inserted it.
//! That mapping is what lets the sanitizer redact the *events* behind a
//! secret even after later edits have shifted its characters around, or
//! deleted them entirely.

pub mod buffer;
pub mod key;
pub mod snapshot;

pub use buffer::TextBuffer;
pub use key::Key;
pub use snapshot::BufferSnapshot;
