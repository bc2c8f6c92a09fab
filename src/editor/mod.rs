//! The line-editor boundary.
//!
//! The controller drives the editor only through [`LineEditor`], the small
//! surface a line-editing widget exposes: cursor queries, insertion and
//! deletion relative to the cursor, and submission history. [`LineBuffer`]
//! is the rope-backed implementation used by the terminal front end and the
//! tests alike.

mod buffer;

pub use buffer::LineBuffer;

/// Operations the console consumes from the line-editing widget.
///
/// Positions and offsets are character-based, never bytes.
pub trait LineEditor {
    /// Cursor position as a character offset into the buffer.
    fn cursor(&self) -> usize;

    /// The full buffer contents.
    fn text(&self) -> String;

    /// Buffer length in characters.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert text at the cursor; the cursor ends up after the insertion.
    fn insert(&mut self, text: &str);

    /// Delete `offset.abs()` characters relative to the cursor: negative
    /// offsets delete before the cursor, positive offsets after it.
    fn delete(&mut self, offset: isize);

    /// Move the cursor by a signed number of characters, clamped to the
    /// buffer bounds.
    fn move_cursor(&mut self, delta: isize);

    /// Move the cursor to an absolute character offset, clamped.
    fn move_to(&mut self, pos: usize);

    /// Take the buffer contents, leaving the editor empty and the history
    /// cursor reset.
    fn take_line(&mut self) -> String;

    /// Discard the buffer contents and reset the history cursor.
    fn clear(&mut self);

    /// Append a submitted line to the history (consecutive duplicates are
    /// collapsed).
    fn push_history(&mut self, line: String);

    /// Replace the buffer with the previous history entry, stashing the
    /// in-progress draft on first use.
    fn history_prev(&mut self);

    /// Replace the buffer with the next history entry, restoring the
    /// stashed draft past the newest entry.
    fn history_next(&mut self);
}
