//! Logical key events.

/// A logical key produced by the decoder.
///
/// Control keys carry the letter they chord with (`Ctrl(b'q')` for
/// Ctrl-Q); the raw control byte is recovered with `letter & 0x1F`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A plain byte, inserted into the document verbatim.
    Char(u8),
    /// Ctrl chorded with a letter (stored as the lowercase letter).
    Ctrl(u8),
    /// Enter/Return key.
    Enter,
    /// Escape key, also the fallback for unrecognized sequences.
    Escape,
    /// Backspace key (0x7F).
    Backspace,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Delete key.
    Delete,
}
