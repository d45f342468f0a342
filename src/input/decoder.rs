//! Byte stream to logical key decoder.
//!
//! Each call produces exactly one [`Key`]. A plain byte maps directly; an
//! ESC byte starts a same-call lookahead of up to three further bytes for
//! the VT sequences the editor understands (arrows, Home/End, Delete,
//! PageUp/PageDown, in both `ESC [` and `ESC O` spellings). The decode is
//! deliberately lossy: a lookahead read that times out, or a sequence not
//! in the table, degrades to a bare Escape. No partial-sequence state is
//! carried across calls.

use std::io;

use crate::input::keyboard::Key;
use crate::terminal::Console;

/// Block until the console yields one logical key.
///
/// Loops over the bounded-timeout read until a byte arrives; read errors
/// other than timeout propagate.
pub fn read_key<C: Console>(console: &mut C) -> io::Result<Key> {
    let byte = loop {
        if let Some(byte) = console.read_byte()? {
            break byte;
        }
    };

    match byte {
        0x1b => read_escape(console),
        b'\r' => Ok(Key::Enter),
        0x7f => Ok(Key::Backspace),
        // Tab is a document byte, not a control chord
        b'\t' => Ok(Key::Char(b'\t')),
        0x01..=0x1a => Ok(Key::Ctrl(byte - 1 + b'a')),
        _ => Ok(Key::Char(byte)),
    }
}

/// Decode the remainder of an escape sequence.
///
/// Every lookahead here is a single timeout-bounded read; `None` at any
/// point means the user pressed a bare Escape (or the sequence was cut
/// short) and we report exactly that.
fn read_escape<C: Console>(console: &mut C) -> io::Result<Key> {
    let Some(first) = console.read_byte()? else {
        return Ok(Key::Escape);
    };

    match first {
        b'[' => {
            let Some(second) = console.read_byte()? else {
                return Ok(Key::Escape);
            };
            match second {
                b'0'..=b'9' => {
                    let Some(third) = console.read_byte()? else {
                        return Ok(Key::Escape);
                    };
                    if third != b'~' {
                        return Ok(Key::Escape);
                    }
                    Ok(match second {
                        b'1' | b'7' => Key::Home,
                        b'3' => Key::Delete,
                        b'4' | b'8' => Key::End,
                        b'5' => Key::PageUp,
                        b'6' => Key::PageDown,
                        _ => Key::Escape,
                    })
                }
                b'A' => Ok(Key::Up),
                b'B' => Ok(Key::Down),
                b'C' => Ok(Key::Right),
                b'D' => Ok(Key::Left),
                b'H' => Ok(Key::Home),
                b'F' => Ok(Key::End),
                _ => Ok(Key::Escape),
            }
        }
        b'O' => {
            let Some(second) = console.read_byte()? else {
                return Ok(Key::Escape);
            };
            match second {
                b'H' => Ok(Key::Home),
                b'F' => Ok(Key::End),
                _ => Ok(Key::Escape),
            }
        }
        _ => Ok(Key::Escape),
    }
}
