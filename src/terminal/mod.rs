//! Terminal abstraction.
//!
//! The editor core never touches stdin/stdout directly; it consumes the
//! [`Console`] capability, which covers the four operations the core
//! needs: a bounded-timeout byte read, a frame write, a size query, and
//! (through [`RawModeGuard`]) the guarantee that the original line
//! discipline is restored on every exit path.

mod raw;

pub use raw::{RawModeGuard, enable_raw_mode, is_tty, terminal_size};

use std::io::{self, Write};

use crate::ansi;

/// Terminal capability consumed by the editor core.
pub trait Console {
    /// Read one input byte; `Ok(None)` when the bounded timeout expired.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Write a byte sequence to the output stream.
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Terminal dimensions as `(rows, cols)`.
    fn size(&mut self) -> io::Result<(u16, u16)>;
}

/// Console backed by the process's controlling terminal.
///
/// `read_byte` expects raw mode to be active (see [`enable_raw_mode`]);
/// without it the timeout semantics do not hold.
#[derive(Debug, Default)]
pub struct TtyConsole;

impl TtyConsole {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Determine the size by pushing the cursor to the bottom-right corner
    /// and asking the terminal where it ended up.
    ///
    /// Fallback for terminals where `TIOCGWINSZ` fails or reports zero
    /// columns.
    fn size_from_cursor_probe(&mut self) -> io::Result<(u16, u16)> {
        let mut out = io::stdout();
        out.write_all(ansi::CURSOR_TO_BOTTOM_RIGHT.as_bytes())?;
        out.write_all(ansi::QUERY_CURSOR_POSITION.as_bytes())?;
        out.flush()?;

        // Reply: ESC [ row ; col R
        let mut reply = Vec::with_capacity(16);
        while reply.len() < 32 {
            match self.read_byte()? {
                Some(b'R') | None => break,
                Some(byte) => reply.push(byte),
            }
        }
        parse_cursor_report(&reply)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "bad cursor report"))
    }
}

impl Console for TtyConsole {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        raw::read_byte_timeout(libc::STDIN_FILENO)
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut out = io::stdout();
        out.write_all(bytes)?;
        out.flush()
    }

    fn size(&mut self) -> io::Result<(u16, u16)> {
        match terminal_size() {
            Ok(size) => Ok(size),
            Err(_) => self.size_from_cursor_probe(),
        }
    }
}

/// Parse the body of a `ESC [ row ; col R` cursor position report.
///
/// `reply` holds the bytes up to but not including the final `R`.
fn parse_cursor_report(reply: &[u8]) -> Option<(u16, u16)> {
    let body = reply.strip_prefix(b"\x1b[")?;
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    Some((rows.parse().ok()?, cols.parse().ok()?))
}
