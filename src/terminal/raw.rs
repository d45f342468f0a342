//! Raw mode terminal handling.
//!
//! Enters and exits raw mode on Unix terminals using termios. Raw mode
//! disables line buffering, echo, and signal generation so the editor sees
//! every byte the user types. Reads are configured with `VMIN = 0` and
//! `VTIME = 1`, giving the bounded-timeout single-byte read the key
//! decoder relies on.
//!
//! # Safety
//! This module uses unsafe code for FFI calls to libc termios functions.
//! These are necessary for low-level terminal control and cannot be avoided.

#![allow(unsafe_code)]
#![allow(clippy::borrow_as_ptr)]

use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

/// Saved terminal state, restored on drop.
///
/// Dropping the guard is the only way raw mode ends, so every exit path
/// (including panics unwinding out of the editor loop) puts the terminal
/// back into its original line discipline.
#[derive(Debug)]
pub struct RawModeGuard {
    fd: RawFd,
    original: libc::termios,
}

impl RawModeGuard {
    /// Enter raw mode on the given file descriptor.
    pub fn new<F: AsRawFd>(fd: &F) -> io::Result<Self> {
        let fd = fd.as_raw_fd();
        let original = get_termios(fd)?;

        let mut raw = original;

        // No break signal, no CR-to-NL translation, no parity check,
        // no 8th-bit stripping, no flow control.
        raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);

        // No output post-processing ("\n" stays "\n").
        raw.c_oflag &= !libc::OPOST;

        // 8-bit characters.
        raw.c_cflag |= libc::CS8;

        // No echo, no canonical mode, no extended input, no signal keys.
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);

        // read() returns after 100ms even with no input pending.
        raw.c_cc[libc::VMIN] = 0;
        raw.c_cc[libc::VTIME] = 1;

        set_termios(fd, &raw)?;

        Ok(Self { fd, original })
    }

    fn restore(&self) -> io::Result<()> {
        set_termios(self.fd, &self.original)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Enter raw mode for stdin.
///
/// Returns a guard that restores the terminal when dropped.
pub fn enable_raw_mode() -> io::Result<RawModeGuard> {
    RawModeGuard::new(&io::stdin())
}

/// Check if the given file descriptor is a TTY.
#[must_use]
pub fn is_tty<F: AsRawFd>(fd: &F) -> bool {
    // SAFETY: isatty is safe to call with any fd
    unsafe { libc::isatty(fd.as_raw_fd()) == 1 }
}

/// Query the terminal size via `TIOCGWINSZ` as `(rows, cols)`.
///
/// Fails if the ioctl fails or the terminal reports zero columns, in which
/// case the caller may fall back to the cursor-position probe.
pub fn terminal_size() -> io::Result<(u16, u16)> {
    let mut size: libc::winsize = unsafe { std::mem::zeroed() };

    // SAFETY: ioctl with TIOCGWINSZ is safe when passed a valid winsize struct
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else if size.ws_col == 0 || size.ws_row == 0 {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "terminal reported zero dimensions",
        ))
    } else {
        Ok((size.ws_row, size.ws_col))
    }
}

/// Read one byte from `fd`, honoring the raw-mode `VTIME` timeout.
///
/// Returns `Ok(None)` when the timeout expired with no input.
pub(crate) fn read_byte_timeout(fd: RawFd) -> io::Result<Option<u8>> {
    let mut byte = 0u8;

    // SAFETY: reading a single byte into a valid one-byte buffer
    let n = unsafe { libc::read(fd, std::ptr::from_mut(&mut byte).cast(), 1) };

    match n {
        1 => Ok(Some(byte)),
        0 => Ok(None),
        _ => {
            let err = io::Error::last_os_error();
            if err.raw_os_error() == Some(libc::EAGAIN) {
                Ok(None)
            } else {
                Err(err)
            }
        }
    }
}

fn get_termios(fd: RawFd) -> io::Result<libc::termios> {
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };

    // SAFETY: tcgetattr is safe when passed a valid termios struct
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(termios)
    }
}

fn set_termios(fd: RawFd, termios: &libc::termios) -> io::Result<()> {
    // SAFETY: tcsetattr is safe when passed a valid termios struct
    let result = unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}
