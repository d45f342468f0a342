//! File persistence capability.
//!
//! The editor core reads a document as a sequence of lines and writes it
//! back as one byte image; everything else about the filesystem (paths,
//! permissions, directories) stays outside the core.

use std::fs;
use std::io;

/// Persistence capability consumed by the editor.
pub trait FileStore {
    /// Read a file as lines with `\n`/`\r` terminators stripped.
    fn read_lines(&mut self, path: &str) -> io::Result<Vec<Vec<u8>>>;

    /// Write the full document image, truncating any existing file.
    /// Returns the number of bytes written.
    fn write(&mut self, path: &str, bytes: &[u8]) -> io::Result<usize>;
}

/// Split a file image into lines, stripping line terminators.
///
/// A trailing newline does not produce a final empty line; an empty image
/// has no lines at all.
#[must_use]
pub fn split_lines(raw: &[u8]) -> Vec<Vec<u8>> {
    if raw.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<Vec<u8>> = raw.split(|&b| b == b'\n').map(<[u8]>::to_vec).collect();
    if raw.last() == Some(&b'\n') {
        lines.pop();
    }
    for line in &mut lines {
        while line.last() == Some(&b'\r') {
            line.pop();
        }
    }
    lines
}

/// [`FileStore`] backed by the real filesystem.
#[derive(Debug, Default)]
pub struct DiskStore;

impl FileStore for DiskStore {
    fn read_lines(&mut self, path: &str) -> io::Result<Vec<Vec<u8>>> {
        Ok(split_lines(&fs::read(path)?))
    }

    fn write(&mut self, path: &str, bytes: &[u8]) -> io::Result<usize> {
        fs::write(path, bytes)?;
        Ok(bytes.len())
    }
}
