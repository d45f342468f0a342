//! In-memory console and file store doubles shared by integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::io;

use tilde::storage::split_lines;
use tilde::{Console, FileStore};

/// Console fed from a scripted byte queue, capturing everything written.
/// Reading past the end of the script is an error so a runaway editor
/// loop fails the test instead of hanging.
pub struct ScriptedConsole {
    input: VecDeque<u8>,
    pub output: Vec<u8>,
}

impl ScriptedConsole {
    pub fn new(script: &[u8]) -> Self {
        Self {
            input: script.iter().copied().collect(),
            output: Vec::new(),
        }
    }
}

impl Console for ScriptedConsole {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        self.input
            .pop_front()
            .map_or_else(|| Err(io::ErrorKind::UnexpectedEof.into()), |b| Ok(Some(b)))
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn size(&mut self) -> io::Result<(u16, u16)> {
        Ok((24, 80))
    }
}

/// File store backed by a map.
#[derive(Default)]
pub struct MemStore {
    pub files: HashMap<String, Vec<u8>>,
}

impl FileStore for MemStore {
    fn read_lines(&mut self, path: &str) -> io::Result<Vec<Vec<u8>>> {
        self.files
            .get(path)
            .map(|raw| split_lines(raw))
            .ok_or_else(|| io::ErrorKind::NotFound.into())
    }

    fn write(&mut self, path: &str, bytes: &[u8]) -> io::Result<usize> {
        self.files.insert(path.to_string(), bytes.to_vec());
        Ok(bytes.len())
    }
}

pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle)
}
