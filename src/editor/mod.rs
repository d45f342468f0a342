//! The edit controller: binds decoded keys to document operations,
//! cursor motion, save requests, and the quit confirmation gate.

mod render;
mod search;

use std::time::{Duration, Instant};

use crate::document::{Document, Row};
use crate::error::Result;
use crate::input::{Key, read_key};
use crate::storage::FileStore;
use crate::terminal::Console;

/// Ctrl-Q presses ignored (with a warning) before a dirty document quits.
pub const QUIT_TIMES: u32 = 3;

/// How long a status message stays visible.
const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

/// All editor state: the document plus viewport, status message, and the
/// quit countdown. Threaded explicitly through every operation; there are
/// no globals.
#[derive(Debug)]
pub struct Editor {
    document: Document,
    /// Cursor column in rendered coordinates, recomputed every frame.
    rx: usize,
    row_off: usize,
    col_off: usize,
    screen_rows: usize,
    screen_cols: usize,
    status: String,
    status_time: Option<Instant>,
    quit_times: u32,
}

impl Editor {
    /// Create an editor for a terminal of the given total size. Two rows
    /// are reserved for the status and message bars.
    #[must_use]
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            document: Document::new(),
            rx: 0,
            row_off: 0,
            col_off: 0,
            screen_rows: usize::from(rows.saturating_sub(2)),
            screen_cols: usize::from(cols),
            status: String::new(),
            status_time: None,
            quit_times: QUIT_TIMES,
        }
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Load a file into the document. Failure to read is fatal and
    /// propagates to the caller.
    pub fn open<S: FileStore>(&mut self, store: &mut S, path: &str) -> Result<()> {
        let lines = store.read_lines(path)?;
        self.document.set_filename(Some(path.to_string()));
        self.document.load_lines(lines);
        Ok(())
    }

    /// Set the transient message shown in the message bar.
    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.status_time = Some(Instant::now());
    }

    /// The current status message, if it is still fresh.
    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        let fresh = self
            .status_time
            .is_some_and(|at| at.elapsed() < MESSAGE_TIMEOUT);
        (fresh && !self.status.is_empty()).then_some(self.status.as_str())
    }

    /// Run the editor loop until quit: render a frame, then decode and
    /// apply one keystroke.
    pub fn run<C: Console, S: FileStore>(&mut self, console: &mut C, store: &mut S) -> Result<()> {
        loop {
            self.refresh_screen(console)?;
            if !self.process_keypress(console, store)? {
                return Ok(());
            }
        }
    }

    /// Decode one keystroke and apply it. Returns `false` when the editor
    /// should exit.
    pub fn process_keypress<C: Console, S: FileStore>(
        &mut self,
        console: &mut C,
        store: &mut S,
    ) -> Result<bool> {
        let key = read_key(console)?;

        match key {
            Key::Enter => self.document.insert_newline(),
            Key::Ctrl(b'q') => {
                if self.document.dirty() > 0 && self.quit_times > 0 {
                    let remaining = self.quit_times;
                    self.set_status_message(format!(
                        "WARNING! File has unsaved changes. \
                         Press Ctrl-Q {remaining} more times to quit."
                    ));
                    self.quit_times -= 1;
                    return Ok(true);
                }
                console.write(crate::ansi::CLEAR_SCREEN.as_bytes())?;
                console.write(crate::ansi::CURSOR_HOME.as_bytes())?;
                return Ok(false);
            }
            Key::Ctrl(b's') => self.save(console, store)?,
            Key::Ctrl(b'f') => self.find(console)?,
            Key::Home => self.document.cx = 0,
            Key::End => {
                if let Some(row) = self.document.row(self.document.cy) {
                    self.document.cx = row.len();
                }
            }
            Key::Backspace | Key::Ctrl(b'h') | Key::Delete => {
                if key == Key::Delete {
                    self.move_cursor(Key::Right);
                }
                self.document.delete_char_at_cursor();
            }
            Key::PageUp | Key::PageDown => {
                if key == Key::PageUp {
                    self.document.cy = self.row_off;
                } else {
                    let bottom = self.row_off + self.screen_rows.saturating_sub(1);
                    self.document.cy = bottom.min(self.document.num_rows());
                }
                let motion = if key == Key::PageUp { Key::Up } else { Key::Down };
                for _ in 0..self.screen_rows {
                    self.move_cursor(motion);
                }
            }
            Key::Up | Key::Down | Key::Left | Key::Right => self.move_cursor(key),
            // Ctrl-L (refresh) is a no-op: every keystroke redraws anyway
            Key::Ctrl(b'l') | Key::Escape => {}
            Key::Char(byte) => self.document.insert_char_at_cursor(byte),
            Key::Ctrl(letter) => self.document.insert_char_at_cursor(letter & 0x1f),
        }

        self.quit_times = QUIT_TIMES;
        Ok(true)
    }

    /// Apply one step of cursor motion, then clamp the column to the
    /// destination row's length.
    pub fn move_cursor(&mut self, key: Key) {
        let doc = &mut self.document;
        match key {
            Key::Left => {
                if doc.cx > 0 {
                    doc.cx -= 1;
                } else if doc.cy > 0 {
                    // Wrap to the end of the previous row
                    doc.cy -= 1;
                    doc.cx = doc.rows()[doc.cy].len();
                }
            }
            Key::Right => {
                if let Some(row) = doc.row(doc.cy) {
                    if doc.cx < row.len() {
                        doc.cx += 1;
                    } else {
                        doc.cy += 1;
                        doc.cx = 0;
                    }
                }
            }
            Key::Up => {
                if doc.cy > 0 {
                    doc.cy -= 1;
                }
            }
            Key::Down => {
                if doc.cy < doc.num_rows() {
                    doc.cy += 1;
                }
            }
            _ => {}
        }

        let row_len = doc.row(doc.cy).map_or(0, Row::len);
        if doc.cx > row_len {
            doc.cx = row_len;
        }
    }

    /// Save the document, prompting for a filename first when none is
    /// set. Write failures surface in the message bar and leave the dirty
    /// counter untouched.
    fn save<C: Console, S: FileStore>(&mut self, console: &mut C, store: &mut S) -> Result<()> {
        if self.document.filename().is_none() {
            let name = self.prompt(
                console,
                "Save as: ",
                " (ESC to cancel)",
                |_editor: &mut Self, _input: &str, _key: Key| {},
            )?;
            let Some(name) = name else {
                self.set_status_message("Save aborted");
                return Ok(());
            };
            self.document.set_filename(Some(name));
        }

        let Some(path) = self.document.filename().map(str::to_owned) else {
            return Ok(());
        };
        let text = self.document.rows_to_text();
        match store.write(&path, &text) {
            Ok(written) => {
                self.document.mark_saved();
                self.set_status_message(format!("{written} bytes written to disk"));
            }
            Err(err) => self.set_status_message(format!("Can't save! I/O error: {err}")),
        }
        Ok(())
    }

    /// Status-bar prompt loop. The callback runs on every keystroke,
    /// which is what makes incremental search possible. Returns `None`
    /// when the prompt was cancelled with Escape.
    fn prompt<C, F>(
        &mut self,
        console: &mut C,
        before: &str,
        after: &str,
        mut callback: F,
    ) -> Result<Option<String>>
    where
        C: Console,
        F: FnMut(&mut Self, &str, Key),
    {
        let mut input = String::new();
        loop {
            self.set_status_message(format!("{before}{input}{after}"));
            self.refresh_screen(console)?;

            let key = read_key(console)?;
            match key {
                Key::Delete | Key::Ctrl(b'h') | Key::Backspace => {
                    input.pop();
                }
                Key::Escape => {
                    self.set_status_message("");
                    callback(self, &input, key);
                    return Ok(None);
                }
                Key::Enter if !input.is_empty() => {
                    self.set_status_message("");
                    callback(self, &input, key);
                    return Ok(Some(input));
                }
                Key::Char(byte) if byte.is_ascii_graphic() || byte == b' ' => {
                    input.push(char::from(byte));
                }
                _ => {}
            }
            callback(self, &input, key);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory console and store doubles for controller tests.

    use std::collections::{HashMap, VecDeque};
    use std::io;

    use crate::storage::{FileStore, split_lines};
    use crate::terminal::Console;

    /// Console fed from a scripted byte queue, capturing all output.
    /// An exhausted script reads as an error so a runaway loop fails fast.
    pub(crate) struct ScriptedConsole {
        input: VecDeque<u8>,
        pub output: Vec<u8>,
    }

    impl ScriptedConsole {
        pub(crate) fn new(script: &[u8]) -> Self {
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

    /// In-memory file store.
    #[derive(Default)]
    pub(crate) struct MemStore {
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

    pub(crate) fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack
            .windows(needle.len())
            .any(|window| window == needle)
    }
}
