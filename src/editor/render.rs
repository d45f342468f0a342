//! Viewport scrolling and the full-frame renderer.
//!
//! Every frame is assembled into one buffer and flushed with a single
//! write so the terminal never shows a half-drawn screen. Color escape
//! codes are emitted only when the highlight tag changes between adjacent
//! bytes, not per byte.

use crate::ansi;
use crate::document::Row;
use crate::error::Result;
use crate::highlight::Highlight;
use crate::terminal::Console;

use super::Editor;

/// Filename bytes shown in the status bar before truncation.
const STATUS_NAME_WIDTH: usize = 20;

impl Editor {
    /// Clamp the scroll offsets so the cursor stays inside the viewport,
    /// recomputing the rendered cursor column first.
    fn scroll(&mut self) {
        self.rx = self
            .document
            .row(self.document.cy)
            .map_or(0, |row| row.cx_to_rx(self.document.cx));

        if self.document.cy < self.row_off {
            self.row_off = self.document.cy;
        }
        if self.document.cy >= self.row_off + self.screen_rows {
            self.row_off = self.document.cy + 1 - self.screen_rows;
        }
        if self.rx < self.col_off {
            self.col_off = self.rx;
        }
        if self.rx >= self.col_off + self.screen_cols {
            self.col_off = self.rx + 1 - self.screen_cols;
        }
    }

    /// Render one frame: document rows, status bar, message bar, cursor.
    pub fn refresh_screen<C: Console>(&mut self, console: &mut C) -> Result<()> {
        self.scroll();

        let mut frame = Vec::with_capacity(4096);
        frame.extend_from_slice(ansi::CURSOR_HIDE.as_bytes());
        frame.extend_from_slice(ansi::CURSOR_HOME.as_bytes());

        self.draw_rows(&mut frame);
        self.draw_status_bar(&mut frame);
        self.draw_message_bar(&mut frame);

        let cursor_row = self.document.cy - self.row_off + 1;
        let cursor_col = self.rx - self.col_off + 1;
        frame.extend_from_slice(ansi::cursor_position(cursor_row, cursor_col).as_bytes());
        frame.extend_from_slice(ansi::CURSOR_SHOW.as_bytes());

        console.write(&frame)?;
        Ok(())
    }

    fn draw_rows(&self, frame: &mut Vec<u8>) {
        for y in 0..self.screen_rows {
            let file_row = y + self.row_off;
            if file_row >= self.document.num_rows() {
                if self.document.num_rows() == 0 && y == self.screen_rows / 3 {
                    self.draw_welcome(frame);
                } else {
                    frame.push(b'~');
                }
            } else {
                self.draw_document_row(frame, &self.document.rows()[file_row]);
            }
            frame.extend_from_slice(ansi::CLEAR_LINE_RIGHT.as_bytes());
            frame.extend_from_slice(b"\r\n");
        }
    }

    /// Draw the visible slice of one document row with run-length color
    /// switching. Control bytes render as an inverse-video placeholder
    /// (`@` + code, or `?`) with the active color re-asserted afterwards.
    fn draw_document_row(&self, frame: &mut Vec<u8>, row: &Row) {
        let start = self.col_off.min(row.render.len());
        let end = (self.col_off + self.screen_cols).min(row.render.len());
        let mut current: Option<u8> = None;

        let slice = row.render[start..end].iter().zip(&row.highlight[start..end]);
        for (&byte, &tag) in slice {
            if byte.is_ascii_control() {
                let symbol = if byte <= 26 { b'@' + byte } else { b'?' };
                frame.extend_from_slice(ansi::INVERSE_ON.as_bytes());
                frame.push(symbol);
                frame.extend_from_slice(ansi::ATTR_RESET.as_bytes());
                // ATTR_RESET dropped the color as well
                if let Some(color) = current {
                    frame.extend_from_slice(ansi::foreground(color).as_bytes());
                }
            } else if tag == Highlight::Normal {
                if current.is_some() {
                    frame.extend_from_slice(ansi::FG_DEFAULT.as_bytes());
                    current = None;
                }
                frame.push(byte);
            } else {
                let color = tag.color();
                if current != Some(color) {
                    current = Some(color);
                    frame.extend_from_slice(ansi::foreground(color).as_bytes());
                }
                frame.push(byte);
            }
        }
        frame.extend_from_slice(ansi::FG_DEFAULT.as_bytes());
    }

    /// Centered version banner, shown only on an empty document.
    fn draw_welcome(&self, frame: &mut Vec<u8>) {
        let mut banner = format!("Tilde editor -- version {}", super::VERSION).into_bytes();
        banner.truncate(self.screen_cols);

        let padding = (self.screen_cols - banner.len()) / 2;
        if padding > 0 {
            frame.push(b'~');
            frame.resize(frame.len() + padding - 1, b' ');
        }
        frame.extend_from_slice(&banner);
    }

    fn draw_status_bar(&self, frame: &mut Vec<u8>) {
        frame.extend_from_slice(ansi::INVERSE_ON.as_bytes());

        let name = self.document.filename().unwrap_or("[No Name]");
        let modified = if self.document.dirty() > 0 {
            " (modified)"
        } else {
            ""
        };
        let mut left = Vec::new();
        left.extend_from_slice(&name.as_bytes()[..name.len().min(STATUS_NAME_WIDTH)]);
        left.extend_from_slice(
            format!(" - {} lines{modified}", self.document.num_rows()).as_bytes(),
        );
        left.truncate(self.screen_cols);

        let filetype = self.document.syntax().map_or("no filetype", |s| s.name);
        let right = format!(
            "{filetype} | {}/{}",
            self.document.cy + 1,
            self.document.num_rows()
        );

        frame.extend_from_slice(&left);
        let mut len = left.len();
        while len < self.screen_cols {
            if self.screen_cols - len == right.len() {
                frame.extend_from_slice(right.as_bytes());
                break;
            }
            frame.push(b' ');
            len += 1;
        }

        frame.extend_from_slice(ansi::ATTR_RESET.as_bytes());
        frame.extend_from_slice(b"\r\n");
    }

    fn draw_message_bar(&self, frame: &mut Vec<u8>) {
        frame.extend_from_slice(ansi::CLEAR_LINE_RIGHT.as_bytes());
        if let Some(message) = self.status_message() {
            let mut message = message.as_bytes().to_vec();
            message.truncate(self.screen_cols);
            frame.extend_from_slice(&message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{ScriptedConsole, contains};
    use super::*;

    fn frame_of(editor: &mut Editor) -> Vec<u8> {
        let mut console = ScriptedConsole::new(&[]);
        editor.refresh_screen(&mut console).expect("render");
        console.output
    }

    fn editor_with(lines: &[&[u8]]) -> Editor {
        let mut editor = Editor::new(12, 40);
        editor
            .document_mut()
            .load_lines(lines.iter().map(|l| l.to_vec()).collect());
        editor
    }

    #[test]
    fn frame_is_bracketed_by_cursor_visibility() {
        let mut editor = editor_with(&[]);
        let frame = frame_of(&mut editor);
        assert!(frame.starts_with(ansi::CURSOR_HIDE.as_bytes()));
        assert!(frame.ends_with(ansi::CURSOR_SHOW.as_bytes()));
    }

    #[test]
    fn empty_document_shows_banner_and_fillers() {
        let mut editor = editor_with(&[]);
        let frame = frame_of(&mut editor);
        assert!(contains(&frame, b"Tilde editor -- version"));
        assert!(contains(&frame, b"~\x1b[K\r\n"));
    }

    #[test]
    fn nonempty_document_has_no_banner() {
        let mut editor = editor_with(&[b"text"]);
        let frame = frame_of(&mut editor);
        assert!(!contains(&frame, b"Tilde editor"));
        assert!(contains(&frame, b"text"));
    }

    #[test]
    fn color_codes_switch_per_run_not_per_byte() {
        let mut editor = editor_with(&[b"int x;"]);
        editor.document_mut().set_filename(Some("t.c".to_string()));
        let frame = frame_of(&mut editor);
        // One switch into keyword color, one back to default for " x;"
        assert!(contains(&frame, b"\x1b[32mint\x1b[39m x;"));
    }

    #[test]
    fn control_bytes_render_inverse() {
        let mut editor = editor_with(&[&[b'a', 0x01, b'b']]);
        let frame = frame_of(&mut editor);
        // No color was active around the control byte, so no re-assert
        assert!(contains(&frame, b"a\x1b[7mA\x1b[mb"));
    }

    #[test]
    fn status_bar_shows_placeholder_and_line_count() {
        let mut editor = editor_with(&[b"one", b"two"]);
        let frame = frame_of(&mut editor);
        assert!(contains(&frame, b"[No Name] - 2 lines"));
        assert!(contains(&frame, b"no filetype | 1/2"));
    }

    #[test]
    fn status_bar_shows_modified_flag_and_filetype() {
        let mut editor = editor_with(&[b"int x;"]);
        editor.document_mut().set_filename(Some("t.c".to_string()));
        editor.document_mut().insert_char(0, 0, b' ');
        let frame = frame_of(&mut editor);
        assert!(contains(&frame, b"(modified)"));
        assert!(contains(&frame, b"c | 1/1"));
    }

    #[test]
    fn long_filenames_are_truncated_in_the_status_bar() {
        let mut editor = editor_with(&[b"x"]);
        let long = "a".repeat(40);
        editor.document_mut().set_filename(Some(long));
        let frame = frame_of(&mut editor);
        assert!(contains(&frame, format!("{} - 1 lines", "a".repeat(20)).as_bytes()));
        assert!(!contains(&frame, "a".repeat(21).as_bytes()));
    }

    #[test]
    fn message_bar_shows_fresh_messages() {
        let mut editor = editor_with(&[]);
        editor.set_status_message("hello there");
        let frame = frame_of(&mut editor);
        assert!(contains(&frame, b"hello there"));
    }

    #[test]
    fn vertical_scroll_follows_the_cursor() {
        let lines: Vec<Vec<u8>> = (0..30).map(|n| format!("line{n}").into_bytes()).collect();
        let mut editor = Editor::new(12, 40);
        editor.document_mut().load_lines(lines);
        editor.document_mut().cy = 29;

        let frame = frame_of(&mut editor);
        assert!(contains(&frame, b"line29"));
        assert!(!contains(&frame, b"line0\x1b"));
        // Cursor sits on the last viewport row
        assert!(contains(&frame, b"\x1b[10;1H"));
    }

    #[test]
    fn horizontal_scroll_follows_the_rendered_column() {
        let mut editor = editor_with(&[&b"x".repeat(100)]);
        editor.document_mut().cx = 99;
        let frame = frame_of(&mut editor);
        // rx = 99, viewport 40 wide: col_off = 60, cursor at column 40
        assert!(contains(&frame, b"\x1b[1;40H"));
    }

    #[test]
    fn cursor_placement_accounts_for_tabs() {
        let mut editor = editor_with(&[b"\tx"]);
        editor.document_mut().cx = 1;
        let frame = frame_of(&mut editor);
        // Raw column 1 renders at column 8, so the cursor goes to column 9
        assert!(contains(&frame, b"\x1b[1;9H"));
    }
}
