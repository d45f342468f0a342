//! The in-memory document: an ordered sequence of rows plus the cursor.
//!
//! All row and character operations clamp or no-op on out-of-range
//! arguments rather than erroring; interactive editing routinely produces
//! boundary keystrokes (Backspace at document start, Delete past end) and
//! they must be tolerated silently.

mod row;

pub use row::{Row, TAB_STOP};

use crate::highlight::{self, Highlight, Syntax};

/// The owned, ordered sequence of rows, with cursor position, dirty
/// counter, filename, and the active syntax definition.
#[derive(Debug, Default)]
pub struct Document {
    rows: Vec<Row>,
    /// Cursor column in raw-character coordinates.
    pub cx: usize,
    /// Cursor row.
    pub cy: usize,
    dirty: usize,
    filename: Option<String>,
    syntax: Option<&'static Syntax>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub(crate) fn row_mut(&mut self, at: usize) -> Option<&mut Row> {
        self.rows.get_mut(at)
    }

    /// Count of edits since load or save; zero means unmodified.
    #[must_use]
    pub fn dirty(&self) -> usize {
        self.dirty
    }

    /// Reset the dirty counter after a successful save or load.
    pub fn mark_saved(&mut self) {
        self.dirty = 0;
    }

    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    #[must_use]
    pub fn syntax(&self) -> Option<&'static Syntax> {
        self.syntax
    }

    /// Set the filename and re-select the syntax definition, reclassifying
    /// every row under the new language.
    pub fn set_filename(&mut self, filename: Option<String>) {
        self.filename = filename;
        self.syntax = self.filename.as_deref().and_then(highlight::select_syntax);
        self.rehighlight_all();
    }

    /// Populate the document from loaded lines and mark it clean.
    pub fn load_lines(&mut self, lines: Vec<Vec<u8>>) {
        for line in lines {
            self.insert_row(self.rows.len(), line);
        }
        self.dirty = 0;
    }

    /// Insert a row at `at`, shifting and renumbering subsequent rows.
    /// No-op when `at` is past the end of the document.
    pub fn insert_row(&mut self, at: usize, chars: Vec<u8>) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, Row::new(at, chars));
        self.renumber_from(at + 1);
        self.refresh_row(at);
        self.dirty += 1;
    }

    /// Delete the row at `at`, shifting and renumbering the remainder.
    /// No-op when out of range.
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.renumber_from(at);
        self.dirty += 1;
        // The comment state seen by the rows below may have changed
        if at < self.rows.len() {
            self.rehighlight_from(at);
        }
    }

    /// Insert one byte into the row at `row_index`; the column clamps
    /// into `0..=row.len()`.
    pub fn insert_char(&mut self, row_index: usize, at: usize, byte: u8) {
        let Some(row) = self.rows.get_mut(row_index) else {
            return;
        };
        let at = at.min(row.len());
        row.chars.insert(at, byte);
        self.refresh_row(row_index);
        self.dirty += 1;
    }

    /// Delete one byte from the row at `row_index`; no-op when the column
    /// is out of range.
    pub fn delete_char(&mut self, row_index: usize, at: usize) {
        let Some(row) = self.rows.get_mut(row_index) else {
            return;
        };
        if at >= row.len() {
            return;
        }
        row.chars.remove(at);
        self.refresh_row(row_index);
        self.dirty += 1;
    }

    /// Append bytes onto the end of the row at `row_index`.
    pub fn append_string(&mut self, row_index: usize, bytes: &[u8]) {
        let Some(row) = self.rows.get_mut(row_index) else {
            return;
        };
        row.chars.extend_from_slice(bytes);
        self.refresh_row(row_index);
        self.dirty += 1;
    }

    /// Insert a byte at the cursor, appending a fresh row first when the
    /// cursor sits one past the last row.
    pub fn insert_char_at_cursor(&mut self, byte: u8) {
        if self.cy == self.rows.len() {
            self.insert_row(self.rows.len(), Vec::new());
        }
        self.insert_char(self.cy, self.cx, byte);
        self.cx += 1;
    }

    /// Split the current row at the cursor: an empty row is inserted above
    /// when the cursor is at column 0, otherwise the suffix from the
    /// cursor onward moves to a new row below. The cursor lands on column
    /// 0 of the following row.
    pub fn insert_newline(&mut self) {
        if self.cx == 0 {
            self.insert_row(self.cy, Vec::new());
        } else {
            let suffix = self.rows[self.cy].chars[self.cx..].to_vec();
            self.insert_row(self.cy + 1, suffix);
            let row = &mut self.rows[self.cy];
            row.chars.truncate(self.cx);
            self.refresh_row(self.cy);
        }
        self.cy += 1;
        self.cx = 0;
    }

    /// Delete the byte left of the cursor, or join with the previous row
    /// when the cursor is at column 0. No-op at the document start or when
    /// the cursor is past the last row.
    pub fn delete_char_at_cursor(&mut self) {
        if self.cy == self.rows.len() {
            return;
        }
        if self.cx == 0 && self.cy == 0 {
            return;
        }
        if self.cx > 0 {
            self.delete_char(self.cy, self.cx - 1);
            self.cx -= 1;
        } else {
            self.join_with_previous();
        }
    }

    /// Append the current row's content onto the previous row and delete
    /// the current row; the cursor moves to the join point. Only valid
    /// with the cursor at column 0 of a row other than the first.
    pub fn join_with_previous(&mut self) {
        if self.cx != 0 || self.cy == 0 || self.cy >= self.rows.len() {
            return;
        }
        let merged = self.rows[self.cy].chars.clone();
        self.cx = self.rows[self.cy - 1].len();
        self.append_string(self.cy - 1, &merged);
        self.delete_row(self.cy);
        self.cy -= 1;
    }

    /// Concatenate every row with a trailing newline, for persistence.
    #[must_use]
    pub fn rows_to_text(&self) -> Vec<u8> {
        let mut text = Vec::new();
        for row in &self.rows {
            text.extend_from_slice(&row.chars);
            text.push(b'\n');
        }
        text
    }

    /// Rebuild a row's render text and reclassify from it onward.
    fn refresh_row(&mut self, at: usize) {
        if let Some(row) = self.rows.get_mut(at) {
            row.build_render();
            self.rehighlight_from(at);
        }
    }

    /// Reclassify every row from the top, threading the block-comment
    /// state through unconditionally.
    ///
    /// Used when the language changes: the early-exit ripple in
    /// [`Self::rehighlight_from`] assumes only comment state went stale,
    /// which does not hold when every tag was produced under a different
    /// syntax.
    fn rehighlight_all(&mut self) {
        for at in 0..self.rows.len() {
            let entry = at > 0 && self.rows[at - 1].open_comment;
            let (tags, open) = match self.syntax {
                Some(syntax) => highlight::classify(&self.rows[at].render, syntax, entry),
                None => (vec![Highlight::Normal; self.rows[at].render.len()], false),
            };
            let row = &mut self.rows[at];
            row.highlight = tags;
            row.open_comment = open;
        }
    }

    /// Reclassify `start` and ripple forward while each row's
    /// `open_comment` flag keeps changing.
    ///
    /// Iterative on purpose: a single edit near the top of a long file can
    /// flip the comment state of every following row, and a recursive
    /// formulation would grow the call stack with the file.
    fn rehighlight_from(&mut self, start: usize) {
        let mut at = start;
        while at < self.rows.len() {
            let entry = at > 0 && self.rows[at - 1].open_comment;
            let (tags, open) = match self.syntax {
                Some(syntax) => highlight::classify(&self.rows[at].render, syntax, entry),
                None => (vec![Highlight::Normal; self.rows[at].render.len()], false),
            };
            let changed = self.rows[at].open_comment != open;
            let row = &mut self.rows[at];
            row.highlight = tags;
            row.open_comment = open;
            if !changed {
                break;
            }
            at += 1;
        }
    }

    fn renumber_from(&mut self, start: usize) {
        for (index, row) in self.rows.iter_mut().enumerate().skip(start) {
            row.index = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_from(lines: &[&[u8]]) -> Document {
        let mut doc = Document::new();
        doc.load_lines(lines.iter().map(|l| l.to_vec()).collect());
        doc
    }

    fn c_doc(lines: &[&[u8]]) -> Document {
        let mut doc = Document::new();
        doc.set_filename(Some("test.c".to_string()));
        doc.load_lines(lines.iter().map(|l| l.to_vec()).collect());
        doc
    }

    fn chars_of(doc: &Document) -> Vec<Vec<u8>> {
        doc.rows().iter().map(|r| r.chars.clone()).collect()
    }

    #[test]
    fn load_resets_dirty() {
        let doc = doc_from(&[b"one", b"two"]);
        assert_eq!(doc.num_rows(), 2);
        assert_eq!(doc.dirty(), 0);
    }

    #[test]
    fn insert_row_renumbers() {
        let mut doc = doc_from(&[b"a", b"c"]);
        doc.insert_row(1, b"b".to_vec());
        assert_eq!(chars_of(&doc), vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
        for (at, row) in doc.rows().iter().enumerate() {
            assert_eq!(row.index, at);
        }
        assert_eq!(doc.dirty(), 1);
    }

    #[test]
    fn insert_row_past_end_is_a_no_op() {
        let mut doc = doc_from(&[b"a"]);
        doc.insert_row(5, b"x".to_vec());
        assert_eq!(doc.num_rows(), 1);
        assert_eq!(doc.dirty(), 0);
    }

    #[test]
    fn delete_row_renumbers() {
        let mut doc = doc_from(&[b"a", b"b", b"c"]);
        doc.delete_row(1);
        assert_eq!(chars_of(&doc), vec![b"a".to_vec(), b"c".to_vec()]);
        for (at, row) in doc.rows().iter().enumerate() {
            assert_eq!(row.index, at);
        }
        doc.delete_row(9);
        assert_eq!(doc.num_rows(), 2);
    }

    #[test]
    fn insert_char_clamps_column() {
        let mut doc = doc_from(&[b"ab"]);
        doc.insert_char(0, 99, b'!');
        assert_eq!(doc.rows()[0].chars, b"ab!");
    }

    #[test]
    fn delete_char_out_of_range_is_a_no_op() {
        let mut doc = doc_from(&[b"ab"]);
        doc.delete_char(0, 2);
        doc.delete_char(5, 0);
        assert_eq!(doc.rows()[0].chars, b"ab");
        assert_eq!(doc.dirty(), 0);
    }

    #[test]
    fn insert_then_delete_restores_chars() {
        let mut doc = doc_from(&[b"hello"]);
        doc.insert_char(0, 2, b'X');
        assert_eq!(doc.rows()[0].chars, b"heXllo");
        doc.delete_char(0, 2);
        assert_eq!(doc.rows()[0].chars, b"hello");
    }

    #[test]
    fn newline_at_column_zero_inserts_empty_row_above() {
        let mut doc = doc_from(&[b"abc"]);
        doc.insert_newline();
        assert_eq!(chars_of(&doc), vec![b"".to_vec(), b"abc".to_vec()]);
        assert_eq!((doc.cx, doc.cy), (0, 1));
    }

    #[test]
    fn newline_mid_row_splits_it() {
        let mut doc = doc_from(&[b"abcdef"]);
        doc.cx = 3;
        doc.insert_newline();
        assert_eq!(chars_of(&doc), vec![b"abc".to_vec(), b"def".to_vec()]);
        assert_eq!((doc.cx, doc.cy), (0, 1));
    }

    #[test]
    fn backspace_at_column_zero_joins_rows() {
        let mut doc = doc_from(&[b"abc", b"def"]);
        doc.cy = 1;
        doc.delete_char_at_cursor();
        assert_eq!(chars_of(&doc), vec![b"abcdef".to_vec()]);
        assert_eq!((doc.cx, doc.cy), (3, 0));
    }

    #[test]
    fn backspace_at_document_start_is_a_no_op() {
        let mut doc = doc_from(&[b"abc"]);
        doc.delete_char_at_cursor();
        assert_eq!(chars_of(&doc), vec![b"abc".to_vec()]);
        assert_eq!(doc.dirty(), 0);
    }

    #[test]
    fn typing_past_last_row_appends_one() {
        let mut doc = Document::new();
        doc.insert_char_at_cursor(b'h');
        doc.insert_char_at_cursor(b'i');
        assert_eq!(chars_of(&doc), vec![b"hi".to_vec()]);
        assert_eq!((doc.cx, doc.cy), (2, 0));
    }

    #[test]
    fn rows_to_text_appends_newline_per_row() {
        let doc = doc_from(&[b"hi", b""]);
        assert_eq!(doc.rows_to_text(), b"hi\n\n");
        assert_eq!(Document::new().rows_to_text(), b"");
    }

    #[test]
    fn highlight_always_covers_render() {
        let mut doc = c_doc(&[b"int\tx;", b"/* open"]);
        for row in doc.rows() {
            assert_eq!(row.highlight.len(), row.render.len());
        }
        doc.insert_char(0, 0, b'\t');
        for row in doc.rows() {
            assert_eq!(row.highlight.len(), row.render.len());
        }
    }

    #[test]
    fn three_line_c_scenario() {
        let doc = c_doc(&[b"int x;", b"/* start", b"end */ int y;"]);

        let row0 = &doc.rows()[0];
        assert_eq!(&row0.highlight[0..3], &[Highlight::Keyword2; 3]);
        assert!(!row0.open_comment);

        let row1 = &doc.rows()[1];
        assert!(row1.open_comment);
        assert!(row1.highlight.iter().all(|&t| t == Highlight::BlockComment));

        let row2 = &doc.rows()[2];
        assert!(!row2.open_comment);
        assert_eq!(&row2.highlight[0..6], &[Highlight::BlockComment; 6]);
        assert_eq!(&row2.highlight[7..10], &[Highlight::Keyword2; 3]);
    }

    #[test]
    fn closing_a_comment_ripples_forward() {
        let mut doc = c_doc(&[b"/* open", b"aaa", b"bbb", b"ccc"]);
        for row in &doc.rows()[1..] {
            assert!(row.open_comment);
            assert!(row.highlight.iter().all(|&t| t == Highlight::BlockComment));
        }

        // Close the comment on row 0; every following row must revert
        doc.append_string(0, b" */");
        assert!(!doc.rows()[0].open_comment);
        for row in &doc.rows()[1..] {
            assert!(!row.open_comment);
            assert!(row.highlight.iter().all(|&t| t != Highlight::BlockComment));
        }
    }

    #[test]
    fn reopening_a_comment_ripples_forward() {
        let mut doc = c_doc(&[b"x", b"y", b"z"]);
        doc.append_string(0, b" /*");
        assert!(doc.rows()[1].open_comment);
        assert!(doc.rows()[2].open_comment);
        assert!(doc.rows()[2].highlight.iter().all(|&t| t == Highlight::BlockComment));
    }

    #[test]
    fn ripple_stops_at_a_row_that_already_agrees() {
        // Row 2 opens its own comment, so closing row 0's does not reach row 3
        let mut doc = c_doc(&[b"/* a", b"b", b"c */ x /* d", b"e"]);
        assert!(doc.rows()[3].open_comment);
        doc.append_string(0, b" */");
        assert!(!doc.rows()[0].open_comment);
        assert!(!doc.rows()[1].open_comment);
        // Row 2 still opens a fresh comment for the rows below
        assert!(doc.rows()[2].open_comment);
        assert!(doc.rows()[3].open_comment);
    }

    #[test]
    fn selecting_a_syntax_reclassifies_existing_rows() {
        let mut doc = doc_from(&[b"int x;"]);
        assert!(doc.rows()[0].highlight.iter().all(|&t| t == Highlight::Normal));
        doc.set_filename(Some("main.c".to_string()));
        assert_eq!(&doc.rows()[0].highlight[0..3], &[Highlight::Keyword2; 3]);
        doc.set_filename(None);
        assert!(doc.rows()[0].highlight.iter().all(|&t| t == Highlight::Normal));
    }

    #[test]
    fn late_syntax_selection_reaches_every_row() {
        // Save-as path: rows exist before the filename does
        let mut doc = doc_from(&[b"plain text", b"int x;", b"return 1;"]);
        doc.set_filename(Some("late.c".to_string()));

        assert!(doc.rows()[0].highlight.iter().all(|&t| t == Highlight::Normal));
        assert_eq!(&doc.rows()[1].highlight[0..3], &[Highlight::Keyword2; 3]);
        assert_eq!(&doc.rows()[2].highlight[0..6], &[Highlight::Keyword1; 6]);

        doc.set_filename(None);
        for row in doc.rows() {
            assert!(row.highlight.iter().all(|&t| t == Highlight::Normal));
        }
    }

    #[test]
    fn late_syntax_selection_threads_comment_state() {
        let mut doc = doc_from(&[b"/* open", b"inside", b"done */ int x;"]);
        doc.set_filename(Some("late.c".to_string()));

        assert!(doc.rows()[0].open_comment);
        assert!(doc.rows()[1].highlight.iter().all(|&t| t == Highlight::BlockComment));
        assert!(!doc.rows()[2].open_comment);
        assert_eq!(&doc.rows()[2].highlight[8..11], &[Highlight::Keyword2; 3]);
    }

    #[test]
    fn dirty_counts_every_edit() {
        let mut doc = doc_from(&[b"ab"]);
        doc.insert_char(0, 0, b'x');
        doc.delete_char(0, 0);
        doc.insert_row(1, Vec::new());
        doc.delete_row(1);
        assert_eq!(doc.dirty(), 4);
        doc.mark_saved();
        assert_eq!(doc.dirty(), 0);
    }
}
