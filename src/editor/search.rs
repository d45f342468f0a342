//! Incremental search with a live match overlay.
//!
//! Search runs inside the minibuffer prompt: every keystroke re-runs the
//! callback, which restores the previous match's highlight, scans for the
//! query, overlays [`Highlight::Match`] on the hit, and moves the cursor
//! there. Escape puts the cursor and scroll back where they started;
//! Enter leaves them at the match.

use crate::error::Result;
use crate::highlight::Highlight;
use crate::input::Key;
use crate::terminal::Console;

use super::Editor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Highlight tags displaced by the current match overlay, kept so the
/// next step can undo the overlay before scanning again.
struct SavedHighlight {
    row: usize,
    highlight: Vec<Highlight>,
}

struct SearchState {
    /// Row index of the current match, if any. The next scan starts one
    /// row past it in the active direction.
    last_match: Option<usize>,
    direction: Direction,
    saved: Option<SavedHighlight>,
}

impl Editor {
    /// Run an incremental search session.
    pub(super) fn find<C: Console>(&mut self, console: &mut C) -> Result<()> {
        let saved_cx = self.document.cx;
        let saved_cy = self.document.cy;
        let saved_row_off = self.row_off;
        let saved_col_off = self.col_off;

        let mut state = SearchState {
            last_match: None,
            direction: Direction::Forward,
            saved: None,
        };

        let query = self.prompt(
            console,
            "Search: ",
            " (Use ESC/Arrows/Enter)",
            |editor, input, key| editor.search_step(&mut state, input, key),
        )?;

        if query.is_none() {
            self.document.cx = saved_cx;
            self.document.cy = saved_cy;
            self.row_off = saved_row_off;
            self.col_off = saved_col_off;
        }
        Ok(())
    }

    /// One incremental step: undo the previous overlay, interpret the
    /// keystroke, scan, and overlay the new match.
    fn search_step(&mut self, state: &mut SearchState, query: &str, key: Key) {
        if let Some(saved) = state.saved.take() {
            if let Some(row) = self.document.row_mut(saved.row) {
                row.highlight = saved.highlight;
            }
        }

        match key {
            Key::Enter | Key::Escape => {
                state.last_match = None;
                state.direction = Direction::Forward;
                return;
            }
            Key::Right | Key::Down => state.direction = Direction::Forward,
            Key::Left | Key::Up => state.direction = Direction::Backward,
            _ => {
                state.last_match = None;
                state.direction = Direction::Forward;
            }
        }

        if state.last_match.is_none() {
            state.direction = Direction::Forward;
        }
        let num_rows = self.document.num_rows();
        if query.is_empty() || num_rows == 0 {
            return;
        }

        // Stepping happens before the probe, so start one row back.
        let mut current = state.last_match.unwrap_or(num_rows - 1);
        for _ in 0..num_rows {
            current = match state.direction {
                Direction::Forward => (current + 1) % num_rows,
                Direction::Backward => current.checked_sub(1).unwrap_or(num_rows - 1),
            };

            let Some(row) = self.document.row(current) else {
                return;
            };
            if let Some(found) = row.find_in_render(query.as_bytes()) {
                let cx = row.rx_to_cx(found);
                state.last_match = Some(current);
                self.document.cy = current;
                self.document.cx = cx;
                // Force the next scroll pass to bring the match to the
                // top of the viewport.
                self.row_off = num_rows;

                let Some(row) = self.document.row_mut(current) else {
                    return;
                };
                state.saved = Some(SavedHighlight {
                    row: current,
                    highlight: row.highlight.clone(),
                });
                for tag in &mut row.highlight[found..found + query.len()] {
                    *tag = Highlight::Match;
                }
                break;
            }
        }
    }
}
