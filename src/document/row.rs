//! A single document row and its derived render/highlight data.

use crate::highlight::Highlight;

/// Tab stops fall on multiples of this width.
pub const TAB_STOP: usize = 8;

/// One line of the document.
///
/// `chars` is the raw byte sequence (tabs stored literally, no trailing
/// newline). `render` and `highlight` are derived: tabs expanded to the
/// next tab stop, one tag per render byte. Both are rebuilt wholesale
/// whenever `chars` changes, never patched in place.
#[derive(Clone, Debug)]
pub struct Row {
    /// This row's position in the document, kept consistent by the
    /// document on every structural change.
    pub index: usize,
    pub chars: Vec<u8>,
    pub render: Vec<u8>,
    pub highlight: Vec<Highlight>,
    /// True if an unterminated block comment is still open at row end.
    pub open_comment: bool,
}

impl Row {
    pub(crate) fn new(index: usize, chars: Vec<u8>) -> Self {
        Self {
            index,
            chars,
            render: Vec::new(),
            highlight: Vec::new(),
            open_comment: false,
        }
    }

    /// Length of the raw character sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Rebuild `render` from `chars`, expanding each tab with spaces up to
    /// the next multiple of [`TAB_STOP`].
    pub(crate) fn build_render(&mut self) {
        let mut render = Vec::with_capacity(self.chars.len());
        for &byte in &self.chars {
            if byte == b'\t' {
                render.push(b' ');
                while render.len() % TAB_STOP != 0 {
                    render.push(b' ');
                }
            } else {
                render.push(byte);
            }
        }
        self.render = render;
    }

    /// Convert a raw-character column to its rendered column.
    #[must_use]
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for &byte in self.chars.iter().take(cx) {
            if byte == b'\t' {
                rx += (TAB_STOP - 1) - (rx % TAB_STOP);
            }
            rx += 1;
        }
        rx
    }

    /// Convert a rendered column back to the raw-character column: the
    /// first raw column whose cumulative rendered width exceeds `rx`.
    ///
    /// Inverse of [`Self::cx_to_rx`]; a rendered column inside a tab's
    /// expansion resolves to the tab's own raw column.
    #[must_use]
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        let mut current = 0;
        for (cx, &byte) in self.chars.iter().enumerate() {
            if byte == b'\t' {
                current += (TAB_STOP - 1) - (current % TAB_STOP);
            }
            current += 1;
            if current > rx {
                return cx;
            }
        }
        self.chars.len()
    }

    /// First occurrence of `needle` in the render text.
    #[must_use]
    pub fn find_in_render(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() || needle.len() > self.render.len() {
            return None;
        }
        self.render
            .windows(needle.len())
            .position(|window| window == needle)
    }
}
