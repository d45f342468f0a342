//! Syntax classification.
//!
//! [`classify`] performs a single left-to-right scan over a row's render
//! text and produces one [`Highlight`] tag per byte. Block-comment state
//! crosses row boundaries: the caller seeds each row with the previous
//! row's `open_comment` flag and ripples reclassification forward while
//! the flag keeps changing (see `Document::rehighlight_from`).

mod syntax;

pub use syntax::{SYNTAXES, Syntax, SyntaxFlags, select_syntax};

/// Per-byte classification tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Highlight {
    #[default]
    Normal,
    /// Line comment, from the marker to end of row.
    Comment,
    /// Multi-line comment body and its delimiters.
    BlockComment,
    /// Plain keyword.
    Keyword1,
    /// Type-like keyword.
    Keyword2,
    String,
    Number,
    /// Search match overlay.
    Match,
}

impl Highlight {
    /// ANSI foreground color code for this tag.
    #[must_use]
    pub fn color(self) -> u8 {
        match self {
            Self::Comment | Self::BlockComment => 36,
            Self::Keyword1 => 33,
            Self::Keyword2 => 32,
            Self::String => 35,
            Self::Number => 31,
            Self::Match => 34,
            Self::Normal => 37,
        }
    }
}

/// Punctuation bytes that end a word, in addition to whitespace and NUL.
const SEPARATORS: &[u8] = b",.()+-/*=~%<>[];";

fn is_separator(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0 || SEPARATORS.contains(&byte)
}

/// Classify one row's render text.
///
/// `open_at_entry` is the block-comment state inherited from the previous
/// row. Returns the per-byte tags and whether a block comment is still
/// open at the end of the row.
#[must_use]
pub fn classify(render: &[u8], syntax: &Syntax, open_at_entry: bool) -> (Vec<Highlight>, bool) {
    let mut tags = vec![Highlight::Normal; render.len()];
    let mut prev_separator = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = open_at_entry;

    let mut i = 0;
    while i < render.len() {
        let byte = render[i];
        let prev_tag = if i > 0 { tags[i - 1] } else { Highlight::Normal };

        if let Some(marker) = syntax.line_comment {
            if in_string.is_none() && !in_comment && render[i..].starts_with(marker.as_bytes()) {
                for tag in &mut tags[i..] {
                    *tag = Highlight::Comment;
                }
                break;
            }
        }

        if let Some(end) = syntax.block_comment_end {
            if in_string.is_none() {
                if in_comment {
                    if render[i..].starts_with(end.as_bytes()) {
                        for tag in &mut tags[i..i + end.len()] {
                            *tag = Highlight::BlockComment;
                        }
                        i += end.len();
                        in_comment = false;
                        prev_separator = true;
                    } else {
                        tags[i] = Highlight::BlockComment;
                        i += 1;
                    }
                    continue;
                }
                let start = syntax
                    .block_comment_start
                    .iter()
                    .find(|marker| render[i..].starts_with(marker.as_bytes()));
                if let Some(marker) = start {
                    for tag in &mut tags[i..i + marker.len()] {
                        *tag = Highlight::BlockComment;
                    }
                    i += marker.len();
                    in_comment = true;
                    continue;
                }
            }
        }

        if syntax.flags.contains(SyntaxFlags::STRINGS) {
            if let Some(quote) = in_string {
                tags[i] = Highlight::String;
                if byte == b'\\' && i + 1 < render.len() {
                    // Escaped byte stays inside the string
                    tags[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if byte == quote {
                    in_string = None;
                }
                i += 1;
                prev_separator = true;
                continue;
            }
            if byte == b'"' || byte == b'\'' {
                in_string = Some(byte);
                tags[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if syntax.flags.contains(SyntaxFlags::NUMBERS) {
            let digit = byte.is_ascii_digit() && (prev_separator || prev_tag == Highlight::Number);
            let fraction = byte == b'.' && prev_tag == Highlight::Number;
            if digit || fraction {
                tags[i] = Highlight::Number;
                i += 1;
                prev_separator = false;
                continue;
            }
        }

        if prev_separator {
            if let Some((len, tag)) = match_keyword(&render[i..], syntax) {
                for slot in &mut tags[i..i + len] {
                    *slot = tag;
                }
                i += len;
                prev_separator = false;
                continue;
            }
        }

        prev_separator = is_separator(byte);
        i += 1;
    }

    (tags, in_comment)
}

/// Longest keyword from either class matching at the start of `rest` and
/// followed by a separator (or end of row).
fn match_keyword(rest: &[u8], syntax: &Syntax) -> Option<(usize, Highlight)> {
    let classes = [
        (syntax.keywords, Highlight::Keyword1),
        (syntax.types, Highlight::Keyword2),
    ];

    let mut best: Option<(usize, Highlight)> = None;
    for (words, tag) in classes {
        for word in words {
            let word = word.as_bytes();
            let bounded = rest.get(word.len()).is_none_or(|&b| is_separator(b));
            if rest.starts_with(word) && bounded {
                if best.is_none_or(|(len, _)| word.len() > len) {
                    best = Some((word.len(), tag));
                }
            }
        }
    }
    best
}
