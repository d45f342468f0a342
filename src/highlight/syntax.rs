//! Static syntax definitions and filename-based selection.

use bitflags::bitflags;

bitflags! {
    /// Feature switches for a language definition.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SyntaxFlags: u8 {
        /// Highlight numeric literals.
        const NUMBERS = 1 << 0;
        /// Highlight string literals.
        const STRINGS = 1 << 1;
    }
}

/// A language definition, selected once per filename.
#[derive(Debug)]
pub struct Syntax {
    /// Display name shown in the status bar.
    pub name: &'static str,
    /// Patterns matched against the filename: entries starting with `.`
    /// match the extension, others match any substring of the name.
    pub file_match: &'static [&'static str],
    /// Plain keywords, tagged `Keyword1`.
    pub keywords: &'static [&'static str],
    /// Type-like keywords, tagged `Keyword2`.
    pub types: &'static [&'static str],
    /// Line-comment marker; tags the rest of the row.
    pub line_comment: Option<&'static str>,
    /// Block-comment start markers, checked in order.
    pub block_comment_start: &'static [&'static str],
    /// Block-comment end marker.
    pub block_comment_end: Option<&'static str>,
    /// Enabled highlight features.
    pub flags: SyntaxFlags,
}

/// Built-in language definitions.
pub static SYNTAXES: &[Syntax] = &[
    Syntax {
        name: "c",
        file_match: &[".c", ".h", ".cpp"],
        keywords: &[
            "switch", "if", "while", "for", "break", "continue", "return", "else", "struct",
            "union", "typedef", "static", "enum", "class", "case",
        ],
        types: &[
            "int", "long", "double", "float", "char", "unsigned", "signed", "void",
        ],
        line_comment: Some("//"),
        block_comment_start: &["/*"],
        block_comment_end: Some("*/"),
        flags: SyntaxFlags::NUMBERS.union(SyntaxFlags::STRINGS),
    },
    Syntax {
        name: "rust",
        file_match: &[".rs"],
        keywords: &[
            "fn", "let", "mut", "pub", "if", "else", "match", "loop", "while", "for", "break",
            "continue", "return", "impl", "struct", "enum", "trait", "mod", "use", "const",
            "static", "ref", "move", "unsafe", "where", "as", "in", "dyn", "crate", "super",
            "self", "Self", "type", "async", "await", "extern",
        ],
        types: &[
            "bool", "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32", "i64", "i128",
            "isize", "f32", "f64", "char", "str", "String", "Vec", "Option", "Result", "Box",
        ],
        line_comment: Some("//"),
        block_comment_start: &["/*"],
        block_comment_end: Some("*/"),
        flags: SyntaxFlags::NUMBERS.union(SyntaxFlags::STRINGS),
    },
];

/// Pick the syntax definition matching a filename, if any.
#[must_use]
pub fn select_syntax(filename: &str) -> Option<&'static Syntax> {
    let extension = filename.rfind('.').map(|at| &filename[at..]);

    SYNTAXES.iter().find(|syntax| {
        syntax.file_match.iter().any(|pattern| {
            if pattern.starts_with('.') {
                extension == Some(pattern)
            } else {
                filename.contains(pattern)
            }
        })
    })
}
