//! `tilde` - a row-based terminal text editor.
//!
//! The crate owns the in-memory document, converts raw keystrokes into
//! edits, re-renders the visible viewport after every edit, and classifies
//! text for syntax coloring. Terminal raw mode and file persistence are
//! reached through small capability traits so the core stays testable
//! without a TTY.

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios FFI)
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow Document::DocumentRow etc
#![allow(clippy::missing_errors_doc)] // Errors are plain I/O propagation
#![allow(clippy::missing_panics_doc)] // No panicking public paths outside tests
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod ansi;
pub mod document;
pub mod editor;
pub mod error;
pub mod highlight;
pub mod input;
pub mod storage;
pub mod terminal;

// Re-export core types at crate root
pub use document::{Document, Row, TAB_STOP};
pub use editor::Editor;
pub use error::{Error, Result};
pub use highlight::{Highlight, Syntax, SyntaxFlags, select_syntax};
pub use input::{Key, read_key};
pub use storage::{DiskStore, FileStore};
pub use terminal::{Console, RawModeGuard, TtyConsole, enable_raw_mode, is_tty, terminal_size};
