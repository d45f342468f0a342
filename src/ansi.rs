//! Constant VT100 escape sequences and formatters.
//!
//! Only the small subset the editor emits: screen/line clearing, cursor
//! visibility and placement, inverse video, and numeric foreground colors.

/// Clear entire screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Clear from cursor to end of line.
pub const CLEAR_LINE_RIGHT: &str = "\x1b[K";

/// Move cursor to home position (1,1).
pub const CURSOR_HOME: &str = "\x1b[H";

/// Hide cursor.
pub const CURSOR_HIDE: &str = "\x1b[?25l";

/// Show cursor.
pub const CURSOR_SHOW: &str = "\x1b[?25h";

/// Enable inverse video.
pub const INVERSE_ON: &str = "\x1b[7m";

/// Reset all attributes to default.
pub const ATTR_RESET: &str = "\x1b[m";

/// Reset foreground color to the terminal default.
pub const FG_DEFAULT: &str = "\x1b[39m";

/// Push the cursor toward the bottom-right corner.
///
/// Used as a fallback when the window-size ioctl is unavailable: the
/// cursor stops at the screen edge, and a position query then reveals the
/// dimensions.
pub const CURSOR_TO_BOTTOM_RIGHT: &str = "\x1b[999C\x1b[999B";

/// Request the current cursor position (DSR 6).
///
/// The terminal replies with `ESC [ row ; col R`.
pub const QUERY_CURSOR_POSITION: &str = "\x1b[6n";

/// Generate a cursor placement sequence (1-based row and column).
#[must_use]
pub fn cursor_position(row: usize, col: usize) -> String {
    format!("\x1b[{row};{col}H")
}

/// Generate an SGR foreground color sequence for a numeric palette code.
#[must_use]
pub fn foreground(color: u8) -> String {
    format!("\x1b[{color}m")
}
