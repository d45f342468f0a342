//! Binary entry point: raw mode setup, terminal sizing, and the
//! top-level error path.

use std::env;
use std::io;
use std::process::ExitCode;

use tilde::{Console, DiskStore, Editor, Error, TtyConsole, ansi, enable_raw_mode, is_tty};

fn run() -> tilde::Result<()> {
    let _guard = enable_raw_mode()?;

    let mut console = TtyConsole::new();
    let mut store = DiskStore;
    let (rows, cols) = console.size().map_err(Error::TerminalSize)?;
    let mut editor = Editor::new(rows, cols);

    if let Some(path) = env::args().nth(1) {
        editor.open(&mut store, &path)?;
    }
    editor.set_status_message("HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find");

    editor.run(&mut console, &mut store)
}

fn main() -> ExitCode {
    // Raw mode on a pipe would leave the editor reading nothing forever
    if !is_tty(&io::stdin()) || !is_tty(&io::stdout()) {
        eprintln!("tilde: standard input and output must be a terminal");
        return ExitCode::FAILURE;
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Raw mode is restored by the guard before we get here.
            print!("{}{}", ansi::CLEAR_SCREEN, ansi::CURSOR_HOME);
            eprintln!("tilde: {err}");
            ExitCode::FAILURE
        }
    }
}
