//! Keyboard input: logical key events and the escape-sequence decoder.

mod decoder;
mod keyboard;

pub use decoder::read_key;
pub use keyboard::Key;
