//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use textio::input::InputField;
use textio::keypad::{Keymap, ScanCode};
use textio::width::{BitmapFontWidth, LibraryRoutines, TextIo};
use textio::wrap::OutputFormat;

/// Binding where every glyph is `width` pixels wide
pub fn monospace_io(width: u8) -> TextIo {
    TextIo::new(LibraryRoutines::bitmap(BitmapFontWidth::monospace(width)))
        .expect("bitmap routines are compatible")
}

/// Console binding: one cell per character
pub fn console_io() -> TextIo {
    TextIo::new(LibraryRoutines::console()).expect("console routines are compatible")
}

/// Graphics format with the given line width
pub fn format(max_line_width: u32) -> OutputFormat {
    OutputFormat::graphx().with_max_line_width(max_line_width)
}

/// Field with the uppercase, lowercase and numeric keymaps
pub fn three_mode_field(capacity: usize, visible_width: u32) -> InputField {
    InputField::new(capacity, visible_width).with_keymaps(vec![
        Keymap::uppercase(),
        Keymap::lowercase(),
        Keymap::numeric(),
    ])
}

/// Deterministic xorshift sequence of scan codes, including codes outside
/// the keypad range
pub fn pseudo_random_keys(seed: u64, count: usize) -> Vec<ScanCode> {
    let mut state = seed.max(1);
    (0..count)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            ScanCode((state % 0x40) as u8)
        })
        .collect()
}

/// Collect wrapped lines as strings
pub fn wrapped(fmt: &OutputFormat, io: &TextIo, text: &[u8]) -> Vec<String> {
    textio::wrap::lines(fmt, io, text)
        .map(|r| String::from_utf8_lossy(&text[r]).into_owned())
        .collect()
}
