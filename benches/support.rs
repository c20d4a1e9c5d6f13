//! Shared helpers for benchmarks

use textio::width::{BitmapFontWidth, LibraryRoutines, TextIo};

/// Paragraph text of roughly `words` words, null-terminated
#[allow(dead_code)]
pub fn make_text(words: usize) -> Vec<u8> {
    const WORDS: &[&str] = &[
        "The", "quick", "brown", "fox", "jumps", "over", "the", "lazy", "dog.", "Pack", "my",
        "box", "with", "five", "dozen", "liquor", "jugs.",
    ];
    let mut text = Vec::new();
    for i in 0..words {
        if i > 0 {
            text.push(if i % 40 == 0 { b'\n' } else { b' ' });
        }
        text.extend_from_slice(WORDS[i % WORDS.len()].as_bytes());
    }
    text.push(0);
    text
}

/// Proportional bitmap font resembling the stock graphics font
#[allow(dead_code)]
pub fn make_io() -> TextIo {
    let mut widths = BitmapFontWidth::monospace(8);
    for &ch in b"ijl.,:;'!| " {
        widths.set_char_width(ch, 3);
    }
    for &ch in b"mwMW" {
        widths.set_char_width(ch, 10);
    }
    TextIo::new(LibraryRoutines::bitmap(widths)).expect("Failed to install bitmap routines")
}
