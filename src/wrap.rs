//! Line wrapping and width measurement.
//!
//! Pure functions over an [`OutputFormat`], a [`WidthProvider`] and read-only
//! text. Text ends at the first `0` byte or at the end of the slice, whichever
//! comes first.
//!
//! The engine only measures. Drawing code asks for line starts with
//! [`line_ptr`] (or iterates [`lines`]), measures each line with
//! [`line_width`], and positions it with [`PrintFormat::line_x`].

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::width::WidthProvider;

/// Horizontal resolution of the calculator LCD
pub const LCD_WIDTH: u32 = 320;

/// Character columns of the OS home screen
pub const HOMESCREEN_COLUMNS: u32 = 26;

/// Horizontal alignment of wrapped lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintFormat {
    #[default]
    LeftMarginFlush,
    Centered,
    RightMarginFlush,
}

impl PrintFormat {
    /// X position of a line `line_width` wide, for text starting at `x0` in a
    /// window `max_line_width` wide.
    pub fn line_x(self, max_line_width: u32, x0: u32, line_width: u32) -> u32 {
        match self {
            Self::LeftMarginFlush => x0,
            Self::RightMarginFlush => max_line_width.saturating_sub(x0 + line_width),
            Self::Centered => max_line_width.saturating_sub(x0 + line_width) / 2,
        }
    }
}

/// How text is measured and broken into lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFormat {
    /// Width of a tab in pixels
    pub tab_width: u32,
    /// Character that forces a line break
    pub newline: u8,
    pub print_format: PrintFormat,
    /// Wrap width in pixels
    pub max_line_width: u32,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::graphx()
    }
}

impl OutputFormat {
    /// Defaults for the graphics library
    pub const fn graphx() -> Self {
        Self {
            tab_width: 12,
            newline: b'\n',
            print_format: PrintFormat::LeftMarginFlush,
            max_line_width: LCD_WIDTH,
        }
    }

    /// Defaults for the font library
    pub const fn fontlib() -> Self {
        Self::graphx()
    }

    /// Defaults for the OS home screen (widths in character cells)
    pub const fn homescreen() -> Self {
        Self {
            tab_width: 4,
            newline: b'\n',
            print_format: PrintFormat::LeftMarginFlush,
            max_line_width: HOMESCREEN_COLUMNS,
        }
    }

    pub fn with_max_line_width(mut self, max_line_width: u32) -> Self {
        self.max_line_width = max_line_width;
        self
    }

    pub fn with_print_format(mut self, print_format: PrintFormat) -> Self {
        self.print_format = print_format;
        self
    }

    /// X position of a line measured under this format
    pub fn line_x(&self, x0: u32, line_width: u32) -> u32 {
        self.print_format.line_x(self.max_line_width, x0, line_width)
    }
}

/// Index of the terminator (or slice end)
#[inline]
pub fn text_end(text: &[u8]) -> usize {
    text.iter().position(|&b| b == 0).unwrap_or(text.len())
}

#[inline]
fn is_word_boundary(ch: u8) -> bool {
    ch == b' ' || ch == b'\t'
}

/// Width of one character: tabs use the format's tab width, the newline is 0.
#[inline]
pub fn char_width<W: WidthProvider + ?Sized>(fmt: &OutputFormat, widths: &W, ch: u8) -> u32 {
    if ch == b'\t' {
        fmt.tab_width
    } else if ch == fmt.newline {
        0
    } else {
        widths.glyph_width(ch)
    }
}

/// Width of the first `n` characters of `text`.
pub fn string_width<W: WidthProvider + ?Sized>(
    fmt: &OutputFormat,
    widths: &W,
    text: &[u8],
    n: usize,
) -> u32 {
    let end = text_end(text).min(n);
    text[..end]
        .iter()
        .map(|&ch| char_width(fmt, widths, ch))
        .sum()
}

/// Width of `text[start..=eol]`.
///
/// `eol` is the last character that counts, not one past it. Both ends are
/// clamped to the text; an empty range measures 0.
pub fn line_width<W: WidthProvider + ?Sized>(
    fmt: &OutputFormat,
    widths: &W,
    text: &[u8],
    start: usize,
    eol: usize,
) -> u32 {
    let end = text_end(text);
    if start >= end || eol < start {
        return 0;
    }
    let last = eol.min(end - 1);
    text[start..=last]
        .iter()
        .map(|&ch| char_width(fmt, widths, ch))
        .sum()
}

/// Start of the line following the one that starts at `start`.
fn next_line_start<W: WidthProvider + ?Sized>(
    fmt: &OutputFormat,
    widths: &W,
    text: &[u8],
    start: usize,
    end: usize,
) -> usize {
    let mut width = 0u32;
    let mut last_boundary = None;

    for i in start..end {
        let ch = text[i];
        if ch == fmt.newline {
            return i + 1;
        }

        let w = char_width(fmt, widths, ch);
        // The first character of a line is always taken so a glyph wider
        // than the window cannot stall the wrap
        if i > start && width + w > fmt.max_line_width {
            // A space or tab that overflows hangs at the end of the line it
            // closes, so line_width over the whole range can exceed the limit
            if is_word_boundary(ch) {
                return i + 1;
            }
            return match last_boundary {
                Some(boundary) => boundary + 1,
                None => i,
            };
        }

        width += w;
        if is_word_boundary(ch) {
            last_boundary = Some(i);
        }
    }

    end
}

/// Index of the first character of wrapped line `line` (0-based).
///
/// Returns 0, the start of `text`, when `line` lies past the last line. For
/// text that fits on one line, `line_ptr(.., 1)` is the end of the text, and a
/// second call from there returns its own start, which is how printing loops
/// detect they are done.
pub fn line_ptr<W: WidthProvider + ?Sized>(
    fmt: &OutputFormat,
    widths: &W,
    text: &[u8],
    line: usize,
) -> usize {
    let end = text_end(text);
    let mut pos = 0;
    for _ in 0..line {
        if pos >= end {
            return 0;
        }
        pos = next_line_start(fmt, widths, text, pos, end);
    }
    pos
}

/// Iterator over the wrapped lines of a text
#[derive(Debug, Clone)]
pub struct Lines<'a, W: WidthProvider + ?Sized> {
    fmt: OutputFormat,
    widths: &'a W,
    text: &'a [u8],
    pos: usize,
    end: usize,
}

impl<W: WidthProvider + ?Sized> Iterator for Lines<'_, W> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }
        let start = self.pos;
        self.pos = next_line_start(&self.fmt, self.widths, self.text, start, self.end);
        Some(start..self.pos)
    }
}

/// Wrapped lines of `text` as index ranges.
///
/// Each range includes the line's trailing newline or break space, if any.
pub fn lines<'a, W: WidthProvider + ?Sized>(
    fmt: &OutputFormat,
    widths: &'a W,
    text: &'a [u8],
) -> Lines<'a, W> {
    Lines {
        fmt: *fmt,
        widths,
        text,
        pos: 0,
        end: text_end(text),
    }
}
