//! Benchmarks for text measurement and line wrapping
//!
//! Run with: cargo bench layout

mod support;
use support::{make_io, make_text};

use textio::width::{ConsoleWidth, LibraryRoutines, TextIo};
use textio::wrap::{self, line_ptr, string_width, OutputFormat};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

// ============================================================================
// Width measurement
// ============================================================================

#[divan::bench(args = [80, 320, 1_000, 10_000])]
fn measure_string_width(chars: usize) {
    let io = make_io();
    let fmt = OutputFormat::graphx();
    let text = "x".repeat(chars).into_bytes();

    divan::black_box(string_width(&fmt, &io, &text, chars));
}

#[divan::bench]
fn measure_through_binding_vs_direct() {
    let io = TextIo::new(LibraryRoutines::console()).unwrap();
    let text = make_text(200);

    let bound: u32 = text.iter().map(|&ch| io.get_char_width(ch)).sum();
    let direct: u32 = text
        .iter()
        .map(|&ch| textio::width::WidthProvider::glyph_width(&ConsoleWidth, ch))
        .sum();
    divan::black_box((bound, direct));
}

// ============================================================================
// Wrapping
// ============================================================================

#[divan::bench(args = [100, 1_000, 10_000])]
fn wrap_all_lines(words: usize) {
    let io = make_io();
    let fmt = OutputFormat::graphx();
    let text = make_text(words);

    let count = wrap::lines(&fmt, &io, &text).count();
    divan::black_box(count);
}

#[divan::bench(args = [10, 50, 200])]
fn line_ptr_from_start(line: usize) {
    let io = make_io();
    let fmt = OutputFormat::graphx();
    let text = make_text(5_000);

    divan::black_box(line_ptr(&fmt, &io, &text, line));
}

#[divan::bench]
fn wrap_homescreen_console() {
    let io = TextIo::new(LibraryRoutines::console()).unwrap();
    let fmt = OutputFormat::homescreen();
    let text = make_text(1_000);

    let widths: Vec<u32> = wrap::lines(&fmt, &io, &text)
        .map(|r| wrap::line_width(&fmt, &io, &text, r.start, r.end - 1))
        .collect();
    divan::black_box(widths);
}
