//! Benchmarks for input field key handling
//!
//! Run with: cargo bench input_field

mod support;
use support::make_io;

use textio::buffer::TextBuffer;
use textio::input::InputField;
use textio::keypad::ScanCode;
use textio::width::ConsoleWidth;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

const LETTER_KEYS: [ScanCode; 8] = [
    ScanCode::MATH,
    ScanCode::APPS,
    ScanCode::PRGM,
    ScanCode::SIN,
    ScanCode::COS,
    ScanCode::TAN,
    ScanCode::LOG,
    ScanCode::LN,
];

// ============================================================================
// Typing
// ============================================================================

#[divan::bench(args = [16, 64, 255])]
fn type_until_full(capacity: usize) {
    let io = make_io();
    let mut field = InputField::new(capacity, 120);

    for i in 0..capacity {
        field.handle_key(LETTER_KEYS[i % LETTER_KEYS.len()], &io);
    }
    divan::black_box(field.cursor());
}

#[divan::bench(args = [16, 64, 255])]
fn insert_at_front(capacity: usize) {
    let io = make_io();
    let mut field = InputField::new(capacity, 120);

    for i in 0..capacity {
        field.handle_key(LETTER_KEYS[i % LETTER_KEYS.len()], &io);
        field.move_to_start();
    }
    divan::black_box(field.cursor());
}

// ============================================================================
// Scrolling
// ============================================================================

#[divan::bench(args = [64, 255])]
fn sweep_cursor_left_and_right(capacity: usize) {
    let text = vec![b'W'; capacity];
    let buffer = TextBuffer::with_text(capacity, &text).unwrap();
    let mut field = InputField::with_buffer(buffer, 26);

    for _ in 0..capacity {
        field.handle_key(ScanCode::RIGHT, &ConsoleWidth);
    }
    for _ in 0..capacity {
        field.handle_key(ScanCode::LEFT, &ConsoleWidth);
    }
    divan::black_box(field.first_visible());
}

#[divan::bench]
fn backspace_long_text() {
    let io = make_io();
    let text = vec![b'm'; 255];
    let buffer = TextBuffer::with_text(255, &text).unwrap();
    let mut field = InputField::with_buffer(buffer, 120);
    field.move_to_end(&io);

    while field.cursor() > 0 {
        field.handle_key(ScanCode::DEL, &io);
    }
    divan::black_box(field.text().len());
}
