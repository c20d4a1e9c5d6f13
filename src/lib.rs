//! textio - text layout and keypad input for small fixed-font displays
//!
//! This crate measures, wraps and aligns single-byte text against a swappable
//! glyph width backend, and drives a scrolling single-line input field from
//! calculator keypad scan codes. It never draws: callers receive widths,
//! indices and x positions and render them however they like.

pub mod buffer;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod input;
pub mod keypad;
pub mod tracing;
pub mod width;
pub mod wrap;

// Re-export commonly used types
pub use buffer::{BufferError, TextBuffer};
pub use config::TextIoConfig;
pub use input::{InputField, KeyOutcome};
pub use keypad::{Keymap, ScanCode};
pub use width::{LibraryRoutines, RoutinesError, TextIo, WidthProvider};
pub use wrap::{OutputFormat, PrintFormat};
