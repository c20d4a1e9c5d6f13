//! Scrolling single-line text input.
//!
//! An [`InputField`] owns a fixed-capacity [`crate::buffer::TextBuffer`] plus
//! the cursor and the left edge of its scroll window. It is driven one scan
//! code at a time and never draws; the caller renders
//! [`InputField::visible_span`] and a cursor bar at [`InputField::cursor_x`].
//!
//! # Example
//!
//! ```ignore
//! use textio::input::{InputField, KeyOutcome};
//! use textio::keypad::ScanCode;
//! use textio::width::{LibraryRoutines, TextIo};
//!
//! let io = TextIo::new(LibraryRoutines::console())?;
//! let mut field = InputField::new(9, 5);
//!
//! loop {
//!     let key = wait_for_key();
//!     if field.handle_key(key, &io) == KeyOutcome::Committed {
//!         break;
//!     }
//!     draw(&field);
//! }
//! ```

mod constraints;
mod field;
mod keys;

pub use constraints::{CharFilter, InputConstraints};
pub use field::{InputField, InputState, KeyOutcome};
pub use keys::{FieldAction, InputKeys};
