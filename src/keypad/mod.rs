//! Keypad scan codes and keymaps
//!
//! The core never reads keypad hardware. Callers hand it either a scan code
//! from the OS key scanner or a [`KeyMatrix`] snapshot of the key groups, and a
//! [`Keymap`] turns the code into a character for the active input mode.
//!
//! # Architecture
//!
//! ```text
//! KeyMatrix → ScanCode → key_to_offset() → Keymap table → character
//! ```

mod keymap;
mod types;

pub use keymap::{Keymap, THETA_PLACEHOLDER};
pub use types::{key_to_offset, KeyMatrix, ScanCode, UnknownKey, KEYMAP_LEN, MAX_SCAN_CODE};
