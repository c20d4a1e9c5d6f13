//! Diagnostic tracing for layout and input debugging
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=textio::input=trace` - module-level filtering
//!
//! Output goes to stderr so that wrapped text on stdout stays clean.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::input::{InputField, InputState};
use crate::width::WidthProvider;

/// Initialize the tracing subscriber
///
/// Respects RUST_LOG, defaulting to `warn`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}

/// Lightweight snapshot of input field state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSnapshot {
    pub len: usize,
    pub cursor: usize,
    pub first_visible: usize,
    pub cursor_x: u32,
    pub keymap: usize,
    pub state: InputState,
}

impl FieldSnapshot {
    pub fn from_field<W: WidthProvider + ?Sized>(field: &InputField, widths: &W) -> Self {
        Self {
            len: field.buffer().len(),
            cursor: field.cursor(),
            first_visible: field.first_visible(),
            cursor_x: field.cursor_x(widths),
            keymap: field.current_keymap(),
            state: field.state(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &FieldSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.len != other.len {
            changes.push(format!("len: {} → {}", self.len, other.len));
        }
        if self.cursor != other.cursor {
            changes.push(format!("cursor: {} → {}", self.cursor, other.cursor));
        }
        if self.first_visible != other.first_visible {
            changes.push(format!(
                "scroll: {} → {}",
                self.first_visible, other.first_visible
            ));
        }
        if self.keymap != other.keymap {
            changes.push(format!("keymap: {} → {}", self.keymap, other.keymap));
        }
        if self.state != other.state {
            changes.push(format!("state: {:?} → {:?}", self.state, other.state));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::width::ConsoleWidth;

    #[test]
    fn test_snapshot_diff() {
        let mut field = InputField::new(9, 5);
        let before = FieldSnapshot::from_field(&field, &ConsoleWidth);
        assert_eq!(before.diff(&before), None);

        field.insert_char(b'A', &ConsoleWidth);
        let after = FieldSnapshot::from_field(&field, &ConsoleWidth);
        let diff = before.diff(&after).unwrap();
        assert!(diff.contains("len: 0 → 1"));
        assert!(diff.contains("cursor: 0 → 1"));
        assert!(!diff.contains("scroll"));
    }
}
