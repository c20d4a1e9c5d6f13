//! InputField - a scrolling single-line text input driven by scan codes.

use std::ops::Range;

use crate::buffer::TextBuffer;
use crate::keypad::{Keymap, ScanCode};
use crate::width::WidthProvider;
use crate::wrap::{char_width, string_width, OutputFormat};

use super::constraints::InputConstraints;
use super::keys::{FieldAction, InputKeys};

/// Lifecycle of an input field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputState {
    /// Waiting for the next key
    #[default]
    Idle,
    /// Applying a mutation and repairing the scroll window
    Editing,
    /// The accept key was pressed; the buffer holds the final value
    Committed,
}

/// What a key press did to the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Character inserted at the old cursor position
    Inserted(u8),
    /// Key mapped to a character but the buffer was full or the character rejected
    Dropped,
    /// Character before the cursor removed
    Deleted,
    Cleared,
    Moved,
    /// Active keymap changed; `indicator` is the new mode glyph
    KeymapSwitched { index: usize, indicator: u8 },
    Committed,
    /// Key had no effect
    Ignored,
}

/// Scrollable single-line text field.
///
/// Owns its buffer. `first_visible` and `cursor` are indices into it with
/// `first_visible <= cursor <= len`, and the text between them never measures
/// wider than `visible_width` once an operation returns.
#[derive(Debug, Clone)]
pub struct InputField {
    buffer: TextBuffer,
    cursor: usize,
    first_visible: usize,
    visible_width: u32,
    format: OutputFormat,
    keymaps: Vec<Keymap>,
    current_keymap: usize,
    keys: InputKeys,
    constraints: InputConstraints,
    origin: (u32, u32),
    state: InputState,
}

impl InputField {
    /// Empty field holding up to `capacity` characters, `visible_width` pixels wide
    pub fn new(capacity: usize, visible_width: u32) -> Self {
        Self::with_buffer(TextBuffer::new(capacity), visible_width)
    }

    /// Field over an existing buffer. The cursor starts at the beginning.
    pub fn with_buffer(buffer: TextBuffer, visible_width: u32) -> Self {
        Self {
            buffer,
            cursor: 0,
            first_visible: 0,
            visible_width,
            format: OutputFormat::default(),
            keymaps: vec![Keymap::uppercase()],
            current_keymap: 0,
            keys: InputKeys::default(),
            constraints: InputConstraints::any(),
            origin: (0, 0),
            state: InputState::Idle,
        }
    }

    /// Program/appvar name entry: 8 characters, letters then digits, θ as
    /// `theta`, no leading digit
    pub fn program_name(theta: u8, visible_width: u32) -> Self {
        Self::new(8, visible_width)
            .with_keymaps(vec![
                Keymap::program_name_letters(theta),
                Keymap::program_name_digits(),
            ])
            .with_constraints(InputConstraints::program_name())
    }

    /// Replace the keymap set. An empty set is ignored.
    pub fn with_keymaps(mut self, keymaps: Vec<Keymap>) -> Self {
        if keymaps.is_empty() {
            tracing::warn!("Ignoring empty keymap set");
            return self;
        }
        self.keymaps = keymaps;
        self.current_keymap = 0;
        self
    }

    pub fn with_keys(mut self, keys: InputKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_constraints(mut self, constraints: InputConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Output format used for measuring (tab width, newline)
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Screen position of the field's left edge and baseline row
    pub fn with_origin(mut self, x: u32, y: u32) -> Self {
        self.origin = (x, y);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn text(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn first_visible(&self) -> usize {
        self.first_visible
    }

    pub fn visible_width(&self) -> u32 {
        self.visible_width
    }

    pub fn origin(&self) -> (u32, u32) {
        self.origin
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    pub fn is_committed(&self) -> bool {
        self.state == InputState::Committed
    }

    pub fn keymap_count(&self) -> usize {
        self.keymaps.len()
    }

    pub fn current_keymap(&self) -> usize {
        self.current_keymap
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymaps[self.current_keymap]
    }

    /// Mode glyph of the active keymap
    pub fn indicator(&self) -> u8 {
        self.keymap().indicator()
    }

    /// Width of the text between the scroll window's left edge and the cursor
    pub fn window_width<W: WidthProvider + ?Sized>(&self, widths: &W) -> u32 {
        self.span_width(widths, self.first_visible, self.cursor)
    }

    /// Absolute x of the cursor bar
    pub fn cursor_x<W: WidthProvider + ?Sized>(&self, widths: &W) -> u32 {
        self.origin.0 + self.window_width(widths)
    }

    /// Characters that fit in the window, starting at `first_visible`
    pub fn visible_span<W: WidthProvider + ?Sized>(&self, widths: &W) -> Range<usize> {
        let text = self.buffer.as_bytes();
        let mut total = 0u32;
        let mut end = self.first_visible;
        while end < text.len() {
            let w = char_width(&self.format, widths, text[end]);
            if total + w > self.visible_width {
                break;
            }
            total += w;
            end += 1;
        }
        self.first_visible..end
    }

    fn span_width<W: WidthProvider + ?Sized>(&self, widths: &W, start: usize, end: usize) -> u32 {
        let text = self.buffer.as_bytes();
        string_width(&self.format, widths, &text[start..], end - start)
    }

    // =========================================================================
    // Key handling
    // =========================================================================

    /// Apply one key press.
    ///
    /// Bound keys run their editing action; any other key is looked up in the
    /// current keymap and inserted at the cursor. Committed fields ignore keys.
    pub fn handle_key<W: WidthProvider + ?Sized>(
        &mut self,
        code: ScanCode,
        widths: &W,
    ) -> KeyOutcome {
        if self.is_committed() {
            return KeyOutcome::Ignored;
        }

        match self.keys.action(code) {
            Some(FieldAction::Accept) => {
                self.commit();
                KeyOutcome::Committed
            }
            Some(FieldAction::Backspace) => {
                if self.backspace(widths) {
                    KeyOutcome::Deleted
                } else {
                    KeyOutcome::Ignored
                }
            }
            Some(FieldAction::Clear) => {
                self.clear();
                KeyOutcome::Cleared
            }
            Some(FieldAction::MoveLeft) => {
                if self.move_left(widths) {
                    KeyOutcome::Moved
                } else {
                    KeyOutcome::Ignored
                }
            }
            Some(FieldAction::MoveRight) => {
                if self.move_right(widths) {
                    KeyOutcome::Moved
                } else {
                    KeyOutcome::Ignored
                }
            }
            Some(FieldAction::SwitchKeymap) => {
                let indicator = self.switch_keymap();
                KeyOutcome::KeymapSwitched {
                    index: self.current_keymap,
                    indicator,
                }
            }
            None => match self.keymap().char_for(code) {
                Some(ch) => {
                    if self.insert_char(ch, widths) {
                        KeyOutcome::Inserted(ch)
                    } else {
                        KeyOutcome::Dropped
                    }
                }
                None => KeyOutcome::Ignored,
            },
        }
    }

    /// Insert `ch` at the cursor and advance past it.
    ///
    /// Returns false, leaving the field unchanged, when the buffer is full or
    /// the constraints reject the character.
    pub fn insert_char<W: WidthProvider + ?Sized>(&mut self, ch: u8, widths: &W) -> bool {
        if !self.constraints.is_char_allowed(ch, self.cursor) {
            tracing::trace!(ch, at = self.cursor, "Character rejected by constraints");
            return false;
        }

        self.state = InputState::Editing;
        let inserted = match self.buffer.insert_char(self.cursor, ch) {
            Ok(()) => {
                self.cursor += 1;
                true
            }
            Err(e) => {
                tracing::trace!(ch, "Dropped key: {}", e);
                false
            }
        };
        self.repair_scroll(widths);
        inserted
    }

    /// Delete the character before the cursor.
    ///
    /// Refused when it would move a character the leading filter rejects to
    /// the front, e.g. a digit in a program name.
    pub fn backspace<W: WidthProvider + ?Sized>(&mut self, widths: &W) -> bool {
        if self.cursor == 0 {
            return false;
        }
        if self.cursor == 1 {
            let next = self.buffer.byte_at(1);
            if next != 0 && !self.constraints.is_char_allowed(next, 0) {
                tracing::trace!(
                    ch = next,
                    "Backspace would expose a rejected leading character"
                );
                return false;
            }
        }

        self.state = InputState::Editing;
        // Keep the deleted character's predecessor in view
        if self.cursor == self.first_visible + 1 && self.first_visible > 0 {
            self.first_visible -= 1;
        }
        self.cursor -= 1;
        self.buffer.shift_delete_char(self.cursor, widths);
        self.repair_scroll(widths);
        true
    }

    /// Erase everything and reset the cursor and scroll window
    pub fn clear(&mut self) {
        self.state = InputState::Editing;
        let capacity = self.buffer.capacity();
        // SAFETY: zeroing `capacity` bytes from 0 stays inside the
        // `capacity + 1` byte storage and leaves the terminator in place
        unsafe { self.buffer.delete_string(0, capacity) };
        self.cursor = 0;
        self.first_visible = 0;
        self.state = InputState::Idle;
    }

    /// Move the cursor one character left
    pub fn move_left<W: WidthProvider + ?Sized>(&mut self, widths: &W) -> bool {
        if self.cursor == 0 {
            return false;
        }

        self.state = InputState::Editing;
        if self.cursor == self.first_visible + 1 && self.first_visible > 0 {
            self.first_visible -= 1;
        }
        self.cursor -= 1;
        self.repair_scroll(widths);
        true
    }

    /// Move the cursor one character right
    pub fn move_right<W: WidthProvider + ?Sized>(&mut self, widths: &W) -> bool {
        if self.buffer.byte_at(self.cursor) == 0 {
            return false;
        }

        self.state = InputState::Editing;
        self.cursor += 1;
        // Also keep the character under the cursor in view
        if self.span_width(widths, self.first_visible, self.cursor + 1) > self.visible_width {
            self.first_visible += 1;
        }
        self.repair_scroll(widths);
        true
    }

    /// Jump to the end of the text
    pub fn move_to_end<W: WidthProvider + ?Sized>(&mut self, widths: &W) {
        self.state = InputState::Editing;
        self.cursor = self.buffer.len();
        self.repair_scroll(widths);
    }

    /// Jump to the start of the text
    pub fn move_to_start(&mut self) {
        self.cursor = 0;
        self.first_visible = 0;
    }

    /// Activate the next keymap, wrapping around. Returns its indicator.
    pub fn switch_keymap(&mut self) -> u8 {
        self.current_keymap = (self.current_keymap + 1) % self.keymaps.len();
        tracing::trace!(index = self.current_keymap, "Switched keymap");
        self.indicator()
    }

    /// Finish input
    pub fn commit(&mut self) {
        tracing::debug!(text = %self.buffer.to_string_lossy(), "Input committed");
        self.state = InputState::Committed;
    }

    /// Resize the window and restore the scroll invariant
    pub fn set_visible_width<W: WidthProvider + ?Sized>(
        &mut self,
        visible_width: u32,
        widths: &W,
    ) {
        self.visible_width = visible_width;
        self.repair_scroll(widths);
    }

    /// Slide the window right, one character at a time, until the text up to
    /// the cursor fits.
    fn repair_scroll<W: WidthProvider + ?Sized>(&mut self, widths: &W) {
        self.first_visible = self.first_visible.min(self.cursor);
        while self.window_width(widths) > self.visible_width {
            self.first_visible += 1;
        }
        if self.state == InputState::Editing {
            self.state = InputState::Idle;
        }
    }
}
