//! Fixed-capacity, null-terminated text buffers.
//!
//! Two tiers of editing operations:
//!
//! - **Checked** (`insert_char`, `insert_str`, `shift_delete_char`,
//!   `shift_delete_str`): validate bounds and capacity and either apply the whole
//!   edit or leave the buffer untouched.
//! - **Unchecked** (`write_char`, `write_string`, `delete_char`,
//!   `delete_string`, `shift_left`, `shift_right`): `unsafe fn`s for hot paths
//!   whose callers already know the indices are in range.
//!
//! The first `0` byte is the only length signal. Byte `capacity` is always `0`.

use std::borrow::Cow;
use std::ptr;

use crate::width::WidthProvider;

/// Errors from checked buffer edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Edit would grow the text past the buffer capacity
    CapacityExceeded { capacity: usize, required: usize },
    /// Insertion point lies past the end of the text
    OutOfBounds { at: usize, len: usize },
    /// The terminator byte cannot be inserted as text
    NulByte,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapacityExceeded { capacity, required } => write!(
                f,
                "buffer capacity {} exceeded ({} characters required)",
                capacity, required
            ),
            Self::OutOfBounds { at, len } => {
                write!(f, "position {} is past the end of the text ({})", at, len)
            }
            Self::NulByte => write!(f, "cannot insert the terminator byte"),
        }
    }
}

impl std::error::Error for BufferError {}

/// Owned text storage of `capacity` characters plus the terminator.
#[derive(Clone, PartialEq, Eq)]
pub struct TextBuffer {
    data: Box<[u8]>,
}

impl TextBuffer {
    /// Empty buffer that can hold `capacity` characters
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity + 1].into_boxed_slice(),
        }
    }

    /// Buffer pre-filled with `text`
    pub fn with_text(capacity: usize, text: &[u8]) -> Result<Self, BufferError> {
        let mut buffer = Self::new(capacity);
        buffer.insert_str(0, text)?;
        Ok(buffer)
    }

    /// Maximum number of characters, terminator excluded
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len() - 1
    }

    /// Current text length (index of the first terminator)
    pub fn len(&self) -> usize {
        self.data
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.capacity())
    }

    pub fn is_empty(&self) -> bool {
        self.data[0] == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Character at `index`, or `0` at and past the end of the text
    #[inline]
    pub fn byte_at(&self, index: usize) -> u8 {
        let len = self.len();
        if index < len {
            self.data[index]
        } else {
            0
        }
    }

    /// Text without the terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len()]
    }

    /// Full backing storage, terminator and trailing bytes included
    pub fn raw(&self) -> &[u8] {
        &self.data
    }

    /// Text for display/logging; non-UTF-8 codes become U+FFFD
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Zero the whole buffer
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    // =========================================================================
    // Checked tier
    // =========================================================================

    /// Insert `ch` at `at`, shifting the rest of the text right by one.
    pub fn insert_char(&mut self, at: usize, ch: u8) -> Result<(), BufferError> {
        if ch == 0 {
            return Err(BufferError::NulByte);
        }
        let len = self.len();
        self.check_insert(at, len, 1)?;

        self.data.copy_within(at..len, at + 1);
        self.data[at] = ch;
        self.data[len + 1] = 0;
        Ok(())
    }

    /// Insert all of `text` at `at`, or nothing at all.
    pub fn insert_str(&mut self, at: usize, text: &[u8]) -> Result<(), BufferError> {
        if text.contains(&0) {
            return Err(BufferError::NulByte);
        }
        let len = self.len();
        let n = text.len();
        self.check_insert(at, len, n)?;
        if n == 0 {
            return Ok(());
        }

        self.data.copy_within(at..len, at + n);
        self.data[at..at + n].copy_from_slice(text);
        self.data[len + n] = 0;
        Ok(())
    }

    fn check_insert(&self, at: usize, len: usize, n: usize) -> Result<(), BufferError> {
        if at > len {
            return Err(BufferError::OutOfBounds { at, len });
        }
        if len + n > self.capacity() {
            return Err(BufferError::CapacityExceeded {
                capacity: self.capacity(),
                required: len + n,
            });
        }
        Ok(())
    }

    /// Remove the character at `at` and shift the rest left.
    ///
    /// Returns the removed glyph's width, or 0 when `at` is at or past the end.
    pub fn shift_delete_char<W: WidthProvider + ?Sized>(&mut self, at: usize, widths: &W) -> u32 {
        self.shift_delete_str(at, 1, widths)
    }

    /// Remove up to `n` characters at `at` and shift the rest left.
    ///
    /// `n` is clamped to the characters remaining after `at`. Returns the total
    /// width removed.
    pub fn shift_delete_str<W: WidthProvider + ?Sized>(
        &mut self,
        at: usize,
        n: usize,
        widths: &W,
    ) -> u32 {
        let len = self.len();
        if at >= len || n == 0 {
            return 0;
        }
        let n = n.min(len - at);
        let removed: u32 = self.data[at..at + n]
            .iter()
            .map(|&ch| widths.glyph_width(ch))
            .sum();

        // Move the tail and its terminator, then clear the vacated bytes
        self.data.copy_within(at + n..=len, at);
        self.data[len - n + 1..=len].fill(0);
        removed
    }

    // =========================================================================
    // Unchecked tier
    // =========================================================================

    /// Overwrite the byte at `at`.
    ///
    /// # Safety
    ///
    /// `at` must be `<= capacity()`. Writing a non-zero byte at `capacity()`
    /// breaks the terminator invariant.
    #[inline]
    pub unsafe fn write_char(&mut self, at: usize, ch: u8) {
        *self.data.get_unchecked_mut(at) = ch;
    }

    /// Overwrite `text.len()` bytes starting at `at`, without shifting.
    ///
    /// # Safety
    ///
    /// `at + text.len()` must be `<= capacity()`.
    #[inline]
    pub unsafe fn write_string(&mut self, at: usize, text: &[u8]) {
        ptr::copy_nonoverlapping(text.as_ptr(), self.data.as_mut_ptr().add(at), text.len());
    }

    /// Zero the byte at `at`, without shifting.
    ///
    /// # Safety
    ///
    /// `at` must be `<= capacity()`.
    #[inline]
    pub unsafe fn delete_char(&mut self, at: usize) {
        self.write_char(at, 0);
    }

    /// Zero `n` bytes starting at `at`, without shifting.
    ///
    /// # Safety
    ///
    /// `at + n` must be `<= capacity() + 1`.
    #[inline]
    pub unsafe fn delete_string(&mut self, at: usize, n: usize) {
        ptr::write_bytes(self.data.as_mut_ptr().add(at), 0, n);
    }

    /// Move the null-terminated run starting at `at` left by `distance` bytes.
    ///
    /// # Safety
    ///
    /// `distance` must be `<= at`, and a terminator must exist at or after `at`
    /// within the buffer.
    pub unsafe fn shift_left(&mut self, at: usize, distance: usize) {
        let run = self.run_len_unchecked(at);
        let base = self.data.as_mut_ptr();
        ptr::copy(base.add(at), base.add(at - distance), run + 1);
    }

    /// Move the null-terminated run starting at `at` right by `distance` bytes.
    ///
    /// The bytes in `at..at + distance` keep their old values.
    ///
    /// # Safety
    ///
    /// The run plus its terminator must still end at or before `capacity()`
    /// after moving.
    pub unsafe fn shift_right(&mut self, at: usize, distance: usize) {
        let run = self.run_len_unchecked(at);
        let base = self.data.as_mut_ptr();
        ptr::copy(base.add(at), base.add(at + distance), run + 1);
    }

    unsafe fn run_len_unchecked(&self, at: usize) -> usize {
        let base = self.data.as_ptr().add(at);
        let mut n = 0;
        while *base.add(n) != 0 {
            n += 1;
        }
        n
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("text", &self.to_string_lossy())
            .field("capacity", &self.capacity())
            .finish()
    }
}
