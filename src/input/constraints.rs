//! Input constraints for text fields.
//!
//! Constraints decide which characters a field accepts, on top of what its
//! keymaps can produce.

/// Character filter function type. Returns true if the character is allowed.
pub type CharFilter = fn(u8) -> bool;

/// Restrictions applied to every character inserted into a field.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputConstraints {
    /// Filter for every character (None = all characters allowed)
    pub char_filter: Option<CharFilter>,

    /// Extra filter for the character that would become the first one
    pub leading_filter: Option<CharFilter>,
}

impl InputConstraints {
    /// No restrictions
    pub fn any() -> Self {
        Self::default()
    }

    /// Numbers: digits, decimal point and minus sign
    pub fn numeric() -> Self {
        Self {
            char_filter: Some(|c| c.is_ascii_digit() || c == b'.' || c == b'-'),
            leading_filter: None,
        }
    }

    /// Program and appvar names: must not start with a digit
    pub fn program_name() -> Self {
        Self {
            char_filter: None,
            leading_filter: Some(|c| !c.is_ascii_digit()),
        }
    }

    /// Check if `ch` may be inserted at index `at`
    pub fn is_char_allowed(&self, ch: u8, at: usize) -> bool {
        if let Some(filter) = self.char_filter {
            if !filter(ch) {
                return false;
            }
        }
        match self.leading_filter {
            Some(filter) if at == 0 => filter(ch),
            _ => true,
        }
    }
}
