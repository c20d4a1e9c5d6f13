//! Keymap tables translating scan codes into characters

use super::types::{key_to_offset, ScanCode, KEYMAP_LEN};

/// Glyph the stock fonts use in place of θ
pub const THETA_PLACEHOLDER: u8 = b'[';

const fn table(entries: &[(ScanCode, u8)]) -> [u8; KEYMAP_LEN] {
    let mut chars = [0u8; KEYMAP_LEN];
    let mut i = 0;
    while i < entries.len() {
        chars[entries[i].0 .0 as usize] = entries[i].1;
        i += 1;
    }
    chars
}

/// Alpha-mode letter positions (shared by the upper- and lowercase maps)
const LETTERS: [(ScanCode, u8); 26] = [
    (ScanCode::MATH, b'A'),
    (ScanCode::APPS, b'B'),
    (ScanCode::PRGM, b'C'),
    (ScanCode::RECIP, b'D'),
    (ScanCode::SIN, b'E'),
    (ScanCode::COS, b'F'),
    (ScanCode::TAN, b'G'),
    (ScanCode::POWER, b'H'),
    (ScanCode::SQUARE, b'I'),
    (ScanCode::COMMA, b'J'),
    (ScanCode::LPAREN, b'K'),
    (ScanCode::RPAREN, b'L'),
    (ScanCode::DIV, b'M'),
    (ScanCode::LOG, b'N'),
    (ScanCode::KEY_7, b'O'),
    (ScanCode::KEY_8, b'P'),
    (ScanCode::KEY_9, b'Q'),
    (ScanCode::MUL, b'R'),
    (ScanCode::LN, b'S'),
    (ScanCode::KEY_4, b'T'),
    (ScanCode::KEY_5, b'U'),
    (ScanCode::KEY_6, b'V'),
    (ScanCode::SUB, b'W'),
    (ScanCode::STORE, b'X'),
    (ScanCode::KEY_1, b'Y'),
    (ScanCode::KEY_2, b'Z'),
];

/// Alpha-mode punctuation
const ALPHA_PUNCTUATION: [(ScanCode, u8); 4] = [
    (ScanCode::ADD, b'"'),
    (ScanCode::CHS, b'?'),
    (ScanCode::DEC_PNT, b':'),
    (ScanCode::KEY_0, b' '),
];

const DIGITS: [(ScanCode, u8); 20] = [
    (ScanCode::KEY_0, b'0'),
    (ScanCode::KEY_1, b'1'),
    (ScanCode::KEY_2, b'2'),
    (ScanCode::KEY_3, b'3'),
    (ScanCode::KEY_4, b'4'),
    (ScanCode::KEY_5, b'5'),
    (ScanCode::KEY_6, b'6'),
    (ScanCode::KEY_7, b'7'),
    (ScanCode::KEY_8, b'8'),
    (ScanCode::KEY_9, b'9'),
    (ScanCode::DEC_PNT, b'.'),
    (ScanCode::CHS, b'-'),
    (ScanCode::ADD, b'+'),
    (ScanCode::SUB, b'-'),
    (ScanCode::MUL, b'*'),
    (ScanCode::DIV, b'/'),
    (ScanCode::POWER, b'^'),
    (ScanCode::LPAREN, b'('),
    (ScanCode::RPAREN, b')'),
    (ScanCode::COMMA, b','),
];

/// One input mode: 64 characters indexed by scan code, plus the glyph shown
/// while the mode is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    chars: [u8; KEYMAP_LEN],
    indicator: u8,
}

impl Keymap {
    /// Build from a raw table; `0` entries mean "no character"
    pub const fn new(chars: [u8; KEYMAP_LEN], indicator: u8) -> Self {
        Self { chars, indicator }
    }

    /// Uppercase letters and alpha punctuation; θ at the 3 key
    pub fn uppercase() -> Self {
        let mut chars = table(&LETTERS);
        for (code, ch) in ALPHA_PUNCTUATION {
            chars[code.0 as usize] = ch;
        }
        chars[ScanCode::KEY_3.0 as usize] = THETA_PLACEHOLDER;
        Self::new(chars, b'A')
    }

    /// Lowercase letters and alpha punctuation
    pub fn lowercase() -> Self {
        let mut chars = table(&LETTERS);
        for ch in chars.iter_mut() {
            *ch = ch.to_ascii_lowercase();
        }
        for (code, ch) in ALPHA_PUNCTUATION {
            chars[code.0 as usize] = ch;
        }
        Self::new(chars, b'a')
    }

    /// Digits and arithmetic symbols
    pub fn numeric() -> Self {
        Self::new(table(&DIGITS), b'1')
    }

    /// Letters valid in program and appvar names, with `theta` for θ
    pub fn program_name_letters(theta: u8) -> Self {
        let mut chars = table(&LETTERS);
        chars[ScanCode::KEY_3.0 as usize] = theta;
        Self::new(chars, b'A')
    }

    /// Digits only
    pub fn program_name_digits() -> Self {
        Self::new(table(&DIGITS[..10]), b'1')
    }

    /// Character mapped to `code`, if any
    pub fn char_for(&self, code: ScanCode) -> Option<u8> {
        let offset = key_to_offset(code)?;
        match self.chars[offset] {
            0 => None,
            ch => Some(ch),
        }
    }

    /// Glyph to display while this keymap is active
    pub fn indicator(&self) -> u8 {
        self.indicator
    }

    pub fn table(&self) -> &[u8; KEYMAP_LEN] {
        &self.chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Letters keymap as laid out in the OS key scanner documentation
    const REFERENCE_LETTERS: &[u8; 56] =
        b"\0\0\0\0\0\0\0\0\0\0\"WRMH\0\0?[VQLG\0\0:ZUPKFC\0 YTOJEB\0\0XSNIDA\0\0\0\0\0\0\0\0";

    #[test]
    fn test_uppercase_matches_reference_layout() {
        let keymap = Keymap::uppercase();
        assert_eq!(&keymap.table()[..56], &REFERENCE_LETTERS[..]);
        assert!(keymap.table()[56..].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_char_for() {
        let keymap = Keymap::uppercase();
        assert_eq!(keymap.char_for(ScanCode::MATH), Some(b'A'));
        assert_eq!(keymap.char_for(ScanCode::ENTER), None);
        assert_eq!(keymap.char_for(ScanCode::NONE), None);
        assert_eq!(keymap.char_for(ScanCode(0xEE)), None);

        assert_eq!(Keymap::lowercase().char_for(ScanCode::STORE), Some(b'x'));
        assert_eq!(Keymap::numeric().char_for(ScanCode::KEY_7), Some(b'7'));
    }

    #[test]
    fn test_program_name_letters_use_theta() {
        let keymap = Keymap::program_name_letters(255);
        assert_eq!(keymap.char_for(ScanCode::KEY_3), Some(255));
        assert_eq!(keymap.char_for(ScanCode::KEY_0), None);
        assert_eq!(Keymap::program_name_digits().char_for(ScanCode::ADD), None);
    }
}
