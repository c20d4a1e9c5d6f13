//! Core keypad types: ScanCode and KeyMatrix

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of entries in every keymap table
pub const KEYMAP_LEN: usize = 64;

/// Highest scan code the keypad produces
pub const MAX_SCAN_CODE: u8 = 0x38;

/// A raw keypad scan code, as returned by the OS key scanner.
///
/// Codes run from 1 to 0x38; 0 means "no key".
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ScanCode(pub u8);

impl ScanCode {
    pub const NONE: ScanCode = ScanCode(0x00);
    pub const DOWN: ScanCode = ScanCode(0x01);
    pub const LEFT: ScanCode = ScanCode(0x02);
    pub const RIGHT: ScanCode = ScanCode(0x03);
    pub const UP: ScanCode = ScanCode(0x04);
    pub const ENTER: ScanCode = ScanCode(0x09);
    pub const ADD: ScanCode = ScanCode(0x0A);
    pub const SUB: ScanCode = ScanCode(0x0B);
    pub const MUL: ScanCode = ScanCode(0x0C);
    pub const DIV: ScanCode = ScanCode(0x0D);
    pub const POWER: ScanCode = ScanCode(0x0E);
    pub const CLEAR: ScanCode = ScanCode(0x0F);
    pub const CHS: ScanCode = ScanCode(0x11);
    pub const KEY_3: ScanCode = ScanCode(0x12);
    pub const KEY_6: ScanCode = ScanCode(0x13);
    pub const KEY_9: ScanCode = ScanCode(0x14);
    pub const RPAREN: ScanCode = ScanCode(0x15);
    pub const TAN: ScanCode = ScanCode(0x16);
    pub const VARS: ScanCode = ScanCode(0x17);
    pub const DEC_PNT: ScanCode = ScanCode(0x19);
    pub const KEY_2: ScanCode = ScanCode(0x1A);
    pub const KEY_5: ScanCode = ScanCode(0x1B);
    pub const KEY_8: ScanCode = ScanCode(0x1C);
    pub const LPAREN: ScanCode = ScanCode(0x1D);
    pub const COS: ScanCode = ScanCode(0x1E);
    pub const PRGM: ScanCode = ScanCode(0x1F);
    pub const STAT: ScanCode = ScanCode(0x20);
    pub const KEY_0: ScanCode = ScanCode(0x21);
    pub const KEY_1: ScanCode = ScanCode(0x22);
    pub const KEY_4: ScanCode = ScanCode(0x23);
    pub const KEY_7: ScanCode = ScanCode(0x24);
    pub const COMMA: ScanCode = ScanCode(0x25);
    pub const SIN: ScanCode = ScanCode(0x26);
    pub const APPS: ScanCode = ScanCode(0x27);
    pub const GRAPH_VAR: ScanCode = ScanCode(0x28);
    pub const STORE: ScanCode = ScanCode(0x2A);
    pub const LN: ScanCode = ScanCode(0x2B);
    pub const LOG: ScanCode = ScanCode(0x2C);
    pub const SQUARE: ScanCode = ScanCode(0x2D);
    pub const RECIP: ScanCode = ScanCode(0x2E);
    pub const MATH: ScanCode = ScanCode(0x2F);
    pub const ALPHA: ScanCode = ScanCode(0x30);
    pub const GRAPH: ScanCode = ScanCode(0x31);
    pub const TRACE: ScanCode = ScanCode(0x32);
    pub const ZOOM: ScanCode = ScanCode(0x33);
    pub const WINDOW: ScanCode = ScanCode(0x34);
    pub const YEQU: ScanCode = ScanCode(0x35);
    pub const SECOND: ScanCode = ScanCode(0x36);
    pub const MODE: ScanCode = ScanCode(0x37);
    pub const DEL: ScanCode = ScanCode(0x38);

    /// Named keys, used for parsing and display
    const NAMES: &'static [(&'static str, ScanCode)] = &[
        ("down", Self::DOWN),
        ("left", Self::LEFT),
        ("right", Self::RIGHT),
        ("up", Self::UP),
        ("enter", Self::ENTER),
        ("add", Self::ADD),
        ("sub", Self::SUB),
        ("mul", Self::MUL),
        ("div", Self::DIV),
        ("power", Self::POWER),
        ("clear", Self::CLEAR),
        ("chs", Self::CHS),
        ("3", Self::KEY_3),
        ("6", Self::KEY_6),
        ("9", Self::KEY_9),
        ("rparen", Self::RPAREN),
        ("tan", Self::TAN),
        ("vars", Self::VARS),
        ("decpnt", Self::DEC_PNT),
        ("2", Self::KEY_2),
        ("5", Self::KEY_5),
        ("8", Self::KEY_8),
        ("lparen", Self::LPAREN),
        ("cos", Self::COS),
        ("prgm", Self::PRGM),
        ("stat", Self::STAT),
        ("0", Self::KEY_0),
        ("1", Self::KEY_1),
        ("4", Self::KEY_4),
        ("7", Self::KEY_7),
        ("comma", Self::COMMA),
        ("sin", Self::SIN),
        ("apps", Self::APPS),
        ("graphvar", Self::GRAPH_VAR),
        ("store", Self::STORE),
        ("ln", Self::LN),
        ("log", Self::LOG),
        ("square", Self::SQUARE),
        ("recip", Self::RECIP),
        ("math", Self::MATH),
        ("alpha", Self::ALPHA),
        ("graph", Self::GRAPH),
        ("trace", Self::TRACE),
        ("zoom", Self::ZOOM),
        ("window", Self::WINDOW),
        ("yequ", Self::YEQU),
        ("2nd", Self::SECOND),
        ("mode", Self::MODE),
        ("del", Self::DEL),
    ];

    /// Key name, if the code is a named key
    pub fn name(self) -> Option<&'static str> {
        Self::NAMES
            .iter()
            .find(|(_, code)| *code == self)
            .map(|(name, _)| *name)
    }
}

/// Convert a scan code into an index into a 64-entry keymap.
///
/// Returns `None` for codes that no keymap entry corresponds to.
#[inline]
pub fn key_to_offset(code: ScanCode) -> Option<usize> {
    match code.0 {
        1..=MAX_SCAN_CODE => Some(code.0 as usize),
        _ => None,
    }
}

/// Error for unknown key names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKey(pub String);

impl fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown key: {}", self.0)
    }
}

impl std::error::Error for UnknownKey {}

impl FromStr for ScanCode {
    type Err = UnknownKey;

    /// Parse a key name (`"enter"`, `"alpha"`, `"math"`, ...) or a hex code
    /// (`"0x2f"`). Names are case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if let Some(hex) = lower.strip_prefix("0x") {
            return u8::from_str_radix(hex, 16)
                .map(ScanCode)
                .map_err(|_| UnknownKey(s.to_string()));
        }
        Self::NAMES
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, code)| *code)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}

impl TryFrom<String> for ScanCode {
    type Error = UnknownKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScanCode> for String {
    fn from(code: ScanCode) -> Self {
        code.to_string()
    }
}

impl fmt::Display for ScanCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "0x{:02x}", self.0),
        }
    }
}

/// Snapshot of the keypad matrix: one byte per key group, one bit per key.
///
/// Group 0 is unused; groups 1 through 7 hold the keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyMatrix(pub [u8; 8]);

impl KeyMatrix {
    /// Matrix with a single key held down
    pub fn pressed(code: ScanCode) -> Self {
        let mut matrix = Self::default();
        matrix.press(code);
        matrix
    }

    /// Mark `code` as held down. Codes outside the keypad are ignored.
    pub fn press(&mut self, code: ScanCode) {
        if key_to_offset(code).is_none() {
            return;
        }
        let index = (code.0 - 1) as usize;
        let group = 7 - index / 8;
        self.0[group] |= 1 << (index % 8);
    }

    pub fn any_key(&self) -> bool {
        self.0[1..].iter().any(|&g| g != 0)
    }

    /// Scan code of the first held key, in group order
    pub fn scan_code(&self) -> Option<ScanCode> {
        (1..8).find_map(|group| {
            let bits = self.0[group];
            if bits == 0 {
                return None;
            }
            let bit = bits.trailing_zeros() as usize;
            Some(ScanCode(((7 - group) * 8 + bit + 1) as u8))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_to_offset_range() {
        assert_eq!(key_to_offset(ScanCode::MATH), Some(0x2F));
        assert_eq!(key_to_offset(ScanCode::DEL), Some(0x38));
        assert_eq!(key_to_offset(ScanCode::NONE), None);
        assert_eq!(key_to_offset(ScanCode(0x39)), None);
        assert_eq!(key_to_offset(ScanCode(0xFF)), None);
    }

    #[test]
    fn test_parse_names_and_hex() {
        assert_eq!("Enter".parse::<ScanCode>(), Ok(ScanCode::ENTER));
        assert_eq!("2nd".parse::<ScanCode>(), Ok(ScanCode::SECOND));
        assert_eq!("0x2f".parse::<ScanCode>(), Ok(ScanCode::MATH));
        assert!("hyper".parse::<ScanCode>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        assert_eq!(ScanCode::ALPHA.to_string(), "alpha");
        assert_eq!(ScanCode(0x3A).to_string(), "0x3a");
    }

    #[test]
    fn test_matrix_decodes_known_groups() {
        // Enter is group 6, bit 0; Alpha is group 2, bit 7
        let mut raw = [0u8; 8];
        raw[6] = 0b0000_0001;
        assert_eq!(KeyMatrix(raw).scan_code(), Some(ScanCode::ENTER));

        let mut raw = [0u8; 8];
        raw[2] = 0b1000_0000;
        assert_eq!(KeyMatrix(raw).scan_code(), Some(ScanCode::ALPHA));
    }

    #[test]
    fn test_matrix_press_and_decode_agree() {
        for code in 1..=MAX_SCAN_CODE {
            let matrix = KeyMatrix::pressed(ScanCode(code));
            assert!(matrix.any_key());
            assert_eq!(matrix.scan_code(), Some(ScanCode(code)));
        }
        assert_eq!(KeyMatrix::default().scan_code(), None);
    }
}
