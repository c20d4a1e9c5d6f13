//! Key bindings for the editing actions of an input field

use serde::{Deserialize, Serialize};

use crate::keypad::ScanCode;

/// Editing action triggered by a bound key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    Accept,
    Backspace,
    Clear,
    MoveLeft,
    MoveRight,
    SwitchKeymap,
}

/// Which scan code triggers which editing action.
///
/// Keys that are not bound here are looked up in the field's current keymap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputKeys {
    pub accept: ScanCode,
    pub backspace: ScanCode,
    pub clear: ScanCode,
    pub left: ScanCode,
    pub right: ScanCode,
    pub switch_keymap: ScanCode,
}

impl Default for InputKeys {
    fn default() -> Self {
        Self {
            accept: ScanCode::ENTER,
            backspace: ScanCode::DEL,
            clear: ScanCode::CLEAR,
            left: ScanCode::LEFT,
            right: ScanCode::RIGHT,
            switch_keymap: ScanCode::ALPHA,
        }
    }
}

impl InputKeys {
    /// Action bound to `code`, if any. The first matching binding wins.
    pub fn action(&self, code: ScanCode) -> Option<FieldAction> {
        [
            (self.accept, FieldAction::Accept),
            (self.backspace, FieldAction::Backspace),
            (self.clear, FieldAction::Clear),
            (self.left, FieldAction::MoveLeft),
            (self.right, FieldAction::MoveRight),
            (self.switch_keymap, FieldAction::SwitchKeymap),
        ]
        .into_iter()
        .find(|(key, _)| *key == code)
        .map(|(_, action)| action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let keys = InputKeys::default();
        assert_eq!(keys.action(ScanCode::ENTER), Some(FieldAction::Accept));
        assert_eq!(keys.action(ScanCode::DEL), Some(FieldAction::Backspace));
        assert_eq!(keys.action(ScanCode::ALPHA), Some(FieldAction::SwitchKeymap));
        assert_eq!(keys.action(ScanCode::MATH), None);
    }

    #[test]
    fn test_bindings_from_yaml() {
        let keys: InputKeys = serde_yaml::from_str("accept: 2nd\nclear: '0x38'\n").unwrap();
        assert_eq!(keys.accept, ScanCode::SECOND);
        assert_eq!(keys.clear, ScanCode::DEL);
        // Unlisted bindings keep their defaults
        assert_eq!(keys.left, ScanCode::LEFT);
    }
}
