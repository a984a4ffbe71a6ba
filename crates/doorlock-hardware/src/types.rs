//! Common hardware types.

use doorlock_core::{Digit, LockStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scan code of the Clear key.
pub const SCAN_CODE_CLEAR: u8 = 13;

/// Scan code of the Confirm key.
pub const SCAN_CODE_CONFIRM: u8 = 15;

/// Scan code of the Cancel key.
pub const SCAN_CODE_CANCEL: u8 = 16;

/// Scan code reported for digit 0.
pub const SCAN_CODE_ZERO: u8 = 10;

/// Input from the matrix keypad.
///
/// The keypad driver reports a scan code per pressed key (0 meaning no key);
/// [`KeypadInput::from_scan_code`] maps the codes the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeypadInput {
    /// Numeric digit (0-9).
    Digit(u8),

    /// Submit the entered digits.
    Confirm,

    /// Abandon the entry.
    Cancel,

    /// Erase the entry.
    Clear,
}

impl KeypadInput {
    /// Map a matrix scan code.
    ///
    /// `1..=9` are digits 1-9, `10` is digit 0, `13` Clear, `15` Confirm,
    /// `16` Cancel. Code 0 (no key) and unassigned keys return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use doorlock_hardware::KeypadInput;
    ///
    /// assert_eq!(KeypadInput::from_scan_code(10), Some(KeypadInput::Digit(0)));
    /// assert_eq!(KeypadInput::from_scan_code(15), Some(KeypadInput::Confirm));
    /// assert_eq!(KeypadInput::from_scan_code(0), None);
    /// assert_eq!(KeypadInput::from_scan_code(11), None);
    /// ```
    pub fn from_scan_code(code: u8) -> Option<Self> {
        match code {
            1..=9 => Some(Self::Digit(code)),
            SCAN_CODE_ZERO => Some(Self::Digit(0)),
            SCAN_CODE_CLEAR => Some(Self::Clear),
            SCAN_CODE_CONFIRM => Some(Self::Confirm),
            SCAN_CODE_CANCEL => Some(Self::Cancel),
            _ => None,
        }
    }

    /// Scan code that produces this input.
    pub fn scan_code(&self) -> u8 {
        match self {
            Self::Digit(0) => SCAN_CODE_ZERO,
            Self::Digit(d) => *d,
            Self::Clear => SCAN_CODE_CLEAR,
            Self::Confirm => SCAN_CODE_CONFIRM,
            Self::Cancel => SCAN_CODE_CANCEL,
        }
    }

    /// Get the digit value if this is a digit input.
    pub fn as_digit(&self) -> Option<Digit> {
        match self {
            Self::Digit(d) => Digit::new(*d).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for KeypadInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Confirm => write!(f, "CONFIRM"),
            Self::Cancel => write!(f, "CANCEL"),
            Self::Clear => write!(f, "CLEAR"),
        }
    }
}

/// Levels of the complementary lock signal pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LockSignals {
    /// Drives the bolt out.
    pub engage: bool,

    /// Drives the bolt back.
    pub release: bool,
}

impl LockSignals {
    /// Signal levels for a lock position. Exactly one signal is high.
    pub fn for_status(status: LockStatus) -> Self {
        match status {
            LockStatus::Locked => Self {
                engage: true,
                release: false,
            },
            LockStatus::Unlocked => Self {
                engage: false,
                release: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, KeypadInput::Digit(1))]
    #[case(9, KeypadInput::Digit(9))]
    #[case(10, KeypadInput::Digit(0))]
    #[case(13, KeypadInput::Clear)]
    #[case(15, KeypadInput::Confirm)]
    #[case(16, KeypadInput::Cancel)]
    fn test_scan_code_roundtrip(#[case] code: u8, #[case] input: KeypadInput) {
        assert_eq!(KeypadInput::from_scan_code(code), Some(input));
        assert_eq!(input.scan_code(), code);
    }

    #[rstest]
    #[case(0)]
    #[case(11)]
    #[case(12)]
    #[case(14)]
    #[case(17)]
    #[case(255)]
    fn test_unassigned_scan_codes(#[case] code: u8) {
        assert_eq!(KeypadInput::from_scan_code(code), None);
    }

    #[test]
    fn test_as_digit() {
        assert_eq!(
            KeypadInput::Digit(7).as_digit().map(Digit::value),
            Some(7)
        );
        assert_eq!(KeypadInput::Confirm.as_digit(), None);
        assert_eq!(KeypadInput::Digit(12).as_digit(), None);
    }

    #[test]
    fn test_lock_signals_are_complementary() {
        for status in [LockStatus::Locked, LockStatus::Unlocked] {
            let signals = LockSignals::for_status(status);
            assert_ne!(signals.engage, signals.release);
        }
        assert!(LockSignals::for_status(LockStatus::Locked).engage);
    }

    #[test]
    fn test_keypad_input_serialization() {
        let json = serde_json::to_string(&KeypadInput::Confirm).unwrap();
        assert_eq!(json, "\"confirm\"");
    }
}
