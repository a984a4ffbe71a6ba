use crate::{Result, constants::CREDENTIAL_LENGTH, error::Error};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single decimal digit (0-9).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digit(u8);

impl Digit {
    /// Zero digit, used to fill unused credential positions.
    pub const ZERO: Digit = Digit(0);

    /// Create a digit with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidDigit` if the value is greater than 9.
    pub fn new(value: u8) -> Result<Self> {
        if value > 9 {
            return Err(Error::InvalidDigit(value));
        }
        Ok(Digit(value))
    }

    /// Convert an ASCII digit character (`b'0'..=b'9'`).
    #[must_use]
    pub fn from_ascii(byte: u8) -> Option<Self> {
        byte.is_ascii_digit().then(|| Digit(byte - b'0'))
    }

    /// Get the numeric value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Get the ASCII character for this digit.
    #[must_use]
    pub fn to_ascii(self) -> u8 {
        b'0' + self.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Digit {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Digit::new(value)
    }
}

/// Fixed-length 4-digit credential.
///
/// Used both for the provisioned secret and for every candidate presented on
/// the keypad or the serial link.
///
/// # Security
/// The credential is compared in clear text; no hashing is applied. The
/// comparison itself is constant-time, see [`crate::validate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Credential([Digit; CREDENTIAL_LENGTH]);

impl Credential {
    /// Factory secret, the digits of [`DEFAULT_SECRET`](crate::constants::DEFAULT_SECRET).
    pub const FACTORY: Credential = Credential([Digit(1), Digit(2), Digit(3), Digit(4)]);

    /// Build a credential from digits.
    #[must_use]
    pub fn new(digits: [Digit; CREDENTIAL_LENGTH]) -> Self {
        Credential(digits)
    }

    /// Build a credential from exactly four ASCII digit bytes.
    ///
    /// # Errors
    /// Returns `Error::InvalidCredential` if the slice has the wrong length or
    /// contains a non-digit byte.
    pub fn from_ascii(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != CREDENTIAL_LENGTH {
            return Err(Error::InvalidCredential(format!(
                "expected {CREDENTIAL_LENGTH} digits, got {}",
                bytes.len()
            )));
        }

        let mut digits = [Digit::ZERO; CREDENTIAL_LENGTH];
        for (slot, &byte) in digits.iter_mut().zip(bytes) {
            *slot = Digit::from_ascii(byte).ok_or_else(|| {
                Error::InvalidCredential(format!("non-digit byte 0x{byte:02X}"))
            })?;
        }
        Ok(Credential(digits))
    }

    /// Get the digits.
    #[must_use]
    pub fn digits(&self) -> &[Digit; CREDENTIAL_LENGTH] {
        &self.0
    }

    /// Render as ASCII bytes, e.g. `b"1234"`.
    #[must_use]
    pub fn to_ascii(&self) -> [u8; CREDENTIAL_LENGTH] {
        self.0.map(Digit::to_ascii)
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for digit in &self.0 {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Credential {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Credential::from_ascii(s.trim().as_bytes())
    }
}

impl TryFrom<String> for Credential {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Credential> for String {
    fn from(value: Credential) -> Self {
        value.to_string()
    }
}

/// Position of the lock mechanism.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockStatus {
    #[default]
    Locked,
    Unlocked,
}

impl LockStatus {
    /// The opposite position.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            LockStatus::Locked => LockStatus::Unlocked,
            LockStatus::Unlocked => LockStatus::Locked,
        }
    }

    /// Text written to the lock line of the display.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LockStatus::Locked => "LOCKED",
            LockStatus::Unlocked => "UNLOCKED",
        }
    }
}

impl fmt::Display for LockStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LockStatus::Locked => write!(f, "Locked"),
            LockStatus::Unlocked => write!(f, "Unlocked"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_factory_secret_matches_constant() {
        let parsed: Credential = crate::constants::DEFAULT_SECRET.parse().unwrap();
        assert_eq!(Credential::FACTORY, parsed);
    }

    #[test]
    fn test_digit_bounds() {
        assert!(Digit::new(0).is_ok());
        assert!(Digit::new(9).is_ok());
        assert!(matches!(Digit::new(10), Err(Error::InvalidDigit(10))));
    }

    #[rstest]
    #[case(b'0', Some(0))]
    #[case(b'7', Some(7))]
    #[case(b'9', Some(9))]
    #[case(b'X', None)]
    #[case(b'#', None)]
    #[case(b'P', None)]
    fn test_digit_from_ascii(#[case] byte: u8, #[case] expected: Option<u8>) {
        assert_eq!(Digit::from_ascii(byte).map(Digit::value), expected);
    }

    #[test]
    fn test_credential_parse_and_display() {
        let credential: Credential = "1234".parse().unwrap();
        assert_eq!(credential.to_string(), "1234");
        assert_eq!(&credential.to_ascii(), b"1234");
        assert_eq!(credential.digits()[3].value(), 4);
    }

    #[rstest]
    #[case("123")]
    #[case("12345")]
    #[case("12a4")]
    #[case("")]
    fn test_credential_rejects_bad_input(#[case] input: &str) {
        assert!(matches!(
            input.parse::<Credential>(),
            Err(Error::InvalidCredential(_))
        ));
    }

    #[test]
    fn test_credential_serde_as_string() {
        let credential: Credential = "0420".parse().unwrap();
        let json = serde_json::to_string(&credential).unwrap();
        assert_eq!(json, "\"0420\"");

        let back: Credential = serde_json::from_str(&json).unwrap();
        assert_eq!(back, credential);

        assert!(serde_json::from_str::<Credential>("\"04x0\"").is_err());
    }

    #[test]
    fn test_lock_status_toggle() {
        assert_eq!(LockStatus::default(), LockStatus::Locked);
        assert_eq!(LockStatus::Locked.toggled(), LockStatus::Unlocked);
        assert_eq!(LockStatus::Unlocked.toggled(), LockStatus::Locked);
        assert_eq!(LockStatus::Unlocked.label(), "UNLOCKED");
    }
}
