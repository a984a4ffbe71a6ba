//! Outbound replies: one-byte acknowledgments and status frames.
//!
//! # Status Frame Format
//!
//! ```text
//! S _ <code> _ <digit> #
//!
//! code   L  locked
//!        U  unlocked
//!        D  locked out
//! digit  0-2 failed attempts, or 3 while locked out
//! ```
//!
//! The digit is `3` exactly when the code is `D`; [`StatusFrame`] cannot be
//! constructed otherwise.

use std::fmt;

use doorlock_core::constants::{
    ACK_FAILURE, ACK_SUCCESS, FRAME_END, STATUS_FRAME_LEN, STATUS_PREFIX, STATUS_SEPARATOR,
};
use doorlock_core::{Error, LockStatus, Result};
use serde::{Deserialize, Serialize};

/// Digit reported while the lock is locked out.
const LOCKOUT_DIGIT: u8 = 3;

/// Acknowledgment sent for every processed inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ack {
    /// Credential matched.
    Success,
    /// Credential did not match.
    Failure,
}

impl Ack {
    /// Acknowledgment for a validation result.
    pub fn from_outcome(matched: bool) -> Self {
        if matched { Ack::Success } else { Ack::Failure }
    }

    /// Wire byte (`S` or `F`).
    pub fn as_byte(self) -> u8 {
        match self {
            Ack::Success => ACK_SUCCESS,
            Ack::Failure => ACK_FAILURE,
        }
    }

    /// Parse a wire byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            ACK_SUCCESS => Some(Ack::Success),
            ACK_FAILURE => Some(Ack::Failure),
            _ => None,
        }
    }
}

/// Lock state reported in a status frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCode {
    Locked,
    Unlocked,
    LockedOut,
}

impl StatusCode {
    /// Wire character (`L`, `U` or `D`).
    pub fn as_byte(self) -> u8 {
        match self {
            StatusCode::Locked => b'L',
            StatusCode::Unlocked => b'U',
            StatusCode::LockedOut => b'D',
        }
    }

    /// Parse a wire character.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'L' => Some(StatusCode::Locked),
            b'U' => Some(StatusCode::Unlocked),
            b'D' => Some(StatusCode::LockedOut),
            _ => None,
        }
    }
}

impl From<LockStatus> for StatusCode {
    fn from(value: LockStatus) -> Self {
        match value {
            LockStatus::Locked => StatusCode::Locked,
            LockStatus::Unlocked => StatusCode::Unlocked,
        }
    }
}

/// A `S_<code>_<digit>#` status frame.
///
/// # Examples
///
/// ```
/// use doorlock_core::LockStatus;
/// use doorlock_protocol::StatusFrame;
///
/// let frame = StatusFrame::normal(LockStatus::Unlocked, 0).unwrap();
/// assert_eq!(&frame.to_bytes(), b"S_U_0#");
///
/// assert_eq!(StatusFrame::locked_out().to_string(), "S_D_3#");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusFrame {
    code: StatusCode,
    digit: u8,
}

impl StatusFrame {
    /// Frame reported while locked out.
    pub fn locked_out() -> Self {
        Self {
            code: StatusCode::LockedOut,
            digit: LOCKOUT_DIGIT,
        }
    }

    /// Frame reported during normal operation.
    ///
    /// # Errors
    /// Returns `Error::InvalidStatusFrame` if `error_count` is 3 or more; that
    /// many failures always means lockout.
    pub fn normal(status: LockStatus, error_count: u8) -> Result<Self> {
        if error_count >= LOCKOUT_DIGIT {
            return Err(Error::InvalidStatusFrame(format!(
                "error count {error_count} outside lockout"
            )));
        }
        Ok(Self {
            code: status.into(),
            digit: error_count,
        })
    }

    /// Frame reported during normal operation, with the count capped at 2.
    ///
    /// Counts of 3 and above only occur when more than three attempts are
    /// allowed before a lockout; the wire format cannot carry them.
    pub fn normal_saturating(status: LockStatus, error_count: u8) -> Self {
        Self {
            code: status.into(),
            digit: error_count.min(LOCKOUT_DIGIT - 1),
        }
    }

    /// Reported lock state.
    pub fn code(&self) -> StatusCode {
        self.code
    }

    /// Reported failed-attempt digit (0-3).
    pub fn digit(&self) -> u8 {
        self.digit
    }

    /// True when the frame reports a lockout.
    pub fn is_locked_out(&self) -> bool {
        self.code == StatusCode::LockedOut
    }

    /// Wire bytes, e.g. `b"S_L_0#"`.
    pub fn to_bytes(&self) -> [u8; STATUS_FRAME_LEN] {
        [
            STATUS_PREFIX[0],
            STATUS_PREFIX[1],
            self.code.as_byte(),
            STATUS_SEPARATOR,
            b'0' + self.digit,
            FRAME_END,
        ]
    }

    /// Parse a complete status frame.
    ///
    /// # Errors
    /// Returns `Error::InvalidStatusFrame` if the bytes do not match
    /// `S_[LUD]_[0-3]#` or the digit disagrees with the code.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let invalid = || Error::InvalidStatusFrame(String::from_utf8_lossy(bytes).into_owned());

        let [s0, s1, code, sep, digit, end] = bytes else {
            return Err(invalid());
        };

        if [*s0, *s1] != *STATUS_PREFIX || *sep != STATUS_SEPARATOR || *end != FRAME_END {
            return Err(invalid());
        }

        let code = StatusCode::from_byte(*code).ok_or_else(invalid)?;
        let digit = match *digit {
            d @ b'0'..=b'3' => d - b'0',
            _ => return Err(invalid()),
        };

        if (code == StatusCode::LockedOut) != (digit == LOCKOUT_DIGIT) {
            return Err(invalid());
        }

        Ok(Self { code, digit })
    }
}

impl fmt::Display for StatusFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.to_bytes();
        // Always ASCII
        write!(f, "{}", String::from_utf8_lossy(&bytes))
    }
}
