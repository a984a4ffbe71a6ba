//! Output requests produced by the state machine.
//!
//! [`LockStateMachine`](crate::LockStateMachine) never touches a collaborator;
//! it returns an ordered list of [`Effect`]s and the
//! [`Controller`](crate::Controller) applies them. Tests assert on the list
//! directly.

use doorlock_core::LockStatus;
use doorlock_protocol::{Ack, StatusFrame};

/// First display line: headlines and notices.
pub const HEADLINE: usize = 0;

/// Second display line: banner, masked entry and lock position.
pub const DETAIL_LINE: usize = 1;

/// One requested output, applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace a display line.
    WriteLine { line: usize, text: String },

    /// Echo one entered digit as `*` on the detail line.
    MaskDigit { column: usize },

    /// Drive the lock signal pair.
    DriveLock(LockStatus),

    /// Switch the beeper.
    Beeper(bool),

    /// Switch the alarm indicator.
    Indicator(bool),

    /// Acknowledge a serial credential frame.
    Ack(Ack),

    /// Send a status frame.
    Status(StatusFrame),
}

impl Effect {
    pub(crate) fn line(line: usize, text: impl Into<String>) -> Self {
        Self::WriteLine {
            line,
            text: text.into(),
        }
    }
}

/// Fixed messages shown on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// Credential accepted. The detail line shows the new lock position.
    Correct,
    /// Credential rejected below the lockout threshold.
    Incorrect,
    /// Entry erased with Clear or Cancel.
    Cleared,
    /// Shown once when a lockout starts.
    LockoutEntered,
    /// Shown for the rest of the lockout.
    LockedOut,
}

impl Notice {
    /// Headline text.
    pub fn headline(self) -> &'static str {
        match self {
            Self::Correct => "Password Correct",
            Self::Incorrect => "Password Incorrect",
            Self::Cleared => "Input Cleared!",
            Self::LockoutEntered => "Please Try Again",
            Self::LockedOut => "SECURITY LOCKOUT",
        }
    }

    /// Detail line text, `None` when the notice leaves it to the caller.
    pub fn detail(self) -> Option<&'static str> {
        match self {
            Self::Correct => None,
            Self::Incorrect => Some("Try Again!"),
            Self::Cleared => Some(""),
            Self::LockoutEntered => Some("Security Lock"),
            Self::LockedOut => Some("Try Later..."),
        }
    }

    pub(crate) fn effects(self) -> impl Iterator<Item = Effect> {
        std::iter::once(Effect::line(HEADLINE, self.headline()))
            .chain(self.detail().map(|text| Effect::line(DETAIL_LINE, text)))
    }
}
