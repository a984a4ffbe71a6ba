//! Session state owned by the state machine.

use doorlock_core::constants::CREDENTIAL_LENGTH;
use doorlock_core::{Credential, Digit, LockStatus, Timestamp};

use crate::effect::Notice;
use crate::envelope::Envelope;

/// Operating mode.
///
/// The alarm envelope lives inside the lockout variant: the two start
/// together, share one timestamp and end together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Accepting keypad and serial input.
    #[default]
    Normal,
    /// Keypad ignored and alarm sounding until the envelope expires.
    LockedOut { alarm: Envelope },
}

/// What the display is currently showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Welcome headline, no scrolling.
    Welcome,
    /// Banner scrolling on the detail line.
    #[default]
    Scrolling,
    /// A fixed notice with scrolling suspended.
    Message(Notice),
}

/// Every mutable field of a running lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Position of the lock mechanism.
    pub lock_status: LockStatus,

    /// Consecutive failed keypad attempts since the last keypad success or lockout.
    pub error_count: u8,

    /// Normal operation or lockout.
    pub mode: Mode,

    /// Success chime, while playing.
    pub chime: Option<Envelope>,

    /// Current display content.
    pub display_mode: DisplayMode,

    /// Last periodic status emission.
    pub last_status_sent_at: Timestamp,
}

impl SessionState {
    /// True during a lockout.
    pub fn is_locked_out(&self) -> bool {
        matches!(self.mode, Mode::LockedOut { .. })
    }

    /// The alarm plays for exactly the length of the lockout.
    pub fn alarm_active(&self) -> bool {
        self.is_locked_out()
    }

    /// True while the success chime plays.
    pub fn chime_active(&self) -> bool {
        self.chime.is_some()
    }

    /// Start of the current lockout.
    pub fn lockout_started_at(&self) -> Option<Timestamp> {
        match self.mode {
            Mode::LockedOut { alarm } => Some(alarm.started_at()),
            Mode::Normal => None,
        }
    }
}

/// Digits entered on the keypad, at most four.
///
/// ```
/// use doorlock_controller::InputBuffer;
/// use doorlock_core::Digit;
///
/// let mut input = InputBuffer::new();
/// input.push(Digit::new(1).unwrap());
/// input.push(Digit::new(2).unwrap());
///
/// // Unused positions compare as zero
/// assert_eq!(input.take().to_string(), "1200");
/// assert!(input.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputBuffer {
    digits: [Digit; CREDENTIAL_LENGTH],
    len: usize,
}

impl InputBuffer {
    /// Empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a digit. Returns `false` and drops the digit when full.
    pub fn push(&mut self, digit: Digit) -> bool {
        if self.is_full() {
            return false;
        }
        self.digits[self.len] = digit;
        self.len += 1;
        true
    }

    /// Number of digits entered.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == CREDENTIAL_LENGTH
    }

    /// Discard the entry.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Return the entry as a zero-filled credential and clear the buffer.
    pub fn take(&mut self) -> Credential {
        let credential = Credential::new(self.digits);
        self.clear();
        credential
    }
}
