//! Mock keypad driven through a channel.

use crate::{HardwareError, Result, traits::Keypad, types::KeypadInput};
use crossbeam::channel::{self, Receiver, Sender, TryRecvError};

/// Mock matrix keypad.
///
/// Presses are queued through a [`MockKeypadHandle`] as raw scan codes and
/// reported one per [`Keypad::scan`], the way a debounced driver would.
///
/// # Examples
///
/// ```
/// use doorlock_hardware::mock::MockKeypad;
/// use doorlock_hardware::{Keypad, KeypadInput};
///
/// let (mut keypad, handle) = MockKeypad::new();
/// handle.enter_code("42").unwrap();
///
/// assert_eq!(keypad.scan().unwrap(), Some(KeypadInput::Digit(4)));
/// assert_eq!(keypad.scan().unwrap(), Some(KeypadInput::Digit(2)));
/// assert_eq!(keypad.scan().unwrap(), Some(KeypadInput::Confirm));
/// assert_eq!(keypad.scan().unwrap(), None);
/// ```
#[derive(Debug)]
pub struct MockKeypad {
    /// Pending scan codes
    code_rx: Receiver<u8>,

    /// Number of scans performed
    scans: usize,
}

impl MockKeypad {
    /// Create a mock keypad and the handle that feeds it.
    pub fn new() -> (Self, MockKeypadHandle) {
        let (code_tx, code_rx) = channel::unbounded();
        (Self { code_rx, scans: 0 }, MockKeypadHandle { code_tx })
    }

    /// Number of times the keypad has been scanned.
    pub fn scan_count(&self) -> usize {
        self.scans
    }
}

impl Keypad for MockKeypad {
    fn scan(&mut self) -> Result<Option<KeypadInput>> {
        self.scans += 1;
        match self.code_rx.try_recv() {
            Ok(code) => Ok(KeypadInput::from_scan_code(code)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                Err(HardwareError::disconnected("keypad input channel closed"))
            }
        }
    }
}

/// Handle for pressing keys on a [`MockKeypad`].
///
/// Cloneable, so a simulator thread and a test can share it.
#[derive(Debug, Clone)]
pub struct MockKeypadHandle {
    code_tx: Sender<u8>,
}

impl MockKeypadHandle {
    /// Queue one key press.
    ///
    /// # Errors
    ///
    /// Returns an error if the keypad has been dropped.
    pub fn press(&self, input: KeypadInput) -> Result<()> {
        self.press_code(input.scan_code())
    }

    /// Queue a raw scan code. Unassigned codes are scanned as "no key".
    ///
    /// # Errors
    ///
    /// Returns an error if the keypad has been dropped.
    pub fn press_code(&self, code: u8) -> Result<()> {
        self.code_tx
            .send(code)
            .map_err(|_| HardwareError::disconnected("keypad"))
    }

    /// Queue each digit of `digits` followed by Confirm.
    ///
    /// # Errors
    ///
    /// Returns an error if `digits` contains a non-digit or the keypad has
    /// been dropped.
    pub fn enter_code(&self, digits: &str) -> Result<()> {
        for ch in digits.chars() {
            let value = ch
                .to_digit(10)
                .ok_or_else(|| HardwareError::invalid_data(format!("not a digit: {ch:?}")))?;
            self.press(KeypadInput::Digit(value as u8))?;
        }
        self.press(KeypadInput::Confirm)
    }
}
