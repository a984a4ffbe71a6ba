//! Collaborator trait definitions.
//!
//! These traits establish the contract between the controller core and the
//! board's peripherals. Every method returns immediately; none of them may
//! block the main loop.

use crate::error::Result;
use crate::types::KeypadInput;
use doorlock_core::LockStatus;

/// Matrix keypad, polled once per main-loop pass.
///
/// # Examples
///
/// ```
/// use doorlock_hardware::{Keypad, KeypadInput, Result};
///
/// fn count_digits<K: Keypad>(keypad: &mut K) -> Result<usize> {
///     let mut digits = 0;
///     while let Some(input) = keypad.scan()? {
///         if matches!(input, KeypadInput::Digit(_)) {
///             digits += 1;
///         }
///     }
///     Ok(digits)
/// }
/// ```
pub trait Keypad {
    /// Return the key pressed since the last scan, if any.
    ///
    /// Debouncing is the driver's responsibility: a single physical press is
    /// reported exactly once.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is disconnected.
    fn scan(&mut self) -> Result<Option<KeypadInput>>;
}

/// Character display with a fixed number of fixed-width lines.
pub trait Display {
    /// Replace a whole line (0-based). Shorter text is space-padded, longer
    /// text is truncated.
    ///
    /// # Errors
    ///
    /// Returns an error if the line index is out of range.
    fn write_line(&mut self, line: usize, text: &str) -> Result<()>;

    /// Write a single character at a 0-based position.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is out of range.
    fn write_char(&mut self, line: usize, column: usize, ch: char) -> Result<()>;
}

/// Output signals driven by the controller.
pub trait Actuators {
    /// Drive the lock signal pair to match `status`.
    ///
    /// # Errors
    ///
    /// Returns an error if the output could not be driven.
    fn set_lock(&mut self, status: LockStatus) -> Result<()>;

    /// Switch the beeper.
    ///
    /// # Errors
    ///
    /// Returns an error if the output could not be driven.
    fn set_beeper(&mut self, on: bool) -> Result<()>;

    /// Switch the alarm indicator. `false` is the inactive level.
    ///
    /// # Errors
    ///
    /// Returns an error if the output could not be driven.
    fn set_indicator(&mut self, on: bool) -> Result<()>;
}

/// Transmit side of the serial link.
pub trait SerialSink {
    /// Queue bytes for transmission.
    ///
    /// # Errors
    ///
    /// Returns an error if the link is closed.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;
}
