//! Hardware abstraction layer for the door-lock controller.
//!
//! The controller core never touches pins or peripherals directly. It talks
//! to four external collaborators through the traits in [`traits`]:
//!
//! - [`Keypad`]: polled once per main-loop pass; debouncing is the driver's job
//! - [`Display`]: two fixed-width text lines, whole-line and single-character writes
//! - [`Actuators`]: the lock signal pair, the alarm indicator and the beeper
//! - [`SerialSink`]: the transmit side of the serial link
//!
//! # Design Philosophy
//!
//! - **Polling, not async**: the main loop is a tight cooperative cycle, so
//!   every operation returns immediately.
//! - **Error-aware**: all operations return [`Result<T>`][error::Result]; the
//!   controller logs failures and keeps running.
//! - **Mockable**: [`mock`] provides recording implementations for tests and
//!   simulators.
//!
//! # Example
//!
//! ```
//! use doorlock_hardware::mock::MockKeypad;
//! use doorlock_hardware::{Keypad, KeypadInput};
//!
//! let (mut keypad, handle) = MockKeypad::new();
//! handle.press_code(15).unwrap();
//!
//! assert_eq!(keypad.scan().unwrap(), Some(KeypadInput::Confirm));
//! assert_eq!(keypad.scan().unwrap(), None);
//! ```

pub mod display;
pub mod error;
pub mod mock;
pub mod traits;
pub mod types;

pub use display::{VirtualDisplay, pad_text};
pub use error::{HardwareError, Result};
pub use traits::{Actuators, Display, Keypad, SerialSink};
pub use types::{KeypadInput, LockSignals};
