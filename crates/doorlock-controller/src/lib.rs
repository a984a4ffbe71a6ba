//! Door-lock controller core.
//!
//! Everything that decides what the lock does lives here; every side effect
//! goes through the collaborator traits of `doorlock_hardware`.
//!
//! # Execution contexts
//!
//! ```text
//!  tick source ──> MonotonicClock <── read by everyone
//!
//!  receive context                         main loop (Controller::run_once)
//!  ───────────────                         ───────────────────────────────
//!  byte ─> SerialReceiver ──CommandQueue──> LockStateMachine ─> Effects ─> collaborators
//!          (decoder only)    (bounded SPSC)  ^
//!                                            └── keypad scan, clock readings
//! ```
//!
//! The receive context only decodes bytes and pushes completed commands; all
//! session state is owned by [`LockStateMachine`] and mutated on the main loop.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use doorlock_controller::{Controller, LockConfig, command_queue};
//! use doorlock_core::MonotonicClock;
//! use doorlock_hardware::VirtualDisplay;
//! use doorlock_hardware::mock::{MockActuators, MockKeypad, MockSerial};
//!
//! let config = LockConfig::default();
//! let clock = Arc::new(MonotonicClock::new());
//! let (mut receiver, commands) = command_queue(config.command_queue_capacity);
//! let (keypad, _keys) = MockKeypad::new();
//!
//! let mut controller = Controller::new(
//!     &config,
//!     Arc::clone(&clock),
//!     commands,
//!     keypad,
//!     VirtualDisplay::default(),
//!     MockActuators::new(),
//!     MockSerial::new(),
//! );
//! controller.start();
//!
//! for &byte in b"P1234#" {
//!     receiver.on_byte(byte);
//! }
//! controller.run_once();
//!
//! assert_eq!(controller.serial().output(), b"SS_U_0#");
//! ```

pub mod banner;
pub mod config;
pub mod controller;
pub mod effect;
pub mod envelope;
pub mod queue;
pub mod reporter;
pub mod session;
pub mod state_machine;

pub use banner::ScrollingBanner;
pub use config::LockConfig;
pub use controller::Controller;
pub use effect::{Effect, Notice};
pub use envelope::{Envelope, SquareWave};
pub use queue::{CommandQueue, ReceiveOutcome, SerialReceiver, command_queue};
pub use reporter::{StatusReporter, status_frame};
pub use session::{DisplayMode, InputBuffer, Mode, SessionState};
pub use state_machine::{LockState, LockStateMachine, StateTransition};
