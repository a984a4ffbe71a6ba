//! Mock collaborator implementations for testing and simulation.
//!
//! Each mock records what the controller asked of it so tests can assert on
//! the exact sequence of outputs, without requiring physical hardware.

pub mod actuators;
pub mod keypad;
pub mod serial;

pub use actuators::{ActuatorEvent, MockActuators};
pub use keypad::{MockKeypad, MockKeypadHandle};
pub use serial::MockSerial;
