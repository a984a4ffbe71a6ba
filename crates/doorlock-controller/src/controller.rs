//! Cooperative main loop.
//!
//! [`Controller::run_once`] is one pass of the firmware's main loop:
//!
//! 1. read the clock once
//! 2. time-driven work (envelopes, lockout expiry, scroll, periodic status)
//! 3. drain every command queued by the receive context
//! 4. scan the keypad and handle at most one key
//!
//! Collaborator failures are logged and the pass carries on; nothing here
//! ends the loop.

use std::sync::Arc;

use tracing::{trace, warn};

use doorlock_core::MonotonicClock;
use doorlock_hardware::{Actuators, Display, Keypad, SerialSink};

use crate::config::LockConfig;
use crate::effect::{DETAIL_LINE, Effect};
use crate::queue::CommandQueue;
use crate::session::SessionState;
use crate::state_machine::LockStateMachine;

/// The lock: state machine plus its collaborators.
#[derive(Debug)]
pub struct Controller<K, D, A, S> {
    clock: Arc<MonotonicClock>,
    machine: LockStateMachine,
    commands: CommandQueue,
    keypad: K,
    display: D,
    actuators: A,
    serial: S,
    dropped_seen: u64,
}

impl<K, D, A, S> Controller<K, D, A, S>
where
    K: Keypad,
    D: Display,
    A: Actuators,
    S: SerialSink,
{
    /// Wire a controller. Call [`start`](Self::start) before the first pass.
    pub fn new(
        config: &LockConfig,
        clock: Arc<MonotonicClock>,
        commands: CommandQueue,
        keypad: K,
        display: D,
        actuators: A,
        serial: S,
    ) -> Self {
        Self {
            clock,
            machine: LockStateMachine::new(config),
            commands,
            keypad,
            display,
            actuators,
            serial,
            dropped_seen: 0,
        }
    }

    /// Drive the start-up outputs.
    pub fn start(&mut self) {
        let now = self.clock.now();
        let effects = self.machine.start(now);
        self.apply_all(effects);
    }

    /// One main-loop pass.
    pub fn run_once(&mut self) {
        let now = self.clock.now();

        let effects = self.machine.poll(now);
        self.apply_all(effects);

        let dropped = self.commands.dropped_count();
        if dropped > self.dropped_seen {
            warn!(
                dropped = dropped - self.dropped_seen,
                capacity = self.commands.capacity(),
                "serial commands dropped, queue full"
            );
            self.dropped_seen = dropped;
        }

        while let Some(command) = self.commands.pop() {
            let effects = self.machine.handle_command(command, now);
            self.apply_all(effects);
        }

        match self.keypad.scan() {
            Ok(Some(input)) => {
                let effects = self.machine.handle_key(input, now);
                self.apply_all(effects);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "keypad scan failed"),
        }
    }

    pub fn machine(&self) -> &LockStateMachine {
        &self.machine
    }

    pub fn session(&self) -> &SessionState {
        self.machine.session()
    }

    pub fn clock(&self) -> &Arc<MonotonicClock> {
        &self.clock
    }

    pub fn keypad(&self) -> &K {
        &self.keypad
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn actuators(&self) -> &A {
        &self.actuators
    }

    pub fn serial(&self) -> &S {
        &self.serial
    }

    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    fn apply_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        trace!(?effect, "apply");
        let result = match &effect {
            Effect::WriteLine { line, text } => self.display.write_line(*line, text),
            Effect::MaskDigit { column } => self.display.write_char(DETAIL_LINE, *column, '*'),
            Effect::DriveLock(status) => self.actuators.set_lock(*status),
            Effect::Beeper(on) => self.actuators.set_beeper(*on),
            Effect::Indicator(on) => self.actuators.set_indicator(*on),
            Effect::Ack(ack) => self.serial.write_bytes(&[ack.as_byte()]),
            Effect::Status(frame) => self.serial.write_bytes(&frame.to_bytes()),
        };

        if let Err(e) = result {
            warn!(error = %e, ?effect, "collaborator write failed");
        }
    }
}
