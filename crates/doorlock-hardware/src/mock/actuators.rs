//! Recording actuator outputs.

use crate::{HardwareError, Result, traits::Actuators, types::LockSignals};
use doorlock_core::LockStatus;

/// One output change requested by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorEvent {
    /// Lock signal pair driven.
    Lock(LockSignals),
    /// Beeper switched.
    Beeper(bool),
    /// Alarm indicator switched.
    Indicator(bool),
}

/// Mock lock, beeper and indicator outputs.
///
/// Holds the current level of every output plus the full history of writes.
///
/// # Examples
///
/// ```
/// use doorlock_core::LockStatus;
/// use doorlock_hardware::mock::MockActuators;
/// use doorlock_hardware::Actuators;
///
/// let mut outputs = MockActuators::new();
/// outputs.set_lock(LockStatus::Unlocked).unwrap();
///
/// assert_eq!(outputs.lock_status(), Some(LockStatus::Unlocked));
/// assert!(outputs.signals().unwrap().release);
/// ```
#[derive(Debug, Default)]
pub struct MockActuators {
    signals: Option<LockSignals>,
    beeper: bool,
    indicator: bool,
    history: Vec<ActuatorEvent>,
    failing: bool,
}

impl MockActuators {
    /// Create outputs with nothing driven yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lock signal levels, `None` until first driven.
    pub fn signals(&self) -> Option<LockSignals> {
        self.signals
    }

    /// Lock position implied by the signal pair.
    pub fn lock_status(&self) -> Option<LockStatus> {
        self.signals.map(|s| {
            if s.engage {
                LockStatus::Locked
            } else {
                LockStatus::Unlocked
            }
        })
    }

    /// Current beeper level.
    pub fn beeper(&self) -> bool {
        self.beeper
    }

    /// Current indicator level.
    pub fn indicator(&self) -> bool {
        self.indicator
    }

    /// All writes in order.
    pub fn history(&self) -> &[ActuatorEvent] {
        &self.history
    }

    /// Number of times the beeper was switched on.
    pub fn beeper_on_count(&self) -> usize {
        self.history
            .iter()
            .filter(|e| matches!(e, ActuatorEvent::Beeper(true)))
            .count()
    }

    /// Forget recorded history, keeping current levels.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Make every subsequent write fail.
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    fn check(&self) -> Result<()> {
        if self.failing {
            return Err(HardwareError::communication("actuator driver fault"));
        }
        Ok(())
    }
}

impl Actuators for MockActuators {
    fn set_lock(&mut self, status: LockStatus) -> Result<()> {
        self.check()?;
        let signals = LockSignals::for_status(status);
        self.signals = Some(signals);
        self.history.push(ActuatorEvent::Lock(signals));
        Ok(())
    }

    fn set_beeper(&mut self, on: bool) -> Result<()> {
        self.check()?;
        self.beeper = on;
        self.history.push(ActuatorEvent::Beeper(on));
        Ok(())
    }

    fn set_indicator(&mut self, on: bool) -> Result<()> {
        self.check()?;
        self.indicator = on;
        self.history.push(ActuatorEvent::Indicator(on));
        Ok(())
    }
}
