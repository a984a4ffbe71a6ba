//! Timed output patterns.
//!
//! An [`Envelope`] is a window of clock time; a [`SquareWave`] turns a clock
//! reading into an output level. Both are computed from the current reading
//! on every pass, never scheduled.
//!
//! ```
//! use doorlock_controller::{Envelope, SquareWave};
//! use doorlock_core::Timestamp;
//!
//! let chime = Envelope::new(Timestamp::from_millis(100), 3000);
//! assert!(!chime.is_expired(Timestamp::from_millis(3099)));
//! assert!(chime.is_expired(Timestamp::from_millis(3100)));
//!
//! assert!(SquareWave::ALARM_BEEP.level(Timestamp::from_millis(5)));
//! assert!(!SquareWave::ALARM_BEEP.level(Timestamp::from_millis(6)));
//! ```

use doorlock_core::Timestamp;
use doorlock_core::constants::{ALARM_BEEP_PERIOD_MS, ALARM_BLINK_PERIOD_MS, CHIME_PERIOD_MS};

/// A window of `duration_ms` starting at `started_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    started_at: Timestamp,
    duration_ms: u64,
}

impl Envelope {
    /// Open a window at `started_at`.
    pub fn new(started_at: Timestamp, duration_ms: u64) -> Self {
        Self {
            started_at,
            duration_ms,
        }
    }

    /// Clock reading at which the window opened.
    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    /// True once `duration_ms` have elapsed; exact at the boundary.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.has_elapsed(self.started_at, self.duration_ms)
    }

    /// Milliseconds left, zero once expired.
    pub fn remaining(&self, now: Timestamp) -> u64 {
        self.duration_ms
            .saturating_sub(now.saturating_since(self.started_at))
    }
}

/// 50% duty square wave aligned to clock zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareWave {
    period_ms: u64,
}

impl SquareWave {
    /// Success chime: on for even ticks.
    pub const CHIME: SquareWave = SquareWave::new(CHIME_PERIOD_MS);

    /// Alarm beeper.
    pub const ALARM_BEEP: SquareWave = SquareWave::new(ALARM_BEEP_PERIOD_MS);

    /// Alarm indicator blink.
    pub const ALARM_BLINK: SquareWave = SquareWave::new(ALARM_BLINK_PERIOD_MS);

    /// Wave with the given full period.
    pub const fn new(period_ms: u64) -> Self {
        Self { period_ms }
    }

    /// Output level at `now`: high for the first half of each period.
    pub fn level(&self, now: Timestamp) -> bool {
        now.phase(self.period_ms) < self.period_ms / 2
    }
}
