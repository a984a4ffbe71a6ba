//! Free-running millisecond clock.
//!
//! The clock is advanced by a single tick source (the periodic timer
//! interrupt on the board, a 1 ms thread in the simulator) and read by every
//! other component. There is exactly one writer, so an atomic counter is
//! enough: readers never observe a torn value and need no further locking.
//!
//! ```
//! use doorlock_core::{MonotonicClock, Timestamp};
//!
//! let clock = MonotonicClock::new();
//! let start = clock.now();
//!
//! clock.tick();
//! clock.tick();
//!
//! assert_eq!(clock.now().saturating_since(start), 2);
//! assert!(clock.now() > start);
//! assert_eq!(Timestamp::ZERO, start);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A reading of the [`MonotonicClock`], in milliseconds since start-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Clock value at start-up.
    pub const ZERO: Timestamp = Timestamp(0);

    /// Wrap a raw millisecond count.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Timestamp(ms)
    }

    /// Raw millisecond count.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed from `earlier` to `self`, zero if `earlier` is later.
    #[must_use]
    pub fn saturating_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// True once at least `duration_ms` have elapsed since `start`.
    #[must_use]
    pub fn has_elapsed(self, start: Timestamp, duration_ms: u64) -> bool {
        self.saturating_since(start) >= duration_ms
    }

    /// Phase of this reading within a repeating period of `period_ms`.
    #[must_use]
    pub fn phase(self, period_ms: u64) -> u64 {
        self.0 % period_ms.max(1)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Millisecond tick counter shared between the tick source and its readers.
///
/// Share it behind an `Arc`; the tick source calls [`tick`](Self::tick), all
/// other contexts call [`now`](Self::now).
#[derive(Debug, Default)]
pub struct MonotonicClock {
    ticks: AtomicU64,
}

impl MonotonicClock {
    /// Create a clock reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ticks: AtomicU64::new(0),
        }
    }

    /// Current reading. Non-blocking.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        Timestamp(self.ticks.load(Ordering::Acquire))
    }

    /// Advance by one tick. Must only be called from the tick source.
    pub fn tick(&self) {
        self.ticks.fetch_add(1, Ordering::Release);
    }

    /// Advance by `ms` ticks at once.
    ///
    /// Used by simulations and tests that step time deterministically instead
    /// of running a real tick source.
    pub fn advance(&self, ms: u64) {
        self.ticks.fetch_add(ms, Ordering::Release);
    }
}
