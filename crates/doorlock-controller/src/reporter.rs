//! Status frame reporting.
//!
//! A frame goes out after every credential attempt and, independently, every
//! `interval_ms` measured from the previous periodic frame. Attempt frames do
//! not move the periodic schedule.

use doorlock_core::Timestamp;
use doorlock_protocol::StatusFrame;

use crate::session::SessionState;

/// Frame describing `session`: `D`/`3` during a lockout, otherwise the lock
/// position and the failure count.
///
/// ```
/// use doorlock_controller::{SessionState, status_frame};
///
/// let session = SessionState { error_count: 2, ..SessionState::default() };
/// assert_eq!(status_frame(&session).to_string(), "S_L_2#");
/// ```
pub fn status_frame(session: &SessionState) -> StatusFrame {
    if session.is_locked_out() {
        StatusFrame::locked_out()
    } else {
        StatusFrame::normal_saturating(session.lock_status, session.error_count)
    }
}

/// Periodic status cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReporter {
    interval_ms: u64,
}

impl StatusReporter {
    pub fn new(interval_ms: u64) -> Self {
        Self { interval_ms }
    }

    /// True when a periodic frame is due at `now`.
    pub fn is_due(&self, now: Timestamp, session: &SessionState) -> bool {
        now.has_elapsed(session.last_status_sent_at, self.interval_ms)
    }

    /// Return the periodic frame if one is due and record the emission.
    pub fn poll(&self, now: Timestamp, session: &mut SessionState) -> Option<StatusFrame> {
        if !self.is_due(now, session) {
            return None;
        }
        session.last_status_sent_at = now;
        Some(status_frame(session))
    }
}
