//! Lock state machine.
//!
//! [`LockStateMachine`] owns the [`SessionState`] and the keypad entry, and
//! is the only place either is mutated. Each entry point takes the current
//! clock reading and returns the [`Effect`]s to apply, in order.
//!
//! # States
//!
//! - `AwaitingInput`: locked, accepting credentials
//! - `Unlocked`: unlocked, accepting credentials (a success locks again)
//! - `LockedOut`: keypad ignored and alarm sounding; serial frames are still
//!   validated
//!
//! # Transitions
//!
//! - AwaitingInput ⇄ Unlocked on every accepted credential
//! - AwaitingInput/Unlocked → LockedOut on the keypad failure that reaches
//!   `max_failed_attempts`; serial attempts never count
//! - LockedOut → AwaitingInput/Unlocked once `lockout_ms` have elapsed
//!
//! # Examples
//!
//! ```
//! use doorlock_controller::{Effect, LockConfig, LockState, LockStateMachine};
//! use doorlock_core::{LockStatus, Timestamp};
//! use doorlock_hardware::KeypadInput;
//!
//! let mut machine = LockStateMachine::new(&LockConfig::default());
//! machine.start(Timestamp::ZERO);
//!
//! let now = Timestamp::from_millis(10);
//! for input in [1, 2, 3, 4].map(KeypadInput::Digit) {
//!     machine.handle_key(input, now);
//! }
//! let effects = machine.handle_key(KeypadInput::Confirm, now);
//!
//! assert!(effects.contains(&Effect::DriveLock(LockStatus::Unlocked)));
//! assert_eq!(machine.state(), LockState::Unlocked);
//! assert!(machine.session().chime_active());
//! ```

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use doorlock_core::constants::DISPLAY_COLUMNS;
use doorlock_core::{Credential, LockStatus, Timestamp, validate};
use doorlock_hardware::KeypadInput;
use doorlock_protocol::{Ack, DecodedCommand};

use crate::banner::ScrollingBanner;
use crate::config::LockConfig;
use crate::effect::{DETAIL_LINE, Effect, HEADLINE, Notice};
use crate::envelope::{Envelope, SquareWave};
use crate::reporter::{StatusReporter, status_frame};
use crate::session::{DisplayMode, InputBuffer, Mode, SessionState};

/// Maximum number of state transitions kept in history.
const MAX_HISTORY_SIZE: usize = 100;

/// Externally visible state of the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    /// Locked and accepting credentials.
    AwaitingInput,
    /// Unlocked and accepting credentials.
    Unlocked,
    /// Keypad ignored until the lockout expires.
    LockedOut,
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LockState::AwaitingInput => "AwaitingInput",
            LockState::Unlocked => "Unlocked",
            LockState::LockedOut => "LockedOut",
        };
        write!(f, "{name}")
    }
}

/// A recorded change of [`LockState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: LockState,
    pub to: LockState,
    /// Clock reading when the change happened.
    pub at: Timestamp,
}

/// Where a credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Keypad,
    Serial,
}

/// Levels last written to the beeper and indicator.
#[derive(Debug, Clone, Copy, Default)]
struct OutputLevels {
    beeper: bool,
    indicator: bool,
}

/// The lock's decision logic.
#[derive(Debug)]
pub struct LockStateMachine {
    session: SessionState,
    input: InputBuffer,
    secret: Credential,
    max_failed_attempts: u8,
    lockout_ms: u64,
    chime_ms: u64,
    welcome: String,
    banner: ScrollingBanner,
    reporter: StatusReporter,
    levels: OutputLevels,
    history: VecDeque<StateTransition>,
}

impl LockStateMachine {
    /// Create a machine in the start-up session state.
    pub fn new(config: &LockConfig) -> Self {
        Self {
            session: SessionState::default(),
            input: InputBuffer::new(),
            secret: config.secret,
            max_failed_attempts: config.max_failed_attempts,
            lockout_ms: config.lockout_ms,
            chime_ms: config.chime_ms,
            welcome: config.welcome.clone(),
            banner: ScrollingBanner::new(
                &config.banner,
                DISPLAY_COLUMNS,
                config.scroll_interval_ms,
            ),
            reporter: StatusReporter::new(config.status_interval_ms),
            levels: OutputLevels::default(),
            history: VecDeque::with_capacity(MAX_HISTORY_SIZE),
        }
    }

    /// Current session state.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Digits entered so far.
    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    /// Scrolling banner.
    pub fn banner(&self) -> &ScrollingBanner {
        &self.banner
    }

    /// Externally visible state.
    pub fn state(&self) -> LockState {
        if self.session.is_locked_out() {
            LockState::LockedOut
        } else if self.session.lock_status == LockStatus::Unlocked {
            LockState::Unlocked
        } else {
            LockState::AwaitingInput
        }
    }

    /// State changes, oldest first.
    pub fn history(&self) -> &VecDeque<StateTransition> {
        &self.history
    }

    /// Drive every output to its start-up level and start the banner.
    pub fn start(&mut self, now: Timestamp) -> Vec<Effect> {
        self.session = SessionState {
            last_status_sent_at: now,
            ..SessionState::default()
        };
        self.input.clear();
        self.levels = OutputLevels::default();
        self.banner.resume(now);

        info!(lock = %self.session.lock_status, "controller started");
        vec![
            Effect::DriveLock(self.session.lock_status),
            Effect::Beeper(false),
            Effect::Indicator(false),
            Effect::line(HEADLINE, self.welcome.as_str()),
        ]
    }

    /// Time-driven work for one main-loop pass, in order: envelope expiry,
    /// lockout expiry, beeper and indicator levels, banner scroll and the
    /// periodic status frame.
    pub fn poll(&mut self, now: Timestamp) -> Vec<Effect> {
        let mut effects = Vec::new();

        if self.session.chime.is_some_and(|chime| chime.is_expired(now)) {
            self.session.chime = None;
            debug!(%now, "chime finished");
        }

        if let Mode::LockedOut { alarm } = self.session.mode {
            if alarm.is_expired(now) {
                self.end_lockout(now, &mut effects);
            } else if self.session.display_mode != DisplayMode::Message(Notice::LockedOut) {
                self.show(Notice::LockedOut, &mut effects);
            }
        }

        self.drive_patterns(now, &mut effects);

        if !self.session.is_locked_out() {
            if let Some(window) = self.banner.poll(now) {
                effects.push(Effect::line(DETAIL_LINE, window));
            }
        }

        if let Some(frame) = self.reporter.poll(now, &mut self.session) {
            trace!(%frame, "periodic status");
            effects.push(Effect::Status(frame));
        }

        effects
    }

    /// Handle one keypad input. Ignored entirely during a lockout.
    pub fn handle_key(&mut self, input: KeypadInput, now: Timestamp) -> Vec<Effect> {
        if self.session.is_locked_out() {
            trace!(%input, "keypad input ignored during lockout");
            return Vec::new();
        }

        let mut effects = Vec::new();

        if self.banner.is_active() {
            self.banner.suspend();
            self.session.display_mode = DisplayMode::Welcome;
            effects.push(Effect::line(HEADLINE, self.welcome.as_str()));
            effects.push(Effect::line(DETAIL_LINE, ""));
        }

        match input {
            KeypadInput::Digit(_) => match input.as_digit() {
                Some(digit) if self.input.push(digit) => {
                    effects.push(Effect::MaskDigit {
                        column: self.input.len() - 1,
                    });
                }
                _ => trace!(%input, "digit ignored"),
            },
            KeypadInput::Confirm => {
                let candidate = self.input.take();
                self.submit(candidate, now, &mut effects);
            }
            KeypadInput::Cancel | KeypadInput::Clear => {
                self.input.clear();
                self.show(Notice::Cleared, &mut effects);
                self.resume_scrolling(now);
                debug!(%input, "entry cleared");
            }
        }

        effects
    }

    /// Handle a credential decoded from the serial link.
    ///
    /// The reply starts with an acknowledgment byte. Serial attempts never
    /// touch the failure count or the lockout: a wrong frame is only
    /// acknowledged, and a right one toggles the lock even during a lockout.
    pub fn handle_command(&mut self, command: DecodedCommand, now: Timestamp) -> Vec<Effect> {
        let before = self.state();
        let matched = validate(&command.credential, &self.secret);
        let mut effects = vec![Effect::Ack(Ack::from_outcome(matched))];
        self.input.clear();

        if matched {
            self.accept(Source::Serial, now, &mut effects);
        } else {
            debug!(errors = self.session.error_count, "serial credential rejected");
        }

        effects.push(Effect::Status(status_frame(&self.session)));
        self.record_transition(before, now);
        effects
    }

    fn submit(&mut self, candidate: Credential, now: Timestamp, effects: &mut Vec<Effect>) {
        let before = self.state();

        if validate(&candidate, &self.secret) {
            self.session.error_count = 0;
            self.accept(Source::Keypad, now, effects);
        } else {
            self.session.error_count = self.session.error_count.saturating_add(1);

            if self.session.error_count >= self.max_failed_attempts {
                self.start_lockout(now, effects);
            } else {
                self.show(Notice::Incorrect, effects);
                self.resume_scrolling(now);
            }

            debug!(errors = self.session.error_count, "keypad credential rejected");
        }

        effects.push(Effect::Status(status_frame(&self.session)));
        self.record_transition(before, now);
    }

    /// Toggle the lock and start the chime. The lockout screen stays up if
    /// one is running.
    fn accept(&mut self, source: Source, now: Timestamp, effects: &mut Vec<Effect>) {
        self.session.lock_status = self.session.lock_status.toggled();
        self.session.chime = Some(Envelope::new(now, self.chime_ms));

        if self.session.is_locked_out() {
            effects.push(Effect::DriveLock(self.session.lock_status));
        } else {
            self.banner.suspend();
            self.show(Notice::Correct, effects);
            effects.push(Effect::DriveLock(self.session.lock_status));
            effects.push(Effect::line(DETAIL_LINE, self.session.lock_status.label()));
        }

        info!(?source, lock = %self.session.lock_status, "credential accepted");
    }

    fn start_lockout(&mut self, now: Timestamp, effects: &mut Vec<Effect>) {
        self.session.mode = Mode::LockedOut {
            alarm: Envelope::new(now, self.lockout_ms),
        };
        self.session.error_count = 0;
        self.banner.suspend();
        self.show(Notice::LockoutEntered, effects);

        info!(%now, duration_ms = self.lockout_ms, "lockout started");
    }

    fn end_lockout(&mut self, now: Timestamp, effects: &mut Vec<Effect>) {
        let before = self.state();
        self.session.mode = Mode::Normal;
        self.session.error_count = 0;

        effects.push(Effect::line(HEADLINE, self.welcome.as_str()));
        self.resume_scrolling(now);

        info!(%now, "lockout cleared");
        self.record_transition(before, now);
    }

    /// Beeper and indicator levels for this pass. The chime owns the beeper
    /// while it plays; the alarm keeps blinking the indicator underneath it.
    fn drive_patterns(&mut self, now: Timestamp, effects: &mut Vec<Effect>) {
        let alarm = self.session.alarm_active();
        let beeper = if self.session.chime_active() {
            SquareWave::CHIME.level(now)
        } else {
            alarm && SquareWave::ALARM_BEEP.level(now)
        };
        let indicator = alarm && SquareWave::ALARM_BLINK.level(now);

        if beeper != self.levels.beeper {
            self.levels.beeper = beeper;
            effects.push(Effect::Beeper(beeper));
        }
        if indicator != self.levels.indicator {
            self.levels.indicator = indicator;
            effects.push(Effect::Indicator(indicator));
        }
    }

    fn show(&mut self, notice: Notice, effects: &mut Vec<Effect>) {
        self.session.display_mode = DisplayMode::Message(notice);
        effects.extend(notice.effects());
    }

    fn resume_scrolling(&mut self, now: Timestamp) {
        self.banner.resume(now);
        self.session.display_mode = DisplayMode::Scrolling;
    }

    fn record_transition(&mut self, from: LockState, at: Timestamp) {
        let to = self.state();
        if from == to {
            return;
        }

        debug!(%from, %to, %at, "state transition");
        if self.history.len() >= MAX_HISTORY_SIZE {
            self.history.pop_front();
        }
        self.history.push_back(StateTransition { from, to, at });
    }
}
