//! Core constants for the door-lock controller.
//!
//! This module centralizes the wire-level bytes, credential geometry and
//! timing defaults used across the workspace.
//!
//! # Serial Framing
//!
//! Inbound credential frames and outbound status frames are plain ASCII:
//!
//! ```text
//! inbound   P d0 d1 d2 d3 #       e.g. "P1234#"
//! outbound  S _ <code> _ <digit> # e.g. "S_L_0#"
//! ack       S | F                  one byte per processed inbound frame
//! ```
//!
//! # Usage
//!
//! ```
//! use doorlock_core::constants::*;
//!
//! assert_eq!(CREDENTIAL_FRAME_LEN, 1 + CREDENTIAL_LENGTH + 1);
//! assert_eq!(FRAME_START, b'P');
//! ```

// ============================================================================
// Serial Framing
// ============================================================================

/// First byte of an inbound credential frame.
pub const FRAME_START: u8 = b'P';

/// Terminator of every frame, inbound and outbound.
pub const FRAME_END: u8 = b'#';

/// Total length of an inbound credential frame (`P` + 4 digits + `#`).
pub const CREDENTIAL_FRAME_LEN: usize = 6;

/// Prefix of an outbound status frame.
pub const STATUS_PREFIX: &[u8; 2] = b"S_";

/// Separator between status code and error digit.
pub const STATUS_SEPARATOR: u8 = b'_';

/// Total length of an outbound status frame (`S_L_0#`).
pub const STATUS_FRAME_LEN: usize = 6;

/// Acknowledgment byte for an accepted serial credential.
pub const ACK_SUCCESS: u8 = b'S';

/// Acknowledgment byte for a rejected serial credential.
pub const ACK_FAILURE: u8 = b'F';

// ============================================================================
// Credential
// ============================================================================

/// Number of digits in the provisioned credential.
pub const CREDENTIAL_LENGTH: usize = 4;

/// Credential provisioned when no configuration overrides it.
pub const DEFAULT_SECRET: &str = "1234";

// ============================================================================
// Timing (milliseconds)
// ============================================================================

/// Consecutive failed attempts that trigger a lockout.
pub const DEFAULT_MAX_FAILED_ATTEMPTS: u8 = 3;

/// Length of the lockout window and of the alarm envelope.
pub const DEFAULT_LOCKOUT_MS: u64 = 3000;

/// Length of the success chime envelope.
pub const DEFAULT_CHIME_MS: u64 = 3000;

/// Periodic status frame cadence.
pub const DEFAULT_STATUS_INTERVAL_MS: u64 = 1000;

/// Banner scroll cadence.
///
/// The firmware advanced the banner every 5000 main-loop passes; this is the
/// clock-measured equivalent of that slow, readable scroll.
pub const DEFAULT_SCROLL_INTERVAL_MS: u64 = 300;

/// Chime square-wave period in ticks (beeper on for even ticks).
pub const CHIME_PERIOD_MS: u64 = 2;

/// Alarm beeper square-wave period in ticks (50% duty).
pub const ALARM_BEEP_PERIOD_MS: u64 = 4;

/// Alarm indicator blink period in ticks (50% duty).
pub const ALARM_BLINK_PERIOD_MS: u64 = 200;

// ============================================================================
// Display
// ============================================================================

/// Number of text lines on the character display.
pub const DISPLAY_LINES: usize = 2;

/// Number of characters per display line.
pub const DISPLAY_COLUMNS: usize = 16;

/// Headline shown while waiting for input.
pub const DEFAULT_WELCOME: &str = "Welcome Home!";

/// Banner scrolled across line 2 while idle.
pub const DEFAULT_BANNER: &str = "    Please Enter Password...    ";

// ============================================================================
// Queueing
// ============================================================================

/// Capacity of the receive-context to main-loop command queue.
pub const DEFAULT_COMMAND_QUEUE_CAPACITY: usize = 4;
