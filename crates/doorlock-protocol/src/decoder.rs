//! Byte-at-a-time decoder for inbound credential frames.
//!
//! The decoder runs in the receive-interrupt context: it is fed one byte per
//! call, never blocks, never allocates, and owns no state other than its
//! six-byte buffer. A completed frame is returned to the caller, which hands
//! it to the main loop through the command queue.
//!
//! # Protocol Framing
//!
//! ```text
//! 'P'  d0  d1  d2  d3  '#'
//! 0x50 ASCII digits    0x23
//! ```
//!
//! # State Machine
//!
//! ```text
//! ┌──────┐   'P'    ┌──────────────┐  '#' (6 bytes, 4 digits)  ┌──────────────┐
//! │ Idle │────────>│ Collecting(n)│──────────────────────────>│ DecodedCommand│
//! └──────┘          └──────────────┘                           └──────────────┘
//!    ^  │ other          │ '#' early / non-digit payload → MalformedFrame
//!    │  │ (ignored)      │ 6 bytes without '#'       → BufferOverflow
//!    │  └────────────────┤
//!    └───────────────────┴──────────── always back to Idle
//! ```
//!
//! # Usage
//!
//! ```
//! use doorlock_protocol::{DecoderState, SerialFrameDecoder};
//!
//! let mut decoder = SerialFrameDecoder::new();
//! let mut decoded = None;
//! for &byte in b"noiseP1234#" {
//!     if let Ok(Some(command)) = decoder.feed_byte(byte) {
//!         decoded = Some(command);
//!     }
//! }
//!
//! assert_eq!(decoded.unwrap().credential.to_string(), "1234");
//! assert_eq!(decoder.state(), DecoderState::Idle);
//! ```

use doorlock_core::constants::{CREDENTIAL_FRAME_LEN, FRAME_END, FRAME_START};
use doorlock_core::{Credential, Error};
use thiserror::Error;

/// A credential extracted from a well-formed serial frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedCommand {
    /// The four digits carried by the frame.
    pub credential: Credential,
}

/// Reason a partially collected frame was discarded.
///
/// These are not faults: the decoder has already reset to
/// [`DecoderState::Idle`] and no acknowledgment is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Terminator seen but the frame had the wrong length or a non-digit payload.
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    /// Six bytes collected without a terminator.
    #[error("Frame exceeded {limit} bytes without terminator")]
    BufferOverflow { limit: usize },
}

impl From<FrameError> for Error {
    fn from(value: FrameError) -> Self {
        match value {
            FrameError::MalformedFrame(message) => Error::MalformedFrame(message),
            FrameError::BufferOverflow { limit } => Error::BufferOverflow { limit },
        }
    }
}

/// Decoder states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// Waiting for the `P` start byte; everything else is ignored.
    Idle,

    /// Collecting a frame; holds the number of bytes stored so far,
    /// including the start byte.
    Collecting(usize),
}

/// Stateful decoder for `P dddd #` frames.
#[derive(Debug, Clone)]
pub struct SerialFrameDecoder {
    buffer: [u8; CREDENTIAL_FRAME_LEN],
    len: usize,
}

impl SerialFrameDecoder {
    /// Create a decoder in the [`DecoderState::Idle`] state.
    pub fn new() -> Self {
        Self {
            buffer: [0; CREDENTIAL_FRAME_LEN],
            len: 0,
        }
    }

    /// Current state of the decoder.
    pub fn state(&self) -> DecoderState {
        match self.len {
            0 => DecoderState::Idle,
            n => DecoderState::Collecting(n),
        }
    }

    /// Feed one received byte.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(command))` when the byte completed a well-formed frame
    /// - `Ok(None)` when more bytes are needed or the byte was ignored
    /// - `Err(FrameError)` when the byte caused the collected frame to be
    ///   discarded
    ///
    /// The decoder is back in [`DecoderState::Idle`] after every `Some` or
    /// `Err` result.
    pub fn feed_byte(&mut self, byte: u8) -> Result<Option<DecodedCommand>, FrameError> {
        if self.len == 0 {
            if byte == FRAME_START {
                self.store(byte);
            }
            return Ok(None);
        }

        self.store(byte);

        if byte == FRAME_END {
            let result = self.complete_frame();
            self.reset();
            return result.map(Some);
        }

        if self.len >= CREDENTIAL_FRAME_LEN {
            self.reset();
            return Err(FrameError::BufferOverflow {
                limit: CREDENTIAL_FRAME_LEN,
            });
        }

        Ok(None)
    }

    /// Drop any partially collected frame.
    pub fn reset(&mut self) {
        self.len = 0;
    }

    fn store(&mut self, byte: u8) {
        self.buffer[self.len] = byte;
        self.len += 1;
    }

    /// Validate a terminated frame held in the buffer.
    fn complete_frame(&self) -> Result<DecodedCommand, FrameError> {
        if self.len != CREDENTIAL_FRAME_LEN {
            return Err(FrameError::MalformedFrame(format!(
                "expected {CREDENTIAL_FRAME_LEN} bytes, got {}",
                self.len
            )));
        }

        let payload = &self.buffer[1..CREDENTIAL_FRAME_LEN - 1];
        Credential::from_ascii(payload)
            .map(|credential| DecodedCommand { credential })
            .map_err(|e| FrameError::MalformedFrame(e.to_string()))
    }
}

impl Default for SerialFrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Feed a byte string and collect every outcome that is not `Ok(None)`.
    fn feed_all(
        decoder: &mut SerialFrameDecoder,
        bytes: &[u8],
    ) -> Vec<Result<DecodedCommand, FrameError>> {
        bytes
            .iter()
            .filter_map(|&b| decoder.feed_byte(b).transpose())
            .collect()
    }

    #[test]
    fn test_new_decoder_is_idle() {
        let decoder = SerialFrameDecoder::new();
        assert_eq!(decoder.state(), DecoderState::Idle);
    }

    #[test]
    fn test_well_formed_frame() {
        let mut decoder = SerialFrameDecoder::new();
        let outcomes = feed_all(&mut decoder, b"P1234#");

        assert_eq!(outcomes.len(), 1);
        let command = outcomes[0].as_ref().unwrap();
        assert_eq!(command.credential, "1234".parse().unwrap());
        assert_eq!(decoder.state(), DecoderState::Idle);
    }

    #[test]
    fn test_state_progression() {
        let mut decoder = SerialFrameDecoder::new();

        decoder.feed_byte(b'x').unwrap();
        assert_eq!(decoder.state(), DecoderState::Idle);

        decoder.feed_byte(b'P').unwrap();
        assert_eq!(decoder.state(), DecoderState::Collecting(1));

        decoder.feed_byte(b'9').unwrap();
        decoder.feed_byte(b'8').unwrap();
        assert_eq!(decoder.state(), DecoderState::Collecting(3));
    }

    #[test]
    fn test_non_digit_payload_is_malformed() {
        let mut decoder = SerialFrameDecoder::new();
        let outcomes = feed_all(&mut decoder, b"PX12#");

        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0], Err(FrameError::MalformedFrame(_))));
        assert_eq!(decoder.state(), DecoderState::Idle);
    }

    #[test]
    fn test_non_digit_payload_full_length_is_malformed() {
        let mut decoder = SerialFrameDecoder::new();
        let outcomes = feed_all(&mut decoder, b"P12a4#");

        assert!(matches!(
            outcomes.as_slice(),
            [Err(FrameError::MalformedFrame(_))]
        ));
    }

    #[rstest]
    #[case(b"P#".as_slice())]
    #[case(b"P1#".as_slice())]
    #[case(b"P123#".as_slice())]
    fn test_short_frames_are_malformed(#[case] input: &[u8]) {
        let mut decoder = SerialFrameDecoder::new();
        let outcomes = feed_all(&mut decoder, input);

        assert!(matches!(
            outcomes.as_slice(),
            [Err(FrameError::MalformedFrame(_))]
        ));
        assert_eq!(decoder.state(), DecoderState::Idle);
    }

    #[test]
    fn test_overflow_resets_after_six_bytes() {
        let mut decoder = SerialFrameDecoder::new();
        let outcomes = feed_all(&mut decoder, b"P12345");

        assert_eq!(
            outcomes,
            vec![Err(FrameError::BufferOverflow {
                limit: CREDENTIAL_FRAME_LEN
            })]
        );
        assert_eq!(decoder.state(), DecoderState::Idle);
    }

    #[test]
    fn test_recovers_after_overflow() {
        let mut decoder = SerialFrameDecoder::new();
        let outcomes = feed_all(&mut decoder, b"P123456#P4321#");

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].is_err());
        assert_eq!(
            outcomes[1].as_ref().unwrap().credential,
            "4321".parse().unwrap()
        );
    }

    #[test]
    fn test_idle_ignores_terminator_and_garbage() {
        let mut decoder = SerialFrameDecoder::new();
        let outcomes = feed_all(&mut decoder, b"##1234\r\n");

        assert!(outcomes.is_empty());
        assert_eq!(decoder.state(), DecoderState::Idle);
    }

    #[test]
    fn test_start_byte_inside_frame_is_payload() {
        let mut decoder = SerialFrameDecoder::new();
        let outcomes = feed_all(&mut decoder, b"PP1234#");

        // "PP1234" hits the six byte bound before the terminator
        assert!(matches!(
            outcomes.as_slice(),
            [Err(FrameError::BufferOverflow { .. })]
        ));
    }

    #[test]
    fn test_back_to_back_frames() {
        let mut decoder = SerialFrameDecoder::new();
        let outcomes = feed_all(&mut decoder, b"P0000#P9999#");

        let credentials: Vec<String> = outcomes
            .into_iter()
            .map(|o| o.unwrap().credential.to_string())
            .collect();
        assert_eq!(credentials, vec!["0000", "9999"]);
    }

    #[test]
    fn test_reset_drops_partial_frame() {
        let mut decoder = SerialFrameDecoder::new();
        feed_all(&mut decoder, b"P12");
        decoder.reset();

        assert_eq!(decoder.state(), DecoderState::Idle);
        assert!(feed_all(&mut decoder, b"34#").is_empty());
    }

    #[test]
    fn test_frame_error_converts_to_core_error() {
        let error: Error = FrameError::BufferOverflow { limit: 6 }.into();
        assert!(matches!(error, Error::BufferOverflow { limit: 6 }));
    }
}
