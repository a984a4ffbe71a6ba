//! Serial wire protocol for the door-lock controller.
//!
//! - [`SerialFrameDecoder`]: byte-at-a-time decoder for inbound `P dddd #`
//!   credential frames, safe to drive from the receive interrupt.
//! - [`StatusFrame`] and [`Ack`]: the lock's outbound replies.
//! - [`LockLinkCodec`]: tokio-util codec for the host end of the link.

pub mod codec;
pub mod decoder;
pub mod status;

pub use codec::{LockLinkCodec, LockReply};
pub use decoder::{DecodedCommand, DecoderState, FrameError, SerialFrameDecoder};
pub use status::{Ack, StatusCode, StatusFrame};
