//! Tokio codec for the host end of the serial link.
//!
//! A host (a PC, a gateway) talks to the lock by writing credential frames
//! and reading back acknowledgments and status frames. `LockLinkCodec`
//! implements:
//! - [`Encoder<Credential>`]: writes `P dddd #`
//! - [`Decoder`]: yields [`LockReply`] items from the lock's outbound stream
//! - [`Encoder<LockReply>`]: the lock side of the same stream, for simulators
//!
//! # Usage with Tokio Framed
//!
//! ```rust,no_run
//! use doorlock_core::Credential;
//! use doorlock_protocol::{LockLinkCodec, LockReply};
//! use futures::{SinkExt, StreamExt};
//! use tokio_util::codec::Framed;
//!
//! # async fn example(port: tokio::io::DuplexStream) -> doorlock_core::Result<()> {
//! let mut link = Framed::new(port, LockLinkCodec::new());
//!
//! link.send("1234".parse::<Credential>()?).await?;
//!
//! while let Some(reply) = link.next().await {
//!     match reply? {
//!         LockReply::Ack(ack) => println!("ack: {ack:?}"),
//!         LockReply::Status(status) => println!("status: {status}"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Resynchronization
//!
//! The outbound stream has no start-of-frame marker other than its first
//! byte, so the decoder scans: `F` is a failure ack, `S_` opens a status
//! frame, a lone `S` is a success ack. Anything else is skipped, as is a
//! status frame that fails to parse.

use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::{Ack, StatusFrame};
use doorlock_core::constants::{
    ACK_FAILURE, ACK_SUCCESS, FRAME_END, FRAME_START, STATUS_FRAME_LEN, STATUS_SEPARATOR,
};
use doorlock_core::{Credential, Error, Result};

/// One unit of the lock's outbound stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockReply {
    /// Acknowledgment of an inbound credential frame.
    Ack(Ack),
    /// Periodic or attempt-triggered status report.
    Status(StatusFrame),
}

/// Host-side codec for the lock's serial link.
#[derive(Debug, Default)]
pub struct LockLinkCodec {
    skipped: usize,
}

impl LockLinkCodec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self { skipped: 0 }
    }

    /// Number of bytes skipped while resynchronizing.
    pub fn skipped_bytes(&self) -> usize {
        self.skipped
    }

    fn skip(&mut self, src: &mut BytesMut, count: usize) {
        src.advance(count);
        self.skipped += count;
    }
}

impl Decoder for LockLinkCodec {
    type Item = LockReply;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        loop {
            let Some(&first) = src.first() else {
                return Ok(None);
            };

            match first {
                ACK_FAILURE => {
                    src.advance(1);
                    return Ok(Some(LockReply::Ack(Ack::Failure)));
                }
                ACK_SUCCESS => match src.get(1) {
                    // A trailing 'S' may still turn into a status frame
                    None => return Ok(None),
                    Some(&STATUS_SEPARATOR) => {
                        if src.len() < STATUS_FRAME_LEN {
                            return Ok(None);
                        }
                        match StatusFrame::parse(&src[..STATUS_FRAME_LEN]) {
                            Ok(frame) => {
                                src.advance(STATUS_FRAME_LEN);
                                return Ok(Some(LockReply::Status(frame)));
                            }
                            Err(_) => {
                                let end = src[..STATUS_FRAME_LEN]
                                    .iter()
                                    .position(|&b| b == FRAME_END)
                                    .map_or(1, |pos| pos + 1);
                                self.skip(src, end);
                            }
                        }
                    }
                    Some(_) => {
                        src.advance(1);
                        return Ok(Some(LockReply::Ack(Ack::Success)));
                    }
                },
                _ => self.skip(src, 1),
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        if let Some(reply) = self.decode(src)? {
            return Ok(Some(reply));
        }

        // At end of stream a lone 'S' can only be an ack
        if src[..] == [ACK_SUCCESS] {
            src.advance(1);
            return Ok(Some(LockReply::Ack(Ack::Success)));
        }

        let remaining = src.len();
        self.skip(src, remaining);
        Ok(None)
    }
}

impl Encoder<Credential> for LockLinkCodec {
    type Error = Error;

    fn encode(&mut self, item: Credential, dst: &mut BytesMut) -> Result<()> {
        dst.reserve(item.to_ascii().len() + 2);
        dst.extend_from_slice(&[FRAME_START]);
        dst.extend_from_slice(&item.to_ascii());
        dst.extend_from_slice(&[FRAME_END]);
        Ok(())
    }
}

impl Encoder<LockReply> for LockLinkCodec {
    type Error = Error;

    fn encode(&mut self, item: LockReply, dst: &mut BytesMut) -> Result<()> {
        match item {
            LockReply::Ack(ack) => dst.extend_from_slice(&[ack.as_byte()]),
            LockReply::Status(frame) => dst.extend_from_slice(&frame.to_bytes()),
        }
        Ok(())
    }
}
