//! Hand-off from the receive context to the main loop.
//!
//! The receive context owns a [`SerialReceiver`]: it feeds bytes to the frame
//! decoder and pushes each completed command onto a bounded lock-free queue.
//! The main loop owns the matching [`CommandQueue`] and drains it once per
//! pass. Neither half is `Clone`, so there is exactly one producer and one
//! consumer, and no session state is reachable from the receive side.
//!
//! # Overflow
//!
//! A command arriving while the queue is full is dropped and counted. The
//! consumer reports the count so the main loop can log it.
//!
//! ```
//! use doorlock_controller::{ReceiveOutcome, command_queue};
//!
//! let (mut receiver, commands) = command_queue(4);
//!
//! let outcomes: Vec<_> = b"P1234#".iter().map(|&b| receiver.on_byte(b)).collect();
//! assert_eq!(outcomes.last(), Some(&ReceiveOutcome::Queued));
//!
//! let command = commands.pop().unwrap();
//! assert_eq!(command.credential.to_string(), "1234");
//! assert!(commands.pop().is_none());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam::queue::ArrayQueue;

use doorlock_protocol::{DecodedCommand, DecoderState, FrameError, SerialFrameDecoder};

/// Result of feeding one byte on the receive side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiveOutcome {
    /// Byte consumed; no frame completed.
    Pending,
    /// A frame completed and its command was queued.
    Queued,
    /// A frame completed but the queue was full; the command was dropped.
    Dropped,
    /// The partial frame was discarded.
    Discarded(FrameError),
}

#[derive(Debug)]
struct Shared {
    commands: ArrayQueue<DecodedCommand>,
    dropped: AtomicU64,
}

/// Create the two halves of the command queue.
///
/// A capacity of zero is raised to one.
pub fn command_queue(capacity: usize) -> (SerialReceiver, CommandQueue) {
    let shared = Arc::new(Shared {
        commands: ArrayQueue::new(capacity.max(1)),
        dropped: AtomicU64::new(0),
    });
    (
        SerialReceiver {
            decoder: SerialFrameDecoder::new(),
            shared: Arc::clone(&shared),
        },
        CommandQueue { shared },
    )
}

/// Producer half, driven from the receive context.
#[derive(Debug)]
pub struct SerialReceiver {
    decoder: SerialFrameDecoder,
    shared: Arc<Shared>,
}

impl SerialReceiver {
    /// Feed one received byte. Never blocks and never allocates.
    pub fn on_byte(&mut self, byte: u8) -> ReceiveOutcome {
        match self.decoder.feed_byte(byte) {
            Ok(None) => ReceiveOutcome::Pending,
            Ok(Some(command)) => match self.shared.commands.push(command) {
                Ok(()) => ReceiveOutcome::Queued,
                Err(_) => {
                    self.shared.dropped.fetch_add(1, Ordering::Relaxed);
                    ReceiveOutcome::Dropped
                }
            },
            Err(reason) => ReceiveOutcome::Discarded(reason),
        }
    }

    /// Current decoder state.
    pub fn decoder_state(&self) -> DecoderState {
        self.decoder.state()
    }
}

/// Consumer half, drained by the main loop.
#[derive(Debug)]
pub struct CommandQueue {
    shared: Arc<Shared>,
}

impl CommandQueue {
    /// Take the oldest queued command.
    pub fn pop(&self) -> Option<DecodedCommand> {
        self.shared.commands.pop()
    }

    pub fn len(&self) -> usize {
        self.shared.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.commands.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.shared.commands.capacity()
    }

    /// Commands dropped on overflow since creation.
    pub fn dropped_count(&self) -> u64 {
        self.shared.dropped.load(Ordering::Relaxed)
    }
}
