//! Recording serial transmitter.

use crate::{HardwareError, Result, traits::SerialSink};

/// Mock serial sink collecting every transmitted byte.
///
/// # Examples
///
/// ```
/// use doorlock_hardware::mock::MockSerial;
/// use doorlock_hardware::SerialSink;
///
/// let mut serial = MockSerial::new();
/// serial.write_bytes(b"S").unwrap();
/// serial.write_bytes(b"S_U_0#").unwrap();
///
/// assert_eq!(serial.take_output(), b"SS_U_0#");
/// assert!(serial.output().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MockSerial {
    output: Vec<u8>,
    closed: bool,
}

impl MockSerial {
    /// Create an open, empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes written since the last [`take_output`](Self::take_output).
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Drain the collected bytes.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    /// Collected output as text, lossy.
    pub fn output_string(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Close or reopen the link. Writes to a closed link fail.
    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }
}

impl SerialSink for MockSerial {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if self.closed {
            return Err(HardwareError::communication("serial link closed"));
        }
        self.output.extend_from_slice(bytes);
        Ok(())
    }
}
