//! Routing of simulator input lines.
//!
//! A line of the form `key <code>` presses a keypad scan code. Every other
//! line is raw serial traffic and goes byte by byte to the receive side.

use tracing::{debug, warn};

use doorlock_controller::{ReceiveOutcome, SerialReceiver};
use doorlock_hardware::mock::MockKeypadHandle;

/// What a single input line turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    Key(u8),
    Serial { queued: usize, dropped: usize },
    Ignored,
}

/// Parse a `key <code>` line. Returns `None` for anything else.
pub fn parse_key_line(line: &str) -> Option<std::result::Result<u8, String>> {
    let rest = line.trim().strip_prefix("key")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let code = rest.trim();
    Some(
        code.parse::<u8>()
            .map_err(|_| format!("invalid scan code: {code:?}")),
    )
}

/// Route one line. `receiver` is `None` when serial traffic comes from a
/// port instead of this stream.
pub fn route_line(
    line: &str,
    keys: &MockKeypadHandle,
    receiver: Option<&mut SerialReceiver>,
) -> Routed {
    match parse_key_line(line) {
        Some(Ok(code)) => {
            if let Err(e) = keys.press_code(code) {
                warn!(error = %e, code, "keypad press failed");
                return Routed::Ignored;
            }
            debug!(code, "key pressed");
            Routed::Key(code)
        }
        Some(Err(message)) => {
            warn!("{message}");
            Routed::Ignored
        }
        None => match receiver {
            Some(receiver) => feed_bytes(receiver, line.as_bytes()),
            None => {
                if !line.trim().is_empty() {
                    warn!(line, "serial traffic is read from the port; line ignored");
                }
                Routed::Ignored
            }
        },
    }
}

/// Feed raw bytes to the receive side, logging what each completed frame did.
pub fn feed_bytes(receiver: &mut SerialReceiver, bytes: &[u8]) -> Routed {
    let mut queued = 0;
    let mut dropped = 0;
    for &byte in bytes {
        match receiver.on_byte(byte) {
            ReceiveOutcome::Pending => {}
            ReceiveOutcome::Queued => queued += 1,
            ReceiveOutcome::Dropped => dropped += 1,
            ReceiveOutcome::Discarded(reason) => debug!(%reason, "frame discarded"),
        }
    }
    Routed::Serial { queued, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doorlock_controller::command_queue;
    use doorlock_hardware::mock::MockKeypad;
    use doorlock_hardware::{Keypad, KeypadInput};
    use rstest::rstest;

    #[rstest]
    #[case("key 15", Some(Ok(15)))]
    #[case("  key   3  ", Some(Ok(3)))]
    #[case("key x", Some(Err("invalid scan code: \"x\"".to_string())))]
    #[case("keys 3", None)]
    #[case("P1234#", None)]
    fn test_parse_key_line(#[case] line: &str, #[case] expected: Option<Result<u8, String>>) {
        assert_eq!(parse_key_line(line), expected);
    }

    #[test]
    fn test_route_key_and_serial() {
        let (mut keypad, keys) = MockKeypad::new();
        let (mut receiver, commands) = command_queue(4);

        assert_eq!(route_line("key 10", &keys, Some(&mut receiver)), Routed::Key(10));
        assert_eq!(keypad.scan().unwrap(), Some(KeypadInput::Digit(0)));

        let routed = route_line("P1234#P99", &keys, Some(&mut receiver));
        assert_eq!(routed, Routed::Serial { queued: 1, dropped: 0 });
        assert_eq!(commands.pop().unwrap().credential.to_string(), "1234");
        assert!(commands.pop().is_none());
    }

    #[test]
    fn test_frame_may_span_lines() {
        let (_keypad, keys) = MockKeypad::new();
        let (mut receiver, commands) = command_queue(4);

        route_line("P12", &keys, Some(&mut receiver));
        route_line("34#", &keys, Some(&mut receiver));
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_serial_line_ignored_without_receiver() {
        let (_keypad, keys) = MockKeypad::new();
        assert_eq!(route_line("P1234#", &keys, None), Routed::Ignored);
    }

    #[test]
    fn test_overflow_counted() {
        let (mut receiver, _commands) = command_queue(1);
        let routed = feed_bytes(&mut receiver, b"P1111#P2222#");
        assert_eq!(routed, Routed::Serial { queued: 1, dropped: 1 });
    }
}
