//! Property tests over random interleavings of keys, serial frames and time.

use proptest::prelude::*;

use doorlock_controller::{Effect, LockConfig, LockState, LockStateMachine};
use doorlock_core::Timestamp;
use doorlock_hardware::KeypadInput;
use doorlock_protocol::{DecodedCommand, StatusFrame};

#[derive(Debug, Clone)]
enum Action {
    /// Raw keypad scan code, including unassigned ones.
    Key(u8),
    /// Serial frame carrying the right or a wrong credential.
    Serial(bool),
    /// Main-loop passes, one per millisecond.
    Advance(u64),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0u8..=16).prop_map(Action::Key),
        1 => any::<bool>().prop_map(Action::Serial),
        2 => (1u64..400).prop_map(Action::Advance),
    ]
}

fn frames(effects: &[Effect]) -> Vec<StatusFrame> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Status(frame) => Some(*frame),
            _ => None,
        })
        .collect()
}

fn command(code: &str) -> DecodedCommand {
    DecodedCommand {
        credential: code.parse().unwrap(),
    }
}

fn enter(machine: &mut LockStateMachine, code: &str, now: Timestamp) -> Vec<Effect> {
    for ch in code.bytes() {
        machine.handle_key(KeypadInput::Digit(ch - b'0'), now);
    }
    machine.handle_key(KeypadInput::Confirm, now)
}

fn assert_frame_shape(frame: &StatusFrame) {
    let bytes = frame.to_bytes();
    assert_eq!(&bytes[..2], b"S_");
    assert!(matches!(bytes[2], b'L' | b'U' | b'D'));
    assert_eq!(bytes[3], b'_');
    assert!(matches!(bytes[4], b'0'..=b'3'));
    assert_eq!(bytes[5], b'#');
    assert_eq!(bytes[2] == b'D', bytes[4] == b'3');
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_lockout_and_status_invariants(actions in prop::collection::vec(action(), 0..120)) {
        let config = LockConfig::default();
        let mut machine = LockStateMachine::new(&config);
        let mut now = Timestamp::ZERO;
        machine.start(now);

        for action in actions {
            match action {
                Action::Key(code) => {
                    let Some(input) = KeypadInput::from_scan_code(code) else {
                        continue;
                    };
                    let before = machine.session().clone();
                    let effects = machine.handle_key(input, now);

                    if before.is_locked_out() {
                        prop_assert!(effects.is_empty());
                        prop_assert_eq!(machine.session(), &before);
                    }
                    for frame in frames(&effects) {
                        assert_frame_shape(&frame);
                        prop_assert_eq!(frame.is_locked_out(), machine.session().is_locked_out());
                    }
                }
                Action::Serial(correct) => {
                    let credential = if correct { "1234" } else { "0000" };
                    let effects = machine.handle_command(command(credential), now);

                    let acks = effects.iter().filter(|e| matches!(e, Effect::Ack(_))).count();
                    let statuses = frames(&effects);
                    prop_assert_eq!(acks, 1);
                    prop_assert_eq!(statuses.len(), 1);
                    assert_frame_shape(&statuses[0]);
                }
                Action::Advance(ms) => {
                    for _ in 0..ms {
                        now = Timestamp::from_millis(now.as_millis() + 1);
                        let was_locked = machine.session().lockout_started_at();
                        let effects = machine.poll(now);
                        let session = machine.session();

                        if let Some(started) = session.lockout_started_at() {
                            prop_assert!(now.saturating_since(started) < config.lockout_ms);
                        } else if let Some(started) = was_locked {
                            // Never earlier than the full lockout
                            prop_assert_eq!(now.saturating_since(started), config.lockout_ms);
                        }
                        for frame in frames(&effects) {
                            assert_frame_shape(&frame);
                        }
                    }
                }
            }

            let session = machine.session();
            prop_assert!(session.error_count < config.max_failed_attempts);
            prop_assert!(machine.input().len() <= 4);
            prop_assert_eq!(session.alarm_active(), session.is_locked_out());
        }
    }

    #[test]
    fn prop_success_flips_lock_once(failures in 0u8..2, via_serial in any::<bool>()) {
        let mut machine = LockStateMachine::new(&LockConfig::default());
        let now = Timestamp::from_millis(10);
        machine.start(Timestamp::ZERO);

        for _ in 0..failures {
            enter(&mut machine, "9999", now);
        }
        let before = machine.session().lock_status;

        let effects = if via_serial {
            machine.handle_command(command("1234"), now)
        } else {
            enter(&mut machine, "1234", now)
        };

        prop_assert_eq!(machine.session().lock_status, before.toggled());
        // Only keypad successes clear keypad failures
        let expected_errors = if via_serial { failures } else { 0 };
        prop_assert_eq!(machine.session().error_count, expected_errors);
        prop_assert_eq!(frames(&effects).len(), 1);
        prop_assert_eq!(
            effects.iter().filter(|e| matches!(e, Effect::DriveLock(_))).count(),
            1
        );
        let acks = effects.iter().filter(|e| matches!(e, Effect::Ack(_))).count();
        prop_assert_eq!(acks, usize::from(via_serial));
    }

    #[test]
    fn prop_three_keypad_failures_lock_out_despite_serial_traffic(
        serial in prop::collection::vec(prop::collection::vec(any::<bool>(), 0..4), 3),
        wrong in prop::collection::vec(
            "[0-9]{4}".prop_filter("must not match the secret", |code| code != "1234"),
            3,
        ),
    ) {
        let mut machine = LockStateMachine::new(&LockConfig::default());
        machine.start(Timestamp::ZERO);
        let mut ms = 1;

        for (frames_before, code) in serial.iter().zip(&wrong) {
            for &correct in frames_before {
                let credential = if correct { "1234" } else { "0000" };
                machine.handle_command(command(credential), Timestamp::from_millis(ms));
                ms += 1;
            }
            prop_assert!(!machine.session().is_locked_out());
            enter(&mut machine, code, Timestamp::from_millis(ms));
            ms += 1;
        }

        prop_assert_eq!(machine.state(), LockState::LockedOut);
        prop_assert_eq!(machine.session().error_count, 0);
        prop_assert_eq!(
            machine.session().lockout_started_at(),
            Some(Timestamp::from_millis(ms - 1))
        );
    }
}
