//! `doorlock`: run the lock controller against a terminal.
//!
//! ```text
//! doorlock [config.json]
//! ```
//!
//! The configuration path may also come from `DOORLOCK_CONFIG`; without one
//! the stock firmware values are used. Lines `key <code>` on stdin press a
//! keypad scan code (15 confirms, 13 clears). Any other stdin text is serial
//! traffic such as `P1234#`, unless `serial_port` is configured, in which
//! case the port carries the serial link. Status frames and acknowledgments
//! go to stdout (or the port); the display and logs go to stderr.

mod input;
mod terminal;

use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, error, info, trace};
use tracing_subscriber::EnvFilter;

use doorlock_controller::{Controller, LockConfig, SerialReceiver, command_queue};
use doorlock_core::MonotonicClock;
use doorlock_hardware::mock::{MockKeypad, MockKeypadHandle};

use crate::input::{Routed, feed_bytes, route_line};
use crate::terminal::{LoggingActuators, TerminalDisplay, WriterSink};

const TICK: Duration = Duration::from_millis(1);
const LOOP_PAUSE: Duration = Duration::from_micros(200);
const SERIAL_READ_TIMEOUT: Duration = Duration::from_millis(50);

/// Clock time the loop keeps running after stdin closes, so queued input and
/// the resulting frames are flushed.
const EXIT_GRACE_MS: u64 = 50;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let config = load_config()?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting door-lock simulator");

    let clock = Arc::new(MonotonicClock::new());
    let (receiver, commands) = command_queue(config.command_queue_capacity);
    let (keypad, keys) = MockKeypad::new();
    let input_done = Arc::new(AtomicBool::new(false));

    spawn_ticker(Arc::clone(&clock))?;

    let sink: WriterSink<Box<dyn Write>> = match &config.serial_port {
        Some(path) => {
            let port = serialport::new(path, config.baud_rate)
                .timeout(SERIAL_READ_TIMEOUT)
                .open()
                .with_context(|| format!("failed to open serial port {path}"))?;
            let reader = port.try_clone().context("failed to clone serial port")?;
            info!(port = %path, baud = config.baud_rate, "serial link on port");

            spawn_port_reader(reader, receiver)?;
            spawn_stdin_reader(keys, None, Arc::clone(&input_done))?;
            WriterSink::new(Box::new(port))
        }
        None => {
            spawn_stdin_reader(keys, Some(receiver), Arc::clone(&input_done))?;
            WriterSink::new(Box::new(io::stdout()))
        }
    };

    let mut controller = Controller::new(
        &config,
        Arc::clone(&clock),
        commands,
        keypad,
        TerminalDisplay::new(io::stderr()),
        LoggingActuators::new(),
        sink,
    );
    controller.start();

    let mut exit_at = None;
    loop {
        controller.run_once();

        if input_done.load(Ordering::Acquire) {
            let deadline = *exit_at.get_or_insert(clock.now().as_millis() + EXIT_GRACE_MS);
            if clock.now().as_millis() >= deadline {
                break;
            }
        }
        thread::sleep(LOOP_PAUSE);
    }

    info!(
        lock = ?controller.actuators().lock(),
        "input closed, shutting down"
    );
    Ok(())
}

fn load_config() -> Result<LockConfig> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("DOORLOCK_CONFIG").map(PathBuf::from));

    match path {
        Some(path) => LockConfig::from_path(&path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => {
            debug!("no config given, using defaults");
            Ok(LockConfig::default())
        }
    }
}

fn spawn_ticker(clock: Arc<MonotonicClock>) -> Result<()> {
    thread::Builder::new()
        .name("tick".into())
        .spawn(move || {
            loop {
                thread::sleep(TICK);
                clock.tick();
            }
        })
        .context("failed to spawn tick thread")?;
    Ok(())
}

fn spawn_stdin_reader(
    keys: MockKeypadHandle,
    mut receiver: Option<SerialReceiver>,
    done: Arc<AtomicBool>,
) -> Result<()> {
    thread::Builder::new()
        .name("stdin".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => match route_line(&line, &keys, receiver.as_mut()) {
                        Routed::Key(code) => trace!(code, "keypad line"),
                        Routed::Serial { queued, dropped } => {
                            trace!(queued, dropped, "serial line");
                        }
                        Routed::Ignored => {}
                    },
                    Err(e) => {
                        error!(error = %e, "stdin read failed");
                        break;
                    }
                }
            }
            done.store(true, Ordering::Release);
        })
        .context("failed to spawn stdin thread")?;
    Ok(())
}

fn spawn_port_reader(
    mut port: Box<dyn serialport::SerialPort>,
    mut receiver: SerialReceiver,
) -> Result<()> {
    thread::Builder::new()
        .name("serial-rx".into())
        .spawn(move || {
            let mut buf = [0u8; 64];
            loop {
                match port.read(&mut buf) {
                    Ok(0) => {}
                    Ok(n) => {
                        feed_bytes(&mut receiver, &buf[..n]);
                    }
                    Err(e) if e.kind() == io::ErrorKind::TimedOut => {}
                    Err(e) => {
                        error!(error = %e, "serial read failed");
                        break;
                    }
                }
            }
        })
        .context("failed to spawn serial thread")?;
    Ok(())
}
