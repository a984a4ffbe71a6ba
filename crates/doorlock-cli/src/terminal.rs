//! Terminal stand-ins for the board's peripherals.

use std::io::Write;

use tracing::{info, trace};

use doorlock_core::LockStatus;
use doorlock_hardware::{Actuators, Display, LockSignals, Result, SerialSink, VirtualDisplay};

/// Display that redraws the panel on stderr whenever its contents change.
pub struct TerminalDisplay<W> {
    panel: VirtualDisplay,
    out: W,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            panel: VirtualDisplay::default(),
            out,
        }
    }

    fn redraw(&mut self, before: &[String]) -> Result<()> {
        let changed = self
            .panel
            .lines()
            .iter()
            .zip(before)
            .any(|(now, was)| *now != was.as_str());
        if changed {
            writeln!(self.out, "{}", self.panel.render())?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn snapshot(&self) -> Vec<String> {
        self.panel.lines().into_iter().map(str::to_string).collect()
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn write_line(&mut self, line: usize, text: &str) -> Result<()> {
        let before = self.snapshot();
        self.panel.write_line(line, text)?;
        self.redraw(&before)
    }

    fn write_char(&mut self, line: usize, column: usize, ch: char) -> Result<()> {
        let before = self.snapshot();
        self.panel.write_char(line, column, ch)?;
        self.redraw(&before)
    }
}

/// Actuators that only log their output levels.
#[derive(Debug, Default)]
pub struct LoggingActuators {
    lock: Option<LockStatus>,
    beeper: bool,
    indicator: bool,
}

impl LoggingActuators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> Option<LockStatus> {
        self.lock
    }
}

impl Actuators for LoggingActuators {
    fn set_lock(&mut self, status: LockStatus) -> Result<()> {
        let signals = LockSignals::for_status(status);
        info!(lock = status.label(), ?signals, "lock driven");
        self.lock = Some(status);
        Ok(())
    }

    fn set_beeper(&mut self, on: bool) -> Result<()> {
        if on != self.beeper {
            trace!(on, "beeper");
        }
        self.beeper = on;
        Ok(())
    }

    fn set_indicator(&mut self, on: bool) -> Result<()> {
        if on != self.indicator {
            trace!(on, "indicator");
        }
        self.indicator = on;
        Ok(())
    }
}

/// Serial transmit side over any writer: stdout or an open port.
pub struct WriterSink<W> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> SerialSink for WriterSink<W> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.out.write_all(bytes)?;
        self.out.flush()?;
        Ok(())
    }
}
