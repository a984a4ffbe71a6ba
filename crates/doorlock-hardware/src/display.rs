//! Virtual character display.
//!
//! `VirtualDisplay` keeps an in-memory copy of a fixed-size character LCD
//! (two lines of sixteen columns on the lock's board). It implements
//! [`Display`], so it serves as the test double for the display driver and
//! as the frame buffer the simulator renders to the terminal.
//!
//! # Character Encoding - ASCII Only
//!
//! The panel's character ROM only covers printable ASCII. Control characters
//! are dropped; non-ASCII characters are replaced with `?`.
//!
//! # Examples
//!
//! ```
//! use doorlock_hardware::{Display, VirtualDisplay};
//!
//! let mut display = VirtualDisplay::new(2, 16);
//! display.write_line(0, "Welcome Home!").unwrap();
//! display.write_char(1, 0, '*').unwrap();
//!
//! assert_eq!(display.line(0).unwrap(), "Welcome Home!   ");
//! assert_eq!(display.line(1).unwrap(), "*               ");
//! ```

use crate::error::{HardwareError, Result};
use crate::traits::Display;
use doorlock_core::constants::{DISPLAY_COLUMNS, DISPLAY_LINES};

/// In-memory character display.
#[derive(Debug, Clone)]
pub struct VirtualDisplay {
    /// Number of lines in the display.
    lines: usize,

    /// Number of columns per line.
    columns: usize,

    /// Current display buffer, each line exactly `columns` characters.
    buffer: Vec<String>,

    /// Number of write operations performed.
    writes: usize,
}

impl VirtualDisplay {
    /// Create a blank display with the given geometry.
    pub fn new(lines: usize, columns: usize) -> Self {
        Self {
            lines,
            columns,
            buffer: vec![" ".repeat(columns); lines],
            writes: 0,
        }
    }

    /// Get text from a specific line, padded to column width.
    ///
    /// # Errors
    ///
    /// Returns an error if the line index is out of bounds.
    pub fn line(&self, line: usize) -> Result<&str> {
        self.check_line(line)?;
        Ok(&self.buffer[line])
    }

    /// Get all lines.
    pub fn lines(&self) -> Vec<&str> {
        self.buffer.iter().map(String::as_str).collect()
    }

    /// Number of writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Column width.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Blank every line.
    pub fn clear(&mut self) {
        for line in &mut self.buffer {
            *line = " ".repeat(self.columns);
        }
    }

    /// Render the panel inside an ASCII frame, one line per display line.
    ///
    /// ```
    /// use doorlock_hardware::{Display, VirtualDisplay};
    ///
    /// let mut display = VirtualDisplay::new(1, 4);
    /// display.write_line(0, "ab").unwrap();
    /// assert_eq!(display.render(), "+----+\n|ab  |\n+----+");
    /// ```
    pub fn render(&self) -> String {
        let border = format!("+{}+", "-".repeat(self.columns));
        let mut out = border.clone();
        for line in &self.buffer {
            out.push_str("\n|");
            out.push_str(line);
            out.push('|');
        }
        out.push('\n');
        out.push_str(&border);
        out
    }

    fn check_line(&self, line: usize) -> Result<()> {
        if line >= self.lines {
            return Err(HardwareError::invalid_data(format!(
                "display line {line} out of range (max {})",
                self.lines.saturating_sub(1)
            )));
        }
        Ok(())
    }
}

impl Default for VirtualDisplay {
    fn default() -> Self {
        Self::new(DISPLAY_LINES, DISPLAY_COLUMNS)
    }
}

impl Display for VirtualDisplay {
    fn write_line(&mut self, line: usize, text: &str) -> Result<()> {
        self.check_line(line)?;
        let sanitized = sanitize_text(text);
        self.buffer[line] = pad_text(&sanitized, self.columns);
        self.writes += 1;
        Ok(())
    }

    fn write_char(&mut self, line: usize, column: usize, ch: char) -> Result<()> {
        self.check_line(line)?;
        if column >= self.columns {
            return Err(HardwareError::invalid_data(format!(
                "display column {column} out of range (max {})",
                self.columns.saturating_sub(1)
            )));
        }

        let ch = sanitize_char(ch).unwrap_or(' ');
        let mut chars: Vec<char> = self.buffer[line].chars().collect();
        chars[column] = ch;
        self.buffer[line] = chars.into_iter().collect();
        self.writes += 1;
        Ok(())
    }
}

/// Truncate text to a maximum number of characters.
///
/// ```
/// use doorlock_hardware::display::truncate_text;
///
/// assert_eq!(truncate_text("Password Incorrect", 16), "Password Incorre");
/// assert_eq!(truncate_text("Short", 10), "Short");
/// ```
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Fit text to exactly `width` characters: longer text is truncated,
/// shorter text is padded with spaces on the right.
///
/// ```
/// use doorlock_hardware::pad_text;
///
/// assert_eq!(pad_text("LOCKED", 10), "LOCKED    ");
/// assert_eq!(pad_text("Password Incorrect", 16), "Password Incorre");
/// ```
pub fn pad_text(text: &str, width: usize) -> String {
    let mut fitted = truncate_text(text, width);
    let len = fitted.chars().count();
    fitted.extend(std::iter::repeat_n(' ', width - len));
    fitted
}

/// Drop control characters and replace non-ASCII ones.
///
/// Leading and trailing spaces are kept: the scrolling banner relies on them.
fn sanitize_text(text: &str) -> String {
    text.chars().filter_map(sanitize_char).collect()
}

fn sanitize_char(ch: char) -> Option<char> {
    match ch {
        c if c.is_control() => None,
        c if c.is_ascii() => Some(c),
        _ => Some('?'),
    }
}
