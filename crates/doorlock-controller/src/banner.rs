//! Idle banner scrolled across the detail line.
//!
//! The banner shows a window of `width` characters and slides it one
//! character per interval. After showing the window at `index` it advances;
//! once the index reaches `len - width` it wraps to 0, so the window never
//! runs past the end of the text.
//!
//! ```
//! use doorlock_controller::ScrollingBanner;
//! use doorlock_core::Timestamp;
//!
//! let mut banner = ScrollingBanner::new("abcdef", 4, 100);
//! banner.resume(Timestamp::ZERO);
//!
//! assert_eq!(banner.poll(Timestamp::from_millis(99)), None);
//! assert_eq!(banner.poll(Timestamp::from_millis(100)).as_deref(), Some("abcd"));
//! assert_eq!(banner.poll(Timestamp::from_millis(200)).as_deref(), Some("bcde"));
//! assert_eq!(banner.poll(Timestamp::from_millis(300)).as_deref(), Some("abcd"));
//! ```

use doorlock_core::Timestamp;

/// Clock-driven scrolling text.
#[derive(Debug, Clone)]
pub struct ScrollingBanner {
    text: Vec<char>,
    width: usize,
    interval_ms: u64,
    index: usize,
    last_step: Timestamp,
    active: bool,
}

impl ScrollingBanner {
    /// Create a suspended banner.
    pub fn new(text: &str, width: usize, interval_ms: u64) -> Self {
        Self {
            text: text.chars().collect(),
            width,
            interval_ms,
            index: 0,
            last_step: Timestamp::ZERO,
            active: false,
        }
    }

    /// Start scrolling; the next window is shown one interval after `now`.
    ///
    /// The position is kept across suspend and resume.
    pub fn resume(&mut self, now: Timestamp) {
        self.active = true;
        self.last_step = now;
    }

    /// Stop scrolling.
    pub fn suspend(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Index of the next window.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Return the window to show if an interval has elapsed, then advance.
    pub fn poll(&mut self, now: Timestamp) -> Option<String> {
        if !self.active || !now.has_elapsed(self.last_step, self.interval_ms) {
            return None;
        }
        self.last_step = now;

        let window = self.window();
        self.index += 1;
        if self.index >= self.text.len().saturating_sub(self.width) {
            self.index = 0;
        }
        Some(window)
    }

    /// Text at the current index, `width` characters or the rest of the text.
    pub fn window(&self) -> String {
        let start = self.index.min(self.text.len());
        let end = (start + self.width).min(self.text.len());
        self.text[start..end].iter().collect()
    }
}
