//! Render counters and the engine event log.
//!
//! Both live inside the engine so a device can show them on-screen without a
//! heap or a logger backend.
//!
//! # Usage
//!
//! ```ignore
//! let mut log = DebugLog::new();
//! log.push("begin");
//! log.push_fmt(format_args!("mood {}", mood.label()));
//!
//! for line in log.iter() {
//!     println!("{}", line);
//! }
//! ```

use core::fmt::{self, Write};

use heapless::{Deque, String};

// =============================================================================
// Debug Log Configuration
// =============================================================================

/// Maximum number of log lines to keep in the ring buffer.
pub const LOG_BUFFER_SIZE: usize = 8;

/// Maximum characters per log line.
pub const LOG_LINE_LENGTH: usize = 40;

// =============================================================================
// Render Statistics
// =============================================================================

/// Counters updated by the engine and the render planner.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct RenderStats {
    /// Frames that passed the frame-rate gate and were drawn.
    pub frames_rendered: u32,
    /// `update` calls rejected by the frame-rate gate.
    pub frames_skipped: u32,
    /// Dirty regions cleared (eyes, hidden eyes, sweat drops).
    pub regions_cleared: u32,
    /// Total area of those regions.
    pub pixels_cleared: u64,
    /// Eye shapes filled (closed eyes are not counted).
    pub eyes_drawn: u32,
    /// Blinks started, manual and automatic.
    pub blinks: u32,
    /// Gaze changes made by idle mode.
    pub idle_moves: u32,
}

impl RenderStats {
    pub const fn new() -> Self {
        Self {
            frames_rendered: 0,
            frames_skipped: 0,
            regions_cleared: 0,
            pixels_cleared: 0,
            eyes_drawn: 0,
            blinks: 0,
            idle_moves: 0,
        }
    }

    #[inline]
    pub const fn record_clear(
        &mut self,
        area: u32,
    ) {
        self.regions_cleared += 1;
        self.pixels_cleared += area as u64;
    }

    /// Share of `update` calls that rendered, in percent.
    pub fn render_ratio_pct(&self) -> u32 {
        let total = self.frames_rendered + self.frames_skipped;
        if total == 0 { 0 } else { self.frames_rendered * 100 / total }
    }
}

// =============================================================================
// Debug Log Ring Buffer
// =============================================================================

/// Ring buffer of engine events.
///
/// Stores the last `LOG_BUFFER_SIZE` messages. Old messages are dropped when
/// the buffer is full; long messages are truncated.
pub struct DebugLog {
    buffer: Deque<String<LOG_LINE_LENGTH>, LOG_BUFFER_SIZE>,
}

impl DebugLog {
    /// Create a new empty debug log.
    pub const fn new() -> Self { Self { buffer: Deque::new() } }

    /// Push a log message. If buffer is full, oldest message is dropped.
    pub fn push(
        &mut self,
        msg: &str,
    ) {
        let mut line = Line(String::new());
        line.write_str(msg).ok();
        self.push_line(line.0);
    }

    /// Push a formatted message without allocating.
    pub fn push_fmt(
        &mut self,
        args: fmt::Arguments<'_>,
    ) {
        let mut line = Line(String::new());
        line.write_fmt(args).ok();
        self.push_line(line.0);
    }

    fn push_line(
        &mut self,
        line: String<LOG_LINE_LENGTH>,
    ) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }
        self.buffer.push_back(line).ok();
    }

    /// Iterate over log messages (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.buffer.iter().map(|line| line.as_str()) }

    /// Most recent message.
    pub fn last(&self) -> Option<&str> { self.buffer.back().map(|line| line.as_str()) }

    #[inline]
    pub fn len(&self) -> usize { self.buffer.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }

    pub fn clear(&mut self) { self.buffer.clear(); }
}

impl Default for DebugLog {
    fn default() -> Self { Self::new() }
}

/// Fixed-size line that silently drops characters past its capacity.
struct Line(String<LOG_LINE_LENGTH>);

impl Write for Line {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
