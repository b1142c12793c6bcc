//! Frame timing measurements.
//!
//! Engine-side counters live in [`roboeyes::profiling::RenderStats`]; this
//! adds the wall-clock side that needs `std::time`.

use std::time::{Duration, Instant};

/// Frame timing statistics of the simulator loop.
pub struct FrameMetrics {
    // Frame timing (microseconds)
    pub frame_time_us: u32,
    pub update_time_us: u32,
    pub sleep_time_us: u32,

    // Statistics
    pub frame_time_min_us: u32,
    pub frame_time_max_us: u32,
    frame_time_avg_us: f32,

    pub total_frames: u64,
    start_time: Instant,
}

impl FrameMetrics {
    const EMA_ALPHA: f32 = 0.1;

    pub fn new() -> Self {
        Self {
            frame_time_us: 0,
            update_time_us: 0,
            sleep_time_us: 0,
            frame_time_min_us: u32::MAX,
            frame_time_max_us: 0,
            frame_time_avg_us: 0.0,
            total_frames: 0,
            start_time: Instant::now(),
        }
    }

    /// Record timing for one loop iteration.
    pub fn record_frame(
        &mut self,
        total_time: Duration,
        update_time: Duration,
        sleep_time: Duration,
    ) {
        let total_us = total_time.as_micros() as u32;

        self.frame_time_us = total_us;
        self.update_time_us = update_time.as_micros() as u32;
        self.sleep_time_us = sleep_time.as_micros() as u32;
        self.frame_time_min_us = self.frame_time_min_us.min(total_us);
        self.frame_time_max_us = self.frame_time_max_us.max(total_us);

        if self.total_frames == 0 {
            self.frame_time_avg_us = total_us as f32;
        } else {
            self.frame_time_avg_us =
                Self::EMA_ALPHA.mul_add(total_us as f32, (1.0 - Self::EMA_ALPHA) * self.frame_time_avg_us);
        }

        self.total_frames += 1;
    }

    #[inline]
    pub const fn frame_time_avg_us(&self) -> u32 { self.frame_time_avg_us as u32 }

    /// Milliseconds since start, the clock fed to the engine.
    #[inline]
    pub fn uptime_ms(&self) -> u64 { self.start_time.elapsed().as_millis() as u64 }
}

impl Default for FrameMetrics {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_frame_min_max() {
        let mut metrics = FrameMetrics::new();
        for us in [20_000, 15_000, 25_000] {
            metrics.record_frame(Duration::from_micros(us), Duration::from_micros(1000), Duration::ZERO);
        }
        assert_eq!(metrics.total_frames, 3);
        assert_eq!(metrics.frame_time_min_us, 15_000);
        assert_eq!(metrics.frame_time_max_us, 25_000);
        assert_eq!(metrics.update_time_us, 1000);
    }

    #[test]
    fn test_first_frame_sets_average() {
        let mut metrics = FrameMetrics::new();
        metrics.record_frame(Duration::from_micros(33_000), Duration::ZERO, Duration::ZERO);
        assert_eq!(metrics.frame_time_avg_us(), 33_000);
    }
}
