//! Frame clock: wall-clock time for the render loop.
//!
//! The clock starts in the stopped state. [`FrameClock::start`] records the
//! epoch; each [`FrameClock::tick`] then reports seconds elapsed since that
//! epoch, which the render loop writes into the time uniform before drawing.

use std::time::Instant;

/// Monotonic per-frame timing.
#[derive(Debug)]
pub struct FrameClock {
    epoch: Option<Instant>,
    last_tick: Option<Instant>,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
}

impl FrameClock {
    /// Create a stopped clock.
    pub fn new() -> Self {
        Self {
            epoch: None,
            last_tick: None,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
        }
    }

    /// Transition stopped -> running, recording the epoch. Starting an
    /// already-running clock keeps the original epoch.
    pub fn start(&mut self) {
        if self.epoch.is_none() {
            let now = Instant::now();
            self.epoch = Some(now);
            self.last_tick = Some(now);
        }
    }

    pub fn is_running(&self) -> bool {
        self.epoch.is_some()
    }

    /// Advance one frame and return elapsed seconds since the epoch.
    ///
    /// Elapsed time is non-decreasing across ticks. Ticking a stopped clock
    /// returns 0.0 and advances nothing.
    pub fn tick(&mut self) -> f32 {
        let Some(epoch) = self.epoch else {
            return 0.0;
        };
        let now = Instant::now();
        self.elapsed_secs = now.duration_since(epoch).as_secs_f32();
        if let Some(last) = self.last_tick {
            self.delta_secs = now.duration_since(last).as_secs_f32();
        }
        self.last_tick = Some(now);
        self.frame_count += 1;
        self.elapsed_secs
    }

    /// Elapsed seconds at the last tick.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Seconds between the last two ticks.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Ticks since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn clock_starts_stopped() {
        let clock = FrameClock::new();
        assert!(!clock.is_running());
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn tick_before_start_is_a_no_op() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.frame(), 0);
    }

    #[test]
    fn elapsed_is_non_decreasing_across_ticks() {
        let mut clock = FrameClock::new();
        clock.start();
        let mut last = 0.0;
        for _ in 0..20 {
            let elapsed = clock.tick();
            assert!(elapsed >= last);
            last = elapsed;
        }
        assert_eq!(clock.frame(), 20);
    }

    #[test]
    fn elapsed_tracks_wall_clock() {
        let mut clock = FrameClock::new();
        clock.start();
        thread::sleep(Duration::from_millis(20));
        let elapsed = clock.tick();
        assert!(elapsed >= 0.02);
        assert!(clock.delta() >= 0.02);
    }

    #[test]
    fn restart_keeps_original_epoch() {
        let mut clock = FrameClock::new();
        clock.start();
        thread::sleep(Duration::from_millis(10));
        clock.start();
        let elapsed = clock.tick();
        assert!(elapsed >= 0.01);
    }
}
