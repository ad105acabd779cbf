//! Global monotonic tick counter and per-frame delta tracking.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

/// Centralized frame timing for the whole process.
#[derive(Debug, Clone)]
pub struct GlobalTimer {
    start_time: Instant,
    current_tick: u64,
    last_update: Instant,
    delta_time: f64,
    frame_count: u64,
    paused: bool,
}

impl GlobalTimer {
    /// Creates a timer starting now.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            current_tick: 0,
            last_update: now,
            delta_time: 0.0,
            frame_count: 0,
            paused: false,
        }
    }

    /// Advances the timer by one frame. A no-op while paused.
    pub fn update(&mut self) {
        if self.paused {
            return;
        }
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_update).as_secs_f64();
        self.last_update = now;
        self.current_tick += 1;
        self.frame_count += 1;
    }

    /// The current tick count.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.current_tick
    }

    /// Seconds between the two most recent updates.
    #[must_use]
    pub const fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Total frames processed.
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Wall-clock time since the timer was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Stops the tick counter.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes the tick counter, resetting the delta baseline so the
    /// paused interval does not produce one huge delta.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.last_update = Instant::now();
        }
    }

    /// Returns true while paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }
}

impl Default for GlobalTimer {
    fn default() -> Self {
        Self::new()
    }
}

fn global() -> &'static RwLock<GlobalTimer> {
    static TIMER: OnceLock<RwLock<GlobalTimer>> = OnceLock::new();
    TIMER.get_or_init(|| RwLock::new(GlobalTimer::new()))
}

/// Advances the process-wide timer by one frame.
///
/// The only mutation path to the global timer; readers may call the
/// accessor functions from any thread.
pub fn update_global_timer() {
    global().write().update();
}

/// Current tick count of the process-wide timer.
#[must_use]
pub fn current_tick() -> u64 {
    global().read().tick()
}

/// Delta seconds of the most recent global timer update.
#[must_use]
pub fn delta_time() -> f64 {
    global().read().delta_time()
}

/// Total frames processed by the process-wide timer.
#[must_use]
pub fn frame_count() -> u64 {
    global().read().frame_count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_advances_tick_and_delta() {
        let mut timer = GlobalTimer::new();
        assert_eq!(timer.tick(), 0);
        timer.update();
        assert_eq!(timer.tick(), 1);
        assert_eq!(timer.frame_count(), 1);
        assert!(timer.delta_time() >= 0.0);
    }

    #[test]
    fn pause_freezes_tick() {
        let mut timer = GlobalTimer::new();
        timer.pause();
        assert!(timer.is_paused());
        timer.update();
        assert_eq!(timer.tick(), 0);
        timer.resume();
        timer.update();
        assert_eq!(timer.tick(), 1);
    }

    #[test]
    fn global_timer_monotonic() {
        let before = current_tick();
        update_global_timer();
        update_global_timer();
        assert!(current_tick() >= before + 2);
        let _ = delta_time();
        let _ = frame_count();
    }
}
