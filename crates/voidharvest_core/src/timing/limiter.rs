//! Cooperative, non-blocking frame pacing.

use std::time::{Duration, Instant};

/// Gate that admits at most `fps` frames per second.
///
/// `allow` never blocks; the host is expected to poll it and skip the
/// frame when it returns false.
#[derive(Debug)]
pub struct FrameLimiter {
    interval: Duration,
    last: Option<Instant>,
}

impl FrameLimiter {
    /// Creates a limiter targeting `fps` frames per second.
    ///
    /// A zero target falls back to 60.
    #[must_use]
    pub fn new(fps: u32) -> Self {
        let fps = if fps == 0 { 60 } else { fps };
        Self {
            interval: Duration::from_secs(1) / fps,
            last: None,
        }
    }

    /// Returns true if at least one frame interval has elapsed since the
    /// last allowed call, recording the new baseline when it has.
    pub fn allow(&mut self) -> bool {
        let now = Instant::now();
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// The configured frame interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}
