//! Simulation clock.

use std::time::Duration;

/// Tracks simulated time. The session feeds each tick's (clipped) frame
/// duration through [`Time::advance`], so alert timing runs on simulation
/// time rather than the wall clock.
#[derive(Debug, Default)]
pub struct Time {
    /// Total elapsed simulated time.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
}

impl Time {
    /// Create a new clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame of the given duration.
    pub fn advance(&mut self, delta: Duration) {
        self.elapsed += delta;
        self.frame_count += 1;
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get total elapsed time as Duration.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
