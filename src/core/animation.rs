//! Frame loop driver
//!
//! A cooperative task: each tick reports the elapsed time, the caller
//! renders one frame and reschedules only while the driver is running.
//! Stopping is an explicit signal rather than tearing down the host.

use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Before the first frame
    Idle,
    Running,
    /// Stop signal received; no further ticks
    Stopped,
}

#[derive(Debug)]
pub struct AnimationDriver {
    state: DriverState,
    /// Clock reading at start (seconds)
    start: f64,
    /// Last elapsed value handed out, keeps time monotonic
    elapsed: f32,
    frames: u64,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self {
            state: DriverState::Idle,
            start: 0.0,
            elapsed: 0.0,
            frames: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// Idle → Running. Later calls are ignored.
    pub fn start(&mut self, now: f64) {
        if self.state != DriverState::Idle {
            return;
        }
        self.state = DriverState::Running;
        self.start = now;
        info!("Animation started");
    }

    /// Stop ticking. The caller stops rescheduling frames.
    pub fn stop(&mut self) {
        if self.state == DriverState::Stopped {
            return;
        }
        self.state = DriverState::Stopped;
        debug!(frames = self.frames, elapsed = self.elapsed, "Animation stopped");
    }

    /// Seconds since start for this frame, or `None` when not running.
    ///
    /// A clock that steps backwards yields the previous value again.
    pub fn tick(&mut self, now: f64) -> Option<f32> {
        if !self.is_running() {
            return None;
        }
        let elapsed = ((now - self.start) as f32).max(self.elapsed);
        self.elapsed = elapsed;
        self.frames += 1;
        Some(elapsed)
    }

    /// Elapsed time of the most recent tick
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Ticks handed out so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_ticks_before_start() {
        let mut driver = AnimationDriver::new();
        assert_eq!(driver.state(), DriverState::Idle);
        assert_eq!(driver.tick(5.0), None);
        assert_eq!(driver.frames(), 0);
    }

    #[test]
    fn ticks_report_time_since_start() {
        let mut driver = AnimationDriver::new();
        driver.start(10.0);
        assert_eq!(driver.tick(10.0), Some(0.0));
        assert_eq!(driver.tick(10.5), Some(0.5));
        assert_eq!(driver.tick(12.0), Some(2.0));
        assert_eq!(driver.frames(), 3);
    }

    #[test]
    fn second_start_does_not_reset_clock() {
        let mut driver = AnimationDriver::new();
        driver.start(1.0);
        driver.start(100.0);
        assert_eq!(driver.tick(3.0), Some(2.0));
    }

    #[test]
    fn time_is_monotonic() {
        let mut driver = AnimationDriver::new();
        driver.start(0.0);
        assert_eq!(driver.tick(4.0), Some(4.0));
        assert_eq!(driver.tick(3.0), Some(4.0));
        assert_eq!(driver.elapsed(), 4.0);
    }

    #[test]
    fn stop_ends_ticking() {
        let mut driver = AnimationDriver::new();
        driver.start(0.0);
        assert!(driver.tick(1.0).is_some());
        driver.stop();
        assert_eq!(driver.state(), DriverState::Stopped);
        assert_eq!(driver.tick(2.0), None);
        // Stopped drivers cannot be restarted
        driver.start(3.0);
        assert_eq!(driver.tick(4.0), None);
    }
}
