//! Timestamp-based rate limiting for cooperative subsystems.
//!
//! Every subsystem in the control loop is called once per iteration and
//! decides for itself whether enough time has passed to do real work. A
//! denied call is a no-op for the caller, never a wait.

use embassy_time::{Duration, Instant};

/// Minimum-interval gate over a monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    interval: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Grant the call if the interval has elapsed since the last granted
    /// one. The first call is always granted.
    pub fn poll(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last {
            if now.as_millis() < last.as_millis() + self.interval.as_millis() {
                return false;
            }
        }
        self.last = Some(now);
        true
    }

    /// Forget the last grant so the next `poll` fires immediately.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
