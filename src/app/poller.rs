//! Repeating timer that drives the status poll.
//!
//! The timer is driven from the egui update loop: every frame the app
//! asks [`PollTimer::due`] whether the interval has elapsed and, if so,
//! fetches the instance state. Firing re-arms the timer; cancelling it
//! (on shutdown) stops it from ever firing again.

use std::time::{Duration, Instant};

/// Fixed-interval repeating timer with explicit cancellation.
pub struct PollTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl PollTimer {
    /// Poll interval matching the status refresh cadence of the UI.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3);

    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Arm the timer. The first tick fires immediately at `now` so the
    /// status indicator populates right after startup.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now);
    }

    /// Stop the timer; it will not fire until started again.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true when the timer fires at `now`, re-arming itself for
    /// one interval later. A cancelled timer never fires.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(deadline) if now >= deadline => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

impl Default for PollTimer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_immediately_after_start() {
        let mut timer = PollTimer::new(Duration::from_secs(3));
        let now = Instant::now();

        assert!(!timer.due(now), "unstarted timer must not fire");

        timer.start(now);
        assert!(timer.due(now));
    }

    #[test]
    fn test_rearms_one_interval_after_firing() {
        let mut timer = PollTimer::new(Duration::from_secs(3));
        let now = Instant::now();
        timer.start(now);
        assert!(timer.due(now));

        assert!(!timer.due(now + Duration::from_secs(1)));
        assert!(!timer.due(now + Duration::from_millis(2999)));
        assert!(timer.due(now + Duration::from_secs(3)));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timer = PollTimer::new(Duration::from_secs(3));
        let now = Instant::now();
        timer.start(now);
        timer.cancel();

        assert!(!timer.is_running());
        assert!(!timer.due(now + Duration::from_secs(60)));
    }
}
