use std::time::{Duration, Instant};

/// Periodic deadline for auto-advance.
///
/// Fires at most once per `poll_due` call. When the caller falls behind by
/// several periods the missed ones are dropped, so a slow frame never turns
/// into a burst of steps.
#[derive(Debug, Clone)]
pub struct AutoAdvance {
    /// Time between ticks
    interval: Duration,
    /// When the next tick is due
    next_due: Instant,
}

impl AutoAdvance {
    /// Start ticking; the first tick is due one interval after `now`
    pub fn start(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Returns true if a tick is due at `now`, and schedules the next one
    pub fn poll_due(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }

        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }

    /// Time until the next tick, zero if it is already due
    pub fn time_remaining(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_before_interval() {
        let t0 = Instant::now();
        let mut timer = AutoAdvance::start(Duration::from_millis(200), t0);

        assert!(!timer.poll_due(t0));
        assert!(!timer.poll_due(t0 + Duration::from_millis(199)));
        assert_eq!(
            timer.time_remaining(t0 + Duration::from_millis(50)),
            Duration::from_millis(150)
        );
    }

    #[test]
    fn test_fires_once_per_period() {
        let t0 = Instant::now();
        let mut timer = AutoAdvance::start(Duration::from_millis(100), t0);

        assert!(timer.poll_due(t0 + Duration::from_millis(100)));
        assert!(!timer.poll_due(t0 + Duration::from_millis(150)));
        assert!(timer.poll_due(t0 + Duration::from_millis(200)));
        assert_eq!(timer.next_due(), t0 + Duration::from_millis(300));
    }

    #[test]
    fn test_missed_periods_are_coalesced() {
        let t0 = Instant::now();
        let mut timer = AutoAdvance::start(Duration::from_millis(100), t0);

        let late = t0 + Duration::from_millis(1000);
        assert!(timer.poll_due(late));
        assert!(!timer.poll_due(late));
        assert_eq!(timer.next_due(), late + Duration::from_millis(100));
        assert_eq!(timer.time_remaining(late + Duration::from_secs(5)), Duration::ZERO);
    }
}
