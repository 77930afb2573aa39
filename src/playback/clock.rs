use std::time::{Duration, Instant};

/// Default interval between animation ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Fixed-rate animation clock, polled by the host loop.
///
/// Overdue intervals coalesce into a single tick, so a slow render only
/// slows the animation down.
#[derive(Debug, Clone)]
pub struct Clock {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Clock {
    /// A stopped clock.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Start ticking one interval from `now`. No-op if already running.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }

    /// Stop ticking. No-op if already stopped.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// True if a tick is due at `now`; schedules the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// How long the host may wait for input before the next tick, capped at `idle`.
    pub fn timeout(&self, now: Instant, idle: Duration) -> Duration {
        match self.next_due {
            Some(due) => due.saturating_duration_since(now).min(idle),
            None => idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_stopped_clock_never_fires() {
        let t0 = Instant::now();
        let mut clock = Clock::new(10 * MS);
        assert!(!clock.is_running());
        assert!(!clock.poll(t0 + 1000 * MS));
    }

    #[test]
    fn test_fires_after_interval() {
        let t0 = Instant::now();
        let mut clock = Clock::new(10 * MS);
        clock.start(t0);
        assert!(!clock.poll(t0 + 5 * MS));
        assert!(clock.poll(t0 + 10 * MS));
        assert!(!clock.poll(t0 + 11 * MS));
        assert!(clock.poll(t0 + 20 * MS));
    }

    #[test]
    fn test_overdue_ticks_coalesce() {
        let t0 = Instant::now();
        let mut clock = Clock::new(10 * MS);
        clock.start(t0);
        assert!(clock.poll(t0 + 95 * MS));
        assert!(!clock.poll(t0 + 96 * MS));
    }

    #[test]
    fn test_start_stop_idempotent() {
        let t0 = Instant::now();
        let mut clock = Clock::new(10 * MS);
        clock.start(t0);
        clock.start(t0 + 8 * MS);
        assert!(clock.poll(t0 + 10 * MS));
        clock.stop();
        clock.stop();
        assert!(!clock.is_running());
        assert!(!clock.poll(t0 + 100 * MS));
    }

    #[test]
    fn test_timeout() {
        let t0 = Instant::now();
        let mut clock = Clock::new(10 * MS);
        assert_eq!(clock.timeout(t0, 50 * MS), 50 * MS);
        clock.start(t0);
        assert_eq!(clock.timeout(t0 + 4 * MS, 50 * MS), 6 * MS);
        assert_eq!(clock.timeout(t0 + 40 * MS, 50 * MS), Duration::ZERO);
    }

    #[test]
    fn test_zero_interval_is_raised() {
        assert_eq!(Clock::new(Duration::ZERO).interval(), MS);
    }
}
