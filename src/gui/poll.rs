// Fixed-interval poll scheduling driven by the frame loop

use std::time::{Duration, Instant};

/// Fires once per interval when checked from the UI update loop.
/// A fresh timer is due immediately.
#[derive(Debug, Clone)]
pub struct PollTimer {
    interval: Duration,
    last: Option<Instant>,
}

impl PollTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Returns true and restarts the interval if it has elapsed at `now`.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Time left until the timer fires again.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last {
            Some(last) => self.interval.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_immediately_then_once_per_interval() {
        let start = Instant::now();
        let mut timer = PollTimer::new(Duration::from_secs(2));

        assert!(timer.due(start));
        assert!(!timer.due(start + Duration::from_millis(1999)));
        assert!(timer.due(start + Duration::from_secs(2)));
        assert!(!timer.due(start + Duration::from_secs(3)));
    }

    #[test]
    fn remaining_counts_down() {
        let start = Instant::now();
        let mut timer = PollTimer::new(Duration::from_secs(5));
        assert_eq!(timer.remaining(start), Duration::ZERO);

        timer.due(start);
        assert_eq!(timer.remaining(start + Duration::from_secs(1)), Duration::from_secs(4));
        assert_eq!(timer.remaining(start + Duration::from_secs(9)), Duration::ZERO);
    }
}
