use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// Source of wall-clock time
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always reports the same instant. Used by tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Repeating timer driven by the event loop rather than a thread.
///
/// The loop asks `is_due` on every pass; once `stop` is called the ticker
/// never fires again.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    /// Create a ticker whose first tick is due immediately
    pub fn start(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: Some(now),
        }
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true once per elapsed interval and re-arms for the next one
    pub fn is_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                // Skip missed ticks instead of firing a burst
                let mut next = due + self.interval;
                while next <= now {
                    next += self.interval;
                }
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }

    /// How long the event loop may block before the next tick, if any
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_fires_immediately() {
        let start = Instant::now();
        let mut ticker = Ticker::start(Duration::from_millis(1000), start);
        assert!(ticker.is_due(start));
        assert!(!ticker.is_due(start + Duration::from_millis(500)));
    }

    #[test]
    fn fires_once_per_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::start(Duration::from_millis(1000), start);
        assert!(ticker.is_due(start));
        assert!(ticker.is_due(start + Duration::from_millis(1000)));
        assert!(!ticker.is_due(start + Duration::from_millis(1500)));
        assert!(ticker.is_due(start + Duration::from_millis(2000)));
    }

    #[test]
    fn missed_ticks_collapse_into_one() {
        let start = Instant::now();
        let mut ticker = Ticker::start(Duration::from_millis(1000), start);
        assert!(ticker.is_due(start));
        let late = start + Duration::from_millis(5500);
        assert!(ticker.is_due(late));
        assert!(!ticker.is_due(late));
        assert_eq!(
            ticker.time_until_next(late),
            Some(Duration::from_millis(500))
        );
    }

    #[test]
    fn stopped_ticker_never_fires() {
        let start = Instant::now();
        let mut ticker = Ticker::start(Duration::from_millis(1000), start);
        ticker.stop();
        assert!(!ticker.is_running());
        assert!(!ticker.is_due(start + Duration::from_secs(10)));
        assert_eq!(ticker.time_until_next(start), None);
    }
}
