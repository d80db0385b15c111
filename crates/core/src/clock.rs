//! Time source for call timestamps.
//!
//! The caller stamps every draw with [`Clock::now`]. Sessions use
//! [`SystemClock`]; tests use [`StepClock`] so inter-call timings are exact.

use std::cell::Cell;

use chrono::{DateTime, Duration, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic clock: each reading returns the previous one plus `step`.
///
/// The first reading returns `start`.
#[derive(Debug, Clone)]
pub struct StepClock {
    next: Cell<DateTime<Utc>>,
    step: Duration,
}

impl StepClock {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next: Cell::new(start),
            step,
        }
    }

    /// Starts at the Unix epoch.
    pub fn from_millis(step_ms: i64) -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH, Duration::milliseconds(step_ms))
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let now = self.next.get();
        self.next.set(now + self.step);
        now
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_clock_advances_per_reading() {
        let clock = StepClock::from_millis(250);
        let a = clock.now();
        let b = clock.now();
        let c = clock.now();
        assert_eq!(a, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!((b - a).num_milliseconds(), 250);
        assert_eq!((c - b).num_milliseconds(), 250);
    }
}
