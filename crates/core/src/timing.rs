//! Timing module - monotonic clocks and per-category cooldowns
//!
//! Engine calls take an explicit `now_ms` timestamp. A [`Clock`] produces those
//! timestamps: [`MonotonicClock`] for real play, [`ManualClock`] for tests and
//! simulations that step time by hand.

use std::cell::Cell;
use std::time::Instant;

/// Source of monotonic millisecond timestamps.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Simulated time, advanced explicitly.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) -> u64 {
        let next = self.now.get().saturating_add(ms);
        self.now.set(next);
        next
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Rate limiter: fires at most once per `interval_ms`.
///
/// A firing needs strictly more than `interval_ms` since the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    interval_ms: u64,
    last_ms: u64,
}

impl Cooldown {
    pub fn new(interval_ms: u64, now_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: now_ms,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn set_interval(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
    }

    /// Start a fresh interval at `now_ms`.
    pub fn restart(&mut self, now_ms: u64) {
        self.last_ms = now_ms;
    }

    /// Whether the interval has elapsed; if so, records `now_ms` as the firing.
    pub fn ready(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_ms) <= self.interval_ms {
            return false;
        }
        self.last_ms = now_ms;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_needs_strictly_more_than_interval() {
        let mut c = Cooldown::new(50, 0);
        assert!(!c.ready(10));
        assert!(!c.ready(50));
        assert!(c.ready(51));
        assert!(!c.ready(60));
        assert!(c.ready(102));
    }

    #[test]
    fn cooldown_restart_postpones_next_firing() {
        let mut c = Cooldown::new(100, 0);
        c.restart(90);
        assert!(!c.ready(150));
        assert!(c.ready(191));
    }

    #[test]
    fn cooldown_tolerates_time_going_backwards() {
        let mut c = Cooldown::new(100, 500);
        assert!(!c.ready(10));
    }

    #[test]
    fn cooldown_interval_can_shrink() {
        let mut c = Cooldown::new(1000, 0);
        c.set_interval(200);
        assert_eq!(c.interval_ms(), 200);
        assert!(c.ready(201));
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(5);
        assert_eq!(clock.now_ms(), 5);
        assert_eq!(clock.advance(16), 21);
        clock.set(100);
        assert_eq!(clock.now_ms(), 100);
    }

    #[test]
    fn monotonic_clock_does_not_go_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
