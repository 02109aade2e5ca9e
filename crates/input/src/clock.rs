//! Time source for the interactive loop, plus the idle timer.

use std::time::{Duration, Instant};

pub trait Clock {
    /// Time elapsed since the clock started
    fn now(&self) -> Duration;

    fn sleep(&mut self, duration: Duration);
}

/// Wall clock; `sleep` blocks the thread
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock; `sleep` advances time instantly
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.advance(duration);
    }
}

/// Fires once per `delay` of inactivity
#[derive(Debug, Clone, Copy)]
pub struct IdleTimer {
    delay: Duration,
    last: Duration,
}

impl IdleTimer {
    pub fn new(delay: Duration, now: Duration) -> Self {
        Self { delay, last: now }
    }

    /// Record activity
    pub fn touch(&mut self, now: Duration) {
        self.last = now;
    }

    /// True once `delay` has passed since the last activity; restarts the timer
    pub fn fire(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last) >= self.delay {
            self.last = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn idle_timer_fires_once_per_delay() {
        let mut timer = IdleTimer::new(SECOND, Duration::ZERO);
        assert!(!timer.fire(Duration::from_millis(999)));
        assert!(timer.fire(SECOND));
        assert!(!timer.fire(Duration::from_millis(1500)));
        assert!(timer.fire(2 * SECOND));
    }

    #[test]
    fn touch_postpones_the_next_fire() {
        let mut timer = IdleTimer::new(SECOND, Duration::ZERO);
        timer.touch(Duration::from_millis(900));
        assert!(!timer.fire(SECOND));
        assert!(timer.fire(Duration::from_millis(1900)));
    }

    #[test]
    fn manual_clock_sleep_advances_time() {
        let mut clock = ManualClock::new();
        clock.sleep(Duration::from_millis(10));
        clock.sleep(Duration::from_millis(10));
        assert_eq!(clock.now(), Duration::from_millis(20));
    }
}
