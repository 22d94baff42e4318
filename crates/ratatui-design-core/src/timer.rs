//! Time source and single-slot timers.
//!
//! Controllers never read the wall clock themselves. The host passes `now` (a [`Duration`] since
//! an arbitrary origin, usually taken from a [`Clock`]) into every time-dependent call, and asks
//! for the next deadline to bound its event poll timeout.
//!
//! ```
//! use ratatui_design_core::timer::{Clock, ManualClock, Timer};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let mut t = Timer::new();
//! t.arm(clock.now(), Duration::from_millis(50));
//! clock.advance(Duration::from_millis(49));
//! assert!(t.fire(clock.now()).is_none());
//! clock.advance(Duration::from_millis(1));
//! assert!(t.fire(clock.now()).is_some());
//! ```
use std::cell::Cell;
use std::time::Duration;
use std::time::Instant;

pub trait Clock {
    /// Monotonic time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
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
        self.origin.elapsed()
    }
}

/// Virtual clock that only moves when told to. Used by tests and deterministic replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// A cancellable one-shot deadline.
///
/// Holds at most one pending deadline: [`Timer::arm`] replaces whatever was pending, so a
/// controller built on a single `Timer` can never have two outstanding callbacks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Duration>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules the timer `delay` after `now`, cancelling any pending deadline.
    pub fn arm(&mut self, now: Duration, delay: Duration) {
        self.arm_at(now + delay);
    }

    pub fn arm_at(&mut self, deadline: Duration) {
        self.deadline = Some(deadline);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Time left until the deadline, saturating at zero. `None` when idle.
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_sub(now))
    }

    /// Disarms and returns the deadline if it is due at `now`.
    ///
    /// The returned value is the scheduled deadline, not `now`, so periodic users can re-arm from
    /// it without accumulating drift when the host polls late.
    pub fn fire(&mut self, now: Duration) -> Option<Duration> {
        match self.deadline {
            Some(d) if d <= now => {
                self.deadline = None;
                Some(d)
            }
            _ => None,
        }
    }
}

/// Earliest of several optional deadlines.
pub fn next_deadline(deadlines: impl IntoIterator<Item = Option<Duration>>) -> Option<Duration> {
    deadlines.into_iter().flatten().min()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn arm_replaces_pending_deadline() {
        let mut t = Timer::new();
        t.arm(ms(0), ms(100));
        t.arm(ms(10), ms(500));
        assert_eq!(t.deadline(), Some(ms(510)));
        assert_eq!(t.fire(ms(100)), None);
        assert_eq!(t.fire(ms(510)), Some(ms(510)));
        assert!(!t.is_pending());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut t = Timer::new();
        t.arm(ms(0), ms(5));
        t.cancel();
        assert_eq!(t.fire(ms(1_000)), None);
        assert_eq!(t.remaining(ms(0)), None);
    }

    #[test]
    fn late_fire_reports_scheduled_deadline() {
        let mut t = Timer::new();
        t.arm(ms(0), ms(50));
        assert_eq!(t.remaining(ms(20)), Some(ms(30)));
        assert_eq!(t.fire(ms(75)), Some(ms(50)));
    }

    #[test]
    fn next_deadline_skips_idle_timers() {
        assert_eq!(next_deadline([None, Some(ms(30)), Some(ms(10))]), Some(ms(10)));
        assert_eq!(next_deadline([None, None]), None);
    }

    #[test]
    fn manual_clock_moves_only_when_advanced() {
        let c = ManualClock::new();
        assert_eq!(c.now(), Duration::ZERO);
        c.advance_ms(250);
        c.advance(ms(250));
        assert_eq!(c.now(), ms(500));
    }
}
