//! Cooperative scheduling primitives: clocks, periodic timers and cancellation.
//!
//! Nothing here sleeps or spawns. A driver asks a [`PeriodicTimer`] how many
//! times it came due since the last poll and reacts on its own thread, so the
//! same code runs against the wall clock in the terminal and against a
//! [`ManualClock`] in tests.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Monotonic time source.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// Wall clock measured from its creation.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a clock whose origin is now.
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

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Creates a clock stopped at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Jumps to an absolute time. Moving backwards is ignored.
    pub fn set(&self, to: Duration) {
        if to > self.now.get() {
            self.now.set(to);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Shared flag that cancels scheduled work. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Repeated calls have no further effect.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// True once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Fires every `period` while armed.
#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    period: Duration,
    next_due: Option<Duration>,
    max_catch_up: u32,
}

impl PeriodicTimer {
    /// Missed firings replayed after a stall, at most.
    pub const DEFAULT_MAX_CATCH_UP: u32 = 5;

    /// Creates a disarmed timer.
    ///
    /// A zero period is raised to one millisecond.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next_due: None,
            max_catch_up: Self::DEFAULT_MAX_CATCH_UP,
        }
    }

    /// Limits how many missed firings a single poll reports.
    pub fn with_max_catch_up(mut self, max_catch_up: u32) -> Self {
        self.max_catch_up = max_catch_up.max(1);
        self
    }

    /// Arms the timer so it first fires one period after `now`.
    #[instrument(skip(self), fields(period_ms = self.period.as_millis() as u64))]
    pub fn arm(&mut self, now: Duration) {
        self.next_due = Some(now + self.period);
    }

    /// Arms the timer so it fires on the next poll.
    pub fn arm_immediate(&mut self, now: Duration) {
        self.next_due = Some(now);
    }

    /// Disarms the timer.
    pub fn disarm(&mut self) {
        if self.next_due.take().is_some() {
            debug!(period_ms = self.period.as_millis() as u64, "Timer disarmed");
        }
    }

    /// True while a firing is pending.
    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Time of the next firing, if armed.
    pub fn next_due(&self) -> Option<Duration> {
        self.next_due
    }

    /// Timer period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of firings due at `now`, advancing the schedule past them.
    ///
    /// After a stall longer than `max_catch_up` periods the backlog is
    /// dropped and the schedule restarts from `now`.
    pub fn poll(&mut self, now: Duration) -> u32 {
        let Some(due) = self.next_due else {
            return 0;
        };
        if now < due {
            return 0;
        }

        let behind = now - due;
        let missed = behind.as_nanos() / self.period.as_nanos();
        let fired = missed.saturating_add(1);
        if fired > u128::from(self.max_catch_up) {
            self.next_due = Some(now + self.period);
            return self.max_catch_up;
        }

        // fired <= max_catch_up, which is a u32
        let fired = fired as u32;
        self.next_due = Some(due + self.period * fired);
        fired
    }
}
