//! Time sources for the estimator.
//!
//! The tracker never calls `Instant::now()` directly; it asks a [`Clock`].
//! Production code uses [`SystemClock`]; tests and replays use
//! [`ManualClock`], which only moves when told to.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Source of "now" with sub-second resolution.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Real monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Frozen clock that advances only via [`ManualClock::advance`] or [`ManualClock::set`].
///
/// Clones share the same reading, so a test can keep one handle while the
/// tracker owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    reading: Arc<Mutex<Instant>>,
}

impl ManualClock {
    /// Create a clock frozen at the current real instant.
    pub fn new() -> Self {
        let base = Instant::now();
        Self {
            base,
            reading: Arc::new(Mutex::new(base)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Instant> {
        self.reading.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move the clock forward by `by`, or return `None` and leave the reading
    /// alone when the result does not fit in an `Instant`.
    pub fn try_advance(&self, by: Duration) -> Option<Instant> {
        let mut reading = self.lock();
        let next = reading.checked_add(by)?;
        *reading = next;
        Some(next)
    }

    /// Move the clock forward by `by`.
    ///
    /// Panics if the reading overflows `Instant`, like `Instant + Duration`.
    pub fn advance(&self, by: Duration) {
        let mut reading = self.lock();
        *reading += by;
    }

    /// Move the clock forward by whole seconds.
    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }

    /// Set the reading to `since_base` past the instant the clock was created.
    ///
    /// Panics if the reading overflows `Instant`.
    pub fn set(&self, since_base: Duration) {
        *self.lock() = self.base + since_base;
    }

    /// Time elapsed on this clock since it was created.
    pub fn since_base(&self) -> Duration {
        self.lock().saturating_duration_since(self.base)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.lock()
    }
}
