//! Bounded progress counter (current vs. total, with a floor).
//!
//! Used by the estimator to track how much work has been done since timing
//! began; the estimator derives its rate from `elapsed_progress`.

use crate::eta::EtaError;

/// Progress through a task measured in abstract units.
///
/// Invariant: `starting_at <= current <= total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    total: u64,
    starting_at: u64,
    current: u64,
}

impl Progress {
    /// Create a counter at `starting_at`. Callers validate `starting_at <= total`.
    pub(crate) fn new(total: u64, starting_at: u64) -> Self {
        Self {
            total,
            starting_at,
            current: starting_at,
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn starting_at(&self) -> u64 {
        self.starting_at
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    /// Set the current value. Values above `total` are rejected and leave the
    /// counter untouched; values below `starting_at` are clamped up to it.
    pub fn set(&mut self, value: u64) -> Result<(), EtaError> {
        if value > self.total {
            return Err(EtaError::InvalidProgress {
                requested: u128::from(value),
                total: self.total,
            });
        }
        self.current = value.max(self.starting_at);
        Ok(())
    }

    /// Advance by `step`. Overflow counts as exceeding `total`.
    pub fn increment(&mut self, step: u64) -> Result<(), EtaError> {
        match self.current.checked_add(step) {
            Some(next) => self.set(next),
            None => Err(EtaError::InvalidProgress {
                requested: u128::from(self.current) + u128::from(step),
                total: self.total,
            }),
        }
    }

    /// Step back by `step`, never below `starting_at`.
    pub fn decrement(&mut self, step: u64) {
        self.current = self.current.saturating_sub(step).max(self.starting_at);
    }

    /// Return to `starting_at`.
    pub fn reset(&mut self) {
        self.current = self.starting_at;
    }

    /// Work completed since timing began (`current - starting_at`).
    pub fn elapsed_progress(&self) -> u64 {
        self.current - self.starting_at
    }

    /// Work left until `total`.
    pub fn remaining(&self) -> u64 {
        self.total - self.current
    }

    pub fn is_finished(&self) -> bool {
        self.current == self.total
    }

    /// Whole percent of `total` reached, rounded down.
    pub fn percentage_completed(&self) -> u64 {
        ((self.current as u128 * 100) / self.total as u128) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_above_total_is_rejected_and_keeps_value() {
        let mut p = Progress::new(100, 0);
        p.set(40).unwrap();
        let err = p.set(101).unwrap_err();
        assert!(matches!(
            err,
            EtaError::InvalidProgress {
                requested: 101,
                total: 100
            }
        ));
        assert_eq!(p.current(), 40);
    }

    #[test]
    fn set_below_floor_clamps() {
        let mut p = Progress::new(100, 10);
        p.set(3).unwrap();
        assert_eq!(p.current(), 10);
        assert_eq!(p.elapsed_progress(), 0);
    }

    #[test]
    fn decrement_clamps_at_floor() {
        let mut p = Progress::new(100, 5);
        p.set(7).unwrap();
        p.decrement(1);
        assert_eq!(p.current(), 6);
        p.decrement(50);
        assert_eq!(p.current(), 5);
    }

    #[test]
    fn increment_overflow_is_rejected() {
        let mut p = Progress::new(u64::MAX, 0);
        p.set(u64::MAX - 1).unwrap();
        let err = p.increment(5).unwrap_err();
        assert_eq!(
            err,
            EtaError::InvalidProgress {
                requested: u128::from(u64::MAX) + 4,
                total: u64::MAX,
            }
        );
        assert_eq!(p.current(), u64::MAX - 1);
        p.increment(1).unwrap();
        assert!(p.is_finished());
    }

    #[test]
    fn percentage_rounds_down() {
        let mut p = Progress::new(3, 0);
        p.set(2).unwrap();
        assert_eq!(p.percentage_completed(), 66);
        p.set(3).unwrap();
        assert_eq!(p.percentage_completed(), 100);
    }

    #[test]
    fn remaining_counts_down_to_zero() {
        let mut p = Progress::new(10, 2);
        assert_eq!(p.remaining(), 8);
        p.set(10).unwrap();
        assert_eq!(p.remaining(), 0);
    }
}
