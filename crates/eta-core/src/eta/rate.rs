//! Exponentially smoothed seconds-per-unit rate.

/// Running rate estimate. `None` until the first sample is folded in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SmoothedRate {
    factor: f64,
    value: Option<f64>,
}

impl SmoothedRate {
    /// `factor` in [0, 1]: 0 keeps only the latest sample, values toward 1
    /// weight history more heavily. Validated by the caller.
    pub fn new(factor: f64) -> Self {
        Self {
            factor,
            value: None,
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Current seconds-per-unit, if any sample has been taken.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Fold in `elapsed_secs / units` and return the new rate.
    /// Returns `None` without touching state when `units` is zero.
    pub fn sample(&mut self, elapsed_secs: f64, units: u64) -> Option<f64> {
        if units == 0 {
            return None;
        }
        let instantaneous = elapsed_secs / units as f64;
        let next = match self.value {
            Some(prev) if self.factor > 0.0 => {
                self.factor * prev + (1.0 - self.factor) * instantaneous
            }
            _ => instantaneous,
        };
        self.value = Some(next);
        Some(next)
    }

    pub fn clear(&mut self) {
        self.value = None;
    }
}
