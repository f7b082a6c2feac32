//! Estimated time remaining.
//!
//! [`EstimatedTimer`] combines a bounded [`Progress`](crate::progress::Progress)
//! counter with a start timestamp taken from an injected
//! [`Clock`](crate::clock::Clock). Every progress mutation after `start`
//! samples the clock and folds `elapsed / elapsed_progress` into an
//! exponentially smoothed seconds-per-unit rate; rendering multiplies that rate
//! by the remaining units and formats the result as `" ETA: HH:MM:SS"`.

mod error;
mod format;
mod rate;
mod timer;

pub use error::EtaError;
pub use format::{format_hms, OutOfBoundsFormat, MAX_DISPLAYABLE_SECS, UNKNOWN_TIME};
pub use rate::SmoothedRate;
pub use timer::{EstimatedTimer, EstimatedTimerOptions, DEFAULT_SMOOTHING};
