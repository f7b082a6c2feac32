//! The estimated-time-remaining tracker.

use std::fmt;
use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};
use crate::progress::Progress;

use super::format::{format_hms, OutOfBoundsFormat, UNKNOWN_TIME};
use super::rate::SmoothedRate;
use super::EtaError;

/// Smoothing factor used when none is given.
pub const DEFAULT_SMOOTHING: f64 = 0.1;

/// Slack added before truncating so `1/49 * 49` still counts as one second.
const TRUNCATION_SLACK_SECS: f64 = 1e-6;

/// Whole seconds in `secs`, truncated toward zero after absorbing f64
/// rounding error (absolute slack for small values, relative for huge ones).
fn whole_seconds(secs: f64) -> u64 {
    let slack = (secs * 1e-12).max(TRUNCATION_SLACK_SECS);
    // Saturates on overflow; NaN becomes 0.
    (secs + slack) as u64
}

/// Construction options for [`EstimatedTimer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatedTimerOptions {
    /// Units of work in the whole task. Must be positive.
    pub total: u64,
    /// Floor for progress; timing measures work done past this point.
    pub starting_at: u64,
    /// Rate smoothing factor in [0, 1].
    pub smoothing: f64,
}

impl EstimatedTimerOptions {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            starting_at: 0,
            smoothing: DEFAULT_SMOOTHING,
        }
    }

    pub fn starting_at(mut self, starting_at: u64) -> Self {
        self.starting_at = starting_at;
        self
    }

    pub fn smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    fn validate(&self) -> Result<(), EtaError> {
        if self.total == 0 {
            return Err(EtaError::InvalidOptions("total must be positive"));
        }
        if self.starting_at > self.total {
            return Err(EtaError::InvalidOptions(
                "starting_at must not exceed total",
            ));
        }
        if !(0.0..=1.0).contains(&self.smoothing) {
            return Err(EtaError::InvalidOptions(
                "smoothing must be a number between 0.0 and 1.0",
            ));
        }
        Ok(())
    }
}

/// Tracks progress against a fixed total and estimates the time remaining.
///
/// Rendering (via `Display`) never reads the clock: the estimate only moves
/// when a progress mutation samples elapsed time.
#[derive(Debug, Clone)]
pub struct EstimatedTimer<C: Clock = SystemClock> {
    clock: C,
    progress: Progress,
    rate: SmoothedRate,
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
    out_of_bounds_format: OutOfBoundsFormat,
}

impl EstimatedTimer<SystemClock> {
    /// Build a timer on the real clock.
    pub fn new(options: EstimatedTimerOptions) -> Result<Self, EtaError> {
        Self::with_clock(options, SystemClock)
    }
}

impl<C: Clock> EstimatedTimer<C> {
    /// Build a timer reading time from `clock`.
    pub fn with_clock(options: EstimatedTimerOptions, clock: C) -> Result<Self, EtaError> {
        options.validate()?;
        Ok(Self {
            clock,
            progress: Progress::new(options.total, options.starting_at),
            rate: SmoothedRate::new(options.smoothing),
            started_at: None,
            stopped_at: None,
            out_of_bounds_format: OutOfBoundsFormat::default(),
        })
    }

    /// Arm the timer. Calling again re-bases elapsed time from now.
    pub fn start(&mut self) {
        let now = self.clock.now();
        self.started_at = Some(now);
        self.stopped_at = None;
        tracing::debug!(
            current = self.progress.current(),
            total = self.progress.total(),
            "eta timer started"
        );
    }

    /// Set progress to `value`, then start.
    pub fn start_at(&mut self, value: u64) -> Result<(), EtaError> {
        self.set_progress(value)?;
        self.start();
        Ok(())
    }

    /// Freeze elapsed time at the current reading. No-op unless running.
    pub fn stop(&mut self) {
        if self.started_at.is_none() || self.stopped_at.is_some() {
            return;
        }
        self.stopped_at = Some(self.clock.now());
        tracing::debug!(elapsed_secs = self.elapsed().as_secs_f64(), "eta timer stopped");
    }

    /// Continue after [`stop`](Self::stop); the stopped span is not counted.
    pub fn resume(&mut self) {
        let (Some(started), Some(stopped)) = (self.started_at, self.stopped_at) else {
            return;
        };
        let paused = self.clock.now().saturating_duration_since(stopped);
        self.started_at = Some(started + paused);
        self.stopped_at = None;
        tracing::debug!(paused_secs = paused.as_secs_f64(), "eta timer resumed");
    }

    /// Set the current progress. Values above `total` are rejected and leave
    /// the timer untouched; values below `starting_at` are clamped to it.
    pub fn set_progress(&mut self, value: u64) -> Result<(), EtaError> {
        if let Err(err) = self.progress.set(value) {
            tracing::warn!(value, total = self.progress.total(), "rejected progress update");
            return Err(err);
        }
        self.sample();
        Ok(())
    }

    /// Advance progress by one unit.
    pub fn increment(&mut self) -> Result<(), EtaError> {
        self.increment_by(1)
    }

    pub fn increment_by(&mut self, step: u64) -> Result<(), EtaError> {
        if let Err(err) = self.progress.increment(step) {
            tracing::warn!(
                step,
                current = self.progress.current(),
                total = self.progress.total(),
                "rejected progress increment"
            );
            return Err(err);
        }
        self.sample();
        Ok(())
    }

    /// Step progress back by one unit, clamped at `starting_at`.
    pub fn decrement(&mut self) {
        self.decrement_by(1);
    }

    pub fn decrement_by(&mut self, step: u64) {
        self.progress.decrement(step);
        self.sample();
    }

    /// Jump progress to `total`.
    pub fn finish(&mut self) {
        let total = self.progress.total();
        // `total` is always within bounds.
        let _ = self.progress.set(total);
        self.sample();
    }

    /// Back to the not-started state: progress at `starting_at`, no start
    /// time, no rate.
    pub fn reset(&mut self) {
        self.progress.reset();
        self.started_at = None;
        self.stopped_at = None;
        self.rate.clear();
        tracing::debug!("eta timer reset");
    }

    pub fn set_out_of_bounds_format(&mut self, format: OutOfBoundsFormat) {
        self.out_of_bounds_format = format;
    }

    /// Set the out-of-bounds format by name (`None` = literal). Unknown names
    /// fail with [`EtaError::InvalidFormat`] and keep the previous format.
    pub fn set_out_of_bounds_format_named(&mut self, name: Option<&str>) -> Result<(), EtaError> {
        match OutOfBoundsFormat::from_name(name) {
            Ok(format) => {
                self.out_of_bounds_format = format;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(name = ?name, "rejected out-of-bounds time format");
                Err(err)
            }
        }
    }

    pub fn out_of_bounds_format(&self) -> OutOfBoundsFormat {
        self.out_of_bounds_format
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn total(&self) -> u64 {
        self.progress.total()
    }

    pub fn starting_at(&self) -> u64 {
        self.progress.starting_at()
    }

    pub fn current(&self) -> u64 {
        self.progress.current()
    }

    pub fn smoothing(&self) -> f64 {
        self.rate.factor()
    }

    pub fn smoothed_rate(&self) -> Option<f64> {
        self.rate.value()
    }

    pub fn percentage_completed(&self) -> u64 {
        self.progress.percentage_completed()
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped_at.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.progress.is_finished()
    }

    /// Time since `start`, up to now or to the moment of `stop`.
    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            None => Duration::ZERO,
            Some(started) => {
                let until = self.stopped_at.unwrap_or_else(|| self.clock.now());
                until.saturating_duration_since(started)
            }
        }
    }

    /// Seconds left at the last sampled rate, if an estimate exists.
    pub fn estimated_seconds_remaining(&self) -> Option<f64> {
        if self.started_at.is_none() || self.progress.elapsed_progress() == 0 {
            return None;
        }
        self.rate
            .value()
            .map(|rate| rate * self.progress.remaining() as f64)
    }

    /// [`estimated_seconds_remaining`](Self::estimated_seconds_remaining) as whole seconds.
    pub fn estimated_whole_seconds_remaining(&self) -> Option<u64> {
        self.estimated_seconds_remaining().map(whole_seconds)
    }

    /// `" Time: HH:MM:SS"` for the whole seconds elapsed since start.
    pub fn elapsed_label(&self) -> String {
        if self.started_at.is_none() {
            return " Time: --:--:--".to_string();
        }
        format!(" Time: {}", format_hms(self.elapsed().as_secs()))
    }

    fn sample(&mut self) {
        if self.started_at.is_none() {
            return;
        }
        let elapsed_secs = self.elapsed().as_secs_f64();
        let units = self.progress.elapsed_progress();
        if let Some(rate) = self.rate.sample(elapsed_secs, units) {
            tracing::trace!(elapsed_secs, units, rate, "eta rate sampled");
        }
    }
}

impl<C: Clock> fmt::Display for EstimatedTimer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.estimated_whole_seconds_remaining() {
            Some(secs) => write!(f, " ETA: {}", self.out_of_bounds_format.render(secs)),
            None => write!(f, " ETA: {}", UNKNOWN_TIME),
        }
    }
}
