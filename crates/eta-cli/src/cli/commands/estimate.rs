//! `eta estimate` – render the ETA for one progress sample.

use anyhow::{bail, Context, Result};
use eta_core::config::EtaConfig;
use eta_core::{EstimatedTimer, ManualClock};
use std::time::Duration;

/// Inputs for a single-sample estimate. `None` fields fall back to config.
#[derive(Debug, Clone)]
pub struct EstimateRequest {
    pub total: u64,
    pub progress: u64,
    pub elapsed_secs: f64,
    pub starting_at: u64,
    pub smoothing: Option<f64>,
    pub out_of_bounds: Option<String>,
}

/// Replays start + one progress sample on a manual clock and returns the ETA line.
pub fn run_estimate(cfg: &EtaConfig, req: &EstimateRequest) -> Result<String> {
    let elapsed = Duration::try_from_secs_f64(req.elapsed_secs)
        .with_context(|| format!("invalid elapsed seconds: {}", req.elapsed_secs))?;

    let mut options = cfg.timer_options(req.total, req.starting_at);
    if let Some(smoothing) = req.smoothing {
        options = options.smoothing(smoothing);
    }

    let clock = ManualClock::new();
    let mut timer = EstimatedTimer::with_clock(options, clock.clone())?;
    match req.out_of_bounds.as_deref() {
        Some(name) => timer.set_out_of_bounds_format_named(Some(name))?,
        None => cfg.apply_format(&mut timer)?,
    }

    timer.start();
    if clock.try_advance(elapsed).is_none() {
        bail!("elapsed seconds out of range: {}", req.elapsed_secs);
    }
    timer.set_progress(req.progress)?;

    tracing::debug!(
        total = req.total,
        progress = req.progress,
        elapsed_secs = req.elapsed_secs,
        remaining_secs = ?timer.estimated_seconds_remaining(),
        "estimate computed"
    );
    Ok(timer.to_string())
}
