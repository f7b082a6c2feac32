//! `eta demo` – live countdown on the system clock.

use anyhow::{bail, Result};
use eta_core::config::EtaConfig;
use eta_core::{Clock, EstimatedTimer};
use std::io::Write;
use std::time::Duration;

/// One redraw: percentage, estimate and elapsed time.
pub(crate) fn render_line<C: Clock>(timer: &EstimatedTimer<C>) -> String {
    format!(
        "{:>3}%{}{}",
        timer.percentage_completed(),
        timer,
        timer.elapsed_label()
    )
}

/// Increment once per tick until `total`, redrawing on stderr.
pub async fn run_demo(
    cfg: &EtaConfig,
    total: u64,
    starting_at: u64,
    interval_ms: Option<u64>,
) -> Result<()> {
    let interval_ms = interval_ms.unwrap_or(cfg.demo_interval_ms);
    if interval_ms == 0 {
        bail!("interval must be at least 1 ms");
    }

    let mut timer = EstimatedTimer::new(cfg.timer_options(total, starting_at))?;
    cfg.apply_format(&mut timer)?;

    let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms));
    // First tick completes immediately.
    ticker.tick().await;
    timer.start();

    let mut stderr = std::io::stderr();
    write!(stderr, "\r{}", render_line(&timer))?;
    while !timer.is_finished() {
        ticker.tick().await;
        timer.increment()?;
        write!(stderr, "\r{}", render_line(&timer))?;
        stderr.flush()?;
    }
    writeln!(stderr)?;

    tracing::info!(
        total,
        elapsed_secs = timer.elapsed().as_secs_f64(),
        "demo finished"
    );
    Ok(())
}
