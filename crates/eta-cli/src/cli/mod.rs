//! CLI for the eta estimated-time-remaining tracker.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use eta_core::config;

use commands::{run_demo, run_estimate, EstimateRequest};

/// Top-level CLI for the eta tracker.
#[derive(Debug, Parser)]
#[command(name = "eta")]
#[command(about = "eta: estimated time remaining for long-running tasks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Estimate the time remaining from a single progress sample.
    Estimate {
        /// Units of work in the whole task.
        #[arg(long)]
        total: u64,
        /// Units completed when the sample was taken.
        #[arg(long)]
        progress: u64,
        /// Seconds between start and the sample.
        #[arg(long, value_name = "SECS")]
        elapsed: f64,
        /// Progress value timing starts from.
        #[arg(long, default_value = "0")]
        starting_at: u64,
        /// Rate smoothing factor in [0, 1] (default from config).
        #[arg(long)]
        smoothing: Option<f64>,
        /// Format for estimates above 99:59:59: "unknown" or "friendly" (default from config).
        #[arg(long, value_name = "FORMAT")]
        out_of_bounds: Option<String>,
    },

    /// Count up to a total on a timer, redrawing the estimate on stderr.
    Demo {
        /// Units of work in the simulated task.
        #[arg(long, default_value = "100")]
        total: u64,
        /// Progress value timing starts from.
        #[arg(long, default_value = "0")]
        starting_at: u64,
        /// Milliseconds per unit of work (default from config).
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Estimate {
                total,
                progress,
                elapsed,
                starting_at,
                smoothing,
                out_of_bounds,
            } => {
                let request = EstimateRequest {
                    total,
                    progress,
                    elapsed_secs: elapsed,
                    starting_at,
                    smoothing,
                    out_of_bounds,
                };
                println!("{}", run_estimate(&cfg, &request)?);
            }
            CliCommand::Demo {
                total,
                starting_at,
                interval_ms,
            } => run_demo(&cfg, total, starting_at, interval_ms).await?,
        }

        Ok(())
    }
}
