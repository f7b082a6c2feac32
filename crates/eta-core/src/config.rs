use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::clock::Clock;
use crate::eta::{EstimatedTimer, EstimatedTimerOptions, EtaError, DEFAULT_SMOOTHING};

/// Global configuration loaded from `~/.config/eta/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtaConfig {
    /// Rate smoothing factor in [0, 1]; 0 uses only the latest sample.
    #[serde(default = "default_smoothing")]
    pub smoothing: f64,
    /// How to show estimates above 99:59:59: "unknown", "friendly", or unset
    /// for the raw HH:MM:SS. Validated when applied to a timer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_of_bounds_format: Option<String>,
    /// Tick interval for `eta demo`, in milliseconds.
    #[serde(default = "default_demo_interval_ms")]
    pub demo_interval_ms: u64,
}

fn default_smoothing() -> f64 {
    DEFAULT_SMOOTHING
}

fn default_demo_interval_ms() -> u64 {
    100
}

impl Default for EtaConfig {
    fn default() -> Self {
        Self {
            smoothing: default_smoothing(),
            out_of_bounds_format: None,
            demo_interval_ms: default_demo_interval_ms(),
        }
    }
}

impl EtaConfig {
    /// Timer options for a task of `total` units using the configured smoothing.
    pub fn timer_options(&self, total: u64, starting_at: u64) -> EstimatedTimerOptions {
        EstimatedTimerOptions::new(total)
            .starting_at(starting_at)
            .smoothing(self.smoothing)
    }

    /// Apply the configured out-of-bounds format to `timer`.
    pub fn apply_format<C: Clock>(&self, timer: &mut EstimatedTimer<C>) -> Result<(), EtaError> {
        timer.set_out_of_bounds_format_named(self.out_of_bounds_format.as_deref())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("eta")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<EtaConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = EtaConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<EtaConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: EtaConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::eta::OutOfBoundsFormat;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_values() {
        let cfg = EtaConfig::default();
        assert_eq!(cfg.smoothing, 0.1);
        assert!(cfg.out_of_bounds_format.is_none());
        assert_eq!(cfg.demo_interval_ms, 100);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = EtaConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: EtaConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.smoothing, cfg.smoothing);
        assert_eq!(parsed.out_of_bounds_format, cfg.out_of_bounds_format);
        assert_eq!(parsed.demo_interval_ms, cfg.demo_interval_ms);
    }

    #[test]
    fn config_toml_empty_uses_defaults() {
        let cfg: EtaConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.smoothing, 0.1);
        assert_eq!(cfg.demo_interval_ms, 100);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            smoothing = 0.5
            out_of_bounds_format = "unknown"
            demo_interval_ms = 20
        "#;
        let cfg: EtaConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.smoothing, 0.5);
        assert_eq!(cfg.out_of_bounds_format.as_deref(), Some("unknown"));
        assert_eq!(cfg.demo_interval_ms, 20);

        let opts = cfg.timer_options(10, 2);
        assert_eq!(opts.total, 10);
        assert_eq!(opts.starting_at, 2);
        assert_eq!(opts.smoothing, 0.5);
    }

    #[test]
    fn apply_format_validates_name() {
        let mut timer =
            EstimatedTimer::with_clock(EstimatedTimerOptions::new(10), ManualClock::new()).unwrap();

        let friendly = EtaConfig {
            out_of_bounds_format: Some("friendly".to_string()),
            ..EtaConfig::default()
        };
        friendly.apply_format(&mut timer).unwrap();
        assert_eq!(timer.out_of_bounds_format(), OutOfBoundsFormat::Friendly);

        let bad = EtaConfig {
            out_of_bounds_format: Some("days".to_string()),
            ..EtaConfig::default()
        };
        assert!(matches!(
            bad.apply_format(&mut timer),
            Err(EtaError::InvalidFormat(_))
        ));
        assert_eq!(timer.out_of_bounds_format(), OutOfBoundsFormat::Friendly);
    }

    #[test]
    fn load_from_path_reads_file() {
        let f = NamedTempFile::new().unwrap();
        fs::write(f.path(), "smoothing = 0.0\nout_of_bounds_format = \"friendly\"\n").unwrap();
        let cfg = load_from_path(f.path()).unwrap();
        assert_eq!(cfg.smoothing, 0.0);
        assert_eq!(cfg.out_of_bounds_format.as_deref(), Some("friendly"));
    }

    #[test]
    fn load_from_path_reports_parse_errors() {
        let f = NamedTempFile::new().unwrap();
        fs::write(f.path(), "smoothing = \"lots\"\n").unwrap();
        let err = load_from_path(f.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("parse config"));
    }
}
