use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::quality::Quality;

/// Global configuration loaded from `~/.config/streettech/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreettechConfig {
    /// Simulated metadata lookup latency in milliseconds.
    pub resolve_delay_ms: u64,
    /// Download ticker period in milliseconds.
    pub tick_interval_ms: u64,
    /// Exclusive upper bound of one progress increment (percent).
    pub max_increment: f64,
    /// Quality selected when a session starts.
    #[serde(default)]
    pub default_quality: Quality,
    /// Directory for persisted state; defaults to the XDG state dir.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

impl Default for StreettechConfig {
    fn default() -> Self {
        Self {
            resolve_delay_ms: 2000,
            tick_interval_ms: 200,
            max_increment: 10.0,
            default_quality: Quality::Fhd1080,
            storage_dir: None,
        }
    }
}

impl StreettechConfig {
    pub fn resolve_delay(&self) -> Duration {
        Duration::from_millis(self.resolve_delay_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Rejects values that would stop a download from ever completing.
    pub fn validate(&self) -> Result<()> {
        if !self.max_increment.is_finite() || self.max_increment <= 0.0 {
            bail!(
                "max_increment must be a positive number, got {}",
                self.max_increment
            );
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("streettech")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<StreettechConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = StreettechConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: StreettechConfig = toml::from_str(&data)?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
