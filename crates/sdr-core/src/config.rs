use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::intercept::{HostCapabilities, DEFAULT_RECENT_LIMIT};
use crate::settings::JsonFileStore;

/// Global configuration loaded from `~/.config/sdr/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdrConfig {
    /// Settings file holding the rename rules; defaults to `~/.local/state/sdr/storage.json`.
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
    /// How many restarted download ids are remembered before the oldest is dropped.
    pub self_initiated_capacity: usize,
    /// Number of downloads [`Controller::recent_downloads`](crate::intercept::Controller::recent_downloads) returns.
    pub recent_limit: usize,
    /// What the host offers; decides the interception strategy.
    #[serde(default)]
    pub capabilities: HostCapabilities,
}

impl Default for SdrConfig {
    fn default() -> Self {
        Self {
            storage_path: None,
            self_initiated_capacity: 256,
            recent_limit: DEFAULT_RECENT_LIMIT,
            capabilities: HostCapabilities {
                determining_filename: true,
                downloads_api: true,
                response_headers: false,
            },
        }
    }
}

impl SdrConfig {
    /// Configured settings file, or the XDG default.
    pub fn storage_path(&self) -> Result<PathBuf> {
        match &self.storage_path {
            Some(path) => Ok(path.clone()),
            None => JsonFileStore::default_path(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sdr")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SdrConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<SdrConfig> {
    if !path.exists() {
        let default_cfg = SdrConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: SdrConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
