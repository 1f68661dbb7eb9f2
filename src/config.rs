//! Configuration management
//!
//! Small TOML config controlling where records live and how wide the proof
//! ledger window is. Everything has a sensible default; the file is optional.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Override for the data directory (defaults to the platform data dir)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Number of days shown in the proof ledger
    #[serde(default = "default_ledger_days")]
    pub ledger_days: usize,
}

fn default_ledger_days() -> usize {
    7
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            ledger_days: default_ledger_days(),
        }
    }
}

impl Config {
    /// Load configuration from the config file, or defaults if absent
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to the config file
    pub fn save(&self) -> Result<()> {
        let path = config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let raw = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, raw)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }

    /// Resolved data directory, honoring the override
    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => data_dir(),
        }
    }
}

/// Path to the config file
pub fn config_path() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "mrror", "mrror")
        .context("Failed to get project directories")?;
    Ok(base.config_dir().join("config.toml"))
}

/// Default data directory for all stores
pub fn data_dir() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "mrror", "mrror")
        .context("Failed to get project directories")?;
    Ok(base.data_dir().to_path_buf())
}
