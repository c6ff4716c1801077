//! On-disk defaults for the exporter.
//!
//! The config file is optional; a missing file means built-in defaults.
//! Command-line flags always override configured values.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// User-level defaults, stored as TOML under the platform config directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Archive path used when `--output` is not given.
    pub output: PathBuf,
    /// Kind names exported when `--kinds` is not given; empty means all kinds.
    pub kinds: Vec<String>,
    /// Drop `data:` URLs by default.
    pub hide_data_url: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from("reqres_readable.zip"),
            kinds: Vec::new(),
            hide_data_url: false,
        }
    }
}

impl Config {
    /// Path of the config file: `<config_dir>/reqres-export/config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine the user config directory")?;
        Ok(dir.join("reqres-export").join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Write the config file, creating its directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}
