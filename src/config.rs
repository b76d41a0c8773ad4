//! User settings persistence
//!
//! Stores default playlist options in ~/.config/dipls/settings.json.
//! Command-line flags always win over these values. The listen key is
//! never stored here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::playlist::{Quality, DEFAULT_DOMAIN};

/// US premium mirrors used when no servers are configured
pub const DEFAULT_SERVERS: [&str; 2] = ["prem1", "prem4"];

/// Persistent playlist defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Server mirrors, in the order entries are written
    pub servers: Vec<String>,
    /// Stream quality
    pub quality: Quality,
    /// Cap on servers per channel
    pub max_servers: Option<usize>,
    /// Directory playlists are written to
    pub output_dir: Option<PathBuf>,
    /// Service domain the server hosts live under
    pub domain: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            servers: DEFAULT_SERVERS.iter().map(|s| s.to_string()).collect(),
            quality: Quality::Default,
            max_servers: None,
            output_dir: None,
            domain: DEFAULT_DOMAIN.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or the default location when `None`
    ///
    /// A missing file yields the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::settings_path()?,
        };

        if !path.exists() {
            debug!("No settings found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;

        let settings: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {:?}", path))?;

        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to `path`, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize settings")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;

        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Default settings file path
    pub fn settings_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("dipls").join("settings.json"))
    }
}
