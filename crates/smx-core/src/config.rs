// ABOUTME: Library configuration handling.
// ABOUTME: Loads and saves settings from TOML config files.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::PaneSize;

/// Static settings for the pane manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fallback PTY size used when no terminal size is known yet.
    pub default_size: PaneSize,

    /// Shell to run when a spawn config names no command.
    /// `None` falls back to `$SHELL` (or `/bin/sh`).
    pub default_shell: Option<String>,

    /// How long to wait for a process to exit gracefully before
    /// killing it, in milliseconds.
    pub graceful_timeout_ms: u64,

    /// Ratio of space given to the main row in the two-tier
    /// main/sub arrangement (0.7 = 70% main, 30% sub).
    pub main_sub_ratio: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_size: PaneSize::new(24, 80),
            default_shell: None,
            graceful_timeout_ms: 2_000,
            main_sub_ratio: 0.7,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl Config {
    /// Get the default config file path (~/.config/splitmux/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("splitmux").join("config.toml"))
    }

    /// Load config from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config from default path, or return default config if not found
    pub fn load_or_default() -> Self {
        Self::default_path()
            .and_then(|path| Self::load(&path).ok())
            .unwrap_or_default()
    }

    /// Save config to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn graceful_timeout(&self) -> Duration {
        Duration::from_millis(self.graceful_timeout_ms)
    }
}
