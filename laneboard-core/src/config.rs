//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/laneboard/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/laneboard/` (~/.config/laneboard/)
//! - State/Logs: `$XDG_STATE_HOME/laneboard/` (~/.local/state/laneboard/)

use crate::error::{Error, Result};
use crate::types::ZoomLevel;
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Where session logs live
    #[serde(default)]
    pub sessions: SessionsConfig,

    /// Board layout tuning
    #[serde(default)]
    pub board: BoardConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Session log discovery configuration
#[derive(Debug, Deserialize, Default)]
pub struct SessionsConfig {
    /// Root directory scanned for `*.jsonl` session logs; defaults to
    /// `~/.laneboard/sessions` when unset
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// Board layout configuration
#[derive(Debug, Deserialize)]
pub struct BoardConfig {
    /// Days covered by the heatmap window
    #[serde(default = "default_heatmap_days")]
    pub heatmap_days: u32,

    /// Width of one heatmap slot, in terminal columns
    #[serde(default = "default_slot_width")]
    pub slot_width: u32,

    /// Minimum gap between two axis labels, in terminal columns
    #[serde(default = "default_min_label_gap")]
    pub min_label_gap: u32,

    /// Zoom level the board opens at
    #[serde(default)]
    pub default_zoom: ZoomLevel,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            heatmap_days: default_heatmap_days(),
            slot_width: default_slot_width(),
            min_label_gap: default_min_label_gap(),
            default_zoom: ZoomLevel::default(),
        }
    }
}

fn default_heatmap_days() -> u32 {
    35
}

fn default_slot_width() -> u32 {
    2
}

fn default_min_label_gap() -> u32 {
    8
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Path to the config file.
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("laneboard").join("config.toml")
    }

    /// Directory for logs and other mutable state.
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("laneboard")
    }

    /// Path to the log file.
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("laneboard.log")
    }

    /// Effective session root, honoring the configured override.
    pub fn session_root(&self) -> PathBuf {
        self.sessions
            .root
            .clone()
            .unwrap_or_else(|| home_dir().join(".laneboard/sessions"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.board.heatmap_days, 35);
        assert_eq!(config.board.slot_width, 2);
        assert_eq!(config.board.min_label_gap, 8);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [board]
            heatmap_days = 14

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.board.heatmap_days, 14);
        assert_eq!(config.board.slot_width, 2);
        assert_eq!(config.logging.level, "debug");
    }
}
