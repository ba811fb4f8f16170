// src/config/config_load.rs
//
// loading config.toml

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::{GridConfig, OscConfig, PanelConfig, StyleConfig, WindowConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub window: WindowConfig,
    pub osc: OscConfig,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub panels: Vec<PanelConfig>,
    #[serde(default)]
    pub grids: Vec<GridConfig>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        // First try to load from the executable's directory
        if let Some(exe_config) = Self::load_from_exe_dir() {
            return Ok(exe_config);
        }

        // Fallback to loading from the current working directory
        Self::load_from_path("config.toml")
    }

    fn load_from_exe_dir() -> Option<Self> {
        let exe_path = std::env::current_exe().ok()?;
        let exe_dir = exe_path.parent()?;
        let config_path = exe_dir.join("config.toml");

        if config_path.exists() {
            Self::load_from_path(&config_path).ok()
        } else {
            None
        }
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn panel(&self, name: &str) -> Option<&PanelConfig> {
        self.panels.iter().find(|p| p.name == name)
    }
}
