//! Configuration file support for lazypick.
//!
//! Configuration is loaded from `~/.config/lazypick/config.toml` with the
//! following precedence:
//! 1. Configuration file
//! 2. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.config/lazypick/config.toml
//! page_size = 10
//! visible_rows = 8
//! latency_ms = 250
//! ```

use std::path::PathBuf;

use serde::Deserialize;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Items requested per page
    pub page_size: u32,

    /// Rows visible in an open dropdown before scrolling starts
    pub visible_rows: usize,

    /// Simulated directory backend latency per page fetch
    pub latency_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: 10,
            visible_rows: 8,
            latency_ms: 250,
        }
    }
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lazypick")
            .join("config.toml")
    }
}
