//! Configuration management for AlumHub
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files; the format is picked from the file extension.
//!
//! Configuration is organized into sections:
//! - Event bus limits
//! - Navigation debounce window
//! - Logging level and output format

use alumhub_core::EventBusConfig;
use alumhub_navigation::NavigationConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Longest debounce window accepted from a config file
pub const MAX_DEBOUNCE_MS: u64 = 60_000;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Event bus settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventBusSettings {
    /// How deep listeners may nest emissions before further ones are dropped
    pub max_emit_depth: usize,
}

impl Default for EventBusSettings {
    fn default() -> Self {
        Self {
            max_emit_depth: EventBusConfig::default().max_emit_depth,
        }
    }
}

impl From<&EventBusSettings> for EventBusConfig {
    fn from(settings: &EventBusSettings) -> Self {
        EventBusConfig {
            max_emit_depth: settings.max_emit_depth,
        }
    }
}

/// Navigation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationSettings {
    /// Debounce window in milliseconds. 0 turns debouncing off.
    pub debounce_ms: u64,
}

impl NavigationSettings {
    /// The window as a Duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

impl From<&NavigationSettings> for NavigationConfig {
    fn from(settings: &NavigationSettings) -> Self {
        NavigationConfig {
            debounce: settings.debounce(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human readable output
    #[default]
    Pretty,
    /// One line per event
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Compact => write!(f, "compact"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level when RUST_LOG is not set
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Event bus settings
    pub event_bus: EventBusSettings,
    /// Navigation settings
    pub navigation: NavigationSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => {
            let ext = other.unwrap_or("<none>").to_string();
            Err(ConfigError::UnsupportedFormat(ext).into())
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location, e.g. `~/.config/alumhub/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("alumhub").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config directory on this platform".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from file, or fall back to defaults if it does not exist
    ///
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate all sections
    pub fn validate(&self) -> SettingsResult<()> {
        if self.event_bus.max_emit_depth == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "event_bus.max_emit_depth".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        if self.navigation.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::ValueOutOfRange {
                key: "navigation.debounce_ms".to_string(),
                value: self.navigation.debounce_ms.to_string(),
            }
            .into());
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(SettingsError::InvalidSetting {
                key: "logging.level".to_string(),
                reason: format!("unknown level '{}'", self.logging.level),
            });
        }

        Ok(())
    }

    /// Event bus configuration derived from these settings
    pub fn event_bus_config(&self) -> EventBusConfig {
        EventBusConfig::from(&self.event_bus)
    }

    /// Navigation configuration derived from these settings
    pub fn navigation_config(&self) -> NavigationConfig {
        NavigationConfig::from(&self.navigation)
    }
}
