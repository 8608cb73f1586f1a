//! AlumHub Settings Crate
//!
//! Handles application configuration: loading, saving and validating the
//! event bus, navigation and logging sections.

pub mod config;
pub mod error;

pub use config::{
    Config, EventBusSettings, LogFormat, LoggingSettings, NavigationSettings, MAX_DEBOUNCE_MS,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
