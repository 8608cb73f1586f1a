//! # AlumHub
//!
//! Client-side plumbing for the AlumHub alumni community app:
//! - A cross-screen event bus so independently mounted screens stay in sync
//!   (forum bookmarks, marketplace listings, unread badges)
//! - A debounced navigation wrapper so a double tap opens one screen
//!
//! ## Architecture
//!
//! AlumHub is organized as a workspace with multiple crates:
//!
//! 1. **alumhub-core** - Event bus, typed event catalogue, error types
//! 2. **alumhub-navigation** - Router seam, pending set, debouncer
//! 3. **alumhub-settings** - Configuration files and validation
//! 4. **alumhub** - Logging setup, application wiring and the demo binary
//!
//! Nothing here is global. [`AppContext`] owns one bus and one debouncer and
//! screens receive clones of them.

use std::sync::Arc;

pub use alumhub_core::{
    BookmarkChanged, BusEvent, EmitReport, Error, EventBus, EventBusConfig, EventBusError,
    EventPayload, ListingChanged, ListingStatus, NavigationError, Result, Subscription,
    SubscriptionId, UnreadCountChanged,
};

pub use alumhub_navigation::{
    NavKey, NavOutcome, NavigationConfig, NavigationDebouncer, PendingNavigationSet, Router,
    StackRouter,
};

pub use alumhub_settings::{Config, LogFormat, LoggingSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("ALUMHUB_BUILD_DATE");

/// Initialize logging from the logging section of the config
///
/// Sets up structured logging with:
/// - RUST_LOG environment variable support, falling back to the configured level
/// - Pretty, compact or JSON output on stdout
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(settings.level.to_ascii_lowercase())?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    match settings.format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stdout)
                    .with_target(true)
                    .with_thread_names(true)
                    .with_line_number(true)
                    .pretty(),
            )
            .try_init()?,
        LogFormat::Compact => registry
            .with(fmt::layer().with_writer(std::io::stdout).compact())
            .try_init()?,
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stdout)
                    .json()
                    .with_current_span(false),
            )
            .try_init()?,
    }

    Ok(())
}

/// Everything a screen needs from the shared plumbing
///
/// Cloning is cheap and every clone talks to the same bus and the same
/// pending-navigation set.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Cross-screen event bus
    pub bus: EventBus,
    /// Debounced navigation
    pub navigation: NavigationDebouncer,
    /// The configuration the context was built from
    pub config: Arc<Config>,
}

impl AppContext {
    /// Build the context around `router`
    pub fn new(config: Config, router: impl Router + 'static) -> Self {
        Self::from_shared(config, Arc::new(router))
    }

    /// Build the context around a router that other code also holds
    pub fn from_shared(config: Config, router: Arc<dyn Router>) -> Self {
        let bus = EventBus::with_config(config.event_bus_config());
        let navigation = NavigationDebouncer::from_shared(router, config.navigation_config());
        tracing::debug!(
            "App context ready (debounce {:?}, max emit depth {})",
            navigation.config().debounce,
            bus.config().max_emit_depth
        );
        Self {
            bus,
            navigation,
            config: Arc::new(config),
        }
    }
}
