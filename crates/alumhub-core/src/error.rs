//! Error handling for AlumHub
//!
//! Provides the error types shared by the client-side plumbing:
//! - Event bus errors (subscription and payload contract problems)
//! - Navigation errors (raised by routers, passed through the debouncer)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Event bus error type
///
/// Listener failures never surface here: they are isolated and logged during
/// emission. These variants cover caller mistakes and payload contract breaks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventBusError {
    /// Event names must be non-empty
    #[error("Event name must not be empty")]
    EmptyEventName,

    /// A typed event could not be turned into a payload
    #[error("Failed to serialize payload for '{event}': {reason}")]
    Serialize {
        /// The event name being emitted.
        event: String,
        /// The serializer's message.
        reason: String,
    },

    /// A payload did not match the typed contract of its event
    #[error("Payload for '{event}' does not match its contract: {reason}")]
    PayloadMismatch {
        /// The event name the payload arrived on.
        event: String,
        /// The deserializer's message.
        reason: String,
    },
}

/// Navigation error type
///
/// Produced by router implementations. The debouncer never catches these;
/// they reach the caller untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The router has no screen registered for the target
    #[error("Unknown route: {target}")]
    UnknownRoute {
        /// The requested target.
        target: String,
    },

    /// The router refused or failed the operation
    #[error("Router failed to {operation}: {reason}")]
    RouterFailed {
        /// The navigation primitive (push, replace, back, navigate).
        operation: String,
        /// The reason reported by the router.
        reason: String,
    },

    /// Navigation params could not be serialized into a dedup key
    #[error("Invalid navigation params: {reason}")]
    InvalidParams {
        /// The serializer's message.
        reason: String,
    },

    /// There is no screen to go back to
    #[error("Navigation stack is empty")]
    EmptyStack,
}

impl NavigationError {
    /// Shorthand for a router-side failure
    pub fn router(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        NavigationError::RouterFailed {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

/// Main error type for AlumHub
///
/// Flows that both emit events and navigate return this so a single `?`
/// covers either seam.
#[derive(Error, Debug)]
pub enum Error {
    /// Event bus error
    #[error(transparent)]
    EventBus(#[from] EventBusError),

    /// Navigation error
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

impl Error {
    /// Check if this is an event bus error
    pub fn is_event_bus_error(&self) -> bool {
        matches!(self, Error::EventBus(_))
    }

    /// Check if this is a navigation error
    pub fn is_navigation_error(&self) -> bool {
        matches!(self, Error::Navigation(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
