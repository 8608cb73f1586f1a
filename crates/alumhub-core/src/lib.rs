//! # AlumHub Core
//!
//! Core types shared by the AlumHub client crates: the cross-screen event
//! bus, its typed event catalogue, and the error types used at every seam.

pub mod error;
pub mod event_bus;

pub use error::{Error, EventBusError, NavigationError, Result};

// Re-export event bus for convenience
pub use event_bus::{
    BookmarkChanged, BusEvent, EmitReport, EventBus, EventBusConfig, EventPayload,
    ListingChanged, ListingStatus, Subscription, SubscriptionId, UnreadCountChanged,
};
