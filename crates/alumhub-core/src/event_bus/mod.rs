//! # Event Bus Module
//!
//! Provides a name-keyed publish/subscribe bus so that screens mounted
//! independently of each other can react to the same state change.
//!
//! ## Overview
//!
//! - Publishers emit a payload under an event name without knowing subscribers
//! - Subscribers register per name and receive payloads in registration order
//! - A failing listener is contained and logged; the emitter never sees it
//! - Typed events pin a name to a payload contract (see [`BusEvent`])
//!
//! ## Usage
//!
//! ```rust
//! use alumhub_core::event_bus::{BookmarkChanged, EventBus};
//!
//! let bus = EventBus::new();
//!
//! // The saved-items screen keeps its list in sync
//! let subscription = bus
//!     .subscribe_event(|change: BookmarkChanged| {
//!         println!("{} saved={}", change.discussion_id, change.saved);
//!     })
//!     .unwrap();
//!
//! // The discussion screen toggles a bookmark
//! bus.emit_event(&BookmarkChanged {
//!     discussion_id: "disc-1".to_string(),
//!     saved: true,
//! })
//! .unwrap();
//!
//! // Unmount
//! subscription.unsubscribe();
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
