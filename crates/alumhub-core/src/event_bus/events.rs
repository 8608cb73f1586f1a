//! Typed event catalogue for the event bus.
//!
//! The bus itself only knows event names and JSON payloads. Each type here
//! pins one name to one payload contract so emitters and listeners on
//! different screens cannot drift apart.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::bus::{EmitReport, EventBus, EventPayload, Subscription};
use crate::error::EventBusError;

/// An event with a fixed name and payload shape
pub trait BusEvent: Serialize + DeserializeOwned {
    /// Name the event is emitted under.
    const NAME: &'static str;
}

/// A forum discussion was saved or unsaved.
///
/// Emitted by whichever screen toggled the bookmark; the forum list, the
/// discussion detail and the saved-items screen all listen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkChanged {
    /// The discussion whose bookmark flipped.
    pub discussion_id: String,
    /// New bookmark state.
    pub saved: bool,
}

impl BusEvent for BookmarkChanged {
    const NAME: &'static str = "forum:bookmarkChanged";
}

/// The unread notification badge changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountChanged {
    /// Unread notifications after the change.
    pub count: u32,
}

impl BusEvent for UnreadCountChanged {
    const NAME: &'static str = "notifications:unreadCountChanged";
}

/// Lifecycle state of a marketplace listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Active,
    Reserved,
    Sold,
    Withdrawn,
}

/// A marketplace listing was created, edited or changed state.
///
/// The marketplace list and the seller's own listings screen both listen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingChanged {
    /// The listing that changed.
    pub listing_id: String,
    /// Status after the change.
    pub status: ListingStatus,
}

impl BusEvent for ListingChanged {
    const NAME: &'static str = "marketplace:listingChanged";
}

/// Decode a raw payload into a typed event
pub fn decode<E: BusEvent>(payload: &EventPayload) -> Result<E, EventBusError> {
    serde_json::from_value(payload.clone()).map_err(|e| EventBusError::PayloadMismatch {
        event: E::NAME.to_string(),
        reason: e.to_string(),
    })
}

impl EventBus {
    /// Emit a typed event under its catalogue name
    pub fn emit_event<E: BusEvent>(&self, event: &E) -> Result<EmitReport, EventBusError> {
        let payload = serde_json::to_value(event).map_err(|e| EventBusError::Serialize {
            event: E::NAME.to_string(),
            reason: e.to_string(),
        })?;
        Ok(self.emit(E::NAME, payload))
    }

    /// Subscribe to a typed event
    ///
    /// Payloads that do not decode into `E` are logged and skipped; the
    /// handler only ever sees well-formed events.
    pub fn subscribe_event<E, F>(&self, handler: F) -> Result<Subscription, EventBusError>
    where
        E: BusEvent + 'static,
        F: Fn(E) + Send + Sync + 'static,
    {
        self.subscribe(E::NAME, move |payload| match decode::<E>(payload) {
            Ok(event) => handler(event),
            Err(err) => tracing::warn!("Skipping listener delivery: {}", err),
        })
    }
}
