//! Event Bus implementation.
//!
//! Provides the core EventBus struct: a registry of listeners keyed by
//! event name, shared by every clone of the bus.

use parking_lot::RwLock;
use std::any::Any;
use std::cell::Cell;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::error::EventBusError;

/// Payload carried by every emission.
///
/// The shape is agreed between emitter and listeners per event name; see
/// [`BusEvent`](super::BusEvent) for typed contracts.
pub type EventPayload = serde_json::Value;

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Type alias for event handler functions
type EventHandler = Box<dyn Fn(&EventPayload) + Send + Sync>;

struct Listener {
    id: SubscriptionId,
    /// Cleared on unsubscribe so in-flight snapshots skip this listener.
    active: AtomicBool,
    handler: EventHandler,
}

type Registry = RwLock<HashMap<String, Vec<Arc<Listener>>>>;

/// Configuration for the event bus
#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Maximum nesting of emissions on one thread. A listener that emits
    /// counts as one more level.
    pub max_emit_depth: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self { max_emit_depth: 16 }
    }
}

/// Outcome of a single [`EventBus::emit`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitReport {
    /// Listeners that ran to completion.
    pub delivered: usize,
    /// Listeners that panicked. Their failure was logged and contained.
    pub failed: usize,
    /// True when the emission was refused because the nesting limit was hit.
    pub dropped: bool,
}

thread_local! {
    static EMIT_DEPTH: Cell<usize> = const { Cell::new(0) };
}

struct DepthGuard;

impl DepthGuard {
    fn enter() -> Self {
        EMIT_DEPTH.with(|depth| depth.set(depth.get() + 1));
        DepthGuard
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        EMIT_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Handle returned by [`EventBus::subscribe`].
///
/// Dropping the handle does not detach the listener; call
/// [`Subscription::unsubscribe`] when the owning screen goes away.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: SubscriptionId,
    event: String,
    registry: Weak<Registry>,
}

impl Subscription {
    /// The id of this subscription
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// The event name this subscription listens to
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Detach the listener.
    ///
    /// Returns true only for the call that actually removed it. Later calls,
    /// or calls after the bus is gone, are no-ops.
    pub fn unsubscribe(&self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => detach(&registry, self.id, Some(&self.event)),
            None => false,
        }
    }
}

fn detach(registry: &Registry, id: SubscriptionId, event: Option<&str>) -> bool {
    let mut listeners_by_name = registry.write();

    let name = match event {
        Some(name) => name.to_string(),
        None => match listeners_by_name
            .iter()
            .find(|(_, listeners)| listeners.iter().any(|l| l.id == id))
        {
            Some((name, _)) => name.clone(),
            None => return false,
        },
    };

    let Some(listeners) = listeners_by_name.get_mut(&name) else {
        return false;
    };
    let Some(position) = listeners.iter().position(|l| l.id == id) else {
        return false;
    };

    let listener = listeners.remove(position);
    listener.active.store(false, Ordering::Release);
    if listeners.is_empty() {
        listeners_by_name.remove(&name);
    }

    tracing::debug!("Subscription {} removed from '{}'", id, name);
    true
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Central event bus for cross-screen notifications
///
/// Cloning is cheap; all clones share one registry. Construct one per
/// application and hand it to whichever screens need it.
#[derive(Clone)]
pub struct EventBus {
    registry: Arc<Registry>,
    config: EventBusConfig,
}

impl EventBus {
    /// Create a new event bus with default configuration
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// Create a new event bus with custom configuration
    pub fn with_config(config: EventBusConfig) -> Self {
        Self {
            registry: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Register `handler` for every future emission of `event`.
    ///
    /// Handlers run synchronously on the emitting thread, in registration
    /// order, so they should return quickly and hand long work off elsewhere.
    pub fn subscribe<F>(&self, event: &str, handler: F) -> Result<Subscription, EventBusError>
    where
        F: Fn(&EventPayload) + Send + Sync + 'static,
    {
        if event.is_empty() {
            return Err(EventBusError::EmptyEventName);
        }

        let listener = Arc::new(Listener {
            id: SubscriptionId::new(),
            active: AtomicBool::new(true),
            handler: Box::new(handler),
        });
        let id = listener.id;

        self.registry
            .write()
            .entry(event.to_string())
            .or_default()
            .push(listener);
        tracing::debug!("Subscription {} added for '{}'", id, event);

        Ok(Subscription {
            id,
            event: event.to_string(),
            registry: Arc::downgrade(&self.registry),
        })
    }

    /// Subscribe through a channel instead of a callback
    ///
    /// Useful for async tasks that want to `recv().await` payloads. Once the
    /// receiver is dropped, deliveries are discarded until the subscription
    /// is removed.
    pub fn subscribe_channel(
        &self,
        event: &str,
    ) -> Result<(Subscription, mpsc::UnboundedReceiver<EventPayload>), EventBusError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = self.subscribe(event, move |payload| {
            let _ = tx.send(payload.clone());
        })?;
        Ok((subscription, rx))
    }

    /// Unsubscribe by id
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        detach(&self.registry, id, None)
    }

    /// Deliver `payload` to every listener currently subscribed to `event`.
    ///
    /// Delivery walks a snapshot taken at call time: listeners added during
    /// the emission wait for the next one, listeners removed during it are
    /// skipped. A listener that emits again is served depth-first before the
    /// remaining listeners of the outer emission. A panicking listener is
    /// logged and counted in the report; it never reaches the emitter.
    pub fn emit(&self, event: &str, payload: EventPayload) -> EmitReport {
        let depth = EMIT_DEPTH.with(Cell::get);
        if depth >= self.config.max_emit_depth {
            tracing::warn!(
                "Dropping emission of '{}': nesting depth {} reached the limit",
                event,
                depth
            );
            return EmitReport {
                dropped: true,
                ..EmitReport::default()
            };
        }

        let snapshot: Vec<Arc<Listener>> = match self.registry.read().get(event) {
            Some(listeners) => listeners.clone(),
            None => return EmitReport::default(),
        };

        let _depth = DepthGuard::enter();
        let mut report = EmitReport::default();

        for listener in snapshot {
            if !listener.active.load(Ordering::Acquire) {
                continue;
            }

            match catch_unwind(AssertUnwindSafe(|| (listener.handler)(&payload))) {
                Ok(()) => report.delivered += 1,
                Err(panic) => {
                    report.failed += 1;
                    tracing::error!(
                        "Listener {} for '{}' panicked: {}",
                        listener.id,
                        event,
                        panic_message(panic.as_ref())
                    );
                }
            }
        }

        tracing::trace!(
            "Emitted '{}' to {} listener(s), {} failed",
            event,
            report.delivered,
            report.failed
        );
        report
    }

    /// Get the number of active subscriptions across all events
    pub fn subscriber_count(&self) -> usize {
        self.registry.read().values().map(Vec::len).sum()
    }

    /// Get the number of listeners registered for one event
    pub fn listener_count(&self, event: &str) -> usize {
        self.registry.read().get(event).map_or(0, Vec::len)
    }

    /// Names with at least one listener, sorted
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registry.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the current configuration
    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("config", &self.config)
            .finish()
    }
}
