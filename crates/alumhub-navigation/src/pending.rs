//! Pending navigation set
//!
//! Tracks which navigation keys are inside their debounce window. Entries
//! expire on a timer that is never cancelled or extended; it has no idea
//! whether the navigation itself has finished.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::time::Instant;

use crate::key::NavKey;

/// Deadline used when `now + window` is past what the clock can represent.
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

#[derive(Debug, Clone, Copy)]
struct PendingEntry {
    /// Lets an expiry timer recognise that its entry was cleared and claimed again.
    generation: u64,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct PendingState {
    entries: HashMap<NavKey, PendingEntry>,
    next_generation: u64,
}

/// Set of navigation keys that were accepted less than a window ago
///
/// Clones share the same set. When a tokio runtime is available each claim
/// spawns a timer that removes the entry; without one, entries are judged
/// by their deadline and swept on the next claim.
#[derive(Debug, Clone, Default)]
pub struct PendingNavigationSet {
    state: Arc<Mutex<PendingState>>,
}

impl PendingNavigationSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key` for `window`.
    ///
    /// Returns false, leaving the set untouched, if the key is already pending.
    pub fn try_claim(&self, key: &NavKey, window: Duration) -> bool {
        let now = Instant::now();

        let generation = {
            let mut state = self.state.lock();
            state.entries.retain(|_, entry| entry.expires_at > now);

            if state.entries.contains_key(key) {
                return false;
            }

            state.next_generation += 1;
            let generation = state.next_generation;
            state.entries.insert(
                key.clone(),
                PendingEntry {
                    generation,
                    expires_at: deadline(now, window),
                },
            );
            generation
        };

        self.schedule_expiry(key.clone(), generation, window);
        true
    }

    fn schedule_expiry(&self, key: NavKey, generation: u64, window: Duration) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let state = Arc::downgrade(&self.state);
                let window = window.min(FAR_FUTURE);
                handle.spawn(async move {
                    tokio::time::sleep(window).await;
                    expire(&state, &key, generation);
                });
            }
            Err(_) => {
                tracing::trace!("No async runtime; {} will expire by deadline", key);
            }
        }
    }

    /// Whether `key` is inside its window
    pub fn contains(&self, key: &NavKey) -> bool {
        let now = Instant::now();
        self.state
            .lock()
            .entries
            .get(key)
            .is_some_and(|entry| entry.expires_at > now)
    }

    /// Number of keys inside their window
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.state
            .lock()
            .entries
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    /// Whether no key is pending
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every pending key. Timers still in flight become no-ops.
    pub fn clear(&self) {
        self.state.lock().entries.clear();
    }
}

fn deadline(now: Instant, window: Duration) -> Instant {
    now.checked_add(window)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

fn expire(state: &Weak<Mutex<PendingState>>, key: &NavKey, generation: u64) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut state = state.lock();
    if state
        .entries
        .get(key)
        .is_some_and(|entry| entry.generation == generation)
    {
        state.entries.remove(key);
        tracing::trace!("Debounce window for {} expired", key);
    }
}
