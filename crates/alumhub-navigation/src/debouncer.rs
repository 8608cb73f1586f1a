//! Debounced navigation
//!
//! Wraps a [`Router`] so that rapid repeated requests for the same
//! destination collapse into one real navigation. Typical trigger: a double
//! tap on a list row that would otherwise stack two copies of a screen.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use alumhub_core::NavigationError;

use crate::key::{to_params_value, NavKey};
use crate::pending::PendingNavigationSet;
use crate::router::Router;

/// Default debounce window
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// What happened to a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// The router was called.
    Dispatched,
    /// A request for the same key is still inside its window; nothing happened.
    Suppressed,
}

impl NavOutcome {
    /// Whether the router was called
    pub fn is_dispatched(self) -> bool {
        self == NavOutcome::Dispatched
    }
}

/// Configuration for the navigation debouncer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationConfig {
    /// Window used by the calls that do not pass one explicitly.
    pub debounce: Duration,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Router wrapper that drops duplicate navigations
///
/// Each accepted request claims its key for the window, calls the router
/// right away and leaves expiry to a timer. Router errors are returned as-is
/// and do not release the key early. A zero window bypasses debouncing.
#[derive(Clone)]
pub struct NavigationDebouncer {
    router: Arc<dyn Router>,
    pending: PendingNavigationSet,
    config: NavigationConfig,
}

impl NavigationDebouncer {
    /// Wrap `router` with the default window
    pub fn new(router: impl Router + 'static) -> Self {
        Self::with_config(router, NavigationConfig::default())
    }

    /// Wrap `router` with a custom configuration
    pub fn with_config(router: impl Router + 'static, config: NavigationConfig) -> Self {
        Self::from_shared(Arc::new(router), config)
    }

    /// Wrap a router that is shared with other code
    pub fn from_shared(router: Arc<dyn Router>, config: NavigationConfig) -> Self {
        Self {
            router,
            pending: PendingNavigationSet::new(),
            config,
        }
    }

    /// Push `target` using the configured window
    pub fn push(&self, target: &str) -> Result<NavOutcome, NavigationError> {
        self.push_within(target, self.config.debounce)
    }

    /// Push `target`, suppressing repeats for `window`
    pub fn push_within(
        &self,
        target: &str,
        window: Duration,
    ) -> Result<NavOutcome, NavigationError> {
        self.dispatch(NavKey::target(target), window, |router| router.push(target))
    }

    /// Replace the current screen with `target` using the configured window
    pub fn replace(&self, target: &str) -> Result<NavOutcome, NavigationError> {
        self.replace_within(target, self.config.debounce)
    }

    /// Replace with `target`. Shares its key with `push` to the same target.
    pub fn replace_within(
        &self,
        target: &str,
        window: Duration,
    ) -> Result<NavOutcome, NavigationError> {
        self.dispatch(NavKey::target(target), window, |router| router.replace(target))
    }

    /// Go back. All back requests share one key.
    pub fn back(&self) -> Result<NavOutcome, NavigationError> {
        self.back_within(self.config.debounce)
    }

    /// Go back, suppressing repeats for `window`
    pub fn back_within(&self, window: Duration) -> Result<NavOutcome, NavigationError> {
        self.dispatch(NavKey::Back, window, |router| router.back())
    }

    /// Navigate with structured params.
    ///
    /// The dedup key is the params' canonical JSON, so maps that differ only
    /// in key order count as the same destination. Params that cannot be
    /// serialized fail with [`NavigationError::InvalidParams`] before
    /// anything is recorded.
    pub fn navigate<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> Result<NavOutcome, NavigationError> {
        self.navigate_within(params, self.config.debounce)
    }

    /// Navigate with structured params, suppressing repeats for `window`
    pub fn navigate_within<P: Serialize + ?Sized>(
        &self,
        params: &P,
        window: Duration,
    ) -> Result<NavOutcome, NavigationError> {
        let params = to_params_value(params)?;
        self.dispatch(NavKey::params(&params), window, |router| router.navigate(&params))
    }

    fn dispatch<F>(
        &self,
        key: NavKey,
        window: Duration,
        navigate: F,
    ) -> Result<NavOutcome, NavigationError>
    where
        F: FnOnce(&dyn Router) -> Result<(), NavigationError>,
    {
        if window.is_zero() {
            navigate(self.router.as_ref())?;
            return Ok(NavOutcome::Dispatched);
        }

        if !self.pending.try_claim(&key, window) {
            tracing::trace!("Suppressed duplicate navigation to {}", key);
            return Ok(NavOutcome::Suppressed);
        }

        tracing::debug!("Navigating to {} (window {:?})", key, window);
        navigate(self.router.as_ref())?;
        Ok(NavOutcome::Dispatched)
    }

    /// Drop every pending key
    pub fn clear(&self) {
        self.pending.clear();
        tracing::debug!("Pending navigations cleared");
    }

    /// Whether `key` is inside its window
    pub fn is_pending(&self, key: &NavKey) -> bool {
        self.pending.contains(key)
    }

    /// Number of keys inside their window
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Get the current configuration
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }
}

impl std::fmt::Debug for NavigationDebouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationDebouncer")
            .field("pending", &self.pending_count())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::StackRouter;
    use serde_json::json;

    fn debouncer() -> (Arc<StackRouter>, NavigationDebouncer) {
        let router = Arc::new(StackRouter::new("/home"));
        let debouncer = NavigationDebouncer::new(router.clone());
        (router, debouncer)
    }

    #[test]
    fn test_double_tap_pushes_once() {
        let (router, nav) = debouncer();
        assert_eq!(nav.push("/forum/disc-1").unwrap(), NavOutcome::Dispatched);
        assert_eq!(nav.push("/forum/disc-1").unwrap(), NavOutcome::Suppressed);
        assert_eq!(router.stack(), vec!["/home", "/forum/disc-1"]);
    }

    #[test]
    fn test_push_then_replace_same_target_coalesce() {
        let (router, nav) = debouncer();
        nav.push("/news").unwrap();
        assert_eq!(nav.replace("/news").unwrap(), NavOutcome::Suppressed);
        assert_eq!(router.depth(), 2);
    }

    #[test]
    fn test_zero_window_bypasses_debounce() {
        let (router, nav) = debouncer();
        for _ in 0..3 {
            let outcome = nav.push_within("/marketplace", Duration::ZERO).unwrap();
            assert!(outcome.is_dispatched());
        }
        assert_eq!(router.depth(), 4);
        assert_eq!(nav.pending_count(), 0);
    }

    #[test]
    fn test_router_error_propagates_and_keeps_window() {
        let router = Arc::new(StackRouter::with_routes("/home", ["/news"]));
        let nav = NavigationDebouncer::new(router.clone());

        let err = nav.push("/admin").unwrap_err();
        assert_eq!(
            err,
            NavigationError::UnknownRoute {
                target: "/admin".to_string()
            }
        );
        assert!(nav.is_pending(&NavKey::target("/admin")));
        assert_eq!(nav.push("/admin").unwrap(), NavOutcome::Suppressed);
    }

    #[test]
    fn test_back_error_at_root() {
        let (_router, nav) = debouncer();
        assert_eq!(nav.back().unwrap_err(), NavigationError::EmptyStack);
        assert_eq!(nav.back().unwrap(), NavOutcome::Suppressed);
    }

    #[test]
    fn test_navigate_key_ignores_field_order() {
        let (router, nav) = debouncer();

        let first: serde_json::Value =
            serde_json::from_str(r#"{"screen":"/profile","userId":"u-7"}"#).unwrap();
        let second: serde_json::Value =
            serde_json::from_str(r#"{"userId":"u-7","screen":"/profile"}"#).unwrap();

        assert!(nav.navigate(&first).unwrap().is_dispatched());
        assert_eq!(nav.navigate(&second).unwrap(), NavOutcome::Suppressed);
        assert!(nav
            .navigate(&json!({ "screen": "/profile", "userId": "u-8" }))
            .unwrap()
            .is_dispatched());
        assert_eq!(router.depth(), 3);
    }

    #[test]
    fn test_clear_allows_immediate_retry() {
        let (router, nav) = debouncer();
        nav.push("/highlights").unwrap();
        nav.clear();
        assert_eq!(nav.pending_count(), 0);
        assert!(nav.push("/highlights").unwrap().is_dispatched());
        assert_eq!(router.depth(), 3);
    }

    #[test]
    fn test_clones_share_pending_set() {
        let (router, nav) = debouncer();
        let other_screen = nav.clone();
        nav.push("/notifications").unwrap();
        assert_eq!(
            other_screen.push("/notifications").unwrap(),
            NavOutcome::Suppressed
        );
        assert_eq!(router.depth(), 2);
    }

    #[test]
    fn test_default_config() {
        let (_router, nav) = debouncer();
        assert_eq!(nav.config().debounce, Duration::from_millis(500));
    }
}
