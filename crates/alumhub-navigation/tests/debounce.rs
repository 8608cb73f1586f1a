use alumhub_core::NavigationError;
use alumhub_navigation::{NavKey, NavOutcome, NavigationConfig, NavigationDebouncer, Router};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Records every primitive the debouncer lets through
#[derive(Default)]
struct RecordingRouter {
    calls: Mutex<Vec<String>>,
    fail_with: Mutex<Option<NavigationError>>,
}

impl RecordingRouter {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn count(&self, call: &str) -> usize {
        self.calls.lock().iter().filter(|c| *c == call).count()
    }

    fn record(&self, call: String) -> Result<(), NavigationError> {
        self.calls.lock().push(call);
        match self.fail_with.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Router for RecordingRouter {
    fn push(&self, target: &str) -> Result<(), NavigationError> {
        self.record(format!("push {target}"))
    }

    fn replace(&self, target: &str) -> Result<(), NavigationError> {
        self.record(format!("replace {target}"))
    }

    fn back(&self) -> Result<(), NavigationError> {
        self.record("back".to_string())
    }

    fn navigate(&self, params: &Value) -> Result<(), NavigationError> {
        self.record(format!("navigate {params}"))
    }
}

fn setup() -> (Arc<RecordingRouter>, NavigationDebouncer) {
    let router = Arc::new(RecordingRouter::default());
    let nav = NavigationDebouncer::new(router.clone());
    (router, nav)
}

#[test]
fn test_immediate_repeat_push_navigates_once() {
    let (router, nav) = setup();
    nav.push_within("/forum/disc-1", Duration::from_millis(500))
        .unwrap();
    nav.push_within("/forum/disc-1", Duration::from_millis(500))
        .unwrap();
    assert_eq!(router.count("push /forum/disc-1"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_push_allowed_again_after_window() {
    let (router, nav) = setup();

    assert!(nav.push("/marketplace/item-4").unwrap().is_dispatched());
    tokio::time::sleep(Duration::from_millis(501)).await;
    assert!(nav.push("/marketplace/item-4").unwrap().is_dispatched());

    assert_eq!(router.count("push /marketplace/item-4"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_push_still_blocked_just_inside_window() {
    let (router, nav) = setup();

    nav.push("/news/3").unwrap();
    tokio::time::sleep(Duration::from_millis(499)).await;
    assert_eq!(nav.push("/news/3").unwrap(), NavOutcome::Suppressed);
    assert_eq!(router.count("push /news/3"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_suppressed_repeat_does_not_extend_window() {
    let (router, nav) = setup();

    assert!(nav.push("/forum/disc-2").unwrap().is_dispatched());
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(nav.push("/forum/disc-2").unwrap(), NavOutcome::Suppressed);

    // Expiry counts from the accepted push at t=0, not the repeat at t=400
    tokio::time::sleep(Duration::from_millis(101)).await;
    assert_eq!(nav.push("/forum/disc-2").unwrap(), NavOutcome::Dispatched);
    assert_eq!(router.count("push /forum/disc-2"), 2);
}

#[test]
fn test_huge_window_suppresses_without_panicking() {
    let (router, nav) = setup();

    assert!(nav.push_within("/forum", Duration::MAX).unwrap().is_dispatched());
    assert_eq!(
        nav.replace_within("/forum", Duration::MAX).unwrap(),
        NavOutcome::Suppressed
    );
    assert!(nav.back_within(Duration::MAX).unwrap().is_dispatched());
    assert!(nav
        .navigate_within(&json!({ "screen": "Forum" }), Duration::MAX)
        .unwrap()
        .is_dispatched());

    assert_eq!(router.calls().len(), 3);
    assert_eq!(nav.pending_count(), 3);
}

#[test]
fn test_distinct_targets_both_navigate() {
    let (router, nav) = setup();
    nav.push("/a").unwrap();
    nav.push("/b").unwrap();
    assert_eq!(router.calls(), vec!["push /a", "push /b"]);
}

#[test]
fn test_back_collapses_across_unrelated_navigation() {
    let (router, nav) = setup();

    assert!(nav.back().unwrap().is_dispatched());
    nav.push("/mentorship").unwrap();
    nav.replace("/transcripts").unwrap();
    assert_eq!(nav.back().unwrap(), NavOutcome::Suppressed);

    assert_eq!(router.count("back"), 1);
    assert_eq!(
        router.calls(),
        vec!["back", "push /mentorship", "replace /transcripts"]
    );
}

#[test]
fn test_navigate_params_dedup() {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct DiscussionParams<'a> {
        screen: &'a str,
        discussion_id: &'a str,
    }

    let (router, nav) = setup();
    let typed = DiscussionParams {
        screen: "Discussion",
        discussion_id: "disc-1",
    };

    assert!(nav.navigate(&typed).unwrap().is_dispatched());
    assert_eq!(
        nav.navigate(&json!({ "discussionId": "disc-1", "screen": "Discussion" }))
            .unwrap(),
        NavOutcome::Suppressed
    );
    assert!(nav.is_pending(&NavKey::from_params(&typed).unwrap()));
    assert_eq!(router.calls().len(), 1);
}

#[test]
fn test_router_failure_reaches_caller() {
    let (router, nav) = setup();
    *router.fail_with.lock() = Some(NavigationError::router("push", "stack locked"));

    let err = nav.push("/highlights").unwrap_err();
    assert_eq!(err, NavigationError::router("push", "stack locked"));

    // The window still runs on its own clock
    *router.fail_with.lock() = None;
    assert_eq!(nav.push("/highlights").unwrap(), NavOutcome::Suppressed);
    assert_eq!(router.count("push /highlights"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_clear_with_timers_in_flight() {
    let (router, nav) = setup();
    nav.push("/notifications").unwrap();
    nav.back().unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;

    nav.clear();
    nav.clear();
    assert_eq!(nav.pending_count(), 0);

    assert!(nav.push("/notifications").unwrap().is_dispatched());
    assert!(nav.back().unwrap().is_dispatched());

    // The first timers fire at t=500 and must leave the new claims alone
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(nav.pending_count(), 2);
    assert_eq!(nav.back().unwrap(), NavOutcome::Suppressed);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(nav.pending_count(), 0);
    assert_eq!(router.calls().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_configured_window_applies_to_defaults() {
    let router = Arc::new(RecordingRouter::default());
    let nav = NavigationDebouncer::with_config(
        router.clone(),
        NavigationConfig {
            debounce: Duration::from_millis(100),
        },
    );

    nav.push("/profile").unwrap();
    assert_eq!(nav.push("/profile").unwrap(), NavOutcome::Suppressed);
    tokio::time::sleep(Duration::from_millis(101)).await;
    assert!(nav.push("/profile").unwrap().is_dispatched());
    assert_eq!(nav.pending_count(), 1);
}
