//! # AlumHub Navigation
//!
//! Debounced wrapper around the host router. Screens call
//! [`NavigationDebouncer`] instead of the router directly so that a double
//! tap opens one screen, not two.
//!
//! - [`Router`]: the navigation primitives the host provides
//! - [`NavKey`]: what counts as "the same destination"
//! - [`PendingNavigationSet`]: keys still inside their window
//! - [`NavigationDebouncer`]: the wrapper itself
//!
//! ```rust
//! use alumhub_navigation::{NavOutcome, NavigationDebouncer, StackRouter};
//!
//! let nav = NavigationDebouncer::new(StackRouter::new("/home"));
//! assert_eq!(nav.push("/forum").unwrap(), NavOutcome::Dispatched);
//! assert_eq!(nav.push("/forum").unwrap(), NavOutcome::Suppressed);
//! ```

pub mod debouncer;
pub mod key;
pub mod pending;
pub mod router;

pub use debouncer::{NavOutcome, NavigationConfig, NavigationDebouncer, DEFAULT_DEBOUNCE};
pub use key::{canonical_json, NavKey};
pub use pending::PendingNavigationSet;
pub use router::{Router, StackRouter};
