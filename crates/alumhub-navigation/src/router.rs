//! Router interface
//!
//! The debouncer wraps whatever router the host application provides. This
//! module defines that seam and an in-memory stack router used by the demo
//! binary and tests.

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

use alumhub_core::NavigationError;

/// Navigation primitives offered by the host router
///
/// Implementations are called synchronously. Errors are returned to the
/// code that asked for the navigation; nothing in between handles them.
pub trait Router: Send + Sync {
    /// Open `target` on top of the current screen
    fn push(&self, target: &str) -> Result<(), NavigationError>;

    /// Swap the current screen for `target`
    fn replace(&self, target: &str) -> Result<(), NavigationError>;

    /// Return to the previous screen
    fn back(&self) -> Result<(), NavigationError>;

    /// Navigate with structured params (screen name plus arguments)
    fn navigate(&self, params: &Value) -> Result<(), NavigationError>;
}

impl<R: Router + ?Sized> Router for Arc<R> {
    fn push(&self, target: &str) -> Result<(), NavigationError> {
        (**self).push(target)
    }

    fn replace(&self, target: &str) -> Result<(), NavigationError> {
        (**self).replace(target)
    }

    fn back(&self) -> Result<(), NavigationError> {
        (**self).back()
    }

    fn navigate(&self, params: &Value) -> Result<(), NavigationError> {
        (**self).navigate(params)
    }
}

/// In-memory screen stack
///
/// Starts at a root route. `back` at the root fails with
/// [`NavigationError::EmptyStack`]. When routes are registered, any other
/// target is rejected with [`NavigationError::UnknownRoute`].
#[derive(Debug)]
pub struct StackRouter {
    stack: Mutex<Vec<String>>,
    routes: Option<HashSet<String>>,
}

impl StackRouter {
    /// Create a router accepting any target
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            stack: Mutex::new(vec![root.into()]),
            routes: None,
        }
    }

    /// Create a router that only accepts the given routes
    pub fn with_routes<I, S>(root: impl Into<String>, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let root = root.into();
        let mut known: HashSet<String> = routes.into_iter().map(Into::into).collect();
        known.insert(root.clone());
        Self {
            stack: Mutex::new(vec![root]),
            routes: Some(known),
        }
    }

    /// Current screen
    pub fn current(&self) -> Option<String> {
        self.stack.lock().last().cloned()
    }

    /// Snapshot of the stack, root first
    pub fn stack(&self) -> Vec<String> {
        self.stack.lock().clone()
    }

    /// Number of screens on the stack
    pub fn depth(&self) -> usize {
        self.stack.lock().len()
    }

    fn check_route(&self, target: &str) -> Result<(), NavigationError> {
        match &self.routes {
            Some(routes) if !routes.contains(target) => Err(NavigationError::UnknownRoute {
                target: target.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl Router for StackRouter {
    fn push(&self, target: &str) -> Result<(), NavigationError> {
        self.check_route(target)?;
        self.stack.lock().push(target.to_string());
        Ok(())
    }

    fn replace(&self, target: &str) -> Result<(), NavigationError> {
        self.check_route(target)?;
        let mut stack = self.stack.lock();
        stack.pop();
        stack.push(target.to_string());
        Ok(())
    }

    fn back(&self) -> Result<(), NavigationError> {
        let mut stack = self.stack.lock();
        if stack.len() <= 1 {
            return Err(NavigationError::EmptyStack);
        }
        stack.pop();
        Ok(())
    }

    fn navigate(&self, params: &Value) -> Result<(), NavigationError> {
        let screen = params
            .get("screen")
            .and_then(Value::as_str)
            .ok_or_else(|| NavigationError::router("navigate", "params have no 'screen' name"))?;
        self.push(screen)
    }
}
