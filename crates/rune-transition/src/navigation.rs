//! Navigation state consumed by the coordinator, and what it sends back.
//!
//! The router owns the route stack and hands the coordinator a fresh
//! [`NavigationState`] after every change. The coordinator never edits the stack;
//! a completed back-swipe is reported as a [`NavigationCommand`] for the router to
//! apply.

use serde::{Deserialize, Serialize};

/// One entry of the route stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Stable key of this stack entry.
    pub key: String,
    /// Name of the screen this entry renders.
    pub route_name: String,
}

impl Route {
    pub fn new(key: impl Into<String>, route_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            route_name: route_name.into(),
        }
    }
}

/// Route stack with the focused index.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationState {
    pub index: usize,
    pub routes: Vec<Route>,
}

impl NavigationState {
    pub fn new(index: usize, routes: Vec<Route>) -> Self {
        Self { index, routes }
    }

    /// A stack with its last route focused.
    pub fn stack(routes: Vec<Route>) -> Self {
        Self {
            index: routes.len().saturating_sub(1),
            routes,
        }
    }

    pub fn focused(&self) -> Option<&Route> {
        self.routes.get(self.index)
    }

    /// The route a back navigation would reveal.
    pub fn previous(&self) -> Option<&Route> {
        self.index.checked_sub(1).and_then(|i| self.routes.get(i))
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0 && self.focused().is_some()
    }
}

/// Commands the coordinator asks the router to perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavigationCommand {
    /// Pop the route with this key.
    Back { key: String },
}

/// Transition lifecycle notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransitionEvent {
    /// A transition between two routes began.
    Started {
        from_route: String,
        to_route: String,
        /// Driven by a back-swipe rather than a route change.
        gesture: bool,
    },
    /// Progress reached its final value.
    Ended {
        from_route: String,
        to_route: String,
        gesture: bool,
    },
}

impl TransitionEvent {
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, Self::Ended { .. })
    }

    /// `(from_route, to_route)` of the transition.
    pub fn routes(&self) -> (&str, &str) {
        match self {
            Self::Started {
                from_route,
                to_route,
                ..
            }
            | Self::Ended {
                from_route,
                to_route,
                ..
            } => (from_route, to_route),
        }
    }
}
