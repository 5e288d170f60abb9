//! Transitionable items and their measured geometry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix of the synthetic item that stands for a whole route's scene.
pub const SCENE_ID_PREFIX: &str = "$scene-";

/// Position and size of an item in the shared screen coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Metrics {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// An independently transitionable element rendered by one route.
///
/// The same `id` may be rendered by two routes at once while a transition is in
/// flight; `(id, route_name)` identifies one rendered copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionItem {
    pub id: String,
    pub route_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
}

impl TransitionItem {
    /// A freshly mounted, not yet measured item.
    pub fn new(id: impl Into<String>, route_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            route_name: route_name.into(),
            metrics: None,
        }
    }

    /// The synthetic item covering the whole scene of `route_name`.
    pub fn scene(route_name: &str) -> Self {
        Self::new(scene_id(route_name), route_name)
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn is_measured(&self) -> bool {
        self.metrics.is_some()
    }

    pub fn is_scene(&self) -> bool {
        self.id.starts_with(SCENE_ID_PREFIX)
    }

    pub fn key(&self) -> ItemKey<'_> {
        ItemKey {
            id: &self.id,
            route_name: &self.route_name,
        }
    }
}

impl fmt::Display for TransitionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.metrics {
            Some(m) => write!(
                f,
                "{}@{} [{}, {}, {}x{}]",
                self.id, self.route_name, m.x, m.y, m.width, m.height
            ),
            None => write!(f, "{}@{} [unmeasured]", self.id, self.route_name),
        }
    }
}

/// Borrowed composite key `(id, route_name)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemKey<'a> {
    pub id: &'a str,
    pub route_name: &'a str,
}

/// Id of the synthetic scene item for `route_name`.
pub fn scene_id(route_name: &str) -> String {
    format!("{SCENE_ID_PREFIX}{route_name}")
}
