//! Transition definitions: an item filter paired with a style interpolator.
//!
//! A [`StyleInterpolator`] turns the filtered items of both routes plus the current
//! [`TransitionState`] into [`StyleMaps`]. Anything random is drawn up front into
//! [`AppearPlan`]s (see [`compose::PreparedTransition`]), which keeps
//! [`StyleInterpolator::style_maps`] a pure function of its inputs.

pub mod catalog;
pub mod compose;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::filter::ItemFilter;
use crate::interpolate::Progress;
use crate::item::TransitionItem;
use crate::matcher;
use crate::style::{StyleMaps, StyleProperty};

pub use catalog::{
    CrossFade, DelayedFadeIn, FastFadeOut, SharedElementMove, Slide, StaggeredAppear,
};
pub use compose::{PreparedTransition, Transition, together};

/// Viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
}

impl Layout {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Inputs shared by every definition at one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransitionState {
    pub progress: Progress,
    pub layout: Layout,
    /// Signed route-index delta: +1 for a push, -1 for a pop.
    pub step: i32,
}

impl TransitionState {
    pub fn new(progress: impl Into<Progress>, layout: Layout, step: i32) -> Self {
        Self {
            progress: progress.into(),
            layout,
            step,
        }
    }

    pub fn with_progress(self, progress: impl Into<Progress>) -> Self {
        Self {
            progress: progress.into(),
            ..self
        }
    }
}

/// Translation axis of an appear animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

/// Per-item random parameters, drawn once per transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppearPlan {
    /// Progress at which the item starts to appear.
    pub start: f64,
    pub axis: Axis,
    /// -1.0 or +1.0.
    pub direction: f64,
}

/// Plans keyed by item id.
pub type ItemPlans = BTreeMap<String, AppearPlan>;

/// A pure style function over filtered items.
pub trait StyleInterpolator: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Properties this interpolator may set.
    fn properties(&self) -> &'static [StyleProperty];

    /// Draw random parameters for an incoming item. Deterministic interpolators
    /// return `None`.
    fn plan_item(&self, _item: &TransitionItem, _rng: &mut dyn RngCore) -> Option<AppearPlan> {
        None
    }

    fn style_maps(
        &self,
        from: &[TransitionItem],
        to: &[TransitionItem],
        state: &TransitionState,
        plans: &ItemPlans,
    ) -> StyleMaps;

    /// Whether matched items are cloned into an overlay and moved between routes.
    fn is_shared_element(&self) -> bool {
        false
    }
}

/// A filter plus the interpolator that styles the items it accepts.
#[derive(Debug, Clone)]
pub struct TransitionDefinition {
    filter: ItemFilter,
    interpolator: Arc<dyn StyleInterpolator>,
}

impl TransitionDefinition {
    pub fn new(filter: ItemFilter, interpolator: impl StyleInterpolator + 'static) -> Self {
        Self {
            filter,
            interpolator: Arc::new(interpolator),
        }
    }

    pub fn filter(&self) -> &ItemFilter {
        &self.filter
    }

    pub fn name(&self) -> &'static str {
        self.interpolator.name()
    }

    pub fn properties(&self) -> &'static [StyleProperty] {
        self.interpolator.properties()
    }

    pub fn is_shared_element(&self) -> bool {
        self.interpolator.is_shared_element()
    }

    /// Draw plans for filtered incoming items that have none in `existing`.
    pub fn draw_plans(
        &self,
        to: &[TransitionItem],
        existing: &ItemPlans,
        rng: &mut dyn RngCore,
    ) -> ItemPlans {
        let mut drawn = ItemPlans::new();
        for item in to.iter().filter(|item| self.filter.matches(&item.id)) {
            if existing.contains_key(&item.id) || drawn.contains_key(&item.id) {
                continue;
            }
            if let Some(plan) = self.interpolator.plan_item(item, rng) {
                drawn.insert(item.id.clone(), plan);
            }
        }
        drawn
    }

    pub fn style_maps(
        &self,
        from: &[TransitionItem],
        to: &[TransitionItem],
        state: &TransitionState,
        plans: &ItemPlans,
    ) -> StyleMaps {
        let from = self.filter.select(from);
        let to = self.filter.select(to);
        self.interpolator.style_maps(&from, &to, state, plans)
    }

    /// Outgoing copies of matched, filtered items. Empty unless shared-element.
    pub fn items_to_clone(&self, from: &[TransitionItem], to: &[TransitionItem]) -> Vec<TransitionItem> {
        if !self.is_shared_element() {
            return Vec::new();
        }
        matcher::items_to_clone(&self.filter.select(from), &self.filter.select(to))
    }

    /// Both copies of matched, filtered items. Empty unless shared-element.
    pub fn items_to_measure(
        &self,
        from: &[TransitionItem],
        to: &[TransitionItem],
    ) -> Vec<TransitionItem> {
        if !self.is_shared_element() {
            return Vec::new();
        }
        matcher::items_to_measure(&self.filter.select(from), &self.filter.select(to))
    }
}
