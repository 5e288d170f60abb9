//! Composition of definitions and per-route-change preparation.

use std::collections::BTreeSet;

use rand::RngCore;

use crate::item::TransitionItem;
use crate::style::{StyleMaps, StyleProperty};

use super::{ItemPlans, TransitionDefinition, TransitionState};

/// A definition or an ordered group of transitions.
#[derive(Debug, Clone)]
pub enum Transition {
    Single(TransitionDefinition),
    Together(Vec<Transition>),
}

/// Run several transitions at once.
///
/// Every part sees the same inputs. Results merge in list order: for one item id a
/// later part overrides the style keys it sets, keys it leaves alone survive from
/// earlier parts. A transform list counts as one key. Nested groups flatten without
/// changing that order.
pub fn together(parts: impl IntoIterator<Item = Transition>) -> Transition {
    Transition::Together(parts.into_iter().collect())
}

impl From<TransitionDefinition> for Transition {
    fn from(definition: TransitionDefinition) -> Self {
        Self::Single(definition)
    }
}

impl Transition {
    fn flatten<'a>(&'a self, out: &mut Vec<&'a TransitionDefinition>) {
        match self {
            Self::Single(definition) => out.push(definition),
            Self::Together(parts) => parts.iter().for_each(|part| part.flatten(out)),
        }
    }

    /// Leaf definitions in evaluation order.
    pub fn definitions(&self) -> impl Iterator<Item = &TransitionDefinition> {
        let mut out = Vec::new();
        self.flatten(&mut out);
        out.into_iter()
    }

    /// Freeze this transition for one route change, drawing per-item random
    /// parameters for the incoming items.
    pub fn prepare(&self, to: &[TransitionItem], rng: &mut dyn RngCore) -> PreparedTransition {
        let parts = self
            .definitions()
            .map(|definition| PreparedPart {
                plans: definition.draw_plans(to, &ItemPlans::new(), rng),
                definition: definition.clone(),
            })
            .collect();
        PreparedTransition { parts }
    }
}

#[derive(Debug, Clone)]
struct PreparedPart {
    definition: TransitionDefinition,
    plans: ItemPlans,
}

/// A transition bound to one route change.
///
/// Plans are fixed for the transition's lifetime so repeated evaluation at the same
/// progress yields the same styles.
#[derive(Debug, Clone, Default)]
pub struct PreparedTransition {
    parts: Vec<PreparedPart>,
}

impl PreparedTransition {
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Draw plans for incoming items that registered after preparation. Existing
    /// plans are never redrawn.
    pub fn refresh(&mut self, to: &[TransitionItem], rng: &mut dyn RngCore) {
        for part in &mut self.parts {
            let drawn = part.definition.draw_plans(to, &part.plans, rng);
            if !drawn.is_empty() {
                log::trace!("{}: drew {} late plan(s)", part.definition.name(), drawn.len());
                part.plans.extend(drawn);
            }
        }
    }

    /// Styles for both routes at `state`, merged in part order.
    pub fn style_maps(
        &self,
        from: &[TransitionItem],
        to: &[TransitionItem],
        state: &TransitionState,
    ) -> StyleMaps {
        self.parts.iter().fold(StyleMaps::default(), |merged, part| {
            merged.merged(part.definition.style_maps(from, to, state, &part.plans))
        })
    }

    pub fn properties(&self) -> BTreeSet<StyleProperty> {
        self.parts
            .iter()
            .flat_map(|part| part.definition.properties().iter().copied())
            .collect()
    }

    /// Whether every property this transition may set can run on the native driver.
    pub fn supports_native_driver(&self) -> bool {
        self.properties()
            .iter()
            .all(StyleProperty::supports_native_driver)
    }

    /// Plans of every part, in part order.
    pub fn plans(&self) -> impl Iterator<Item = &ItemPlans> {
        self.parts.iter().map(|part| &part.plans)
    }

    pub fn items_to_clone(&self, from: &[TransitionItem], to: &[TransitionItem]) -> Vec<TransitionItem> {
        collect_unique(
            self.parts
                .iter()
                .flat_map(|part| part.definition.items_to_clone(from, to)),
        )
    }

    pub fn items_to_measure(
        &self,
        from: &[TransitionItem],
        to: &[TransitionItem],
    ) -> Vec<TransitionItem> {
        collect_unique(
            self.parts
                .iter()
                .flat_map(|part| part.definition.items_to_measure(from, to)),
        )
    }
}

fn collect_unique(items: impl Iterator<Item = TransitionItem>) -> Vec<TransitionItem> {
    let mut out: Vec<TransitionItem> = Vec::new();
    for item in items {
        if !out.iter().any(|seen| seen.key() == item.key()) {
            out.push(item);
        }
    }
    out
}
