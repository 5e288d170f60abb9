//! Correspondence between the items of the outgoing and incoming routes.
//!
//! Matching is by `id` only; route name and metrics are ignored.

use crate::item::{Metrics, TransitionItem};

/// Ids present on both sides, in outgoing order, without duplicates.
pub fn matched_ids(from: &[TransitionItem], to: &[TransitionItem]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for item in from {
        let on_both = to.iter().any(|other| other.id == item.id);
        if on_both && !ids.contains(&item.id) {
            ids.push(item.id.clone());
        }
    }
    ids
}

fn on_both<'a>(
    items: &'a [TransitionItem],
    ids: &'a [String],
) -> impl Iterator<Item = &'a TransitionItem> + 'a {
    items.iter().filter(move |item| ids.contains(&item.id))
}

/// Outgoing copies of matched items. These are rendered as a temporary overlay so
/// they can move independently of either screen's layout.
pub fn items_to_clone(from: &[TransitionItem], to: &[TransitionItem]) -> Vec<TransitionItem> {
    let ids = matched_ids(from, to);
    on_both(from, &ids).cloned().collect()
}

/// Outgoing then incoming copies of matched items; all of them need metrics before a
/// shared-element interpolation can be produced.
pub fn items_to_measure(from: &[TransitionItem], to: &[TransitionItem]) -> Vec<TransitionItem> {
    let ids = matched_ids(from, to);
    on_both(from, &ids).chain(on_both(to, &ids)).cloned().collect()
}

/// One matched id with both of its rendered copies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharedPair<'a> {
    pub from: &'a TransitionItem,
    pub to: &'a TransitionItem,
}

impl SharedPair<'_> {
    pub fn id(&self) -> &str {
        &self.from.id
    }

    /// Both metrics, or `None` while either copy is still unmeasured.
    pub fn measured_metrics(&self) -> Option<(Metrics, Metrics)> {
        Some((self.from.metrics?, self.to.metrics?))
    }
}

/// Matched pairs, in outgoing order. The first copy on each side wins if a side
/// carries the same id twice.
pub fn shared_pairs<'a>(from: &'a [TransitionItem], to: &'a [TransitionItem]) -> Vec<SharedPair<'a>> {
    matched_ids(from, to)
        .iter()
        .filter_map(|id| {
            let from_item = from.iter().find(|item| &item.id == id)?;
            let to_item = to.iter().find(|item| &item.id == id)?;
            Some(SharedPair {
                from: from_item,
                to: to_item,
            })
        })
        .collect()
}
