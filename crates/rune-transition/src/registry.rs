//! Registry of transitionable items across all mounted routes.
//!
//! [`TransitionItemRegistry`] is a persistent value: every update returns a new
//! registry and leaves the old one untouched, so a style computation can keep reading
//! a snapshot while registrations continue. [`RegistryHandle`] is the thin proxy that
//! the view tree receives to register, unregister and report measurements.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::item::{Metrics, TransitionItem};

/// Ordered collection of items keyed by `(id, route_name)`.
#[derive(Debug, Clone, Default)]
pub struct TransitionItemRegistry {
    items: Arc<Vec<TransitionItem>>,
}

impl TransitionItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: &str, route_name: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.id == id && item.route_name == route_name)
    }

    /// Add an item. An item with the same `(id, route_name)` is replaced in place.
    pub fn add(&self, item: TransitionItem) -> Self {
        let mut items = self.items.as_ref().clone();
        match self.position(&item.id, &item.route_name) {
            Some(index) => items[index] = item,
            None => items.push(item),
        }
        Self {
            items: Arc::new(items),
        }
    }

    /// Remove the item keyed by `(id, route_name)`. Absent keys are a no-op and return
    /// a registry sharing storage with `self`.
    pub fn remove(&self, id: &str, route_name: &str) -> Self {
        match self.position(id, route_name) {
            Some(index) => {
                let mut items = self.items.as_ref().clone();
                items.remove(index);
                Self {
                    items: Arc::new(items),
                }
            }
            None => self.clone(),
        }
    }

    /// Attach measured metrics. Absent keys are a no-op.
    pub fn update_metrics(&self, id: &str, route_name: &str, metrics: Metrics) -> Self {
        match self.position(id, route_name) {
            Some(index) if self.items[index].metrics != Some(metrics) => {
                let mut items = self.items.as_ref().clone();
                items[index].metrics = Some(metrics);
                Self {
                    items: Arc::new(items),
                }
            }
            _ => self.clone(),
        }
    }

    pub fn all(&self) -> &[TransitionItem] {
        &self.items
    }

    /// Items rendered by `route_name`, in registration order.
    pub fn for_route(&self, route_name: &str) -> Vec<TransitionItem> {
        self.items
            .iter()
            .filter(|item| item.route_name == route_name)
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str, route_name: &str) -> Option<&TransitionItem> {
        self.position(id, route_name).map(|index| &self.items[index])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cheap identity check: `true` when both values share storage, which implies
    /// equal content.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl PartialEq for TransitionItemRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.items == other.items
    }
}

#[derive(Debug, Default)]
struct SharedRegistry {
    registry: TransitionItemRegistry,
    revision: u64,
}

/// Cloneable handle passed down the view tree for item registration.
///
/// The coordinator owns the canonical registry; handles forward updates to it and
/// bump a revision counter so the coordinator can tell when to re-derive styles.
#[derive(Debug, Clone, Default)]
pub struct RegistryHandle {
    shared: Arc<Mutex<SharedRegistry>>,
}

impl RegistryHandle {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply(&self, update: impl FnOnce(&TransitionItemRegistry) -> TransitionItemRegistry) {
        let mut shared = self.shared.lock();
        let next = update(&shared.registry);
        if !next.ptr_eq(&shared.registry) {
            shared.registry = next;
            shared.revision += 1;
        }
    }

    /// Called when a transitionable element mounts.
    pub fn register(&self, item: TransitionItem) {
        log::trace!("register transition item {item}");
        self.apply(|registry| registry.add(item));
    }

    /// Called when a transitionable element unmounts.
    pub fn unregister(&self, id: &str, route_name: &str) {
        log::trace!("unregister transition item {id}@{route_name}");
        self.apply(|registry| registry.remove(id, route_name));
    }

    /// Measurement callback: the rendering layer reports an item's layout.
    pub fn set_metrics(&self, id: &str, route_name: &str, metrics: Metrics) {
        self.apply(|registry| registry.update_metrics(id, route_name, metrics));
    }

    /// Current registry value.
    pub fn snapshot(&self) -> TransitionItemRegistry {
        self.shared.lock().registry.clone()
    }

    /// Monotonic counter bumped on every effective change.
    pub fn revision(&self) -> u64 {
        self.shared.lock().revision
    }
}
