//! Property-based invariant tests for matching, the registry and staggered plans.
//!
//! 1. `items_to_clone(A, B)` is a subset of `A` whose ids are `matched_ids(A, B)`.
//! 2. Adding then removing a fresh key restores the registry content.
//! 3. Staggered start times always lie in [0.1, 0.9], for any seed.
//! 4. Unmeasured items never get shared-element styles.
//! 5. Piecewise evaluation is exact at every stop.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rune_transition::filter::ItemFilter;
use rune_transition::transition::{
    Layout, SharedElementMove, StaggeredAppear, Transition, TransitionState,
};
use rune_transition::{
    Interpolation, Metrics, OutputValue, TransitionItem, TransitionItemRegistry, items_to_clone,
    matched_ids,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn ids_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..12, 0..10)
}

fn items(route: &str, ids: &[u8]) -> Vec<TransitionItem> {
    ids.iter()
        .map(|id| TransitionItem::new(format!("image-{id}"), route))
        .collect()
}

fn maybe_measured(route: &str, ids: &[(u8, bool)]) -> Vec<TransitionItem> {
    ids.iter()
        .map(|(id, measured)| {
            let item = TransitionItem::new(format!("image-{id}"), route);
            if *measured {
                item.with_metrics(Metrics::new(1.0, 2.0, 3.0, 4.0))
            } else {
                item
            }
        })
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Clones come from the outgoing route and cover the matched ids
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clones_are_matched_subset(a in ids_strategy(), b in ids_strategy()) {
        let from = items("Grid", &a);
        let to = items("Detail", &b);

        let clones = items_to_clone(&from, &to);
        for clone in &clones {
            prop_assert!(from.contains(clone), "{} is not an outgoing item", clone);
        }

        let mut expected = matched_ids(&from, &to);
        let mut seen: Vec<String> = Vec::new();
        for clone in &clones {
            if !seen.contains(&clone.id) {
                seen.push(clone.id.clone());
            }
        }
        expected.sort();
        seen.sort();
        prop_assert_eq!(seen, expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Registry add/remove round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn registry_add_remove_restores(existing in ids_strategy(), fresh in 100u8..200) {
        let original = existing.iter().fold(TransitionItemRegistry::new(), |registry, id| {
            registry.add(TransitionItem::new(format!("image-{id}"), "Grid"))
        });
        let fresh_id = format!("image-{fresh}");

        let restored = original
            .add(TransitionItem::new(fresh_id.clone(), "Grid"))
            .remove(&fresh_id, "Grid");

        prop_assert_eq!(restored, original);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Staggered start times stay in range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn staggered_start_in_range(seed in any::<u64>(), count in 1usize..20) {
        let to: Vec<_> = (0..count)
            .map(|i| TransitionItem::new(format!("image-{i}"), "Grid"))
            .collect();
        let transition: Transition = StaggeredAppear::definition(ItemFilter::All).into();
        let mut rng = SmallRng::seed_from_u64(seed);

        let prepared = transition.prepare(&to, &mut rng);
        let plans = prepared.plans().next().expect("one part");
        prop_assert_eq!(plans.len(), count);
        for plan in plans.values() {
            prop_assert!((0.1..=0.9).contains(&plan.start), "start {} out of range", plan.start);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Unmeasured items get no shared-element style
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unmeasured_never_styled(
        a in prop::collection::vec((0u8..8, any::<bool>()), 0..8),
        b in prop::collection::vec((0u8..8, any::<bool>()), 0..8),
        progress in 0.0f64..=1.0,
    ) {
        let from = maybe_measured("Grid", &a);
        let to = maybe_measured("Detail", &b);
        let transition: Transition = SharedElementMove::definition(ItemFilter::All).into();
        let mut rng = SmallRng::seed_from_u64(0);
        let prepared = transition.prepare(&to, &mut rng);

        let state = TransitionState::new(progress, Layout::new(400.0, 800.0), 1);
        let maps = prepared.style_maps(&from, &to, &state);
        prop_assert!(maps.to.is_empty());
        for id in maps.from.ids() {
            let first_from = from.iter().find(|item| item.id == id).expect("outgoing item");
            let first_to = to.iter().find(|item| item.id == id).expect("incoming item");
            prop_assert!(first_from.is_measured() && first_to.is_measured());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Exact at stops
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn exact_at_stops(mid in 0.05f64..0.95, values in prop::array::uniform3(-1000.0f64..1000.0)) {
        let input = vec![0.0, mid, 1.0];
        let interpolation = Interpolation::numbers(input.clone(), values.to_vec()).unwrap();
        for (stop, expected) in input.iter().zip(values) {
            prop_assert_eq!(interpolation.evaluate(*stop), OutputValue::Number(expected));
        }
    }
}
