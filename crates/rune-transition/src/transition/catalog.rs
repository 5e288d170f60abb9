//! Built-in style interpolators.
//!
//! Each type pairs with an [`ItemFilter`] through its `definition` constructor:
//!
//! ```
//! use rune_transition::filter::ItemFilter;
//! use rune_transition::transition::{CrossFade, SharedElementMove, together};
//!
//! let images = ItemFilter::pattern("image-.+").unwrap();
//! let scenes = ItemFilter::pattern(r"\$scene-.+").unwrap();
//! let transition = together([
//!     SharedElementMove::definition(images).into(),
//!     CrossFade::definition(scenes).into(),
//! ]);
//! assert_eq!(transition.definitions().count(), 2);
//! ```

use rand::{Rng, RngCore};

use crate::filter::ItemFilter;
use crate::interpolate::{Angle, Progress};
use crate::item::TransitionItem;
use crate::matcher;
use crate::style::{Style, StyleMap, StyleMaps, StyleProperty, TransformOp};

use super::{AppearPlan, Axis, ItemPlans, StyleInterpolator, TransitionDefinition, TransitionState};

const LINEAR: [f64; 2] = [0.0, 1.0];

/// Distance in px staggered items travel while appearing.
pub const STAGGER_DISTANCE: f64 = 400.0;

fn opacity_only(
    items: &[TransitionItem],
    progress: Progress,
    input: &[f64],
    output: &[f64],
) -> StyleMap {
    let opacity = progress.keyframes(input, output);
    items
        .iter()
        .fold(StyleMap::builder(), |builder, item| {
            builder.insert(item.id.clone(), Style::builder().opacity(opacity).build())
        })
        .build()
}

/// Moves matched items from their outgoing frame to their incoming frame.
///
/// Output goes to the `from` map: the outgoing copy is cloned into an overlay and
/// animated. Items unmeasured on either side get no entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedElementMove;

impl SharedElementMove {
    pub fn definition(filter: ItemFilter) -> TransitionDefinition {
        TransitionDefinition::new(filter, Self)
    }
}

impl StyleInterpolator for SharedElementMove {
    fn name(&self) -> &'static str {
        "shared-element-move"
    }

    fn properties(&self) -> &'static [StyleProperty] {
        &[
            StyleProperty::Left,
            StyleProperty::Top,
            StyleProperty::Width,
            StyleProperty::Height,
        ]
    }

    fn style_maps(
        &self,
        from: &[TransitionItem],
        to: &[TransitionItem],
        state: &TransitionState,
        _plans: &ItemPlans,
    ) -> StyleMaps {
        let progress = state.progress;
        let mut builder = StyleMap::builder();

        for pair in matcher::shared_pairs(from, to) {
            let Some((start, end)) = pair.measured_metrics() else {
                log::debug!("shared element {} not measured yet, skipping", pair.id());
                continue;
            };
            let style = Style::builder()
                .frame(
                    progress.keyframes(&LINEAR, &[start.x, end.x]),
                    progress.keyframes(&LINEAR, &[start.y, end.y]),
                    progress.keyframes(&LINEAR, &[start.width, end.width]),
                    progress.keyframes(&LINEAR, &[start.height, end.height]),
                )
                .build();
            builder = builder.insert(pair.id(), style);
        }

        StyleMaps::from_only(builder.build())
    }

    fn is_shared_element(&self) -> bool {
        true
    }
}

/// Fades the outgoing items out and the incoming items in, spinning both a full turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossFade;

impl CrossFade {
    pub fn definition(filter: ItemFilter) -> TransitionDefinition {
        TransitionDefinition::new(filter, Self)
    }

    fn side(items: &[TransitionItem], progress: Progress, appearing: bool) -> StyleMap {
        let opacity = if appearing {
            progress.keyframes(&LINEAR, &[0.0, 1.0])
        } else {
            progress.keyframes(&LINEAR, &[1.0, 0.0])
        };
        let rotate = progress.angle_keyframes(&LINEAR, &[Angle::deg(0.0), Angle::deg(360.0)]);

        items
            .iter()
            .fold(StyleMap::builder(), |builder, item| {
                let style = Style::builder()
                    .opacity(opacity)
                    .transform(TransformOp::Rotate(rotate))
                    .build();
                builder.insert(item.id.clone(), style)
            })
            .build()
    }
}

impl StyleInterpolator for CrossFade {
    fn name(&self) -> &'static str {
        "cross-fade"
    }

    fn properties(&self) -> &'static [StyleProperty] {
        &[StyleProperty::Opacity, StyleProperty::Rotate]
    }

    fn style_maps(
        &self,
        from: &[TransitionItem],
        to: &[TransitionItem],
        state: &TransitionState,
        _plans: &ItemPlans,
    ) -> StyleMaps {
        StyleMaps::new(
            Self::side(from, state.progress, false),
            Self::side(to, state.progress, true),
        )
    }
}

/// Keeps incoming items hidden until 80% progress, then fades them in.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelayedFadeIn;

impl DelayedFadeIn {
    pub fn definition(filter: ItemFilter) -> TransitionDefinition {
        TransitionDefinition::new(filter, Self)
    }
}

impl StyleInterpolator for DelayedFadeIn {
    fn name(&self) -> &'static str {
        "delayed-fade-in"
    }

    fn properties(&self) -> &'static [StyleProperty] {
        &[StyleProperty::Opacity]
    }

    fn style_maps(
        &self,
        _from: &[TransitionItem],
        to: &[TransitionItem],
        state: &TransitionState,
        _plans: &ItemPlans,
    ) -> StyleMaps {
        StyleMaps::to_only(opacity_only(to, state.progress, &[0.0, 0.8, 1.0], &[0.0, 0.0, 1.0]))
    }
}

/// Fades outgoing items out within the first 20% of progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastFadeOut;

impl FastFadeOut {
    pub fn definition(filter: ItemFilter) -> TransitionDefinition {
        TransitionDefinition::new(filter, Self)
    }
}

impl StyleInterpolator for FastFadeOut {
    fn name(&self) -> &'static str {
        "fast-fade-out"
    }

    fn properties(&self) -> &'static [StyleProperty] {
        &[StyleProperty::Opacity]
    }

    fn style_maps(
        &self,
        from: &[TransitionItem],
        _to: &[TransitionItem],
        state: &TransitionState,
        _plans: &ItemPlans,
    ) -> StyleMaps {
        StyleMaps::from_only(opacity_only(from, state.progress, &[0.0, 0.2, 1.0], &[1.0, 0.0, 0.0]))
    }
}

/// Slides the outgoing scene off and the incoming scene on, one viewport width.
///
/// Only single-step transitions are expressible from progress alone; for
/// `|step| != 1` no styles are produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct Slide;

impl Slide {
    const INPUT: [f64; 3] = [0.0, 0.05, 1.0];

    pub fn definition(filter: ItemFilter) -> TransitionDefinition {
        TransitionDefinition::new(filter, Self)
    }

    fn side(items: &[TransitionItem], progress: Progress, output: [f64; 3]) -> StyleMap {
        let translate = progress.keyframes(&Self::INPUT, &output);
        items
            .iter()
            .fold(StyleMap::builder(), |builder, item| {
                let style = Style::builder()
                    .transform(TransformOp::TranslateX(translate))
                    .build();
                builder.insert(item.id.clone(), style)
            })
            .build()
    }
}

impl StyleInterpolator for Slide {
    fn name(&self) -> &'static str {
        "slide"
    }

    fn properties(&self) -> &'static [StyleProperty] {
        &[StyleProperty::TranslateX]
    }

    fn style_maps(
        &self,
        from: &[TransitionItem],
        to: &[TransitionItem],
        state: &TransitionState,
        _plans: &ItemPlans,
    ) -> StyleMaps {
        let sign = match state.step {
            1 => 1.0,
            -1 => -1.0,
            step => {
                log::debug!("slide skipped for multi-step transition (step {step})");
                return StyleMaps::default();
            }
        };
        let width = state.layout.width * sign;

        StyleMaps::new(
            Self::side(from, state.progress, [0.0, -width, -width]),
            Self::side(to, state.progress, [width, 0.0, 0.0]),
        )
    }
}

/// Incoming items fly in from a random side at a random moment.
///
/// Parameters come from the prepared [`AppearPlan`]s; an item without a plan is
/// left unstyled.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaggeredAppear;

impl StaggeredAppear {
    pub fn definition(filter: ItemFilter) -> TransitionDefinition {
        TransitionDefinition::new(filter, Self)
    }

    fn style(plan: &AppearPlan, progress: Progress) -> Style {
        let input = [0.0, plan.start, 1.0];
        let offset = STAGGER_DISTANCE * plan.direction;
        let opacity = progress.keyframes(&input, &[0.0, 0.0, 1.0]);
        let translate = progress.keyframes(&input, &[offset, offset, 0.0]);
        let op = match plan.axis {
            Axis::X => TransformOp::TranslateX(translate),
            Axis::Y => TransformOp::TranslateY(translate),
        };
        Style::builder().opacity(opacity).transform(op).build()
    }
}

impl StyleInterpolator for StaggeredAppear {
    fn name(&self) -> &'static str {
        "staggered-appear"
    }

    fn properties(&self) -> &'static [StyleProperty] {
        &[
            StyleProperty::Opacity,
            StyleProperty::TranslateX,
            StyleProperty::TranslateY,
        ]
    }

    fn plan_item(&self, _item: &TransitionItem, rng: &mut dyn RngCore) -> Option<AppearPlan> {
        let start = rng.random_range(0.1..=0.9);
        let axis = if rng.random_bool(0.5) { Axis::X } else { Axis::Y };
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        Some(AppearPlan {
            start,
            axis,
            direction,
        })
    }

    fn style_maps(
        &self,
        _from: &[TransitionItem],
        to: &[TransitionItem],
        state: &TransitionState,
        plans: &ItemPlans,
    ) -> StyleMaps {
        let mut builder = StyleMap::builder();
        for item in to {
            match plans.get(&item.id) {
                Some(plan) => builder = builder.insert(item.id.clone(), Self::style(plan, state.progress)),
                None => log::debug!("no appear plan for {}, skipping", item.id),
            }
        }
        StyleMaps::to_only(builder.build())
    }
}
