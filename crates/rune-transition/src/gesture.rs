//! Drag-to-go-back: pointer input to a bounded progress value.
//!
//! # State machine
//!
//! `Idle -> Dragging -> Settling -> Idle`
//!
//! - A pointer-down is accepted only from `Idle`, with gestures enabled, within
//!   `response_distance` of the leading edge (left for cards, top for modals).
//! - While `Dragging`, progress is `1 - offset / axis_length`, clamped to [0, 1].
//! - Release decides between going back (progress to 0) and committing
//!   (progress to 1), then settles with a timed animation.
//! - `Settling` is never interrupted; pointer-downs during it are ignored.
//!
//! If the host loses focus mid-drag it calls [`GestureProgressController::reset`],
//! which abandons the drag without a decision.

use rune_config::{PresentationMode, RuneConfig};
use serde::{Deserialize, Serialize};

use crate::easing::EasingFunction;
use crate::interpolate::Progress;
use crate::progress::{ProgressAnimation, TransitionSpec};
use crate::transition::Layout;

/// Axis along which the back gesture travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureAxis {
    /// Card stacks: swipe right from the left edge.
    Horizontal,
    /// Modal stacks: swipe down from the top edge.
    Vertical,
}

impl From<PresentationMode> for GestureAxis {
    fn from(mode: PresentationMode) -> Self {
        match mode {
            PresentationMode::Card => Self::Horizontal,
            PresentationMode::Modal => Self::Vertical,
        }
    }
}

impl GestureAxis {
    fn coordinate(&self, sample: &PointerSample) -> f64 {
        match self {
            Self::Horizontal => sample.x,
            Self::Vertical => sample.y,
        }
    }

    fn length(&self, layout: &Layout) -> f64 {
        match self {
            Self::Horizontal => layout.width,
            Self::Vertical => layout.height,
        }
    }
}

/// Gesture thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub enabled: bool,
    pub axis: GestureAxis,
    /// Max distance (px) from the leading edge at which a drag may start (default: 30).
    pub response_distance: f64,
    /// Offset ratio at or beyond which a slow release goes back (default: 0.5).
    pub position_threshold: f64,
    /// Release speed (px/ms) that decides on its own (default: 0.5).
    pub velocity_threshold: f64,
    /// Timing of the settle animation.
    pub settle: TransitionSpec,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            axis: GestureAxis::Horizontal,
            response_distance: 30.0,
            position_threshold: 0.5,
            velocity_threshold: 0.5,
            settle: TransitionSpec::new(250.0, EasingFunction::EaseOut),
        }
    }
}

impl GestureConfig {
    pub fn from_config(config: &RuneConfig) -> Self {
        Self {
            enabled: config.gestures_enabled(),
            axis: config.stack.mode.into(),
            response_distance: config.gesture.response_distance,
            position_threshold: config.gesture.position_threshold,
            velocity_threshold: config.gesture.velocity_threshold,
            settle: TransitionSpec::new(config.gesture.settle_duration_ms, EasingFunction::EaseOut),
        }
    }
}

/// One pointer position with a timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub time_ms: f64,
}

impl PointerSample {
    pub fn new(x: f64, y: f64, time_ms: f64) -> Self {
        Self { x, y, time_ms }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging,
    Settling,
}

/// Observable gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GestureState {
    pub phase: GesturePhase,
    /// Displacement (px) in the back direction since pointer-down.
    pub accumulated_offset: f64,
    /// Speed (px/ms) in the back direction between the last two samples; 0 when
    /// they share a timestamp.
    pub velocity: f64,
}

/// Outcome of a release.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReleaseDecision {
    /// Where the settle animation ends.
    pub target: Progress,
    /// `true` when the user swiped back to the previous route.
    pub go_back: bool,
}

impl ReleaseDecision {
    fn back() -> Self {
        Self {
            target: Progress::START,
            go_back: true,
        }
    }

    fn commit() -> Self {
        Self {
            target: Progress::END,
            go_back: false,
        }
    }
}

#[derive(Debug, Clone)]
struct Drag {
    origin: PointerSample,
    last: PointerSample,
}

/// Turns pointer input into progress and settles it after release.
#[derive(Debug, Clone)]
pub struct GestureProgressController {
    config: GestureConfig,
    state: GestureState,
    progress: Progress,
    drag: Option<Drag>,
    settle: Option<(ProgressAnimation, ReleaseDecision)>,
}

impl GestureProgressController {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: GestureState::default(),
            progress: Progress::END,
            drag: None,
            settle: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn phase(&self) -> GesturePhase {
        self.state.phase
    }

    /// `true` while the gesture owns the progress value.
    pub fn is_active(&self) -> bool {
        self.state.phase != GesturePhase::Idle
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Start a drag. Returns whether the pointer-down was accepted.
    pub fn pointer_down(&mut self, sample: PointerSample, _layout: Layout) -> bool {
        if self.state.phase != GesturePhase::Idle {
            log::trace!("pointer-down ignored in {:?}", self.state.phase);
            return false;
        }
        if !self.config.enabled {
            return false;
        }
        let edge_distance = self.config.axis.coordinate(&sample);
        if !(0.0..=self.config.response_distance).contains(&edge_distance) {
            log::trace!("pointer-down {edge_distance}px from edge, outside response distance");
            return false;
        }

        self.drag = Some(Drag {
            origin: sample,
            last: sample,
        });
        self.state = GestureState {
            phase: GesturePhase::Dragging,
            accumulated_offset: 0.0,
            velocity: 0.0,
        };
        self.progress = Progress::END;
        log::debug!("back gesture started at ({}, {})", sample.x, sample.y);
        true
    }

    /// Follow the pointer. Returns the new progress while dragging.
    pub fn pointer_move(&mut self, sample: PointerSample, layout: Layout) -> Option<Progress> {
        if self.state.phase != GesturePhase::Dragging {
            return None;
        }
        self.track(sample, layout);
        Some(self.progress)
    }

    /// Release the pointer and decide the outcome. Returns `None` if no drag was
    /// in progress.
    pub fn pointer_up(&mut self, sample: PointerSample, layout: Layout) -> Option<ReleaseDecision> {
        if self.state.phase != GesturePhase::Dragging {
            return None;
        }
        self.track(sample, layout);
        self.drag = None;

        let decision = self.decide(layout);
        log::info!(
            "back gesture released: offset {:.1}px, velocity {:.3}px/ms, {}",
            self.state.accumulated_offset,
            self.state.velocity,
            if decision.go_back { "going back" } else { "committing" }
        );

        self.state.phase = GesturePhase::Settling;
        self.settle = Some((
            ProgressAnimation::new(self.progress, decision.target, self.config.settle),
            decision,
        ));
        Some(decision)
    }

    /// Advance the settle animation. Returns the decision once progress has landed on
    /// its target and the controller is `Idle` again.
    pub fn tick(&mut self, delta_ms: f64) -> Option<ReleaseDecision> {
        let (animation, decision) = self.settle.as_mut()?;
        animation.update(delta_ms);
        self.progress = animation.value();
        if !animation.is_finished() {
            return None;
        }

        let decision = *decision;
        self.settle = None;
        self.state = GestureState::default();
        log::debug!("back gesture settled at {}", self.progress.value());
        Some(decision)
    }

    /// Abandon a drag without a decision. Has no effect while settling.
    pub fn reset(&mut self) {
        if self.state.phase == GesturePhase::Dragging {
            log::debug!("back gesture abandoned");
            self.drag = None;
            self.state = GestureState::default();
            self.progress = Progress::END;
        }
    }

    fn track(&mut self, sample: PointerSample, layout: Layout) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let axis = self.config.axis;

        // Samples without elapsed time carry no speed information.
        let elapsed = sample.time_ms - drag.last.time_ms;
        self.state.velocity = if elapsed > 0.0 {
            (axis.coordinate(&sample) - axis.coordinate(&drag.last)) / elapsed
        } else {
            0.0
        };
        drag.last = sample;

        let offset = axis.coordinate(&sample) - axis.coordinate(&drag.origin);
        self.state.accumulated_offset = offset;

        let length = axis.length(&layout);
        self.progress = if length > 0.0 {
            Progress::new(1.0 - offset / length)
        } else {
            Progress::END
        };
    }

    fn decide(&self, layout: Layout) -> ReleaseDecision {
        let velocity = self.state.velocity;
        let threshold = self.config.velocity_threshold;
        if velocity >= threshold {
            return ReleaseDecision::back();
        }
        if velocity <= -threshold {
            return ReleaseDecision::commit();
        }

        let length = self.config.axis.length(&layout);
        let ratio = if length > 0.0 {
            self.state.accumulated_offset / length
        } else {
            0.0
        };
        if ratio >= self.config.position_threshold {
            ReleaseDecision::back()
        } else {
            ReleaseDecision::commit()
        }
    }
}
