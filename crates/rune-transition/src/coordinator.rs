//! The stack-level coordinator tying navigation changes to transitions.
//!
//! [`TransitionCoordinator`] owns the canonical item registry, the current
//! navigation state and the rule table. Each frame the host calls
//! [`TransitionCoordinator::tick`] and applies the returned [`StyleMaps`].
//!
//! # Usage
//!
//! ```
//! use rune_config::RuneConfig;
//! use rune_transition::coordinator::TransitionCoordinator;
//! use rune_transition::filter::ItemFilter;
//! use rune_transition::navigation::{NavigationState, Route};
//! use rune_transition::rules::{TransitionRule, TransitionRules};
//! use rune_transition::transition::{CrossFade, Layout};
//!
//! let rules = TransitionRules::new().with(TransitionRule::new(
//!     "PhotoGrid",
//!     "PhotoDetail",
//!     CrossFade::definition(ItemFilter::scenes()),
//! ));
//! let mut coordinator = TransitionCoordinator::new(RuneConfig::default(), rules);
//! coordinator.set_layout(Layout::new(400.0, 800.0));
//!
//! let grid = Route::new("grid-0", "PhotoGrid");
//! let detail = Route::new("detail-1", "PhotoDetail");
//! coordinator.set_navigation_state(NavigationState::stack(vec![grid.clone()]));
//! coordinator.set_navigation_state(NavigationState::stack(vec![grid, detail]));
//!
//! let styles = coordinator.tick(16.0);
//! assert!(styles.to.contains("$scene-PhotoDetail"));
//! ```

use std::collections::VecDeque;
use std::iter;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rune_config::{HeaderMode, Platform, PresentationMode, RuneConfig};

use crate::gesture::{
    GestureConfig, GesturePhase, GestureProgressController, GestureState, PointerSample,
    ReleaseDecision,
};
use crate::interpolate::Progress;
use crate::item::TransitionItem;
use crate::navigation::{NavigationCommand, NavigationState, Route, TransitionEvent};
use crate::progress::{ProgressAnimation, TransitionSpec};
use crate::registry::RegistryHandle;
use crate::rules::TransitionRules;
use crate::style::StyleMaps;
use crate::transition::{Layout, PreparedTransition, TransitionState};

/// Header presentation for a stack configuration.
///
/// An explicit setting wins. Otherwise Android and modal stacks render one header
/// per screen, and everything else shares a floating header.
pub fn resolve_header_mode(
    explicit: Option<HeaderMode>,
    platform: Platform,
    mode: PresentationMode,
) -> HeaderMode {
    match explicit {
        Some(header_mode) => header_mode,
        None if platform == Platform::Android || mode == PresentationMode::Modal => {
            HeaderMode::Screen
        }
        None => HeaderMode::Float,
    }
}

/// What currently owns the progress value.
#[derive(Debug, Clone)]
enum Driver {
    Idle,
    Timed(ProgressAnimation),
    Gesture,
}

/// The transition between two routes currently on screen.
#[derive(Debug, Clone)]
struct ActiveTransition {
    from_route: String,
    to_route: String,
    step: i32,
    gesture: bool,
    prepared: PreparedTransition,
}

impl ActiveTransition {
    fn started(&self) -> TransitionEvent {
        TransitionEvent::Started {
            from_route: self.from_route.clone(),
            to_route: self.to_route.clone(),
            gesture: self.gesture,
        }
    }

    fn ended(&self) -> TransitionEvent {
        TransitionEvent::Ended {
            from_route: self.from_route.clone(),
            to_route: self.to_route.clone(),
            gesture: self.gesture,
        }
    }
}

/// Drives transitions for one navigation stack.
#[derive(Debug)]
pub struct TransitionCoordinator {
    config: RuneConfig,
    rules: TransitionRules,
    registry: RegistryHandle,
    seen_revision: u64,
    navigation: NavigationState,
    layout: Layout,
    timing: TransitionSpec,
    gesture: GestureProgressController,
    driver: Driver,
    active: Option<ActiveTransition>,
    progress: Progress,
    /// Key of the route a finished back-swipe asked the router to pop.
    pending_back: Option<String>,
    rng: SmallRng,
    commands: VecDeque<NavigationCommand>,
    events: VecDeque<TransitionEvent>,
}

impl TransitionCoordinator {
    pub fn new(config: RuneConfig, rules: TransitionRules) -> Self {
        let rng = match config.stack.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let timing = TransitionSpec::new(config.timing.duration_ms, config.timing.easing.into());
        let gesture = GestureProgressController::new(GestureConfig::from_config(&config));

        Self {
            config,
            rules,
            registry: RegistryHandle::new(),
            seen_revision: 0,
            navigation: NavigationState::default(),
            layout: Layout::default(),
            timing,
            gesture,
            driver: Driver::Idle,
            active: None,
            progress: Progress::END,
            pending_back: None,
            rng,
            commands: VecDeque::new(),
            events: VecDeque::new(),
        }
    }

    /// Handle for the view tree to register items and report measurements.
    pub fn registry(&self) -> RegistryHandle {
        self.registry.clone()
    }

    pub fn config(&self) -> &RuneConfig {
        &self.config
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    /// `(from_route, to_route)` of the transition on screen, if any.
    pub fn active_routes(&self) -> Option<(&str, &str)> {
        self.active
            .as_ref()
            .map(|active| (active.from_route.as_str(), active.to_route.as_str()))
    }

    /// `true` while progress is animating or following a finger.
    pub fn is_transitioning(&self) -> bool {
        !matches!(self.driver, Driver::Idle)
    }

    /// Apply a new navigation state from the router.
    pub fn set_navigation_state(&mut self, state: NavigationState) {
        let previous = self.navigation.focused().cloned();
        let previous_index = self.navigation.index;
        self.navigation = state;
        let Some(next) = self.navigation.focused().cloned() else {
            log::debug!("navigation state has no focused route");
            return;
        };

        let Some(previous) = previous else {
            log::info!("initial route {}", next.route_name);
            return;
        };
        if previous.key == next.key {
            return;
        }

        if self.back_completed(&previous) {
            log::info!("back gesture to {} completed", next.route_name);
            self.pending_back = None;
            self.active = None;
            self.driver = Driver::Idle;
            self.progress = Progress::END;
            return;
        }
        self.pending_back = None;

        if matches!(self.driver, Driver::Gesture) {
            self.gesture.reset();
        }
        self.finish_active();

        let step = self.navigation.index as i32 - previous_index as i32;
        log::info!(
            "transition {} -> {} (step {step})",
            previous.route_name,
            next.route_name
        );
        self.begin(&previous, &next, step, false);
        self.driver = Driver::Timed(ProgressAnimation::new(
            Progress::START,
            Progress::END,
            self.timing,
        ));
        self.progress = Progress::START;
    }

    /// Advance time and return the styles for this frame.
    pub fn tick(&mut self, delta_ms: f64) -> StyleMaps {
        self.advance(delta_ms);
        self.refresh_plans();
        self.style_maps()
    }

    /// Styles at the current progress, derived fresh from the registry.
    pub fn style_maps(&self) -> StyleMaps {
        let Some(active) = &self.active else {
            return StyleMaps::default();
        };
        let from = self.items_for(&active.from_route);
        let to = self.items_for(&active.to_route);
        let state = TransitionState::new(self.progress, self.layout, active.step);
        let maps = active.prepared.style_maps(&from, &to, &state);
        log::trace!(
            "styles at {:.3}: {} from, {} to",
            self.progress.value(),
            maps.from.len(),
            maps.to.len()
        );
        maps
    }

    /// Items of the active transition to render in the shared-element overlay.
    pub fn items_to_clone(&self) -> Vec<TransitionItem> {
        self.with_active_items(|prepared, from, to| prepared.items_to_clone(from, to))
    }

    /// Items of the active transition that need measuring.
    pub fn items_to_measure(&self) -> Vec<TransitionItem> {
        self.with_active_items(|prepared, from, to| prepared.items_to_measure(from, to))
    }

    /// Start a back-swipe. Accepted only on a route that can go back, when no
    /// transition is animating.
    pub fn pointer_down(&mut self, sample: PointerSample) -> bool {
        if !self.navigation.can_go_back() || !matches!(self.driver, Driver::Idle) {
            return false;
        }
        let (Some(previous), Some(current)) = (
            self.navigation.previous().cloned(),
            self.navigation.focused().cloned(),
        ) else {
            return false;
        };
        if !self.gesture.pointer_down(sample, self.layout) {
            return false;
        }

        self.begin(&previous, &current, 1, true);
        self.driver = Driver::Gesture;
        self.progress = self.gesture.progress();
        true
    }

    pub fn pointer_move(&mut self, sample: PointerSample) -> Option<Progress> {
        if !matches!(self.driver, Driver::Gesture) {
            return None;
        }
        let progress = self.gesture.pointer_move(sample, self.layout)?;
        self.progress = progress;
        Some(progress)
    }

    pub fn pointer_up(&mut self, sample: PointerSample) -> Option<ReleaseDecision> {
        if !matches!(self.driver, Driver::Gesture) {
            return None;
        }
        self.gesture.pointer_up(sample, self.layout)
    }

    /// Abandon a drag, e.g. on focus loss. The current route stays.
    pub fn cancel_gesture(&mut self) {
        if !matches!(self.driver, Driver::Gesture) || self.gesture.phase() != GesturePhase::Dragging
        {
            return;
        }
        self.gesture.reset();
        self.finish_active();
        self.progress = Progress::END;
        self.driver = Driver::Idle;
        self.active = None;
    }

    /// Native animation is possible when the platform offers it and every
    /// property the active transition animates is supported.
    pub fn use_native_driver(&self) -> bool {
        self.config.stack.native_driver_available
            && self
                .active
                .as_ref()
                .is_none_or(|active| active.prepared.supports_native_driver())
    }

    pub fn header_mode(&self) -> HeaderMode {
        resolve_header_mode(
            self.config.stack.header_mode,
            self.config.stack.platform,
            self.config.stack.mode,
        )
    }

    pub fn gestures_enabled(&self) -> bool {
        self.gesture.config().enabled
    }

    pub fn drain_commands(&mut self) -> Vec<NavigationCommand> {
        self.commands.drain(..).collect()
    }

    pub fn drain_events(&mut self) -> Vec<TransitionEvent> {
        self.events.drain(..).collect()
    }

    fn items_for(&self, route_name: &str) -> Vec<TransitionItem> {
        let registry = self.registry.snapshot();
        iter::once(TransitionItem::scene(route_name))
            .chain(registry.for_route(route_name))
            .collect()
    }

    fn with_active_items(
        &self,
        f: impl FnOnce(&PreparedTransition, &[TransitionItem], &[TransitionItem]) -> Vec<TransitionItem>,
    ) -> Vec<TransitionItem> {
        match &self.active {
            Some(active) => {
                let from = self.items_for(&active.from_route);
                let to = self.items_for(&active.to_route);
                f(&active.prepared, &from, &to)
            }
            None => Vec::new(),
        }
    }

    fn begin(&mut self, from: &Route, to: &Route, step: i32, gesture: bool) {
        let to_items = self.items_for(&to.route_name);
        let prepared = match self.rules.select(&from.route_name, &to.route_name) {
            Some(transition) => transition.prepare(&to_items, &mut self.rng),
            None => {
                log::debug!(
                    "no transition rule for {} -> {}",
                    from.route_name,
                    to.route_name
                );
                PreparedTransition::default()
            }
        };

        let active = ActiveTransition {
            from_route: from.route_name.clone(),
            to_route: to.route_name.clone(),
            step,
            gesture,
            prepared,
        };
        self.events.push_back(active.started());
        self.active = Some(active);
        self.seen_revision = self.registry.revision();
    }

    /// Emit `Ended` for an active transition that is still moving.
    fn finish_active(&mut self) {
        if !self.is_transitioning() {
            return;
        }
        if let Some(active) = &self.active {
            self.events.push_back(active.ended());
        }
    }

    fn advance(&mut self, delta_ms: f64) {
        // A settle keeps running even after a route change took over the progress.
        let settled = if self.gesture.is_active() {
            self.gesture.tick(delta_ms)
        } else {
            None
        };

        match &mut self.driver {
            Driver::Idle => {}
            Driver::Timed(animation) => {
                animation.update(delta_ms);
                self.progress = animation.value();
                if animation.is_finished() {
                    self.finish_active();
                    self.driver = Driver::Idle;
                }
            }
            Driver::Gesture => {
                self.progress = self.gesture.progress();
                if let Some(decision) = settled {
                    self.finish_active();
                    self.driver = Driver::Idle;
                    if decision.go_back {
                        self.dispatch_back();
                    }
                }
            }
        }
    }

    /// The router applied the dispatched back: the swiped route was focused and has
    /// left the stack.
    fn back_completed(&self, previous: &Route) -> bool {
        self.pending_back.as_deref() == Some(previous.key.as_str())
            && !self
                .navigation
                .routes
                .iter()
                .any(|route| route.key == previous.key)
    }

    fn dispatch_back(&mut self) {
        let Some(route) = self.navigation.focused() else {
            return;
        };
        log::info!("dispatching back from {}", route.route_name);
        self.pending_back = Some(route.key.clone());
        self.commands.push_back(NavigationCommand::Back {
            key: route.key.clone(),
        });
    }

    fn refresh_plans(&mut self) {
        let revision = self.registry.revision();
        if revision == self.seen_revision {
            return;
        }
        self.seen_revision = revision;

        let Some(to_route) = self.active.as_ref().map(|active| active.to_route.clone()) else {
            return;
        };
        let to = self.items_for(&to_route);
        if let Some(active) = self.active.as_mut() {
            active.prepared.refresh(&to, &mut self.rng);
        }
    }
}
