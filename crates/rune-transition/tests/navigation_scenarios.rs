//! End-to-end flows through the coordinator: route changes, back-swipes and the
//! photo grid/detail setup.

use anyhow::Result;
use rune_config::{EasingKind, HeaderMode, Platform, PresentationMode, RuneConfig};
use rune_transition::filter::ItemFilter;
use rune_transition::transition::{CrossFade, SharedElementMove, Slide, StaggeredAppear, together};
use rune_transition::{
    GesturePhase, Layout, Metrics, NavigationCommand, NavigationState, PointerSample, Progress,
    Route, TransformOp, TransitionCoordinator, TransitionItem, TransitionRule, TransitionRules,
};

const LAYOUT: Layout = Layout {
    width: 400.0,
    height: 800.0,
};

fn grid() -> Route {
    Route::new("grid-0", "Grid")
}

fn detail() -> Route {
    Route::new("detail-1", "Detail")
}

fn config() -> RuneConfig {
    let mut config = RuneConfig::default();
    config.stack.seed = Some(5);
    config.timing.duration_ms = 100.0;
    config.timing.easing = EasingKind::Linear;
    config
}

fn photo_rules() -> Result<TransitionRules> {
    Ok(TransitionRules::new()
        .with(TransitionRule::new(
            "Grid",
            "Detail",
            together([
                SharedElementMove::definition(ItemFilter::pattern("image-.+")?).into(),
                CrossFade::definition(ItemFilter::pattern(r"\$scene.+")?).into(),
            ]),
        ))
        .with(TransitionRule::new(
            "Detail",
            "Grid",
            together([
                StaggeredAppear::definition(ItemFilter::pattern("image-.+")?).into(),
                Slide::definition(ItemFilter::pattern(r"\$scene-.*")?).into(),
            ]),
        )))
}

/// A coordinator resting on Detail, pushed from Grid.
fn on_detail(config: RuneConfig) -> Result<TransitionCoordinator> {
    on_detail_with(config, photo_rules()?)
}

fn on_detail_with(config: RuneConfig, rules: TransitionRules) -> Result<TransitionCoordinator> {
    let mut coordinator = TransitionCoordinator::new(config, rules);
    coordinator.set_layout(LAYOUT);
    coordinator.set_navigation_state(NavigationState::stack(vec![grid()]));
    coordinator.set_navigation_state(NavigationState::stack(vec![grid(), detail()]));
    while coordinator.is_transitioning() {
        coordinator.tick(16.0);
    }
    coordinator.drain_events();
    Ok(coordinator)
}

fn settle(coordinator: &mut TransitionCoordinator) {
    while coordinator.is_transitioning() {
        coordinator.tick(16.0);
    }
}

/// Drag from the edge to 40% of the width (progress 0.6), slowly.
fn drag_to_sixty_percent(coordinator: &mut TransitionCoordinator) {
    assert!(coordinator.pointer_down(PointerSample::new(0.0, 300.0, 0.0)));
    let progress = coordinator
        .pointer_move(PointerSample::new(160.0, 300.0, 1000.0))
        .unwrap();
    assert_eq!(progress, Progress::new(0.6));
}

#[test]
fn shared_element_midpoint() -> Result<()> {
    let mut coordinator = TransitionCoordinator::new(config(), photo_rules()?);
    coordinator.set_layout(LAYOUT);
    let registry = coordinator.registry();
    registry.register(
        TransitionItem::new("image-1", "Grid").with_metrics(Metrics::new(0.0, 0.0, 50.0, 50.0)),
    );
    coordinator.set_navigation_state(NavigationState::stack(vec![grid()]));

    coordinator.set_navigation_state(NavigationState::stack(vec![grid(), detail()]));
    registry.register(
        TransitionItem::new("image-1", "Detail")
            .with_metrics(Metrics::new(10.0, 20.0, 300.0, 300.0)),
    );

    let styles = coordinator.tick(50.0);
    assert_eq!(coordinator.progress(), Progress::new(0.5));

    let image = styles.from.get("image-1").unwrap();
    assert_eq!(image.left, Some(5.0));
    assert_eq!(image.top, Some(10.0));
    assert_eq!(image.width, Some(175.0));
    assert_eq!(image.height, Some(175.0));

    let scene = styles.to.get("$scene-Detail").unwrap();
    assert_eq!(scene.opacity, Some(0.5));

    assert_eq!(coordinator.items_to_clone().len(), 1);
    assert!(!coordinator.use_native_driver());
    Ok(())
}

#[test]
fn slow_release_commits_without_back() -> Result<()> {
    let mut coordinator = on_detail(config())?;
    drag_to_sixty_percent(&mut coordinator);

    let decision = coordinator
        .pointer_up(PointerSample::new(160.0, 300.0, 1100.0))
        .unwrap();
    assert!(!decision.go_back);
    assert_eq!(coordinator.gesture_state().phase, GesturePhase::Settling);

    settle(&mut coordinator);
    assert_eq!(coordinator.progress(), Progress::END);
    assert_eq!(coordinator.gesture_state().phase, GesturePhase::Idle);
    assert!(coordinator.drain_commands().is_empty());
    Ok(())
}

#[test]
fn fast_release_goes_back_once() -> Result<()> {
    let mut coordinator = on_detail(config())?;
    drag_to_sixty_percent(&mut coordinator);

    let decision = coordinator
        .pointer_up(PointerSample::new(200.0, 300.0, 1040.0))
        .unwrap();
    assert!(decision.go_back);

    // No dispatch until progress lands.
    coordinator.tick(16.0);
    assert!(coordinator.drain_commands().is_empty());

    settle(&mut coordinator);
    assert_eq!(coordinator.progress(), Progress::START);
    assert_eq!(
        coordinator.drain_commands(),
        vec![NavigationCommand::Back {
            key: "detail-1".to_string()
        }]
    );

    for _ in 0..10 {
        coordinator.tick(16.0);
    }
    assert!(coordinator.drain_commands().is_empty());

    // The router applies the pop; nothing animates again.
    coordinator.set_navigation_state(NavigationState::stack(vec![grid()]));
    assert!(!coordinator.is_transitioning());
    assert!(coordinator.tick(16.0).is_empty());

    let events = coordinator.drain_events();
    assert_eq!(events.len(), 2);
    assert!(events[0].is_started() && events[1].is_ended());
    Ok(())
}

#[test]
fn push_after_unapplied_back_still_animates() -> Result<()> {
    let rules = photo_rules()?.with(TransitionRule::new(
        "Detail",
        "Settings",
        CrossFade::definition(ItemFilter::scenes()),
    ));
    let mut coordinator = on_detail_with(config(), rules)?;
    drag_to_sixty_percent(&mut coordinator);
    coordinator.pointer_up(PointerSample::new(200.0, 300.0, 1040.0));
    settle(&mut coordinator);
    assert_eq!(coordinator.drain_commands().len(), 1);
    coordinator.drain_events();

    // The router ignored the back and pushed from Detail instead.
    let settings = Route::new("settings-2", "Settings");
    coordinator.set_navigation_state(NavigationState::stack(vec![grid(), detail(), settings]));

    assert!(coordinator.is_transitioning());
    assert_eq!(coordinator.active_routes(), Some(("Detail", "Settings")));
    let styles = coordinator.tick(16.0);
    assert!(styles.to.contains("$scene-Settings"));

    let events = coordinator.drain_events();
    assert_eq!(events.len(), 1);
    assert!(events[0].is_started());
    assert_eq!(events[0].routes(), ("Detail", "Settings"));
    Ok(())
}

#[test]
fn pointer_down_ignored_while_settling() -> Result<()> {
    let mut coordinator = on_detail(config())?;
    drag_to_sixty_percent(&mut coordinator);
    coordinator.pointer_up(PointerSample::new(160.0, 300.0, 1100.0));

    assert!(!coordinator.pointer_down(PointerSample::new(0.0, 300.0, 1120.0)));
    assert_eq!(coordinator.gesture_state().phase, GesturePhase::Settling);
    Ok(())
}

#[test]
fn pop_slides_scenes_and_staggers_images() -> Result<()> {
    let mut coordinator = on_detail(config())?;
    let registry = coordinator.registry();
    for i in 0..4 {
        registry.register(TransitionItem::new(format!("image-{i}"), "Grid"));
    }

    coordinator.set_navigation_state(NavigationState::stack(vec![grid()]));
    assert_eq!(coordinator.active_routes(), Some(("Detail", "Grid")));

    let start = coordinator.tick(0.0);
    assert_eq!(
        start.from.get("$scene-Detail").unwrap().transform,
        Some(vec![TransformOp::TranslateX(0.0)])
    );
    assert_eq!(
        start.to.get("$scene-Grid").unwrap().transform,
        Some(vec![TransformOp::TranslateX(-400.0)])
    );
    for i in 0..4 {
        let image = start.to.get(&format!("image-{i}")).unwrap();
        assert_eq!(image.opacity, Some(0.0));
    }

    // Same progress, same styles: plans are drawn once.
    let mid = coordinator.tick(40.0);
    assert_eq!(mid, coordinator.style_maps());

    settle(&mut coordinator);
    let end = coordinator.style_maps();
    for i in 0..4 {
        assert_eq!(end.to.get(&format!("image-{i}")).unwrap().opacity, Some(1.0));
    }
    Ok(())
}

#[test]
fn modal_swipes_down_from_top() -> Result<()> {
    let mut modal = config();
    modal.stack.mode = PresentationMode::Modal;
    let mut coordinator = on_detail(modal)?;

    assert!(!coordinator.pointer_down(PointerSample::new(0.0, 300.0, 0.0)));
    assert!(coordinator.pointer_down(PointerSample::new(200.0, 10.0, 0.0)));
    let progress = coordinator
        .pointer_move(PointerSample::new(200.0, 410.0, 500.0))
        .unwrap();
    assert_eq!(progress, Progress::new(0.5));
    assert_eq!(coordinator.header_mode(), HeaderMode::Screen);
    Ok(())
}

#[test]
fn android_defaults() -> Result<()> {
    let mut android = config();
    android.stack.platform = Platform::Android;
    let mut coordinator = on_detail(android)?;

    assert!(!coordinator.gestures_enabled());
    assert!(!coordinator.pointer_down(PointerSample::new(0.0, 300.0, 0.0)));
    assert_eq!(coordinator.header_mode(), HeaderMode::Screen);

    let mut opted_in = config();
    opted_in.stack.platform = Platform::Android;
    opted_in.stack.gestures_enabled = Some(true);
    opted_in.stack.header_mode = Some(HeaderMode::None);
    let mut coordinator = on_detail(opted_in)?;
    assert!(coordinator.pointer_down(PointerSample::new(0.0, 300.0, 0.0)));
    assert_eq!(coordinator.header_mode(), HeaderMode::None);
    Ok(())
}

#[test]
fn route_change_during_drag_abandons_gesture() -> Result<()> {
    let mut coordinator = on_detail(config())?;
    drag_to_sixty_percent(&mut coordinator);

    coordinator.set_navigation_state(NavigationState::stack(vec![grid()]));
    assert_eq!(coordinator.gesture_state().phase, GesturePhase::Idle);
    assert_eq!(coordinator.progress(), Progress::START);
    assert_eq!(coordinator.active_routes(), Some(("Detail", "Grid")));

    settle(&mut coordinator);
    assert!(coordinator.drain_commands().is_empty());
    Ok(())
}
