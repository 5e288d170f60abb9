use anyhow::{Context, Result};
use rune_config::RuneConfig;
use rune_transition::filter::ItemFilter;
use rune_transition::transition::{CrossFade, Slide, StaggeredAppear, together};
use rune_transition::{
    Layout, Metrics, NavigationCommand, NavigationState, PointerSample, RegistryHandle, Route,
    TransitionCoordinator, TransitionItem, TransitionRule, TransitionRules,
};
use serde_json::{Value, json};

const FRAME_MS: f64 = 16.0;
const GRID_COLUMNS: usize = 3;
const PHOTO_COUNT: usize = 6;

/// Grid to detail cross-fades the scenes; detail back to grid slides the scenes while
/// the thumbnails fly in.
fn photo_rules() -> Result<TransitionRules> {
    let scenes = ItemFilter::pattern(r"\$scene.+").context("scene filter")?;
    let images = ItemFilter::pattern("image-.+").context("image filter")?;
    let slide_scenes = ItemFilter::pattern(r"\$scene-.*").context("slide filter")?;

    Ok(TransitionRules::new()
        .with(TransitionRule::new(
            "PhotoGrid",
            "PhotoDetail",
            CrossFade::definition(scenes),
        ))
        .with(TransitionRule::new(
            "PhotoDetail",
            "PhotoGrid",
            together([
                StaggeredAppear::definition(images).into(),
                Slide::definition(slide_scenes).into(),
            ]),
        )))
}

fn mount_grid(registry: &RegistryHandle, layout: Layout) {
    let size = layout.width / GRID_COLUMNS as f64;
    for i in 0..PHOTO_COUNT {
        let id = format!("image-{i}");
        let (row, column) = (i / GRID_COLUMNS, i % GRID_COLUMNS);
        registry.register(TransitionItem::new(&id, "PhotoGrid"));
        registry.set_metrics(
            &id,
            "PhotoGrid",
            Metrics::new(column as f64 * size, row as f64 * size, size, size),
        );
    }
}

fn mount_detail(registry: &RegistryHandle, layout: Layout, photo: usize) {
    let id = format!("image-{photo}");
    registry.register(TransitionItem::new(&id, "PhotoDetail"));
    registry.set_metrics(
        &id,
        "PhotoDetail",
        Metrics::new(0.0, 0.0, layout.width, layout.width),
    );
}

/// Tick until the coordinator settles, sampling every few frames.
fn run(coordinator: &mut TransitionCoordinator, label: &str) -> Result<Value> {
    let mut frames = Vec::new();
    let mut frame = 0usize;
    loop {
        let styles = coordinator.tick(FRAME_MS);
        if frame % 4 == 0 || !coordinator.is_transitioning() {
            frames.push(json!({
                "progress": coordinator.progress().value(),
                "styles": serde_json::to_value(&styles).context("serialize styles")?,
            }));
        }
        frame += 1;
        if !coordinator.is_transitioning() {
            break;
        }
    }
    log::info!("{label}: {frame} frames");

    Ok(json!({
        "label": label,
        "native_driver": coordinator.use_native_driver(),
        "events": serde_json::to_value(coordinator.drain_events()).context("serialize events")?,
        "frames": frames,
    }))
}

fn main() -> Result<()> {
    let _ = env_logger::try_init();

    let config = RuneConfig::load();
    let layout = Layout::new(375.0, 667.0);
    let grid = Route::new("grid-0", "PhotoGrid");
    let detail = Route::new("detail-1", "PhotoDetail");

    let mut coordinator = TransitionCoordinator::new(config, photo_rules()?);
    coordinator.set_layout(layout);
    let registry = coordinator.registry();

    mount_grid(&registry, layout);
    coordinator.set_navigation_state(NavigationState::stack(vec![grid.clone()]));

    let mut phases = Vec::new();

    // Open a photo.
    coordinator.set_navigation_state(NavigationState::stack(vec![grid.clone(), detail.clone()]));
    mount_detail(&registry, layout, 2);
    phases.push(run(&mut coordinator, "open detail")?);

    // Swipe back from the left edge and fling.
    let swipe = [
        PointerSample::new(8.0, 300.0, 0.0),
        PointerSample::new(60.0, 302.0, 80.0),
        PointerSample::new(140.0, 305.0, 160.0),
    ];
    if coordinator.pointer_down(swipe[0]) {
        coordinator.pointer_move(swipe[1]);
        coordinator.pointer_up(swipe[2]);
    }
    phases.push(run(&mut coordinator, "back swipe")?);

    let commands = coordinator.drain_commands();
    for command in &commands {
        match command {
            NavigationCommand::Back { key } => {
                log::info!("router pops {key}");
                registry.unregister("image-2", "PhotoDetail");
                coordinator.set_navigation_state(NavigationState::stack(vec![grid.clone()]));
            }
        }
    }

    // Open again and close with the back button.
    coordinator.set_navigation_state(NavigationState::stack(vec![grid.clone(), detail]));
    mount_detail(&registry, layout, 4);
    phases.push(run(&mut coordinator, "reopen detail")?);

    coordinator.set_navigation_state(NavigationState::stack(vec![grid]));
    phases.push(run(&mut coordinator, "close detail")?);
    registry.unregister("image-4", "PhotoDetail");

    let report = json!({
        "header_mode": serde_json::to_value(coordinator.header_mode()).context("serialize header mode")?,
        "gestures_enabled": coordinator.gestures_enabled(),
        "back_commands": serde_json::to_value(&commands).context("serialize commands")?,
        "phases": phases,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("render report")?
    );
    Ok(())
}
