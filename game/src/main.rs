//! Headless multilayer rendering demo
//!
//! Flies a camera from deep space down to a spacecraft orbiting Earth and
//! logs how the visible depth gets split into bands on the way.
//!
//! Usage: `hugescale_demo [layering.json]`

mod host;
mod scene_setup;

use glam::DVec3;
use host::HeadlessHost;
use hugescale_engine::prelude::*;
use scene_setup::{create_solar_system, SolarSystem};
use std::error::Error;
use tracing::{debug, info, warn};

const FRAMES: u32 = 12;
const START_DISTANCE: f64 = 1.0e11;
const END_DISTANCE: f64 = 2.0e4;

fn main() -> Result<(), Box<dyn Error>> {
    hugescale_engine::init_logging();
    info!("Starting multilayer rendering demo");

    let config = match std::env::args().nth(1) {
        Some(path) => LayeringConfig::load_from_file(path)?,
        None => LayeringConfig::default(),
    };
    debug!(config = %serde_json::to_string(&config)?, "Layering config");

    let mut system = MultilayerRenderSystem::new(config)?;
    let mut world = World::new();
    let scene = create_solar_system(&mut world, &mut system);
    debug!(
        sun = ?scene.sun,
        earth = ?scene.earth,
        moon = ?scene.moon,
        spacecraft = ?scene.spacecraft,
        "Scene entities"
    );
    let mut host = HeadlessHost::new(system.config().camera_slots);

    for frame in 0..FRAMES {
        let camera = camera_for_frame(&world, &scene, frame);

        update_infographics(&mut world, camera.coordinate);
        let report = system.update(&world, &camera);
        if let Some(error) = &report.error {
            warn!(frame, %error, "Rendering without bands");
        }

        let passes = host.render_frame(&mut system, &mut world);
        let objects: usize = passes.iter().map(|pass| pass.objects.len()).sum();

        info!(
            frame,
            distance = camera.coordinate.distance(target_coordinate(&world, &scene)),
            classified = report.classified,
            hidden = report.hidden,
            layers = report.layers,
            truncated = report.truncated,
            passes = passes.len(),
            objects,
            "Frame rendered"
        );
    }

    info!(
        frames = host.frames_rendered(),
        recenters = system.origin().recenter_count(),
        "Demo finished"
    );
    Ok(())
}

fn target_coordinate(world: &World, scene: &SolarSystem) -> DVec3 {
    world
        .get::<SceneObject>(scene.spacecraft)
        .map(|object| object.coordinate)
        .unwrap_or_default()
}

/// Camera pose for a frame of the approach
///
/// Distance shrinks geometrically, so every frame covers the same number
/// of orders of magnitude. The camera comes in from the sunward side and
/// keeps the spacecraft centered.
fn camera_for_frame(world: &World, scene: &SolarSystem, frame: u32) -> CameraPose {
    let target = target_coordinate(world, scene);
    let sun = world
        .get::<SceneObject>(scene.sun)
        .map(|object| object.coordinate)
        .unwrap_or_default();

    let t = f64::from(frame) / f64::from(FRAMES - 1);
    let distance = START_DISTANCE * (END_DISTANCE / START_DISTANCE).powf(t);
    let direction = (sun - target).normalize_or(DVec3::NEG_Z) + DVec3::new(0.0, 0.1, 0.0);

    let eye = target + direction.normalize() * distance;
    CameraPose::looking_at(eye, target, 60.0, 16.0 / 9.0)
}
