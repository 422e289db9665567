//! Demo solar system
//!
//! Sun, Earth with an atmosphere shell, Moon, a spacecraft parked in a low
//! orbit around Earth, and the infographic markers that keep the small
//! bodies findable from far away.

use glam::{DVec3, Quat, Vec3};
use hugescale_engine::prelude::*;
use tracing::info;

const SUN_RADIUS: f64 = 6.96e8;
const EARTH_RADIUS: f64 = 6.371e6;
const MOON_RADIUS: f64 = 1.737e6;
const EARTH_ORBIT: f64 = 1.496e11;
const MOON_ORBIT: f64 = 3.844e8;

/// Handles of the bodies the demo flies around
pub struct SolarSystem {
    pub sun: Entity,
    pub earth: Entity,
    pub moon: Entity,
    pub spacecraft: Entity,
}

/// Spawn the scene and register every object with the render system
pub fn create_solar_system(world: &mut World, system: &mut MultilayerRenderSystem) -> SolarSystem {
    info!("Creating solar system scene");

    let sun = world.spawn_scene_object(
        SceneObject::solid(DVec3::ZERO, SUN_RADIUS),
        (Name::new("Sun"),),
    );

    let atmosphere = world.spawn((Name::new("Atmosphere"), RenderState::default()));
    let earth_coordinate = DVec3::new(0.0, 0.0, EARTH_ORBIT);
    let earth = world.spawn_scene_object(
        SceneObject::solid(earth_coordinate, EARTH_RADIUS),
        (Name::new("Earth"), RenderChildren(vec![atmosphere])),
    );

    // Slightly inclined, so the ecliptic marker has something to show
    let moon_coordinate = earth_coordinate + DVec3::new(MOON_ORBIT, 2.0e7, 0.0);
    let moon = world.spawn_scene_object(
        SceneObject::solid(moon_coordinate, MOON_RADIUS),
        (Name::new("Moon"),),
    );

    let spacecraft = world.spawn_scene_object(
        SceneObject::solid(spacecraft_coordinate(earth_coordinate, EARTH_RADIUS), 50.0),
        (Name::new("Spacecraft"),),
    );

    let earth_halo = world.spawn_scene_object(
        SceneObject::infographic(earth_coordinate, EARTH_RADIUS),
        (
            Name::new("Earth halo"),
            Halo {
                target: earth,
                own_radius: 2.0e6,
                min_visible_radius: 20.0,
                max_visible_radius: 1.0e6,
            },
        ),
    );
    let moon_marker = world.spawn_scene_object(
        SceneObject::infographic(earth_coordinate, 1.0),
        (
            Name::new("Moon ecliptic height"),
            EclipticHeight {
                target: moon,
                min_height: 1.0e5,
            },
        ),
    );

    for entity in [sun, earth, moon, spacecraft, earth_halo, moon_marker] {
        system.registry_mut().register(entity);
    }

    info!(objects = system.registry().len(), "Solar system created");

    SolarSystem {
        sun,
        earth,
        moon,
        spacecraft,
    }
}

/// Park the spacecraft just above the surface of its host body
///
/// Azimuth -70° and elevation -10°, at 1.1 body radii from the center.
pub fn spacecraft_coordinate(host_coordinate: DVec3, host_radius: f64) -> DVec3 {
    let rotation = Quat::from_axis_angle(Vec3::Y, (-70f32).to_radians())
        * Quat::from_axis_angle(Vec3::X, (-10f32).to_radians());
    let direction = (rotation * Vec3::Z).as_dvec3().normalize();

    host_coordinate + direction * host_radius * 1.1
}
