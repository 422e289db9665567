//! Infographic markers
//!
//! Non-solid helper objects whose geometry is derived from another scene
//! object every frame: a halo that keeps a body visible from far away, and
//! a marker showing a body's height above the ecliptic plane. They are
//! updated before layering runs so the orchestrator sees current values.

use crate::core::entity::{Entity, SceneObject, World};
use glam::DVec3;
use tracing::{debug, trace, warn};

/// Halo around a target body
///
/// The halo grows with camera distance so its apparent size stays constant,
/// and is only shown inside a distance window expressed in target radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Halo {
    pub target: Entity,
    /// Radius of the halo at the nearest visible distance, in meters
    pub own_radius: f64,
    /// Nearest visible distance, in target radii
    pub min_visible_radius: f64,
    /// Furthest visible distance, in target radii
    pub max_visible_radius: f64,
}

/// Vertical marker from the ecliptic plane up to a target body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticHeight {
    pub target: Entity,
    /// Heights below this are not worth showing, in meters
    pub min_height: f64,
}

/// Whether the host should draw a marker this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerVisibility(pub bool);

struct MarkerUpdate {
    entity: Entity,
    coordinate: DVec3,
    radius: f64,
    visible: bool,
}

impl Halo {
    fn follow(&self, target: &SceneObject, camera_coordinate: DVec3) -> (DVec3, f64, bool) {
        let distance = target.distance_to(camera_coordinate);
        let min_distance = target.radius * self.min_visible_radius;
        let max_distance = target.radius * self.max_visible_radius;

        let radius = if min_distance > 0.0 {
            self.own_radius * distance / min_distance
        } else {
            self.own_radius
        };
        let visible = distance >= min_distance && distance <= max_distance;

        (target.coordinate, radius, visible)
    }
}

impl EclipticHeight {
    fn follow(&self, target: &SceneObject) -> (DVec3, f64, bool) {
        let coordinate = DVec3::new(target.coordinate.x, 0.0, target.coordinate.z);
        // Bodies below the plane get a marker of the same length
        let radius = target.coordinate.y.abs();

        (coordinate, radius, radius >= self.min_height)
    }
}

/// Move every marker onto its target and refresh its visibility
///
/// Markers whose target no longer exists keep their last geometry.
pub fn update_infographics(world: &mut World, camera_coordinate: DVec3) {
    let mut updates = Vec::new();

    for (entity, halo) in world.query::<&Halo>().iter() {
        match world.get::<SceneObject>(halo.target) {
            Ok(target) => {
                let (coordinate, radius, visible) = halo.follow(&target, camera_coordinate);
                updates.push(MarkerUpdate {
                    entity,
                    coordinate,
                    radius,
                    visible,
                });
            }
            Err(_) => {
                warn!(marker = ?entity, target_entity = ?halo.target, "Halo target is missing");
            }
        }
    }

    for (entity, marker) in world.query::<&EclipticHeight>().iter() {
        match world.get::<SceneObject>(marker.target) {
            Ok(target) => {
                let (coordinate, radius, visible) = marker.follow(&target);
                updates.push(MarkerUpdate {
                    entity,
                    coordinate,
                    radius,
                    visible,
                });
            }
            Err(_) => {
                warn!(
                    marker = ?entity,
                    target_entity = ?marker.target,
                    "Ecliptic marker target is missing"
                );
            }
        }
    }

    for MarkerUpdate {
        entity,
        coordinate,
        radius,
        visible,
    } in updates
    {
        if let Ok(mut object) = world.get_mut::<SceneObject>(entity) {
            object.coordinate = coordinate;
            object.radius = radius;
        }

        let has_visibility = match world.get_mut::<MarkerVisibility>(entity) {
            Ok(mut current) => {
                current.0 = visible;
                true
            }
            Err(_) => false,
        };
        if !has_visibility {
            if let Err(e) = world.insert_one(entity, MarkerVisibility(visible)) {
                debug!(marker = ?entity, error = %e, "Failed to attach MarkerVisibility");
            }
        }

        trace!(marker = ?entity, radius, visible, "Infographic updated");
    }
}
