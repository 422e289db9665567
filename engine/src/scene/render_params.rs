//! Per-pass render parameters of scene objects
//!
//! Parameters are computed fresh for every pass from the object's meters,
//! the frame's floating origin and the scale of the pass, then written into
//! the object's `RenderState`. Nothing here survives past the pass.

use crate::core::coordinates::{meter_to_unit, FloatingOrigin};
use crate::core::entity::{
    Entity, RenderChildren, RenderState, SceneObject, VisibilityChannel, World,
};
use glam::Vec3;
use tracing::trace;

/// Render-space placement of one object for one pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObjectRenderParams {
    pub entity: Entity,
    /// Origin-relative position in render units
    pub position: Vec3,
    /// Diameter in render units
    pub scale: f32,
    pub channel: VisibilityChannel,
}

impl SceneObjectRenderParams {
    /// Compute the placement of `object` at `scale` render units per meter
    pub fn compute(
        entity: Entity,
        object: &SceneObject,
        origin: &FloatingOrigin,
        scale: f64,
        channel: VisibilityChannel,
    ) -> Self {
        Self {
            entity,
            position: origin.to_render(object.coordinate, scale),
            scale: (2.0 * meter_to_unit(object.radius, scale)) as f32,
            channel,
        }
    }

    pub fn render_state(&self) -> RenderState {
        RenderState {
            position: self.position,
            scale: self.scale,
            channel: self.channel,
        }
    }
}

/// Write render parameters onto the object and its render children
pub fn apply_render_params(world: &mut World, params: &SceneObjectRenderParams) {
    let state = params.render_state();

    let updated = match world.get_mut::<RenderState>(params.entity) {
        Ok(mut current) => {
            *current = state;
            true
        }
        Err(_) => false,
    };

    if !updated && world.insert_one(params.entity, state).is_err() {
        trace!(entity = ?params.entity, "Render params target no longer exists");
        return;
    }

    propagate_channel(world, params.entity, params.channel);
}

/// Change only the visibility channel of an object and its render children
pub fn set_visibility_channel(world: &mut World, entity: Entity, channel: VisibilityChannel) {
    if !write_channel(world, entity, channel) {
        trace!(entity = ?entity, "Visibility target no longer exists");
        return;
    }

    propagate_channel(world, entity, channel);
}

/// Set the channel on an entity, adding a `RenderState` if it has none
///
/// Returns `false` if the entity does not exist.
fn write_channel(world: &mut World, entity: Entity, channel: VisibilityChannel) -> bool {
    let updated = match world.get_mut::<RenderState>(entity) {
        Ok(mut state) => {
            state.channel = channel;
            true
        }
        Err(_) => false,
    };

    if updated {
        return true;
    }

    let state = RenderState {
        channel,
        ..RenderState::default()
    };
    world.insert_one(entity, state).is_ok()
}

fn propagate_channel(world: &mut World, entity: Entity, channel: VisibilityChannel) {
    let children = match world.get::<RenderChildren>(entity) {
        Ok(children) => children.0.clone(),
        Err(_) => return,
    };

    for child in children {
        if !write_channel(world, child, channel) {
            trace!(child = ?child, "Render child no longer exists");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_compute_uses_origin_and_scale() {
        let mut world = World::new();
        let object = SceneObject::solid(DVec3::new(1e12, 0.0, 2_000.0), 500.0);
        let entity = world.spawn_scene_object(object, ());

        let mut origin = FloatingOrigin::new();
        origin.recenter(DVec3::new(1e12, 0.0, 0.0));

        let channel = VisibilityChannel::Band(1);
        let params = SceneObjectRenderParams::compute(entity, &object, &origin, 1e-3, channel);

        assert!((params.position.z - 2.0).abs() < 1e-6);
        assert_eq!(params.position.x, 0.0);
        assert!((params.scale - 1.0).abs() < 1e-6);
        assert_eq!(params.channel, VisibilityChannel::Band(1));
    }

    #[test]
    fn test_apply_writes_state_and_children() {
        let mut world = World::new();
        let atmosphere = world.spawn((RenderState::default(),));
        let cloud_layer = world.spawn(());
        let object = SceneObject::solid(DVec3::ZERO, 1.0);
        let children = RenderChildren(vec![atmosphere, cloud_layer]);
        let entity = world.spawn_scene_object(object, (children,));

        let params = SceneObjectRenderParams {
            entity,
            position: Vec3::new(1.0, 2.0, 3.0),
            scale: 0.5,
            channel: VisibilityChannel::Band(2),
        };
        apply_render_params(&mut world, &params);

        let state = *world.get::<RenderState>(entity).unwrap();
        assert_eq!(state, params.render_state());
        assert_eq!(
            world.get::<RenderState>(atmosphere).unwrap().channel,
            VisibilityChannel::Band(2)
        );
        assert_eq!(
            world.get::<RenderState>(cloud_layer).unwrap().channel,
            VisibilityChannel::Band(2)
        );
    }

    #[test]
    fn test_set_visibility_channel_keeps_placement() {
        let mut world = World::new();
        let entity = world.spawn((RenderState {
            position: Vec3::ONE,
            scale: 3.0,
            channel: VisibilityChannel::Band(0),
        },));

        set_visibility_channel(&mut world, entity, VisibilityChannel::Primary);

        let state = *world.get::<RenderState>(entity).unwrap();
        assert_eq!(state.channel, VisibilityChannel::Primary);
        assert_eq!(state.position, Vec3::ONE);
        assert_eq!(state.scale, 3.0);
    }

    #[test]
    fn test_apply_to_despawned_entity_is_ignored() {
        let mut world = World::new();
        let entity = world.spawn(());
        world.despawn(entity).unwrap();

        let params = SceneObjectRenderParams {
            entity,
            position: Vec3::ZERO,
            scale: 1.0,
            channel: VisibilityChannel::Primary,
        };
        apply_render_params(&mut world, &params);

        assert!(world.get::<RenderState>(entity).is_err());
    }
}
