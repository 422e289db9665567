//! Depth bands
//!
//! A render layer covers one contiguous depth interval in front of the
//! camera and renders it through its own camera at its own scale, chosen so
//! the band's near edge always sits at the same small render-unit distance.

use crate::core::coordinates::{meter_to_unit, meter_to_unit_vec, FloatingOrigin};
use crate::core::entity::{Entity, SceneObject, VisibilityChannel, World};
use crate::graphics::pass::CameraRenderParams;
use crate::scene::SceneObjectRenderParams;
use glam::{DVec3, Quat};

/// Depth interval an object occupies in the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectDepth {
    pub entity: Entity,
    pub solid: bool,
    /// Nearest visible depth in meters
    pub min_depth: f64,
    /// Furthest visible depth in meters
    pub max_depth: f64,
}

/// A depth band with its scale and the objects assigned to it this frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderLayer {
    min_depth: f64,
    max_depth: f64,
    scale: f64,
    channel: VisibilityChannel,
    members: Vec<Entity>,
}

impl RenderLayer {
    /// Create an empty band
    ///
    /// # Arguments
    /// * `min_depth` - Near edge in meters
    /// * `max_depth` - Far edge in meters
    /// * `scale` - Render units per meter
    /// * `channel` - Visibility channel of the band's camera
    pub fn new(min_depth: f64, max_depth: f64, scale: f64, channel: VisibilityChannel) -> Self {
        Self {
            min_depth,
            max_depth,
            scale,
            channel,
            members: Vec::new(),
        }
    }

    /// Check whether an object's depth interval touches this band
    ///
    /// Only strictly disjoint intervals are rejected, so an object sitting on
    /// a boundary belongs to both neighbouring bands.
    pub fn overlaps(&self, object: &ObjectDepth) -> bool {
        !(object.max_depth < self.min_depth || object.min_depth > self.max_depth)
    }

    pub fn add_member(&mut self, entity: Entity) {
        self.members.push(entity);
    }

    /// Camera parameters for this band's pass
    pub fn camera_render_params(
        &self,
        camera_coordinate: DVec3,
        origin: &FloatingOrigin,
        rotation: Quat,
    ) -> CameraRenderParams {
        CameraRenderParams {
            position: meter_to_unit_vec(origin.to_local(camera_coordinate), self.scale),
            rotation,
            near_clip: meter_to_unit(self.min_depth, self.scale) as f32,
            far_clip: meter_to_unit(self.max_depth, self.scale) as f32,
        }
    }

    /// Render parameters of every member still present in the world
    pub fn object_render_params(
        &self,
        world: &World,
        origin: &FloatingOrigin,
    ) -> Vec<SceneObjectRenderParams> {
        self.members
            .iter()
            .filter_map(|&entity| {
                let object = world.get::<SceneObject>(entity).ok()?;
                Some(SceneObjectRenderParams::compute(
                    entity,
                    &object,
                    origin,
                    self.scale,
                    self.channel,
                ))
            })
            .collect()
    }

    pub fn min_depth(&self) -> f64 {
        self.min_depth
    }

    pub fn max_depth(&self) -> f64 {
        self.max_depth
    }

    /// Render units per meter
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn channel(&self) -> VisibilityChannel {
        self.channel
    }

    pub fn members(&self) -> &[Entity] {
        &self.members
    }
}
