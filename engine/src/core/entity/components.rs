//! Core components for the entity system

use glam::{DVec3, Vec3};
use serde::{Deserialize, Serialize};

/// A renderable body in the scene
///
/// Coordinate and radius are in meters and are updated every frame by the
/// simulation. Whether the object is solid is fixed at creation: solid
/// bodies occlude, non-solid "infographic" markers never hide anything.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SceneObject {
    /// World coordinate of the center in meters
    pub coordinate: DVec3,
    /// Radius of the bounding sphere in meters
    pub radius: f64,
    solid: bool,
}

impl SceneObject {
    /// Create an opaque body
    pub fn solid(coordinate: DVec3, radius: f64) -> Self {
        Self {
            coordinate,
            radius,
            solid: true,
        }
    }

    /// Create a see-through marker
    pub fn infographic(coordinate: DVec3, radius: f64) -> Self {
        Self {
            coordinate,
            radius,
            solid: false,
        }
    }

    pub fn is_solid(&self) -> bool {
        self.solid
    }

    /// Distance from `point` to the center in meters
    pub fn distance_to(&self, point: DVec3) -> f64 {
        self.coordinate.distance(point)
    }
}

/// Which camera pass draws an object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisibilityChannel {
    /// Drawn by the primary camera
    #[default]
    Primary,
    /// Drawn by no camera
    Hidden,
    /// Drawn only by the camera of the depth band with this index
    Band(usize),
}

impl VisibilityChannel {
    /// Channel id as uploaded to the GPU
    pub fn as_u32(self) -> u32 {
        match self {
            VisibilityChannel::Primary => 0,
            VisibilityChannel::Hidden => 1,
            VisibilityChannel::Band(index) => 2 + index as u32,
        }
    }
}

/// Render-space state of an object for the pass currently being drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    /// Position relative to the floating origin, in render units
    pub position: Vec3,
    /// Uniform scale (diameter) in render units
    pub scale: f32,
    pub channel: VisibilityChannel,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: 1.0,
            channel: VisibilityChannel::Primary,
        }
    }
}

/// Renderable child handles that follow the owner's visibility channel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderChildren(pub Vec<hecs::Entity>);

/// Name component for user-friendly entity identification
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Name(pub String);

impl Name {
    /// Create a new name component
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}
