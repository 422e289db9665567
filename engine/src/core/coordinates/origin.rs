//! Floating origin management
//!
//! The coordinate center follows the camera every frame so that all
//! render-space positions are expressed relative to the viewer and stay
//! small regardless of where in the scene the camera is.

use super::converter::meter_to_unit_vec;
use glam::{DVec3, Vec3};
use tracing::trace;

/// Coordinate center for render-space conversion
///
/// Written once at the start of each frame and read by every render pass of
/// that frame.
#[derive(Debug, Clone, Default)]
pub struct FloatingOrigin {
    /// Current coordinate center in world meters
    center: DVec3,
    /// Number of re-centers performed since creation
    recenter_count: u64,
}

impl FloatingOrigin {
    /// Create an origin at the world origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the coordinate center onto the camera
    pub fn recenter(&mut self, camera_coordinate: DVec3) {
        let shift = camera_coordinate - self.center;
        self.center = camera_coordinate;
        self.recenter_count += 1;

        trace!(
            shift = shift.length(),
            center = ?self.center,
            "Floating origin re-centered"
        );
    }

    /// Current coordinate center in world meters
    pub fn center(&self) -> DVec3 {
        self.center
    }

    /// Number of re-centers performed
    pub fn recenter_count(&self) -> u64 {
        self.recenter_count
    }

    /// Convert a world position to origin-relative meters
    pub fn to_local(&self, world_position: DVec3) -> DVec3 {
        world_position - self.center
    }

    /// Convert a world position to a render-space position at the given scale
    pub fn to_render(&self, world_position: DVec3, scale: f64) -> Vec3 {
        meter_to_unit_vec(self.to_local(world_position), scale)
    }
}
