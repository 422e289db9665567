//! Camera pose and field-of-view utilities
//!
//! The pose is supplied by the host every frame: a double-precision
//! coordinate in meters, a single-precision rotation and the vertical field
//! of view. The horizontal field of view is always derived from the aspect
//! ratio, never supplied.

use crate::core::coordinates::rotate_precise;
use glam::{DVec3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Per-frame camera pose, read-only to the layering core
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CameraPose {
    /// Camera coordinate in world meters
    pub coordinate: DVec3,
    /// Camera rotation; local +Z is forward
    pub rotation: Quat,
    /// Vertical field of view in degrees
    pub vertical_fov_degrees: f64,
    /// Aspect ratio (width / height)
    pub aspect_ratio: f64,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(DVec3::ZERO, Quat::IDENTITY, 60.0, 16.0 / 9.0)
    }
}

impl CameraPose {
    /// Create a camera pose
    ///
    /// # Arguments
    /// * `coordinate` - Camera coordinate in meters
    /// * `rotation` - Camera rotation, local +Z forward
    /// * `vertical_fov_degrees` - Vertical field of view in degrees
    /// * `aspect_ratio` - Width divided by height
    pub fn new(
        coordinate: DVec3,
        rotation: Quat,
        vertical_fov_degrees: f64,
        aspect_ratio: f64,
    ) -> Self {
        Self {
            coordinate,
            rotation,
            vertical_fov_degrees,
            aspect_ratio,
        }
    }

    /// Create a pose at `coordinate` whose forward axis points at `target`
    ///
    /// The direction is computed in f64 and only the unit vector is
    /// truncated, so the aim stays exact at astronomical distances.
    pub fn looking_at(
        coordinate: DVec3,
        target: DVec3,
        vertical_fov_degrees: f64,
        aspect_ratio: f64,
    ) -> Self {
        let direction = (target - coordinate).normalize_or_zero().as_vec3();
        let rotation = if direction == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            Quat::from_rotation_arc(Vec3::Z, direction)
        };

        Self::new(coordinate, rotation, vertical_fov_degrees, aspect_ratio)
    }

    /// Horizontal field of view in degrees, derived from the aspect ratio
    pub fn horizontal_fov_degrees(&self) -> f64 {
        vertical_to_horizontal_fov(self.vertical_fov_degrees, self.aspect_ratio)
    }

    /// Unit forward direction in world space
    pub fn forward(&self) -> DVec3 {
        rotate_precise(self.rotation, DVec3::Z)
    }
}

/// Convert a vertical field of view to the horizontal one for an aspect ratio
pub fn vertical_to_horizontal_fov(vertical_fov_degrees: f64, aspect_ratio: f64) -> f64 {
    let half_vertical = (vertical_fov_degrees / 2.0).to_radians();
    2.0 * (half_vertical.tan() * aspect_ratio).atan().to_degrees()
}
