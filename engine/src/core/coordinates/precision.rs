//! Double-precision vector helpers
//!
//! glam's `DVec3` already covers the arithmetic (add, scale, dot, normalize,
//! length, distance). This adds the projections used by the view pyramid and
//! a rotation that keeps absolute precision for long vectors even though the
//! camera rotation itself is single precision.

use glam::{DVec3, Quat};

/// Projection helpers on top of `DVec3`
pub trait PrecisionVector {
    /// Projection of `self` onto the direction of `onto`
    ///
    /// Returns zero when `onto` has no usable length.
    fn project_on(self, onto: DVec3) -> DVec3;

    /// Projection of `self` onto the plane with the given normal
    fn project_on_plane(self, normal: DVec3) -> DVec3;

    /// Signed coordinate of `self` along a unit axis
    fn signed_length_along(self, axis: DVec3) -> f64;
}

impl PrecisionVector for DVec3 {
    fn project_on(self, onto: DVec3) -> DVec3 {
        let length_squared = onto.length_squared();
        if length_squared <= f64::MIN_POSITIVE {
            return DVec3::ZERO;
        }

        onto * (self.dot(onto) / length_squared)
    }

    fn project_on_plane(self, normal: DVec3) -> DVec3 {
        self - self.project_on(normal)
    }

    fn signed_length_along(self, axis: DVec3) -> f64 {
        self.dot(axis)
    }
}

/// Rotate a long vector with a single-precision rotation without losing
/// absolute precision
///
/// Only the unit direction goes through the f32 quaternion; the length is
/// kept in f64 and re-applied afterwards, so the error is bounded by the
/// precision of the direction rather than growing with `|vector|`.
pub fn rotate_precise(rotation: Quat, vector: DVec3) -> DVec3 {
    let length = vector.length();
    if length <= f64::MIN_POSITIVE {
        return DVec3::ZERO;
    }

    let direction = (vector / length).as_vec3();
    (rotation * direction).as_dvec3() * length
}
