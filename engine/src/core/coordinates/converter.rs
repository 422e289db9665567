//! Meter <-> render unit conversion
//!
//! `scale` is always render units per meter and is supplied by the caller.
//! Scalars stay in f64 so callers decide when to truncate; vectors are
//! truncated to f32 here, which is the single point where positions lose
//! precision on their way to the GPU.

use glam::{DVec3, Vec3};

/// Convert a length in meters to render units
pub fn meter_to_unit(meters: f64, scale: f64) -> f64 {
    meters * scale
}

/// Convert a position in meters to a render-space position
pub fn meter_to_unit_vec(meters: DVec3, scale: f64) -> Vec3 {
    (meters * scale).as_vec3()
}

/// Convert a length in render units back to meters
pub fn unit_to_meter(units: f64, scale: f64) -> f64 {
    units / scale
}

/// Convert a render-space position back to meters
pub fn unit_to_meter_vec(units: Vec3, scale: f64) -> DVec3 {
    units.as_dvec3() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_round_trip() {
        for &scale in &[1e-9, 3.3e-12, 0.5, 1.0, 250.0] {
            for &meters in &[0.0, 1.0, -42.5, 6.96e8, 1.496e11, 1e13] {
                let back = unit_to_meter(meter_to_unit(meters, scale), scale);
                let tolerance = 1e-12 * meters.abs().max(1.0);
                assert!(
                    (back - meters).abs() <= tolerance,
                    "round trip of {meters} at scale {scale} gave {back}"
                );
            }
        }
    }

    #[test]
    fn test_vector_conversion_truncates_once() {
        let meters = DVec3::new(1.496e11, -3.0e8, 2.5);
        let units = meter_to_unit_vec(meters, 1e-9);

        assert!((units.x - 149.6).abs() < 1e-4);
        assert!((units.y + 0.3).abs() < 1e-6);

        let back = unit_to_meter_vec(units, 1e-9);
        assert!((back.x - meters.x).abs() / meters.x < 1e-6);
    }

    #[test]
    fn test_render_size_of_near_band() {
        // A band starting at 100 m with a 0.5 unit near anchor
        let scale = 0.5 / 100.0;
        assert!((meter_to_unit(100.0, scale) - 0.5).abs() < 1e-12);
        assert!((unit_to_meter(5_000.0, scale) - 1_000_000.0).abs() < 1e-6);
    }
}
