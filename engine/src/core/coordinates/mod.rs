//! Large world coordinate system
//!
//! World positions are stored as f64 meters. Rendering only ever sees values
//! relative to a floating origin that follows the camera, scaled into render
//! units and truncated to f32 at the very end:
//! - f64 world coordinates for high-precision positioning
//! - f32 origin-relative render coordinates for the GPU
//!
//! This keeps every rendered quantity small even when the scene spans
//! astronomical distances.

pub mod converter;
pub mod origin;
pub mod precision;


pub use converter::{meter_to_unit, meter_to_unit_vec, unit_to_meter, unit_to_meter_vec};
pub use origin::FloatingOrigin;
pub use precision::{rotate_precise, PrecisionVector};
