//! Geometry for visibility queries
//!
//! Planar primitives and the double-precision view pyramid built on them.

pub mod planar;
pub mod view_pyramid;

pub use view_pyramid::{SphereIntersection, ViewPyramid};
