//! Scene-side data the layering core operates on
//!
//! The registry of live scene objects, the per-pass render parameters written
//! back onto them, and infographic markers that follow other objects.

pub mod infographics;
pub mod registry;
pub mod render_params;

pub use infographics::{update_infographics, EclipticHeight, Halo, MarkerVisibility};
pub use registry::SceneObjectRegistry;
pub use render_params::{apply_render_params, set_visibility_channel, SceneObjectRenderParams};
