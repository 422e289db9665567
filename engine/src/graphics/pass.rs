//! Render pass callbacks
//!
//! The host renderer owns the camera scheduling. Each frame it opens the
//! primary camera pass first and then every enabled band camera, calling
//! `on_pass_begin` / `on_pass_end` around each. Implementors only react.

use crate::core::entity::World;
use glam::{Quat, Vec3};

/// Camera a pass is rendered through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraId {
    /// Scene-wide camera at the default scale
    Main,
    /// Secondary camera slot of the depth band with this index
    Layer(usize),
}

/// Camera placement for one pass, in render units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRenderParams {
    /// Origin-relative camera position
    pub position: Vec3,
    pub rotation: Quat,
    pub near_clip: f32,
    pub far_clip: f32,
}

impl Default for CameraRenderParams {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            near_clip: 0.1,
            far_clip: 1000.0,
        }
    }
}

/// Receiver of the host's per-camera pass notifications
pub trait RenderPass {
    /// A camera pass is about to render
    ///
    /// Returns the camera parameters for the pass, or `None` when this
    /// camera has nothing to draw this frame.
    fn on_pass_begin(&mut self, world: &mut World, camera: CameraId) -> Option<CameraRenderParams>;

    /// A camera pass finished rendering
    fn on_pass_end(&mut self, world: &mut World, camera: CameraId);
}
