//! GPU uniform buffer types
//!
//! Plain-old-data encodings of the per-pass camera parameters and the
//! per-object render state, laid out for direct upload by the host renderer.

use crate::core::entity::RenderState;
use crate::graphics::pass::CameraRenderParams;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Camera uniform buffer data for one pass
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    /// World-to-camera matrix in render units
    pub view: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub near_clip: f32,
    pub rotation: [f32; 4],
    pub far_clip: f32,
    pub _padding: [f32; 3],
}

impl From<&CameraRenderParams> for CameraUniform {
    fn from(params: &CameraRenderParams) -> Self {
        let view = Mat4::from_rotation_translation(params.rotation, params.position).inverse();

        Self {
            view: view.to_cols_array_2d(),
            position: params.position.to_array(),
            near_clip: params.near_clip,
            rotation: params.rotation.to_array(),
            far_clip: params.far_clip,
            _padding: [0.0; 3],
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::from(&CameraRenderParams::default())
    }
}

/// Object uniform buffer data
///
/// The channel lets a pass skip objects tagged for other cameras.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ObjectUniform {
    /// Model matrix in render units
    pub model: [[f32; 4]; 4],
    pub channel: u32,
    pub _padding: [u32; 3],
}

impl ObjectUniform {
    /// Create an object uniform from a render-space placement
    pub fn new(position: Vec3, scale: f32, channel: u32) -> Self {
        let scale = Vec3::splat(scale);
        let model = Mat4::from_scale_rotation_translation(scale, Quat::IDENTITY, position);

        Self {
            model: model.to_cols_array_2d(),
            channel,
            _padding: [0; 3],
        }
    }
}

impl From<&RenderState> for ObjectUniform {
    fn from(state: &RenderState) -> Self {
        Self::new(state.position, state.scale, state.channel.as_u32())
    }
}

impl Default for ObjectUniform {
    fn default() -> Self {
        Self::from(&RenderState::default())
    }
}
