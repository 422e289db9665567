//! Graphics module
//!
//! Provides the multilayer rendering orchestration: depth bands, the pass
//! interface the host renderer drives, and the GPU-facing encodings of
//! per-pass parameters.

pub mod multilayer;
pub mod pass;
pub mod render_layer;
pub mod uniform;

// Re-export commonly used types
pub use multilayer::{
    determine_start_depth, partition_depth, FrameReport, LayeringError, MultilayerRenderSystem,
    Partition,
};
pub use pass::{CameraId, CameraRenderParams, RenderPass};
pub use render_layer::{ObjectDepth, RenderLayer};
pub use uniform::{CameraUniform, ObjectUniform};
