//! Multilayer rendering core for astronomical-scale scenes
//!
//! This crate keeps scenes that span many orders of magnitude renderable
//! with a single-precision pipeline: a double-precision view frustum answers
//! sphere queries, and a per-frame orchestrator re-centers the world on the
//! camera and slices the visible depth into bands with their own scales.

pub mod config;
pub mod core;
pub mod graphics;
pub mod scene;

// Re-export commonly used types
pub mod prelude {
    // Entity system types
    pub use crate::core::entity::{
        Entity, Name, RenderChildren, RenderState, SceneObject, VisibilityChannel, World,
    };

    // Camera and geometry types
    pub use crate::core::camera::CameraPose;
    pub use crate::core::coordinates::FloatingOrigin;
    pub use crate::core::geometry::{SphereIntersection, ViewPyramid};

    // Math types
    pub use glam::{DVec3, Quat, Vec3};

    // Graphics types
    pub use crate::graphics::{
        CameraId, CameraRenderParams, CameraUniform, FrameReport, LayeringError,
        MultilayerRenderSystem, ObjectUniform, RenderLayer, RenderPass,
    };

    // Scene types
    pub use crate::scene::{
        update_infographics, EclipticHeight, Halo, MarkerVisibility, SceneObjectRegistry,
    };

    // Config types
    pub use crate::config::{ConfigError, LayeringConfig};
}

/// Initialize logging for the engine
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
