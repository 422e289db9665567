//! Entity-Component System (ECS) functionality
//!
//! This module provides the ECS world and the components the layering core
//! reads and writes.

pub mod components;
pub mod world;

// Re-export commonly used types
pub use components::{Name, RenderChildren, RenderState, SceneObject, VisibilityChannel};
pub use world::World;

// Re-export hecs types that users will need
pub use hecs::Entity;
