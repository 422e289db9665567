//! World wrapper providing helper methods for entity management

use super::components::{RenderState, SceneObject};
use hecs::Entity;
use tracing::debug;

/// Wrapper around hecs::World providing additional helper methods
pub struct World {
    inner: hecs::World,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            inner: hecs::World::new(),
        }
    }

    /// Spawn a new entity with the given components
    pub fn spawn(&mut self, components: impl hecs::DynamicBundle) -> Entity {
        self.inner.spawn(components)
    }

    /// Get a reference to a component on an entity
    pub fn get<T: hecs::Component>(
        &self,
        entity: Entity,
    ) -> Result<hecs::Ref<'_, T>, hecs::ComponentError> {
        self.inner.get::<&T>(entity)
    }

    /// Get a mutable reference to a component on an entity
    pub fn get_mut<T: hecs::Component>(
        &self,
        entity: Entity,
    ) -> Result<hecs::RefMut<'_, T>, hecs::ComponentError> {
        self.inner.get::<&mut T>(entity)
    }

    /// Insert a component into an entity
    pub fn insert_one(
        &mut self,
        entity: Entity,
        component: impl hecs::Component,
    ) -> Result<(), hecs::NoSuchEntity> {
        self.inner.insert_one(entity, component)
    }

    /// Query entities with specific components
    pub fn query<Q: hecs::Query>(&self) -> hecs::QueryBorrow<'_, Q> {
        self.inner.query()
    }

    /// Despawn an entity and all its components
    pub fn despawn(&mut self, entity: Entity) -> Result<(), hecs::NoSuchEntity> {
        self.inner.despawn(entity)
    }

    /// Spawn a scene object together with the components the render passes
    /// write to
    ///
    /// A `RenderState` is added when the bundle does not carry one.
    pub fn spawn_scene_object(
        &mut self,
        object: SceneObject,
        components: impl hecs::DynamicBundle,
    ) -> Entity {
        let entity = self.spawn(components);

        if let Err(e) = self.insert_one(entity, object) {
            debug!(entity = ?entity, error = %e, "Failed to attach SceneObject");
            return entity;
        }

        if self.get::<RenderState>(entity).is_err() {
            match self.insert_one(entity, RenderState::default()) {
                Ok(()) => debug!(entity = ?entity, "Auto-added RenderState component"),
                Err(e) => debug!(entity = ?entity, error = %e, "Failed to add RenderState"),
            }
        }

        entity
    }
}
