//! Registry of live scene objects
//!
//! The registry holds entity handles only; the `SceneObject` data stays in
//! the world. Handles whose entity was despawned, or that lost their
//! `SceneObject` component, are skipped when the registry is read.

use crate::core::entity::{Entity, SceneObject, World};
use tracing::debug;

/// Set of scene objects taking part in layering
#[derive(Debug, Clone, Default)]
pub struct SceneObjectRegistry {
    entities: Vec<Entity>,
}

impl SceneObjectRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity
    ///
    /// Returns `false` if it was already registered.
    pub fn register(&mut self, entity: Entity) -> bool {
        if self.contains(entity) {
            return false;
        }

        self.entities.push(entity);
        debug!(entity = ?entity, count = self.entities.len(), "Registered scene object");
        true
    }

    /// Unregister an entity
    ///
    /// Returns `false` if it was not registered.
    pub fn unregister(&mut self, entity: Entity) -> bool {
        match self.entities.iter().position(|e| *e == entity) {
            Some(index) => {
                self.entities.remove(index);
                debug!(entity = ?entity, count = self.entities.len(), "Unregistered scene object");
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Snapshot of every registered object still present in the world
    pub fn objects<'a>(
        &'a self,
        world: &'a World,
    ) -> impl Iterator<Item = (Entity, SceneObject)> + 'a {
        self.entities.iter().filter_map(move |&entity| {
            world
                .get::<SceneObject>(entity)
                .ok()
                .map(|object| (entity, *object))
        })
    }
}
