// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Component storage and management
//!
//! Components are data containers that can be attached to entities.
//! Storage is dense: every table holds one slot per entity index, and all
//! per-entity tables in a [`ComponentStore`] are resized together so no
//! entity ever has a partial set of components.

use crate::ecs::components::{
    PhysicsComponent, RenderComponent, TransformComponent, WorldBoundsComponent,
};
use crate::ecs::Entity;

/// Trait that all components must implement
///
/// Components should be plain data structures without behavior.
pub trait Component: 'static + Copy + Default + Send + Sync {}

/// Dense, index-addressed table of one component type
///
/// Slots are addressed directly by entity index. The table only grows;
/// logical deletion is tracked by whoever owns the live-entity list.
///
/// # Example
///
/// ```
/// use box_sandbox::ecs::ComponentTable;
/// use box_sandbox::ecs::components::PhysicsComponent;
///
/// let mut table = ComponentTable::<PhysicsComponent>::new();
/// table.resize(4);
/// assert_eq!(table.len(), 4);
/// assert_eq!(table.get(3).unwrap().mass, 1.0);
/// assert!(table.get(4).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ComponentTable<T: Component> {
    slots: Vec<T>,
}

impl<T: Component> ComponentTable<T> {
    /// Create a new empty table
    pub fn new() -> Self {
        ComponentTable { slots: Vec::new() }
    }

    /// Grow to `len` slots, default-constructing new ones
    ///
    /// Never shrinks; a smaller `len` is ignored.
    pub fn resize(&mut self, len: usize) {
        if len > self.slots.len() {
            self.slots.resize(len, T::default());
        }
    }

    /// Get the number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the table has no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot at `index`, if in range
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    /// Mutable slot at `index`, if in range
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// Overwrite the slot at `index`; returns `false` when out of range
    pub fn set(&mut self, index: usize, value: T) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Get a reference to the dense component array
    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }

    /// Get a mutable reference to the dense component array
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.slots
    }
}

impl<T: Component> Default for ComponentTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Parallel component tables for one simulation domain
///
/// Transforms, physics, and render data share the same index space. The
/// store also holds the single [`WorldBoundsComponent`] of its container.
///
/// Lookups take an [`Entity`] and only check the index range; whether the
/// handle is still live is the owner's concern (see `Container`).
#[derive(Debug, Clone, Default)]
pub struct ComponentStore {
    transforms: ComponentTable<TransformComponent>,
    physics: ComponentTable<PhysicsComponent>,
    renders: ComponentTable<RenderComponent>,
    bounds: WorldBoundsComponent,
}

impl ComponentStore {
    /// Create an empty, unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given bounds
    pub fn with_bounds(bounds: WorldBoundsComponent) -> Self {
        ComponentStore {
            bounds,
            ..Default::default()
        }
    }

    /// Grow every per-entity table to `len` slots
    pub fn resize(&mut self, len: usize) {
        self.transforms.resize(len);
        self.physics.resize(len);
        self.renders.resize(len);
    }

    /// Number of slots in each per-entity table
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Check if the store has no slots
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Whether the entity's index addresses an existing slot
    pub fn contains(&self, entity: Entity) -> bool {
        entity.index() < self.len()
    }

    /// Write all three per-entity components for `entity`
    ///
    /// Returns `false` if the index is out of range.
    pub fn insert(
        &mut self,
        entity: Entity,
        transform: TransformComponent,
        physics: PhysicsComponent,
        render: RenderComponent,
    ) -> bool {
        if !self.contains(entity) {
            return false;
        }
        let i = entity.index();
        self.transforms.set(i, transform);
        self.physics.set(i, physics);
        self.renders.set(i, render);
        true
    }

    /// Get the transform of `entity`
    pub fn transform(&self, entity: Entity) -> Option<&TransformComponent> {
        self.transforms.get(entity.index())
    }

    /// Get the mutable transform of `entity`
    pub fn transform_mut(&mut self, entity: Entity) -> Option<&mut TransformComponent> {
        self.transforms.get_mut(entity.index())
    }

    /// Get the physics state of `entity`
    pub fn physics(&self, entity: Entity) -> Option<&PhysicsComponent> {
        self.physics.get(entity.index())
    }

    /// Get the mutable physics state of `entity`
    pub fn physics_mut(&mut self, entity: Entity) -> Option<&mut PhysicsComponent> {
        self.physics.get_mut(entity.index())
    }

    /// Get the render data of `entity`
    pub fn render(&self, entity: Entity) -> Option<&RenderComponent> {
        self.renders.get(entity.index())
    }

    /// Get the mutable render data of `entity`
    pub fn render_mut(&mut self, entity: Entity) -> Option<&mut RenderComponent> {
        self.renders.get_mut(entity.index())
    }

    /// Bounds of the owning container
    pub fn bounds(&self) -> &WorldBoundsComponent {
        &self.bounds
    }

    /// Replace the bounds
    pub fn set_bounds(&mut self, bounds: WorldBoundsComponent) {
        self.bounds = bounds;
    }

    /// Dense transform and physics slices, borrowed together for bulk passes
    pub fn motion_mut(&mut self) -> (&mut [TransformComponent], &mut [PhysicsComponent]) {
        (self.transforms.as_mut_slice(), self.physics.as_mut_slice())
    }

    /// Dense transform slice
    pub fn transforms(&self) -> &[TransformComponent] {
        self.transforms.as_slice()
    }

    /// Dense physics slice
    pub fn physics_slice(&self) -> &[PhysicsComponent] {
        self.physics.as_slice()
    }
}
