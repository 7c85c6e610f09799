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
//! Entity management
//!
//! Entities are lightweight handles that index the dense component tables.
//! A handle pairs the slot index with the generation the slot had when it
//! was issued, so a handle kept past `destroy` is detected instead of
//! silently aliasing whatever entity later reuses the slot. Handles are
//! also tagged with the store that issued them, so a handle from one
//! container is never mistaken for a sphere in another.

use crate::error::{Result, SandboxError};
use std::fmt;

/// Default upper bound on simultaneously allocated entity slots
pub const MAX_ENTITIES: usize = 10_000;

/// Entity handle with generational index support for safe references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    index: u32,
    generation: u32,
    store: u32,
}

impl Entity {
    /// Create a new entity with the given slot index and generation
    ///
    /// The handle belongs to store 0.
    pub fn new(index: u32, generation: u32) -> Self {
        Self::in_store(0, index, generation)
    }

    /// Create a handle issued by `store`
    pub fn in_store(store: u32, index: u32, generation: u32) -> Self {
        Entity {
            index,
            generation,
            store,
        }
    }

    /// Identifier of the store that issued this handle
    pub fn store(&self) -> u32 {
        self.store
    }

    /// Slot index into the component tables
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Get the generation number
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.store == 0 {
            write!(f, "Entity({}, gen: {})", self.index, self.generation)
        } else {
            write!(
                f,
                "Entity({}, gen: {}, store: {})",
                self.index, self.generation, self.store
            )
        }
    }
}

/// Allocates and recycles entity slots
///
/// Recycled slots are reused last-in first-out before any fresh index is
/// handed out, so indices stay dense. Slot count never exceeds the
/// configured maximum.
#[derive(Debug, Clone)]
pub struct EntityManager {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free_list: Vec<u32>,
    max_entities: usize,
    store: u32,
}

impl EntityManager {
    /// Create a manager with the default [`MAX_ENTITIES`] limit
    pub fn new() -> Self {
        Self::with_capacity(MAX_ENTITIES)
    }

    /// Create a manager that allows at most `max_entities` slots
    pub fn with_capacity(max_entities: usize) -> Self {
        Self::for_store(0, max_entities)
    }

    /// Create a manager whose handles are tagged with `store`
    ///
    /// Handles tagged with any other store are never considered alive.
    pub fn for_store(store: u32, max_entities: usize) -> Self {
        EntityManager {
            generations: Vec::new(),
            alive: Vec::new(),
            free_list: Vec::new(),
            max_entities,
            store,
        }
    }

    /// Allocate an entity
    ///
    /// Returns the most recently destroyed slot if there is one, otherwise
    /// the next sequential index. Fails without touching any state once
    /// every slot up to the limit is in use.
    pub fn create(&mut self) -> Result<Entity> {
        if let Some(index) = self.free_list.pop() {
            let slot = index as usize;
            self.alive[slot] = true;
            return Ok(Entity::in_store(self.store, index, self.generations[slot]));
        }

        let next = self.generations.len();
        if next >= self.max_entities {
            return Err(SandboxError::CapacityExceeded {
                max: self.max_entities,
            });
        }

        self.generations.push(0);
        self.alive.push(true);
        Ok(Entity::in_store(self.store, next as u32, 0))
    }

    /// Release an entity's slot for reuse
    ///
    /// Bumps the slot generation so outstanding copies of the handle go
    /// stale. Returns `false` (and changes nothing) for handles that are
    /// not currently alive.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            log::warn!("ignoring destroy of dead or stale {}", entity);
            return false;
        }

        let slot = entity.index();
        self.alive[slot] = false;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.free_list.push(entity.index);
        true
    }

    /// Check whether the handle refers to the slot's current occupant
    pub fn is_alive(&self, entity: Entity) -> bool {
        let slot = entity.index();
        entity.store == self.store
            && slot < self.generations.len()
            && self.alive[slot]
            && self.generations[slot] == entity.generation
    }

    /// Number of slots ever allocated (the required component table length)
    pub fn slot_count(&self) -> usize {
        self.generations.len()
    }

    /// Number of currently live entities
    pub fn live_count(&self) -> usize {
        self.generations.len() - self.free_list.len()
    }

    /// Store tag carried by every handle this manager issues
    pub fn store(&self) -> u32 {
        self.store
    }

    /// Maximum number of slots this manager will allocate
    pub fn max_entities(&self) -> usize {
        self.max_entities
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}
