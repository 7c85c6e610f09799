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
//! Entity Component System (ECS) core implementation
//!
//! This module provides the storage layer the simulation runs on:
//! - Entity allocation with generation-checked handles
//! - Dense, index-addressed component tables
//! - The system trait and staged scheduler used by containers

mod entity;
mod component;
mod system;

/// Component definitions
pub mod components;

/// Staged system scheduling
pub mod scheduler;

pub use entity::{Entity, EntityManager, MAX_ENTITIES};
pub use component::{Component, ComponentStore, ComponentTable};
pub use system::{FrameStats, StepContext, System};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_and_store_agree() {
        let mut manager = EntityManager::new();
        let mut store = ComponentStore::new();
        let entity = manager.create().unwrap();
        store.resize(manager.slot_count());
        assert!(store.contains(entity));
        assert!(manager.is_alive(entity));
    }
}
