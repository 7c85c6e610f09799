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
//! Collision detection and response
//!
//! Two passes run after integration each frame:
//!
//! 1. **World bounds** ([`CollisionSystem::update_world_bound_collisions`]):
//!    spheres that crossed a container wall are placed back against it and
//!    their velocity on that axis is pointed inward.
//! 2. **Inter-entity** ([`CollisionSystem::update_inter_entity_collisions`]):
//!    every pair of overlapping spheres is resolved as a frictionless,
//!    perfectly elastic collision along the line of centers.
//!
//! There is no broad phase; the pairwise pass is O(n²) in the number of
//! live entities, which is fine for a few hundred spheres.

use crate::ecs::scheduler::{stages, StageId};
use crate::ecs::{ComponentStore, Entity, StepContext, System};

mod bounds;
mod pairs;

pub use bounds::reflect_off_bounds;
pub use pairs::{resolve_elastic, resolve_pairs, spheres_overlap, PairOutcome, DEGENERATE_DISTANCE};

/// Entry points for both collision passes over a [`ComponentStore`]
pub struct CollisionSystem;

impl CollisionSystem {
    /// Reflect live spheres off the store's bounds
    ///
    /// Returns the number of axis corrections applied.
    pub fn update_world_bound_collisions(store: &mut ComponentStore, live: &[Entity]) -> usize {
        let bounds = *store.bounds();
        let (transforms, physics) = store.motion_mut();
        reflect_off_bounds(transforms, physics, &bounds, live)
    }

    /// Resolve every overlapping pair of live spheres
    pub fn update_inter_entity_collisions(
        store: &mut ComponentStore,
        live: &[Entity],
    ) -> PairOutcome {
        let (transforms, physics) = store.motion_mut();
        resolve_pairs(transforms, physics, live)
    }
}

/// Scheduler wrapper for the world-bounds pass
#[derive(Debug, Default)]
pub struct WorldBoundsSystem;

impl WorldBoundsSystem {
    /// Stage this system belongs to
    pub const STAGE: StageId = stages::WORLD_BOUNDS;
}

impl System for WorldBoundsSystem {
    fn run(&mut self, ctx: &mut StepContext<'_>) {
        ctx.stats.wall_hits += CollisionSystem::update_world_bound_collisions(ctx.store, ctx.live);
    }

    fn name(&self) -> &str {
        "WorldBoundsSystem"
    }
}

/// Scheduler wrapper for the pairwise pass
#[derive(Debug, Default)]
pub struct InterEntitySystem;

impl InterEntitySystem {
    /// Stage this system belongs to
    pub const STAGE: StageId = stages::INTER_ENTITY;
}

impl System for InterEntitySystem {
    fn run(&mut self, ctx: &mut StepContext<'_>) {
        let outcome = CollisionSystem::update_inter_entity_collisions(ctx.store, ctx.live);
        ctx.stats.contacts += outcome.contacts;
        ctx.stats.degenerate_pairs += outcome.degenerate;
    }

    fn name(&self) -> &str {
        "InterEntitySystem"
    }
}
