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
//! System execution framework
//!
//! Systems contain the logic that operates on a container's component
//! store. Each system receives a [`StepContext`] scoped to one container
//! and one frame.

use crate::ecs::{ComponentStore, Entity};
use std::ops::AddAssign;

/// Per-frame counters reported by the simulation passes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Live entities stepped this frame
    pub entities: usize,
    /// Axis corrections applied by the world-bounds pass
    pub wall_hits: usize,
    /// Sphere pairs whose velocities were resolved
    pub contacts: usize,
    /// Overlapping pairs skipped because their centers coincide
    pub degenerate_pairs: usize,
}

impl AddAssign for FrameStats {
    fn add_assign(&mut self, rhs: Self) {
        self.entities += rhs.entities;
        self.wall_hits += rhs.wall_hits;
        self.contacts += rhs.contacts;
        self.degenerate_pairs += rhs.degenerate_pairs;
    }
}

/// Everything a system may touch during one container step
pub struct StepContext<'a> {
    /// The container's component store
    pub store: &'a mut ComponentStore,
    /// Live entities, sorted by index
    pub live: &'a [Entity],
    /// Time step in seconds, passed through unclamped
    pub dt: f64,
    /// Counters accumulated by the systems that run this frame
    pub stats: &'a mut FrameStats,
}

/// Trait for systems that operate on a container's store
pub trait System: Send + Sync {
    /// Execute the system for one frame
    fn run(&mut self, ctx: &mut StepContext<'_>);

    /// Get the name of this system for debugging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingSystem {
        run_count: usize,
    }

    impl System for CountingSystem {
        fn run(&mut self, ctx: &mut StepContext<'_>) {
            self.run_count += 1;
            ctx.stats.entities += ctx.live.len();
        }

        fn name(&self) -> &str {
            "CountingSystem"
        }
    }

    #[test]
    fn test_system_receives_context() {
        let mut store = ComponentStore::new();
        store.resize(2);
        let live = [Entity::new(0, 0), Entity::new(1, 0)];
        let mut stats = FrameStats::default();
        let mut system = CountingSystem { run_count: 0 };

        let mut ctx = StepContext {
            store: &mut store,
            live: &live,
            dt: 0.016,
            stats: &mut stats,
        };
        system.run(&mut ctx);

        assert_eq!(system.run_count, 1);
        assert_eq!(stats.entities, 2);
        assert_eq!(system.name(), "CountingSystem");
    }

    #[test]
    fn test_stats_accumulate() {
        let mut total = FrameStats::default();
        total += FrameStats { entities: 2, wall_hits: 1, contacts: 3, degenerate_pairs: 0 };
        total += FrameStats { entities: 1, wall_hits: 0, contacts: 1, degenerate_pairs: 1 };
        assert_eq!(
            total,
            FrameStats { entities: 3, wall_hits: 1, contacts: 4, degenerate_pairs: 1 }
        );
    }
}
