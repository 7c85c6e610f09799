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
//! Staged system scheduler
//!
//! Systems are organized into stages that execute in ascending order.
//! Within a stage, systems run in the order they were added. The frame
//! pipeline depends on this: integration must see the previous frame's
//! state, and collision must see the post-move state.

use crate::ecs::system::{StepContext, System};

/// Stage identifier for grouping systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StageId(pub usize);

impl StageId {
    /// Create a new stage ID
    pub fn new(id: usize) -> Self {
        StageId(id)
    }
}

/// Pre-defined stages of a container step
pub mod stages {
    use super::StageId;

    /// Velocity integrated into position
    pub const INTEGRATION: StageId = StageId(0);

    /// Spheres reflected off the container walls
    pub const WORLD_BOUNDS: StageId = StageId(1);

    /// Pairwise sphere collisions resolved
    pub const INTER_ENTITY: StageId = StageId(2);

    /// Caller-supplied systems that run after collision
    pub const POST_COLLISION: StageId = StageId(3);
}

/// A system with metadata for scheduling
struct ScheduledSystem {
    system: Box<dyn System>,
    stage: StageId,
}

/// System scheduler with deterministic staged execution
///
/// # Examples
///
/// ```
/// use box_sandbox::ecs::scheduler::{Scheduler, stages};
/// use box_sandbox::ecs::{StepContext, System};
///
/// struct MySystem;
/// impl System for MySystem {
///     fn run(&mut self, _ctx: &mut StepContext<'_>) {}
/// }
///
/// let mut scheduler = Scheduler::new();
/// scheduler.add_system(MySystem, stages::POST_COLLISION);
/// assert_eq!(scheduler.system_count(), 1);
/// ```
pub struct Scheduler {
    systems: Vec<ScheduledSystem>,
}

impl Scheduler {
    /// Create a new scheduler
    pub fn new() -> Self {
        Scheduler {
            systems: Vec::new(),
        }
    }

    /// Add a system to a specific stage
    ///
    /// The system is placed after every system already registered at the
    /// same or an earlier stage.
    pub fn add_system<S: System + 'static>(&mut self, system: S, stage: StageId) {
        let position = self.systems.partition_point(|s| s.stage <= stage);
        self.systems.insert(
            position,
            ScheduledSystem {
                system: Box::new(system),
                stage,
            },
        );
    }

    /// Get the number of registered systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Get the number of stages in use
    pub fn stage_count(&self) -> usize {
        self.systems.last().map(|s| s.stage.0 + 1).unwrap_or(0)
    }

    /// Names of registered systems in execution order
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.system.name()).collect()
    }

    /// Execute all systems in stage order
    pub fn run(&mut self, ctx: &mut StepContext<'_>) {
        for scheduled in &mut self.systems {
            log::trace!("running {} (stage {})", scheduled.system.name(), scheduled.stage.0);
            scheduled.system.run(ctx);
        }
    }

    /// Clear all systems from the scheduler
    pub fn clear(&mut self) {
        self.systems.clear();
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{ComponentStore, FrameStats};
    use std::sync::{Arc, Mutex};

    struct RecordingSystem {
        name: String,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingSystem {
        fn new(name: &str, log: &Arc<Mutex<Vec<String>>>) -> Self {
            RecordingSystem {
                name: name.to_string(),
                log: Arc::clone(log),
            }
        }
    }

    impl System for RecordingSystem {
        fn run(&mut self, _ctx: &mut StepContext<'_>) {
            self.log.lock().unwrap().push(self.name.clone());
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    fn run_once(scheduler: &mut Scheduler) {
        let mut store = ComponentStore::new();
        let mut stats = FrameStats::default();
        let mut ctx = StepContext {
            store: &mut store,
            live: &[],
            dt: 0.016,
            stats: &mut stats,
        };
        scheduler.run(&mut ctx);
    }

    #[test]
    fn test_scheduler_creation() {
        let scheduler = Scheduler::new();
        assert_eq!(scheduler.system_count(), 0);
        assert_eq!(scheduler.stage_count(), 0);
    }

    #[test]
    fn test_stage_ordering() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        scheduler.add_system(RecordingSystem::new("pairs", &log), stages::INTER_ENTITY);
        scheduler.add_system(RecordingSystem::new("integrate", &log), stages::INTEGRATION);
        scheduler.add_system(RecordingSystem::new("walls", &log), stages::WORLD_BOUNDS);

        run_once(&mut scheduler);

        assert_eq!(*log.lock().unwrap(), vec!["integrate", "walls", "pairs"]);
        assert_eq!(scheduler.stage_count(), 3);
    }

    #[test]
    fn test_insertion_order_within_stage() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        scheduler.add_system(RecordingSystem::new("a", &log), stages::POST_COLLISION);
        scheduler.add_system(RecordingSystem::new("early", &log), stages::INTEGRATION);
        scheduler.add_system(RecordingSystem::new("b", &log), stages::POST_COLLISION);

        assert_eq!(scheduler.system_names(), vec!["early", "a", "b"]);
        run_once(&mut scheduler);
        assert_eq!(*log.lock().unwrap(), vec!["early", "a", "b"]);
    }

    #[test]
    fn test_empty_scheduler() {
        let mut scheduler = Scheduler::new();
        run_once(&mut scheduler);
    }

    #[test]
    fn test_clear_scheduler() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        scheduler.add_system(RecordingSystem::new("test", &log), stages::INTEGRATION);
        assert_eq!(scheduler.system_count(), 1);

        scheduler.clear();
        assert_eq!(scheduler.system_count(), 0);
    }
}
