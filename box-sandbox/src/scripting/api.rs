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
//! Script hook API
//!
//! Scripts never see the component stores. They act on the sandbox only
//! through [`SandboxCommands`], a small command surface addressed by
//! entity handle. Every setter tolerates stale or unknown handles: the
//! call is logged and ignored so a script holding an old id cannot
//! corrupt state or stop the frame.

use crate::container::SphereState;
use crate::ecs::Entity;
use crate::error::Result;
use glam::DVec3;

/// Version of the script hook API
///
/// Format: MAJOR.MINOR.PATCH following semantic versioning.
pub const SCRIPT_API_VERSION: &str = "0.2.0";

/// Commands a script may issue against the sandbox
pub trait SandboxCommands {
    /// Spawn a sphere with the given state and color
    fn spawn(
        &mut self,
        position: DVec3,
        velocity: DVec3,
        radius: f64,
        color: DVec3,
    ) -> Result<Entity>;

    /// Spawn a unit sphere at rest at the origin
    fn spawn_default(&mut self) -> Result<Entity> {
        self.spawn(DVec3::ZERO, DVec3::ZERO, 1.0, DVec3::ONE)
    }

    /// Destroy a sphere; `false` if the handle is not live
    fn destroy(&mut self, entity: Entity) -> bool;

    /// Move a sphere; `false` if the handle is not live
    fn set_position(&mut self, entity: Entity, position: DVec3) -> bool;

    /// Change a sphere's velocity; `false` if the handle is not live
    fn set_velocity(&mut self, entity: Entity, velocity: DVec3) -> bool;

    /// Change a sphere's color; `false` if the handle is not live
    fn set_color(&mut self, entity: Entity, color: DVec3) -> bool;

    /// Change a sphere's mass; `false` if the handle is not live
    fn set_mass(&mut self, entity: Entity, mass: f64) -> bool;

    /// Read a sphere's current state
    ///
    /// Fails with `SandboxError::InvalidEntity` for stale or unknown handles.
    fn sphere(&self, entity: Entity) -> Result<SphereState>;

    /// Number of live spheres reachable through these commands
    fn entity_count(&self) -> usize;
}

/// Lifecycle hooks for scripts
///
/// Scripts are driven by a [`ScriptRegistry`](super::ScriptRegistry):
/// `on_start` once before the first frame, `on_frame` before each
/// simulation step.
pub trait ScriptHook {
    /// Get the name of this script
    ///
    /// Must be unique across all registered scripts.
    fn name(&self) -> &str;

    /// Get the version of this script
    fn version(&self) -> &str {
        "0.1.0"
    }

    /// Get the script API version this script was written against
    fn api_version(&self) -> &str {
        SCRIPT_API_VERSION
    }

    /// Called once before the first frame
    ///
    /// # Errors
    ///
    /// Returns an error message if the script could not set itself up.
    fn on_start(&mut self, _commands: &mut dyn SandboxCommands) -> std::result::Result<(), String> {
        Ok(())
    }

    /// Called before every simulation step
    fn on_frame(
        &mut self,
        _commands: &mut dyn SandboxCommands,
        _frame: u64,
        _dt: f64,
    ) -> std::result::Result<(), String> {
        Ok(())
    }
}
