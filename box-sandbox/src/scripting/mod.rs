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
//! Scripting seam
//!
//! External scripts spawn and steer spheres through the command surface in
//! [`api`]. The [`ScriptRegistry`] owns the hooks and calls them once at
//! start and once per frame, before the simulation step.
//!
//! ```rust,ignore
//! use box_sandbox::scripting::{ScriptHook, ScriptRegistry, SandboxCommands};
//!
//! struct Fountain;
//!
//! impl ScriptHook for Fountain {
//!     fn name(&self) -> &str { "fountain" }
//!
//!     fn on_frame(
//!         &mut self,
//!         commands: &mut dyn SandboxCommands,
//!         frame: u64,
//!         _dt: f64,
//!     ) -> Result<(), String> {
//!         if frame % 60 == 0 {
//!             commands.spawn_default().map_err(|e| e.to_string())?;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut registry = ScriptRegistry::new();
//! registry.register(Box::new(Fountain))?;
//! registry.run_frame(&mut world, 1.0 / 60.0);
//! ```

pub mod api;
pub mod registry;

pub use api::{SandboxCommands, ScriptHook, SCRIPT_API_VERSION};
pub use registry::ScriptRegistry;
