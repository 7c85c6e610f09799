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
//! # Box Sandbox
//!
//! A small real-time sphere sandbox: bounded boxes full of colliding
//! spheres, stepped at a fixed rate over dense component storage.
//!
//! ## Features
//!
//! - **ECS Storage**: generation-checked entity handles indexing dense,
//!   parallel component tables
//! - **Frame Pipeline**: integration, then wall reflection, then pairwise
//!   elastic collision, in a fixed staged order
//! - **Isolated Containers**: each box owns its own store and never
//!   interacts with another
//! - **Scripting Seam**: scripts spawn and steer spheres through a narrow
//!   command surface keyed by handle
//! - **Particle Effect**: optional falling particles per box, visual only
//!
//! ## Example
//!
//! ```rust
//! use box_sandbox::World;
//! use box_sandbox::scripting::SandboxCommands;
//! use glam::DVec3;
//!
//! let mut world = World::new();
//! world.add_container(DVec3::ZERO, DVec3::splat(10.0));
//!
//! let a = world.spawn(DVec3::new(-0.9, 0.0, 0.0), DVec3::X, 1.0, DVec3::ONE).unwrap();
//! let b = world.spawn(DVec3::new(0.9, 0.0, 0.0), -DVec3::X, 1.0, DVec3::ONE).unwrap();
//!
//! let stats = world.update(0.0);
//! assert_eq!(stats.contacts, 1);
//! assert_eq!(world.sphere(a).unwrap().velocity, -DVec3::X);
//! assert_eq!(world.sphere(b).unwrap().velocity, DVec3::X);
//! ```

#![warn(missing_docs)]

/// Entity Component System implementation
pub mod ecs;

/// Velocity integration
pub mod integration;

/// Wall and sphere-sphere collision
pub mod collision;

/// Box-shaped simulation domains
pub mod container;

/// Top-level world
pub mod world;

/// Falling particle effect
pub mod particles;

/// Rendering seam
pub mod render;

/// Script command surface and hook registry
pub mod scripting;

/// TOML configuration
pub mod config;

/// Error types
pub mod error;

pub use container::{Appearance, Container, SphereState};
pub use ecs::{Entity, FrameStats};
pub use error::{Result, SandboxError};
pub use world::World;
