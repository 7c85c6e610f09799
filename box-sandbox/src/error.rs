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
//! Error types for the sandbox core
//!
//! Every failure the core can report is local and recoverable. Frame
//! updates never return errors; only creation, configuration, and script
//! registration do.

use crate::config::ConfigError;
use crate::ecs::Entity;
use thiserror::Error;

/// Errors produced by the sandbox core
#[derive(Error, Debug)]
pub enum SandboxError {
    /// The entity manager has handed out its maximum number of ids
    #[error("entity capacity exceeded: at most {max} entities may be alive")]
    CapacityExceeded {
        /// The configured maximum
        max: usize,
    },

    /// The handle does not refer to a live entity in this store
    #[error("invalid or stale entity handle {0}")]
    InvalidEntity(Entity),

    /// No container exists at the given index
    #[error("no container at index {0}")]
    UnknownContainer(usize),

    /// Spheres must have a finite, strictly positive radius
    #[error("invalid sphere radius {0}: must be finite and > 0")]
    InvalidRadius(f64),

    /// A script hook could not be registered
    #[error("script registration failed: {0}")]
    ScriptRegistration(String),

    /// Configuration could not be loaded or failed validation
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Convenience result alias used across the crate
pub type Result<T> = std::result::Result<T, SandboxError>;
