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
//! Sandbox configuration
//!
//! A sandbox is described by a TOML document listing its containers, the
//! spheres placed at startup, and optional particle effects:
//!
//! ```toml
//! max_entities = 500
//! timestep = 0.016
//!
//! [[containers]]
//! position = [0.0, 0.0, 0.0]
//! size = [10.0, 10.0, 10.0]
//!
//! [containers.particles]
//! count = 100
//!
//! [[spheres]]
//! position = [0.0, 2.0, 0.0]
//! velocity = [1.0, 0.0, 0.5]
//! radius = 0.5
//! ```

use crate::ecs::MAX_ENTITIES;
use crate::integration::validate_timestep;
use crate::particles::{ParticleConfig, MAX_PARTICLES};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The document parsed but describes an unusable sandbox
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// One container volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Center of the box
    pub position: [f64; 3],
    /// Full edge lengths of the box
    pub size: [f64; 3],
    /// Falling particle effect inside this box
    #[serde(default)]
    pub particles: Option<ParticleConfig>,
}

impl ContainerConfig {
    /// Center as a vector
    pub fn position(&self) -> DVec3 {
        DVec3::from_array(self.position)
    }

    /// Edge lengths as a vector
    pub fn size(&self) -> DVec3 {
        DVec3::from_array(self.size)
    }
}

/// A sphere placed when the world is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereSpawn {
    /// Initial center
    pub position: [f64; 3],
    /// Initial velocity
    #[serde(default)]
    pub velocity: [f64; 3],
    /// Collision radius
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Mass
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// RGB color
    #[serde(default = "default_color")]
    pub color: [f64; 3],
}

fn default_radius() -> f64 {
    1.0
}

fn default_mass() -> f64 {
    1.0
}

fn default_color() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

/// Top-level sandbox configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Entity limit per store
    pub max_entities: usize,
    /// Fixed frame step handed to the simulation, in seconds
    pub timestep: f64,
    /// Containers in creation order
    pub containers: Vec<ContainerConfig>,
    /// Spheres spawned into the first container
    pub spheres: Vec<SphereSpawn>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        SandboxConfig {
            max_entities: MAX_ENTITIES,
            timestep: 1.0 / 60.0,
            containers: Vec::new(),
            spheres: Vec::new(),
        }
    }
}

impl SandboxConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: SandboxConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        log::info!("loading sandbox configuration from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Check the configuration describes a usable sandbox
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entities == 0 {
            return Err(ConfigError::Invalid("max_entities must be at least 1".into()));
        }

        if self.timestep <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "timestep must be positive, got {}",
                self.timestep
            )));
        }
        validate_timestep(self.timestep).map_err(ConfigError::Invalid)?;

        for (i, container) in self.containers.iter().enumerate() {
            let size = container.size();
            if !size.is_finite() || size.min_element() <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "container {} has non-positive size {:?}",
                    i, container.size
                )));
            }
            if !container.position().is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "container {} has non-finite position",
                    i
                )));
            }
            if let Some(particles) = &container.particles {
                if particles.count > MAX_PARTICLES {
                    return Err(ConfigError::Invalid(format!(
                        "container {} asks for {} particles; at most {} are allowed",
                        i, particles.count, MAX_PARTICLES
                    )));
                }
                if !particles.gravity.is_finite() || !particles.terminal_speed.is_finite() {
                    return Err(ConfigError::Invalid(format!(
                        "container {} has non-finite particle motion settings",
                        i
                    )));
                }
            }
        }

        if self.spheres.len() > self.max_entities {
            return Err(ConfigError::Invalid(format!(
                "{} spheres configured but max_entities is {}",
                self.spheres.len(),
                self.max_entities
            )));
        }

        for (i, sphere) in self.spheres.iter().enumerate() {
            if !sphere.radius.is_finite() || sphere.radius <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "sphere {} has invalid radius {}",
                    i, sphere.radius
                )));
            }
            if !sphere.mass.is_finite() || sphere.mass <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "sphere {} has invalid mass {}",
                    i, sphere.mass
                )));
            }
        }

        Ok(())
    }
}
