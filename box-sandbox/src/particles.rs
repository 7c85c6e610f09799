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
//! Falling particle effect
//!
//! A purely visual field of points that drift down through a container
//! and wrap back to the top once they fall past the floor. Particles have
//! no entity, no radius, and never interact with the spheres.

use crate::ecs::components::WorldBoundsComponent;
use crate::render::{DrawParticle, RenderSink};
use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Largest particle field a single emitter will hold
pub const MAX_PARTICLES: usize = 100_000;

/// Settings for a [`ParticleEmitter`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Number of particles kept alive, at most [`MAX_PARTICLES`]
    pub count: usize,
    /// Downward acceleration in units per second squared
    pub gravity: f64,
    /// Maximum initial downward speed
    pub max_initial_speed: f64,
    /// Cap on downward speed; 0 disables the cap
    pub terminal_speed: f64,
    /// RNG seed; identical seeds give identical runs
    pub seed: u64,
    /// RGB color of every particle
    pub color: [f64; 3],
}

impl Default for ParticleConfig {
    fn default() -> Self {
        ParticleConfig {
            count: 200,
            gravity: 9.81,
            max_initial_speed: 1.0,
            terminal_speed: 6.0,
            seed: 0x5eed,
            color: [0.8, 0.9, 1.0],
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Particle {
    position: DVec3,
    velocity: DVec3,
}

/// Owns and advances one container's particle field
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    config: ParticleConfig,
    bounds: WorldBoundsComponent,
    particles: Vec<Particle>,
    rng: ChaCha8Rng,
    respawned: u64,
}

impl ParticleEmitter {
    /// Create an emitter scattered through `bounds`
    ///
    /// A `count` above [`MAX_PARTICLES`] is clamped.
    pub fn new(mut config: ParticleConfig, bounds: WorldBoundsComponent) -> Self {
        if config.count > MAX_PARTICLES {
            log::warn!(
                "particle count {} exceeds {}; clamping",
                config.count,
                MAX_PARTICLES
            );
            config.count = MAX_PARTICLES;
        }

        let mut emitter = ParticleEmitter {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            particles: Vec::with_capacity(config.count),
            respawned: 0,
            config,
            bounds,
        };

        for _ in 0..emitter.config.count {
            let y = emitter.sample(emitter.bounds.min.y, emitter.bounds.max.y);
            let particle = emitter.spawn_at_height(y);
            emitter.particles.push(particle);
        }

        log::debug!("particle emitter created with {} particles", emitter.particles.len());
        emitter
    }

    fn sample(&mut self, low: f64, high: f64) -> f64 {
        if high > low {
            self.rng.gen_range(low..high)
        } else {
            low
        }
    }

    fn spawn_at_height(&mut self, y: f64) -> Particle {
        let x = self.sample(self.bounds.min.x, self.bounds.max.x);
        let z = self.sample(self.bounds.min.z, self.bounds.max.z);
        let speed = self.sample(0.0, self.config.max_initial_speed.max(0.0));
        Particle {
            position: DVec3::new(x, y, z),
            velocity: DVec3::new(0.0, -speed, 0.0),
        }
    }

    /// Advance every particle by `dt`
    ///
    /// Particles that fall below the floor reappear at the ceiling with a
    /// fresh horizontal position and speed.
    pub fn update(&mut self, dt: f64) {
        let gravity = DVec3::new(0.0, -self.config.gravity, 0.0);
        let terminal = self.config.terminal_speed;
        let floor = self.bounds.min.y;
        let ceiling = self.bounds.max.y;

        for i in 0..self.particles.len() {
            let mut particle = self.particles[i];
            particle.velocity += gravity * dt;
            if terminal > 0.0 && particle.velocity.y < -terminal {
                particle.velocity.y = -terminal;
            }
            particle.position += particle.velocity * dt;

            if particle.position.y < floor || !particle.position.is_finite() {
                particle = self.spawn_at_height(ceiling);
                self.respawned += 1;
            }
            self.particles[i] = particle;
        }
    }

    /// Emit every particle into `sink`
    pub fn render(&self, sink: &mut dyn RenderSink) {
        let color = DVec3::from_array(self.config.color);
        for particle in &self.particles {
            sink.draw_particle(&DrawParticle {
                position: particle.position,
                color,
            });
        }
    }

    /// Number of particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Check if the emitter has no particles
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Total number of floor wraps since creation
    pub fn respawned(&self) -> u64 {
        self.respawned
    }

    /// Current particle positions
    pub fn positions(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.particles.iter().map(|p| p.position)
    }
}
