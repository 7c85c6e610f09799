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
//! Numerical integration for the sandbox
//!
//! Only translational motion is modeled and there are no forces acting on
//! the spheres, so integration is a single explicit step:
//! `position += velocity * dt` for every live entity. The pass is order
//! independent; no entity's update reads another's state.
//!
//! # Timestep Guidelines
//!
//! The frame driver supplies `dt` and the core never clamps it. Use
//! [`validate_timestep`] to surface values likely to misbehave.

use crate::ecs::components::{PhysicsComponent, TransformComponent};
use crate::ecs::{ComponentStore, Entity, StepContext, System};
use glam::DVec3;

mod euler;

pub use euler::ExplicitEulerIntegrator;

/// Trait for numerical integration methods
pub trait Integrator: Send + Sync {
    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Advance every live entity by `dt`
    ///
    /// Returns the number of entities updated. Indices outside the
    /// tables are skipped.
    fn integrate(
        &mut self,
        transforms: &mut [TransformComponent],
        physics: &[PhysicsComponent],
        live: &[Entity],
        dt: f64,
    ) -> usize;
}

/// Check a caller-supplied timestep
///
/// Returns a description of the problem for timesteps that are not
/// positive and finite, or that are far outside the range a frame driver
/// normally produces. The value is never altered.
pub fn validate_timestep(dt: f64) -> Result<(), String> {
    if !dt.is_finite() {
        return Err(format!("Timestep {} is not finite", dt));
    }
    if dt < 0.0 {
        return Err(format!("Timestep {} is negative; motion will run backwards", dt));
    }
    if dt > 1.0 {
        return Err(format!(
            "Timestep {} is large; spheres may tunnel through each other",
            dt
        ));
    }
    Ok(())
}

/// The integration pass of a container step
///
/// # Examples
///
/// ```
/// use box_sandbox::ecs::{ComponentStore, Entity};
/// use box_sandbox::integration::PhysicsSystem;
/// use glam::DVec3;
///
/// let mut store = ComponentStore::new();
/// store.resize(1);
/// let e = Entity::new(0, 0);
/// store.physics_mut(e).unwrap().velocity = DVec3::new(2.0, 0.0, 0.0);
///
/// PhysicsSystem::new().update(&mut store, &[e], 0.5);
/// assert_eq!(store.transform(e).unwrap().position.x, 1.0);
/// ```
pub struct PhysicsSystem<I: Integrator = ExplicitEulerIntegrator> {
    integrator: I,
}

impl PhysicsSystem {
    /// Create the pass with the explicit Euler integrator
    pub fn new() -> Self {
        PhysicsSystem {
            integrator: ExplicitEulerIntegrator::new(),
        }
    }
}

impl<I: Integrator> PhysicsSystem<I> {
    /// Create the pass with a custom integrator
    pub fn with_integrator(integrator: I) -> Self {
        PhysicsSystem { integrator }
    }

    /// Integrate every live entity in `store`
    pub fn update(&mut self, store: &mut ComponentStore, live: &[Entity], dt: f64) -> usize {
        let (transforms, physics) = store.motion_mut();
        self.integrator.integrate(transforms, physics, live, dt)
    }
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Integrator> System for PhysicsSystem<I> {
    fn run(&mut self, ctx: &mut StepContext<'_>) {
        let updated = self.update(ctx.store, ctx.live, ctx.dt);
        ctx.stats.entities += updated;
    }

    fn name(&self) -> &str {
        "PhysicsSystem"
    }
}

/// Total kinetic energy of the live entities
pub fn kinetic_energy(store: &ComponentStore, live: &[Entity]) -> f64 {
    live.iter()
        .filter_map(|&e| store.physics(e))
        .map(PhysicsComponent::kinetic_energy)
        .sum()
}

/// Total linear momentum of the live entities
pub fn momentum(store: &ComponentStore, live: &[Entity]) -> DVec3 {
    live.iter()
        .filter_map(|&e| store.physics(e))
        .map(PhysicsComponent::momentum)
        .fold(DVec3::ZERO, |acc, p| acc + p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_timestep_validation() {
        assert!(validate_timestep(0.016).is_ok());
        assert!(validate_timestep(0.0).is_ok());
        assert!(validate_timestep(f64::NAN).unwrap_err().contains("not finite"));
        assert!(validate_timestep(-0.1).unwrap_err().contains("negative"));
        assert!(validate_timestep(2.0).unwrap_err().contains("large"));
    }

    #[test]
    fn test_energy_and_momentum_helpers() {
        let mut store = ComponentStore::new();
        store.resize(3);
        let a = Entity::new(0, 0);
        let b = Entity::new(1, 0);
        let stale = Entity::new(2, 0);
        store.physics_mut(a).unwrap().velocity = DVec3::new(1.0, 0.0, 0.0);
        store.physics_mut(b).unwrap().velocity = DVec3::new(-1.0, 0.0, 0.0);
        store.physics_mut(b).unwrap().mass = 2.0;
        store.physics_mut(stale).unwrap().velocity = DVec3::splat(100.0);

        let live = [a, b];
        assert_relative_eq!(kinetic_energy(&store, &live), 1.5);
        assert_eq!(momentum(&store, &live), DVec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_system_reports_updated_count() {
        let mut store = ComponentStore::new();
        store.resize(2);
        let live = [Entity::new(0, 0), Entity::new(1, 0)];
        let mut stats = crate::ecs::FrameStats::default();
        let mut system = PhysicsSystem::new();
        let mut ctx = StepContext {
            store: &mut store,
            live: &live,
            dt: 0.1,
            stats: &mut stats,
        };
        system.run(&mut ctx);
        assert_eq!(stats.entities, 2);
    }
}
