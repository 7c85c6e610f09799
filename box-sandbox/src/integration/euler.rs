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
//! Explicit Euler integrator
//!
//! Position advances by the current velocity; velocity is left alone
//! because no forces act on the spheres.

use super::Integrator;
use crate::ecs::components::{PhysicsComponent, TransformComponent};
use crate::ecs::Entity;

/// First-order explicit integrator: `p' = p + v * dt`
#[derive(Debug, Clone, Default)]
pub struct ExplicitEulerIntegrator {
    non_finite_warned: bool,
}

impl ExplicitEulerIntegrator {
    /// Create a new integrator
    pub fn new() -> Self {
        Self::default()
    }
}

impl Integrator for ExplicitEulerIntegrator {
    fn name(&self) -> &str {
        "Explicit Euler"
    }

    fn integrate(
        &mut self,
        transforms: &mut [TransformComponent],
        physics: &[PhysicsComponent],
        live: &[Entity],
        dt: f64,
    ) -> usize {
        let mut updated_count = 0;

        for entity in live {
            let i = entity.index();
            let (Some(transform), Some(body)) = (transforms.get_mut(i), physics.get(i)) else {
                continue;
            };

            transform.position += body.velocity * dt;

            if !transform.position.is_finite() && !self.non_finite_warned {
                log::warn!("non-finite position after integration for {}", entity);
                self.non_finite_warned = true;
            }

            updated_count += 1;
        }

        updated_count
    }
}
