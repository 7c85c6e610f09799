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
//! Pairwise sphere collisions
//!
//! Every unordered pair of live entities is tested once per frame, in
//! ascending index order. Overlapping pairs exchange velocity along the
//! contact normal as a one-dimensional elastic collision; the tangential
//! part of each velocity is untouched and positions are not separated.
//! Resolution is sequential: a later pair sees velocities already changed
//! by an earlier pair in the same frame.

use crate::ecs::components::{PhysicsComponent, TransformComponent};
use crate::ecs::Entity;
use glam::DVec3;

/// Center distance below which a contact normal cannot be formed
pub const DEGENERATE_DISTANCE: f64 = 1e-9;

/// Outcome of one pairwise pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairOutcome {
    /// Pairs resolved
    pub contacts: usize,
    /// Overlapping pairs skipped because their centers coincide
    pub degenerate: usize,
}

/// Whether two spheres interpenetrate
///
/// Touching spheres (distance exactly equal to the radius sum) do not.
pub fn spheres_overlap(a: DVec3, radius_a: f64, b: DVec3, radius_b: f64) -> bool {
    a.distance(b) < radius_a + radius_b
}

/// Resolve an elastic collision along the normal `n`
///
/// `n` must be unit length and point from `b` towards `a`. Both bodies
/// keep their tangential velocity; the normal components follow the 1-D
/// elastic collision equations.
///
/// # Examples
///
/// ```
/// use box_sandbox::collision::resolve_elastic;
/// use box_sandbox::ecs::components::PhysicsComponent;
/// use glam::DVec3;
///
/// let mut a = PhysicsComponent::new(DVec3::new(-1.0, 0.0, 0.0), 1.0);
/// let mut b = PhysicsComponent::new(DVec3::new(1.0, 0.0, 0.0), 1.0);
/// resolve_elastic(&mut a, &mut b, DVec3::X);
/// assert_eq!(a.velocity.x, 1.0);
/// assert_eq!(b.velocity.x, -1.0);
/// ```
pub fn resolve_elastic(a: &mut PhysicsComponent, b: &mut PhysicsComponent, n: DVec3) {
    let (m1, m2) = (a.mass, b.mass);
    let v1n = a.velocity.dot(n);
    let v2n = b.velocity.dot(n);
    let total = m1 + m2;

    let v1n_after = ((m1 - m2) * v1n + 2.0 * m2 * v2n) / total;
    let v2n_after = ((m2 - m1) * v2n + 2.0 * m1 * v1n) / total;

    a.velocity += (v1n_after - v1n) * n;
    b.velocity += (v2n_after - v2n) * n;
}

/// Detect and resolve every overlapping pair among `live`
///
/// `live` is expected in ascending index order. Entities that are not
/// collidable (bad radius or mass) or whose index is out of range are
/// ignored.
pub fn resolve_pairs(
    transforms: &[TransformComponent],
    physics: &mut [PhysicsComponent],
    live: &[Entity],
) -> PairOutcome {
    let mut outcome = PairOutcome::default();

    for (k, first) in live.iter().enumerate() {
        let i = first.index();
        let (Some(ti), Some(&pi)) = (transforms.get(i), physics.get(i)) else {
            continue;
        };
        if !pi.is_collidable() {
            continue;
        }

        for second in &live[k + 1..] {
            let j = second.index();
            let (Some(tj), Some(&pj)) = (transforms.get(j), physics.get(j)) else {
                continue;
            };
            if !pj.is_collidable() {
                continue;
            }

            let offset = ti.position - tj.position;
            let distance = offset.length();
            if distance >= pi.radius + pj.radius {
                continue;
            }

            if distance < DEGENERATE_DISTANCE {
                log::debug!("skipping coincident pair {} / {}", first, second);
                outcome.degenerate += 1;
                continue;
            }

            let normal = offset / distance;
            // Re-read: an earlier pair this frame may have changed either body.
            let mut a = physics[i];
            let mut b = physics[j];
            resolve_elastic(&mut a, &mut b, normal);
            physics[i] = a;
            physics[j] = b;

            log::trace!("resolved contact {} / {} at distance {:.4}", first, second, distance);
            outcome.contacts += 1;
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sphere(x: f64, vx: f64) -> (TransformComponent, PhysicsComponent) {
        (
            TransformComponent::at(DVec3::new(x, 0.0, 0.0)),
            PhysicsComponent::new(DVec3::new(vx, 0.0, 0.0), 1.0),
        )
    }

    fn split(
        spheres: Vec<(TransformComponent, PhysicsComponent)>,
    ) -> (Vec<TransformComponent>, Vec<PhysicsComponent>, Vec<Entity>) {
        let live = (0..spheres.len() as u32).map(|i| Entity::new(i, 0)).collect();
        let (t, p) = spheres.into_iter().unzip();
        (t, p, live)
    }

    #[test]
    fn test_overlap_predicate() {
        assert!(spheres_overlap(DVec3::ZERO, 1.0, DVec3::new(1.5, 0.0, 0.0), 1.0));
        assert!(!spheres_overlap(DVec3::ZERO, 1.0, DVec3::new(2.0, 0.0, 0.0), 1.0));
        assert!(!spheres_overlap(DVec3::ZERO, 1.0, DVec3::new(3.0, 0.0, 0.0), 1.0));
    }

    #[test]
    fn test_equal_mass_head_on_exchange() {
        let (t, mut p, live) = split(vec![sphere(-0.9, 2.0), sphere(0.9, -2.0)]);
        let outcome = resolve_pairs(&t, &mut p, &live);
        assert_eq!(outcome.contacts, 1);
        assert_eq!(p[0].velocity, DVec3::new(-2.0, 0.0, 0.0));
        assert_eq!(p[1].velocity, DVec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_separated_pair_untouched() {
        let (t, mut p, live) = split(vec![sphere(-1.0, 2.0), sphere(1.0, -2.0)]);
        let outcome = resolve_pairs(&t, &mut p, &live);
        assert_eq!(outcome, PairOutcome::default());
        assert_eq!(p[0].velocity.x, 2.0);
        assert_eq!(p[1].velocity.x, -2.0);
    }

    #[test]
    fn test_tangential_velocity_preserved() {
        let mut a = PhysicsComponent::new(DVec3::new(1.0, 5.0, -2.0), 1.0);
        let mut b = PhysicsComponent::new(DVec3::new(-1.0, 3.0, 7.0), 1.0);
        resolve_elastic(&mut a, &mut b, DVec3::X);
        assert_eq!(a.velocity, DVec3::new(-1.0, 5.0, -2.0));
        assert_eq!(b.velocity, DVec3::new(1.0, 3.0, 7.0));
    }

    #[test]
    fn test_unequal_mass_conserves_momentum_and_energy() {
        let mut a = PhysicsComponent::new(DVec3::new(3.0, 1.0, 0.0), 1.0).with_mass(2.0);
        let mut b = PhysicsComponent::new(DVec3::new(-1.0, 0.5, 2.0), 1.0).with_mass(5.0);
        let p0 = a.momentum() + b.momentum();
        let e0 = a.kinetic_energy() + b.kinetic_energy();

        let n = DVec3::new(1.0, 1.0, 0.0).normalize();
        resolve_elastic(&mut a, &mut b, -n);

        let p1 = a.momentum() + b.momentum();
        let e1 = a.kinetic_energy() + b.kinetic_energy();
        assert_relative_eq!(p0.x, p1.x, epsilon = 1e-12);
        assert_relative_eq!(p0.y, p1.y, epsilon = 1e-12);
        assert_relative_eq!(p0.z, p1.z, epsilon = 1e-12);
        assert_relative_eq!(e0, e1, epsilon = 1e-12);
    }

    #[test]
    fn test_coincident_centers_skipped() {
        let (t, mut p, live) = split(vec![sphere(0.0, 1.0), sphere(0.0, -1.0)]);
        let outcome = resolve_pairs(&t, &mut p, &live);
        assert_eq!(outcome.contacts, 0);
        assert_eq!(outcome.degenerate, 1);
        assert!(p[0].velocity.is_finite());
        assert_eq!(p[0].velocity.x, 1.0);
    }

    #[test]
    fn test_sequential_resolution_sees_updated_velocity() {
        // Three spheres in a row; 0 hits 1, then 1 (now moving) is tested against 2.
        let (t, mut p, live) = split(vec![sphere(-1.8, 1.0), sphere(0.0, 0.0), sphere(1.8, 0.0)]);
        let outcome = resolve_pairs(&t, &mut p, &live);
        assert_eq!(outcome.contacts, 2);
        assert_eq!(p[0].velocity.x, 0.0);
        assert_eq!(p[1].velocity.x, 0.0);
        assert_eq!(p[2].velocity.x, 1.0);
    }

    #[test]
    fn test_non_collidable_ignored() {
        let (t, mut p, live) = split(vec![sphere(0.0, 1.0), sphere(0.5, -1.0)]);
        p[1].radius = -1.0;
        assert_eq!(resolve_pairs(&t, &mut p, &live).contacts, 0);
        assert_eq!(p[0].velocity.x, 1.0);
    }
}
