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
//! World-bounds reflection
//!
//! Each axis is corrected independently and in order x, y, z. A sphere
//! approaching a corner diagonally can therefore be corrected on one axis
//! and remain slightly outside on another until a later frame.

use crate::ecs::components::{PhysicsComponent, TransformComponent, WorldBoundsComponent};
use crate::ecs::Entity;

/// Push spheres back inside `bounds` and point their velocity inward
///
/// For every live entity and every axis: if the sphere crosses the min
/// face it is placed tangent to that face and its velocity on the axis
/// becomes `|v|`; crossing the max face does the mirror image. Returns the
/// number of axis corrections applied.
pub fn reflect_off_bounds(
    transforms: &mut [TransformComponent],
    physics: &mut [PhysicsComponent],
    bounds: &WorldBoundsComponent,
    live: &[Entity],
) -> usize {
    let mut corrections = 0;

    for entity in live {
        let i = entity.index();
        let (Some(transform), Some(body)) = (transforms.get_mut(i), physics.get_mut(i)) else {
            continue;
        };

        if !body.is_collidable() {
            log::warn!("skipping bounds check for {} with radius {}", entity, body.radius);
            continue;
        }

        let radius = body.radius;
        for axis in 0..3 {
            let low = bounds.min[axis] + radius;
            let high = bounds.max[axis] - radius;

            if transform.position[axis] < low {
                transform.position[axis] = low;
                body.velocity[axis] = body.velocity[axis].abs();
                corrections += 1;
            } else if transform.position[axis] > high {
                transform.position[axis] = high;
                body.velocity[axis] = -body.velocity[axis].abs();
                corrections += 1;
            }
        }
    }

    corrections
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn cube() -> WorldBoundsComponent {
        WorldBoundsComponent::from_center_size(DVec3::ZERO, DVec3::splat(10.0))
    }

    fn one(position: DVec3, velocity: DVec3) -> (Vec<TransformComponent>, Vec<PhysicsComponent>) {
        (
            vec![TransformComponent::at(position)],
            vec![PhysicsComponent::new(velocity, 1.0)],
        )
    }

    #[test]
    fn test_inside_is_untouched() {
        let (mut t, mut p) = one(DVec3::new(1.0, 2.0, 3.0), DVec3::new(1.0, -1.0, 1.0));
        let hits = reflect_off_bounds(&mut t, &mut p, &cube(), &[Entity::new(0, 0)]);
        assert_eq!(hits, 0);
        assert_eq!(t[0].position, DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(p[0].velocity, DVec3::new(1.0, -1.0, 1.0));
    }

    #[test]
    fn test_floor_reflection() {
        let (mut t, mut p) =
            one(DVec3::new(0.0, -5.0 - 1.0 - 0.01, 0.0), DVec3::new(0.0, -3.0, 0.0));
        let hits = reflect_off_bounds(&mut t, &mut p, &cube(), &[Entity::new(0, 0)]);
        assert_eq!(hits, 1);
        assert_eq!(t[0].position.y, -4.0);
        assert_eq!(p[0].velocity.y, 3.0);
    }

    #[test]
    fn test_max_face_reflection() {
        let (mut t, mut p) = one(DVec3::new(5.6, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.0));
        reflect_off_bounds(&mut t, &mut p, &cube(), &[Entity::new(0, 0)]);
        assert_eq!(t[0].position.x, 4.0);
        assert_eq!(p[0].velocity.x, -1.0);
    }

    #[test]
    fn test_velocity_already_inward_stays_inward() {
        // Outside the min face but already moving back in.
        let (mut t, mut p) = one(DVec3::new(-4.5, 0.0, 0.0), DVec3::new(2.0, 0.0, 0.0));
        reflect_off_bounds(&mut t, &mut p, &cube(), &[Entity::new(0, 0)]);
        assert_eq!(t[0].position.x, -4.0);
        assert_eq!(p[0].velocity.x, 2.0);
    }

    #[test]
    fn test_corner_corrects_each_axis() {
        let (mut t, mut p) = one(DVec3::new(4.8, 4.9, 0.0), DVec3::new(1.0, 1.0, 0.0));
        let hits = reflect_off_bounds(&mut t, &mut p, &cube(), &[Entity::new(0, 0)]);
        assert_eq!(hits, 2);
        assert_eq!(t[0].position, DVec3::new(4.0, 4.0, 0.0));
        assert_eq!(p[0].velocity, DVec3::new(-1.0, -1.0, 0.0));
    }

    #[test]
    fn test_degenerate_radius_skipped() {
        let mut t = vec![TransformComponent::at(DVec3::splat(100.0))];
        let mut p = vec![PhysicsComponent::new(DVec3::X, 0.0)];
        let hits = reflect_off_bounds(&mut t, &mut p, &cube(), &[Entity::new(0, 0)]);
        assert_eq!(hits, 0);
        assert_eq!(t[0].position, DVec3::splat(100.0));
    }
}
