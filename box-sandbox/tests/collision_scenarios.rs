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
//! Frame-level collision scenarios
//!
//! Drives whole containers through `update` and checks the observable
//! result of integration, wall reflection, and pairwise resolution.

use approx::assert_relative_eq;
use box_sandbox::collision::CollisionSystem;
use box_sandbox::ecs::components::WorldBoundsComponent;
use box_sandbox::ecs::{ComponentStore, Entity};
use box_sandbox::render::{GeometryHandle, SphereGeometry};
use box_sandbox::{Appearance, Container};
use glam::DVec3;

fn appearance() -> Appearance {
    Appearance {
        color: DVec3::new(0.2, 0.4, 0.8),
        geometry: SphereGeometry {
            handle: GeometryHandle(1),
            vertex_count: 42,
        },
    }
}

fn cube() -> Container {
    Container::new(DVec3::ZERO, DVec3::splat(10.0))
}

#[test]
fn test_wall_scenario_clamps_and_flips() {
    let mut container = cube();
    let e = container
        .add_entity(DVec3::new(4.6, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.0), 1.0, appearance())
        .unwrap();

    container.update(1.0);

    let state = container.sphere(e).unwrap();
    assert_eq!(state.position.x, 4.0);
    assert_eq!(state.velocity.x, -1.0);
}

#[test]
fn test_floor_reflection_after_overshoot() {
    let mut store = ComponentStore::with_bounds(WorldBoundsComponent::from_center_size(
        DVec3::ZERO,
        DVec3::splat(10.0),
    ));
    store.resize(1);
    let e = Entity::new(0, 0);
    let epsilon = 1e-3;
    store.transform_mut(e).unwrap().position = DVec3::new(0.0, -5.0 - 1.0 - epsilon, 0.0);
    store.physics_mut(e).unwrap().velocity = DVec3::new(0.0, -2.0, 0.0);

    CollisionSystem::update_world_bound_collisions(&mut store, &[e]);

    assert_eq!(store.transform(e).unwrap().position.y, -4.0);
    assert!(store.physics(e).unwrap().velocity.y >= 0.0);
}

#[test]
fn test_sphere_bounces_between_walls() {
    let mut container = Container::new(DVec3::ZERO, DVec3::new(10.0, 10.0, 10.0));
    let e = container
        .add_entity(DVec3::ZERO, DVec3::new(3.0, 0.0, 0.0), 1.0, appearance())
        .unwrap();

    let mut saw_negative = false;
    for _ in 0..600 {
        container.update(1.0 / 60.0);
        let state = container.sphere(e).unwrap();
        assert!(state.position.x <= 4.0 + 1e-12 && state.position.x >= -4.0 - 1e-12);
        assert_relative_eq!(state.velocity.x.abs(), 3.0);
        saw_negative |= state.velocity.x < 0.0;
    }
    assert!(saw_negative);
}

#[test]
fn test_head_on_equal_mass_exchange() {
    let mut container = cube();
    let a = container
        .add_entity(DVec3::new(-1.5, 0.0, 0.0), DVec3::new(2.0, 0.0, 0.0), 1.0, appearance())
        .unwrap();
    let b = container
        .add_entity(DVec3::new(1.5, 0.0, 0.0), DVec3::new(-2.0, 0.0, 0.0), 1.0, appearance())
        .unwrap();

    // After 0.25s the centers are 2.0 apart (touching, no contact yet).
    let stats = container.update(0.25);
    assert_eq!(stats.contacts, 0);
    assert_eq!(container.sphere(a).unwrap().velocity.x, 2.0);

    // Next step they interpenetrate and swap.
    let stats = container.update(0.1);
    assert_eq!(stats.contacts, 1);
    assert_relative_eq!(container.sphere(a).unwrap().velocity.x, -2.0);
    assert_relative_eq!(container.sphere(b).unwrap().velocity.x, 2.0);
}

#[test]
fn test_separated_spheres_keep_velocity() {
    let mut container = cube();
    let velocities = [
        DVec3::new(0.1, 0.2, 0.0),
        DVec3::new(-0.3, 0.0, 0.1),
        DVec3::new(0.0, 0.0, -0.2),
    ];
    let positions = [
        DVec3::new(-3.0, 0.0, 0.0),
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(3.0, 0.0, 0.0),
    ];
    let entities: Vec<Entity> = positions
        .iter()
        .zip(velocities.iter())
        .map(|(&p, &v)| container.add_entity(p, v, 1.0, appearance()).unwrap())
        .collect();

    let stats = container.update(0.1);

    assert_eq!(stats.contacts, 0);
    for (e, v) in entities.iter().zip(velocities.iter()) {
        assert_eq!(container.sphere(*e).unwrap().velocity, *v);
    }
}

#[test]
fn test_oblique_contact_keeps_tangential_motion() {
    let mut container = cube();
    let a = container
        .add_entity(DVec3::new(0.0, 0.0, 0.0), DVec3::new(1.0, 1.0, 0.0), 1.0, appearance())
        .unwrap();
    let b = container
        .add_entity(DVec3::new(1.5, 0.0, 0.0), DVec3::ZERO, 1.0, appearance())
        .unwrap();

    container.update(0.0);

    // Normal is along x: the x motion transfers, the y motion stays with `a`.
    let va = container.sphere(a).unwrap().velocity;
    let vb = container.sphere(b).unwrap().velocity;
    assert_relative_eq!(va.x, 0.0);
    assert_relative_eq!(va.y, 1.0);
    assert_relative_eq!(vb.x, 1.0);
    assert_relative_eq!(vb.y, 0.0);
}

#[test]
fn test_heavy_sphere_barely_slows() {
    let mut container = cube();
    let heavy = container
        .add_entity(DVec3::new(-0.9, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.0), 1.0, appearance())
        .unwrap();
    let light = container
        .add_entity(DVec3::new(0.9, 0.0, 0.0), DVec3::ZERO, 1.0, appearance())
        .unwrap();
    container.set_mass(heavy, 1000.0);

    container.update(0.0);

    let vh = container.sphere(heavy).unwrap().velocity.x;
    let vl = container.sphere(light).unwrap().velocity.x;
    assert_relative_eq!(vh, 999.0 / 1001.0, epsilon = 1e-12);
    assert_relative_eq!(vl, 2000.0 / 1001.0, epsilon = 1e-12);
}

#[test]
fn test_coincident_spheres_do_not_produce_nan() {
    let mut container = cube();
    let a = container
        .add_entity(DVec3::ZERO, DVec3::ZERO, 1.0, appearance())
        .unwrap();
    let b = container
        .add_entity(DVec3::ZERO, DVec3::ZERO, 1.0, appearance())
        .unwrap();

    let stats = container.update(1.0 / 60.0);

    assert_eq!(stats.degenerate_pairs, 1);
    assert_eq!(stats.contacts, 0);
    assert!(container.sphere(a).unwrap().velocity.is_finite());
    assert!(container.sphere(b).unwrap().velocity.is_finite());
}

#[test]
fn test_corner_approach_corrected_per_axis() {
    let mut container = cube();
    let e = container
        .add_entity(DVec3::new(3.9, 3.9, 0.0), DVec3::new(1.0, 1.0, 0.0), 1.0, appearance())
        .unwrap();

    let stats = container.update(0.5);

    let state = container.sphere(e).unwrap();
    assert_eq!(stats.wall_hits, 2);
    assert_eq!(state.position, DVec3::new(4.0, 4.0, 0.0));
    assert_eq!(state.velocity, DVec3::new(-1.0, -1.0, 0.0));
}

#[test]
fn test_offset_container_uses_its_own_bounds() {
    let mut container = Container::new(DVec3::new(100.0, 0.0, 0.0), DVec3::splat(4.0));
    let e = container
        .add_entity(DVec3::new(100.0, 0.0, 0.0), DVec3::new(-10.0, 0.0, 0.0), 0.5, appearance())
        .unwrap();

    container.update(1.0);

    let state = container.sphere(e).unwrap();
    assert_eq!(state.position.x, 98.5);
    assert_eq!(state.velocity.x, 10.0);
}
