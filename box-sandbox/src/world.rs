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
//! World management
//!
//! The World owns every container and fans frame updates and render
//! passes out to them in insertion order. Containers never interact.
//!
//! Spawn requests go to the first container. A world with no containers
//! keeps spheres in a loose store instead: they move with their velocity
//! but no walls and no collisions apply to them. Loose spheres stay in
//! that store after containers are added.
//!
//! Every handle carries the tag of the store that issued it: 0 for the
//! loose store, `index + 1` for the container at `index`. Commands are
//! dispatched on that tag, so a handle only ever reaches its own sphere.

use crate::config::SandboxConfig;
use crate::container::{Appearance, Container, SphereState};
use crate::ecs::{ComponentStore, Entity, FrameStats, MAX_ENTITIES};
use crate::error::{Result, SandboxError};
use crate::render::{GeometryFactory, NullGeometry, RenderSink};
use crate::scripting::SandboxCommands;
use glam::DVec3;

const LOOSE_STORE: u32 = 0;

/// The main sandbox container
///
/// # Examples
///
/// ```
/// use box_sandbox::World;
/// use box_sandbox::scripting::SandboxCommands;
/// use glam::DVec3;
///
/// let mut world = World::new();
/// world.add_container(DVec3::ZERO, DVec3::splat(10.0));
/// let ball = world.spawn(DVec3::new(4.6, 0.0, 0.0), DVec3::X, 1.0, DVec3::ONE).unwrap();
///
/// world.update(1.0);
/// let x = world.container(0).unwrap().store().transform(ball).unwrap().position.x;
/// assert_eq!(x, 4.0);
/// ```
pub struct World {
    containers: Vec<Container>,
    loose: Container,
    geometry: Box<dyn GeometryFactory>,
    max_entities: usize,
}

impl World {
    /// Create an empty world with headless geometry
    pub fn new() -> Self {
        Self::with_geometry(Box::new(NullGeometry::new()))
    }

    /// Create an empty world that builds sphere geometry with `geometry`
    pub fn with_geometry(geometry: Box<dyn GeometryFactory>) -> Self {
        Self::empty(geometry, MAX_ENTITIES)
    }

    fn empty(geometry: Box<dyn GeometryFactory>, max_entities: usize) -> Self {
        World {
            containers: Vec::new(),
            loose: Container::unbounded(max_entities, LOOSE_STORE),
            geometry,
            max_entities,
        }
    }

    /// Build a world from a validated configuration
    pub fn from_config(config: &SandboxConfig) -> Result<Self> {
        Self::from_config_with_geometry(config, Box::new(NullGeometry::new()))
    }

    /// Build a world from a configuration using a custom geometry factory
    pub fn from_config_with_geometry(
        config: &SandboxConfig,
        geometry: Box<dyn GeometryFactory>,
    ) -> Result<Self> {
        config.validate()?;

        let mut world = Self::empty(geometry, config.max_entities);

        for container in &config.containers {
            let index = world.add_container(container.position(), container.size());
            if let Some(particles) = &container.particles {
                world.containers[index].attach_particles(particles.clone());
            }
        }

        for sphere in &config.spheres {
            let entity = world.spawn(
                DVec3::from_array(sphere.position),
                DVec3::from_array(sphere.velocity),
                sphere.radius,
                DVec3::from_array(sphere.color),
            )?;
            world.set_mass(entity, sphere.mass);
        }

        log::info!(
            "world built with {} container(s) and {} sphere(s)",
            world.containers.len(),
            world.entity_count()
        );
        Ok(world)
    }

    /// Append a container and return its index
    pub fn add_container(&mut self, position: DVec3, size: DVec3) -> usize {
        let index = self.containers.len();
        let store = index as u32 + 1;
        self.containers
            .push(Container::tagged(position, size, self.max_entities, store));
        index
    }

    /// Spawn a sphere into a specific container
    pub fn spawn_in(
        &mut self,
        container: usize,
        position: DVec3,
        velocity: DVec3,
        radius: f64,
        color: DVec3,
    ) -> Result<Entity> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SandboxError::InvalidRadius(radius));
        }
        let Some(target) = self.containers.get_mut(container) else {
            return Err(SandboxError::UnknownContainer(container));
        };
        let appearance = Appearance {
            color,
            geometry: self.geometry.sphere(radius),
        };
        target.add_entity(position, velocity, radius, appearance)
    }

    fn spawn_loose(
        &mut self,
        position: DVec3,
        velocity: DVec3,
        radius: f64,
        color: DVec3,
    ) -> Result<Entity> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SandboxError::InvalidRadius(radius));
        }
        let appearance = Appearance {
            color,
            geometry: self.geometry.sphere(radius),
        };
        let entity = self.loose.add_entity(position, velocity, radius, appearance)?;
        log::debug!("{} created without a container; no walls or collisions apply", entity);
        Ok(entity)
    }

    /// Advance every container by one frame, in insertion order
    ///
    /// Loose spheres are integrated last.
    pub fn update(&mut self, dt: f64) -> FrameStats {
        let mut total = FrameStats::default();
        for container in &mut self.containers {
            total += container.update(dt);
        }

        if !self.loose.is_empty() {
            total += self.loose.update(dt);
        }

        log::debug!(
            "frame: {} entities, {} wall hits, {} contacts, {} degenerate",
            total.entities,
            total.wall_hits,
            total.contacts,
            total.degenerate_pairs
        );
        total
    }

    /// Emit draw items for every container, in insertion order
    ///
    /// Loose spheres are drawn last.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        for (index, container) in self.containers.iter().enumerate() {
            sink.begin_container(index);
            container.render(sink);
        }
        self.loose.render(sink);
    }

    /// Containers in insertion order
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// Container at `index`
    pub fn container(&self, index: usize) -> Option<&Container> {
        self.containers.get(index)
    }

    /// Mutable container at `index`
    pub fn container_mut(&mut self, index: usize) -> Option<&mut Container> {
        self.containers.get_mut(index)
    }

    /// Whether spawns currently land in the loose, container-less store
    pub fn is_degraded(&self) -> bool {
        self.containers.is_empty()
    }

    /// Store holding spheres created while no container existed
    pub fn loose_store(&self) -> &ComponentStore {
        self.loose.store()
    }

    /// Spheres created while no container existed
    pub fn loose_entities(&self) -> &[Entity] {
        self.loose.entities()
    }

    /// Kinetic energy summed over every container and the loose store
    pub fn kinetic_energy(&self) -> f64 {
        self.containers
            .iter()
            .chain(std::iter::once(&self.loose))
            .map(|c| crate::integration::kinetic_energy(c.store(), c.entities()))
            .sum()
    }

    /// Store that issued `entity`
    fn owner(&self, entity: Entity) -> Option<&Container> {
        match entity.store() {
            LOOSE_STORE => Some(&self.loose),
            tag => self.containers.get(tag as usize - 1),
        }
    }

    fn owner_mut(&mut self, entity: Entity, action: &str) -> Option<&mut Container> {
        let owner = match entity.store() {
            LOOSE_STORE => Some(&mut self.loose),
            tag => self.containers.get_mut(tag as usize - 1),
        };
        if owner.is_none() {
            log::warn!("ignoring {} for {}: no store issued it", action, entity);
        }
        owner
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl SandboxCommands for World {
    fn spawn(
        &mut self,
        position: DVec3,
        velocity: DVec3,
        radius: f64,
        color: DVec3,
    ) -> Result<Entity> {
        if self.containers.is_empty() {
            self.spawn_loose(position, velocity, radius, color)
        } else {
            self.spawn_in(0, position, velocity, radius, color)
        }
    }

    fn destroy(&mut self, entity: Entity) -> bool {
        self.owner_mut(entity, "destroy")
            .is_some_and(|c| c.remove_entity(entity))
    }

    fn set_position(&mut self, entity: Entity, position: DVec3) -> bool {
        self.owner_mut(entity, "set_position")
            .is_some_and(|c| c.set_position(entity, position))
    }

    fn set_velocity(&mut self, entity: Entity, velocity: DVec3) -> bool {
        self.owner_mut(entity, "set_velocity")
            .is_some_and(|c| c.set_velocity(entity, velocity))
    }

    fn set_color(&mut self, entity: Entity, color: DVec3) -> bool {
        self.owner_mut(entity, "set_color")
            .is_some_and(|c| c.set_color(entity, color))
    }

    fn set_mass(&mut self, entity: Entity, mass: f64) -> bool {
        self.owner_mut(entity, "set_mass")
            .is_some_and(|c| c.set_mass(entity, mass))
    }

    fn sphere(&self, entity: Entity) -> Result<SphereState> {
        self.owner(entity)
            .ok_or(SandboxError::InvalidEntity(entity))?
            .sphere(entity)
    }

    fn entity_count(&self) -> usize {
        self.containers.iter().map(Container::len).sum::<usize>() + self.loose.len()
    }
}
