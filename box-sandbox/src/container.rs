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
//! Container volumes
//!
//! A [`Container`] is an isolated simulation domain: an axis-aligned box,
//! the spheres inside it, and the pipeline that steps them. Each frame runs
//! integration, then wall reflection, then pairwise collision, then any
//! caller-supplied systems, and finally the particle effect.

use crate::collision::{InterEntitySystem, WorldBoundsSystem};
use crate::ecs::components::{
    PhysicsComponent, RenderComponent, TransformComponent, WorldBoundsComponent,
};
use crate::ecs::scheduler::{stages, Scheduler, StageId};
use crate::ecs::{
    ComponentStore, Entity, EntityManager, FrameStats, StepContext, System, MAX_ENTITIES,
};
use crate::error::{Result, SandboxError};
use crate::integration::{validate_timestep, PhysicsSystem};
use crate::particles::{ParticleConfig, ParticleEmitter};
use crate::render::{DrawSphere, RenderSink, SphereGeometry};
use glam::DVec3;

/// How a new sphere looks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    /// RGB color
    pub color: DVec3,
    /// Geometry produced by the geometry factory
    pub geometry: SphereGeometry,
}

/// Snapshot of one sphere's state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereState {
    /// Center
    pub position: DVec3,
    /// Velocity
    pub velocity: DVec3,
    /// Collision radius
    pub radius: f64,
    /// Mass
    pub mass: f64,
    /// RGB color
    pub color: DVec3,
}

impl SphereState {
    pub(crate) fn read(store: &ComponentStore, entity: Entity) -> Option<Self> {
        let transform = store.transform(entity)?;
        let body = store.physics(entity)?;
        let render = store.render(entity)?;
        Some(SphereState {
            position: transform.position,
            velocity: body.velocity,
            radius: body.radius,
            mass: body.mass,
            color: render.color,
        })
    }
}

/// A box-shaped simulation domain
pub struct Container {
    position: DVec3,
    size: DVec3,
    entities: EntityManager,
    store: ComponentStore,
    live: Vec<Entity>,
    scheduler: Scheduler,
    particles: Option<ParticleEmitter>,
}

impl Container {
    /// Create a container centered at `position` with edge lengths `size`
    pub fn new(position: DVec3, size: DVec3) -> Self {
        Self::with_capacity(position, size, MAX_ENTITIES)
    }

    /// Create a container that holds at most `max_entities` spheres
    pub fn with_capacity(position: DVec3, size: DVec3, max_entities: usize) -> Self {
        Self::tagged(position, size, max_entities, 0)
    }

    /// Create a container whose handles carry the store tag `store`
    pub(crate) fn tagged(position: DVec3, size: DVec3, max_entities: usize, store: u32) -> Self {
        let bounds = WorldBoundsComponent::from_center_size(position, size);

        let mut scheduler = Scheduler::new();
        scheduler.add_system(PhysicsSystem::new(), stages::INTEGRATION);
        scheduler.add_system(WorldBoundsSystem, WorldBoundsSystem::STAGE);
        scheduler.add_system(InterEntitySystem, InterEntitySystem::STAGE);

        log::info!(
            "container created at {:?} spanning {:?}..{:?}",
            position,
            bounds.min,
            bounds.max
        );

        Container {
            position,
            size,
            entities: EntityManager::for_store(store, max_entities),
            store: ComponentStore::with_bounds(bounds),
            live: Vec::new(),
            scheduler,
            particles: None,
        }
    }

    /// Create a wall-less store that only integrates
    ///
    /// Spheres move with their velocity but never bounce or collide.
    pub(crate) fn unbounded(max_entities: usize, store: u32) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.add_system(PhysicsSystem::new(), stages::INTEGRATION);

        let bounds = WorldBoundsComponent::default();
        Container {
            position: DVec3::ZERO,
            size: bounds.size(),
            entities: EntityManager::for_store(store, max_entities),
            store: ComponentStore::with_bounds(bounds),
            live: Vec::new(),
            scheduler,
            particles: None,
        }
    }

    /// Spawn a sphere
    ///
    /// Fails with [`SandboxError::InvalidRadius`] for non-positive or
    /// non-finite radii and with [`SandboxError::CapacityExceeded`] when
    /// the container is full; neither failure changes any state.
    pub fn add_entity(
        &mut self,
        position: DVec3,
        velocity: DVec3,
        radius: f64,
        appearance: Appearance,
    ) -> Result<Entity> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SandboxError::InvalidRadius(radius));
        }

        let entity = self.entities.create()?;
        self.store.resize(self.entities.slot_count());
        self.store.insert(
            entity,
            TransformComponent::at(position),
            PhysicsComponent::new(velocity, radius),
            RenderComponent {
                geometry: appearance.geometry.handle,
                color: appearance.color,
                radius,
                vertex_count: appearance.geometry.vertex_count,
            },
        );

        let slot = self.live.partition_point(|e| e.index() < entity.index());
        self.live.insert(slot, entity);

        if !self.store.bounds().contains_sphere(position, radius) {
            log::debug!("{} spawned outside its container; walls will push it in", entity);
        }
        Ok(entity)
    }

    /// Destroy a sphere
    ///
    /// Its slot keeps stale data until reused. Returns `false` for dead or
    /// stale handles.
    pub fn remove_entity(&mut self, entity: Entity) -> bool {
        if !self.entities.destroy(entity) {
            return false;
        }
        if let Ok(slot) = self.live.binary_search(&entity) {
            self.live.remove(slot);
        }
        true
    }

    /// Whether `entity` is a live sphere in this container
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    fn accepts(&self, entity: Entity, action: &str) -> bool {
        if self.contains(entity) {
            return true;
        }
        log::warn!("ignoring {} for dead, stale, or foreign {}", action, entity);
        false
    }

    /// Read a live sphere's state
    ///
    /// Fails with [`SandboxError::InvalidEntity`] for dead or stale handles.
    pub fn sphere(&self, entity: Entity) -> Result<SphereState> {
        if !self.contains(entity) {
            return Err(SandboxError::InvalidEntity(entity));
        }
        SphereState::read(&self.store, entity).ok_or(SandboxError::InvalidEntity(entity))
    }

    /// Append a system to the frame pipeline
    pub fn add_system<S: System + 'static>(&mut self, system: S, stage: StageId) {
        self.scheduler.add_system(system, stage);
    }

    /// Attach a falling particle effect filling this container
    pub fn attach_particles(&mut self, config: ParticleConfig) {
        self.particles = Some(ParticleEmitter::new(config, *self.store.bounds()));
    }

    /// Advance the container by one frame
    pub fn update(&mut self, dt: f64) -> FrameStats {
        if let Err(problem) = validate_timestep(dt) {
            log::warn!("{}", problem);
        }

        let mut stats = FrameStats::default();
        let mut ctx = StepContext {
            store: &mut self.store,
            live: &self.live,
            dt,
            stats: &mut stats,
        };
        self.scheduler.run(&mut ctx);

        if let Some(particles) = self.particles.as_mut() {
            particles.update(dt);
        }

        log::trace!("container step: {:?}", stats);
        stats
    }

    /// Emit draw items for every live sphere and particle
    pub fn render(&self, sink: &mut dyn RenderSink) {
        for &entity in &self.live {
            let (Some(transform), Some(render)) =
                (self.store.transform(entity), self.store.render(entity))
            else {
                continue;
            };
            sink.draw_sphere(&DrawSphere {
                entity,
                position: transform.position,
                rotation: transform.rotation,
                scale: transform.scale,
                radius: render.radius,
                color: render.color,
                geometry: render.geometry,
                vertex_count: render.vertex_count,
            });
        }

        if let Some(particles) = &self.particles {
            particles.render(sink);
        }
    }

    /// Move a live sphere; `false` for dead or stale handles
    pub fn set_position(&mut self, entity: Entity, position: DVec3) -> bool {
        if !self.accepts(entity, "set_position") {
            return false;
        }
        match self.store.transform_mut(entity) {
            Some(transform) => {
                transform.position = position;
                true
            }
            None => false,
        }
    }

    /// Change a live sphere's velocity; `false` for dead or stale handles
    pub fn set_velocity(&mut self, entity: Entity, velocity: DVec3) -> bool {
        if !self.accepts(entity, "set_velocity") {
            return false;
        }
        match self.store.physics_mut(entity) {
            Some(body) => {
                body.velocity = velocity;
                true
            }
            None => false,
        }
    }

    /// Change a live sphere's mass; `false` for dead or stale handles
    pub fn set_mass(&mut self, entity: Entity, mass: f64) -> bool {
        if !self.accepts(entity, "set_mass") {
            return false;
        }
        match self.store.physics_mut(entity) {
            Some(body) => {
                body.mass = mass;
                true
            }
            None => false,
        }
    }

    /// Change a live sphere's color; `false` for dead or stale handles
    pub fn set_color(&mut self, entity: Entity, color: DVec3) -> bool {
        if !self.accepts(entity, "set_color") {
            return false;
        }
        match self.store.render_mut(entity) {
            Some(render) => {
                render.color = color;
                true
            }
            None => false,
        }
    }

    /// Center of the box
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Edge lengths of the box
    pub fn size(&self) -> DVec3 {
        self.size
    }

    /// Bounds derived from position and size
    pub fn bounds(&self) -> &WorldBoundsComponent {
        self.store.bounds()
    }

    /// Live spheres in ascending index order
    pub fn entities(&self) -> &[Entity] {
        &self.live
    }

    /// Number of live spheres
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Check if the container has no live spheres
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Read-only access to the component store
    pub fn store(&self) -> &ComponentStore {
        &self.store
    }

    /// The attached particle effect, if any
    pub fn particles(&self) -> Option<&ParticleEmitter> {
        self.particles.as_ref()
    }

    /// Names of the systems run each frame, in order
    pub fn pipeline(&self) -> Vec<&str> {
        self.scheduler.system_names()
    }
}
