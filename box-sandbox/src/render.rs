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
//! Rendering seam
//!
//! The core never talks to a graphics API. Geometry creation goes through
//! a [`GeometryFactory`] at spawn time, and drawing is a read-only walk of
//! the component stores that emits items into a [`RenderSink`].

use crate::ecs::Entity;
use glam::DVec3;

/// Opaque handle to GPU geometry owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(pub u64);

impl GeometryHandle {
    /// Placeholder for slots that have no geometry yet
    pub const NONE: GeometryHandle = GeometryHandle(u64::MAX);
}

/// Geometry created for one sphere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SphereGeometry {
    /// Drawable handle
    pub handle: GeometryHandle,
    /// Number of vertices the drawable contains
    pub vertex_count: u32,
}

/// Produces drawable sphere geometry for a given radius
pub trait GeometryFactory {
    /// Build (or look up) geometry for a sphere of `radius`
    fn sphere(&mut self, radius: f64) -> SphereGeometry;
}

/// Headless geometry factory that hands out sequential handles
///
/// Reports the vertex count of a once-subdivided icosphere so callers see
/// realistic numbers without any GPU work.
#[derive(Debug, Default)]
pub struct NullGeometry {
    next_handle: u64,
}

impl NullGeometry {
    /// Vertex count reported for every sphere
    pub const VERTEX_COUNT: u32 = 42;

    /// Create a new factory
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles created so far
    pub fn created(&self) -> u64 {
        self.next_handle
    }
}

impl GeometryFactory for NullGeometry {
    fn sphere(&mut self, _radius: f64) -> SphereGeometry {
        let handle = GeometryHandle(self.next_handle);
        self.next_handle += 1;
        SphereGeometry {
            handle,
            vertex_count: Self::VERTEX_COUNT,
        }
    }
}

/// One sphere draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawSphere {
    /// Entity being drawn
    pub entity: Entity,
    /// World-space center
    pub position: DVec3,
    /// Euler rotation
    pub rotation: DVec3,
    /// Per-axis scale
    pub scale: DVec3,
    /// Sphere radius
    pub radius: f64,
    /// RGB color
    pub color: DVec3,
    /// Geometry to draw
    pub geometry: GeometryHandle,
    /// Vertex count of `geometry`
    pub vertex_count: u32,
}

/// One particle point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParticle {
    /// World-space position
    pub position: DVec3,
    /// RGB color
    pub color: DVec3,
}

/// Receives draw items during a render pass
pub trait RenderSink {
    /// Called once per container, before its items
    fn begin_container(&mut self, _index: usize) {}

    /// Draw one sphere
    fn draw_sphere(&mut self, item: &DrawSphere);

    /// Draw one particle
    fn draw_particle(&mut self, item: &DrawParticle);
}

/// Sink that records every item, for tests and headless inspection
#[derive(Debug, Default)]
pub struct DrawList {
    /// Spheres in submission order
    pub spheres: Vec<DrawSphere>,
    /// Particles in submission order
    pub particles: Vec<DrawParticle>,
    /// Container indices in the order they began
    pub containers: Vec<usize>,
}

impl DrawList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all recorded items
    pub fn clear(&mut self) {
        self.spheres.clear();
        self.particles.clear();
        self.containers.clear();
    }
}

impl RenderSink for DrawList {
    fn begin_container(&mut self, index: usize) {
        self.containers.push(index);
    }

    fn draw_sphere(&mut self, item: &DrawSphere) {
        self.spheres.push(*item);
    }

    fn draw_particle(&mut self, item: &DrawParticle) {
        self.particles.push(*item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_geometry_sequential_handles() {
        let mut factory = NullGeometry::new();
        let a = factory.sphere(1.0);
        let b = factory.sphere(0.5);
        assert_eq!(a.handle, GeometryHandle(0));
        assert_eq!(b.handle, GeometryHandle(1));
        assert_eq!(a.vertex_count, NullGeometry::VERTEX_COUNT);
        assert_eq!(factory.created(), 2);
    }

    #[test]
    fn test_draw_list_records() {
        let mut list = DrawList::new();
        list.begin_container(0);
        list.draw_particle(&DrawParticle { position: DVec3::ZERO, color: DVec3::ONE });
        assert_eq!(list.containers, vec![0]);
        assert_eq!(list.particles.len(), 1);
        list.clear();
        assert!(list.particles.is_empty());
    }
}
