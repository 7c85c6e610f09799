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
//! Sandbox components
//!
//! Plain data records stored per entity slot. Physics and collision
//! passes read and write [`TransformComponent`] and [`PhysicsComponent`];
//! [`RenderComponent`] is written once at spawn and only read afterwards.

use crate::ecs::Component;
use crate::render::GeometryHandle;
use glam::DVec3;

/// Spatial placement of an entity
///
/// Rotation is carried for the renderer and ignored by physics.
///
/// # Examples
///
/// ```
/// use box_sandbox::ecs::components::TransformComponent;
/// use glam::DVec3;
///
/// let t = TransformComponent::at(DVec3::new(1.0, 2.0, 3.0));
/// assert_eq!(t.scale, DVec3::ONE);
/// assert!(t.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformComponent {
    /// World-space position
    pub position: DVec3,
    /// Euler rotation in radians (render only)
    pub rotation: DVec3,
    /// Per-axis scale
    pub scale: DVec3,
}

impl TransformComponent {
    /// Create a transform at `position` with no rotation and unit scale
    pub fn at(position: DVec3) -> Self {
        TransformComponent {
            position,
            ..Default::default()
        }
    }

    /// Check if all fields are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        TransformComponent {
            position: DVec3::ZERO,
            rotation: DVec3::ZERO,
            scale: DVec3::ONE,
        }
    }
}

/// Translational physics state of a sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsComponent {
    /// Velocity in units per second
    pub velocity: DVec3,
    /// Mass (default 1)
    pub mass: f64,
    /// Collision radius (default 1)
    pub radius: f64,
}

impl PhysicsComponent {
    /// Create a unit-mass body with the given velocity and radius
    pub fn new(velocity: DVec3, radius: f64) -> Self {
        PhysicsComponent {
            velocity,
            mass: 1.0,
            radius,
        }
    }

    /// Builder-style mass override
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Whether this body can take part in collision passes
    ///
    /// Requires a finite positive radius and a finite positive mass.
    pub fn is_collidable(&self) -> bool {
        self.radius.is_finite() && self.radius > 0.0 && self.mass.is_finite() && self.mass > 0.0
    }

    /// Kinetic energy 0.5 * m * |v|²
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Linear momentum m * v
    pub fn momentum(&self) -> DVec3 {
        self.velocity * self.mass
    }
}

impl Component for PhysicsComponent {}

impl Default for PhysicsComponent {
    fn default() -> Self {
        PhysicsComponent {
            velocity: DVec3::ZERO,
            mass: 1.0,
            radius: 1.0,
        }
    }
}

/// Visual representation handed to the renderer
///
/// The geometry handle and vertex count come from the geometry factory
/// and are passed through without interpretation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderComponent {
    /// Opaque drawable produced by the geometry factory
    pub geometry: GeometryHandle,
    /// RGB color, each channel in [0, 1]
    pub color: DVec3,
    /// Sphere radius, duplicated from physics for the draw call
    pub radius: f64,
    /// Vertex count reported by the geometry factory
    pub vertex_count: u32,
}

impl Component for RenderComponent {}

impl Default for RenderComponent {
    fn default() -> Self {
        RenderComponent {
            geometry: GeometryHandle::NONE,
            color: DVec3::ONE,
            radius: 1.0,
            vertex_count: 0,
        }
    }
}

/// Axis-aligned extent of a container volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBoundsComponent {
    /// Minimum corner
    pub min: DVec3,
    /// Maximum corner
    pub max: DVec3,
}

impl WorldBoundsComponent {
    /// Bounds of a box centered at `center` with full edge lengths `size`
    ///
    /// # Examples
    ///
    /// ```
    /// use box_sandbox::ecs::components::WorldBoundsComponent;
    /// use glam::DVec3;
    ///
    /// let b = WorldBoundsComponent::from_center_size(DVec3::ZERO, DVec3::splat(10.0));
    /// assert_eq!(b.min, DVec3::splat(-5.0));
    /// assert_eq!(b.max, DVec3::splat(5.0));
    /// ```
    pub fn from_center_size(center: DVec3, size: DVec3) -> Self {
        let half = size * 0.5;
        WorldBoundsComponent {
            min: center - half,
            max: center + half,
        }
    }

    /// Edge lengths of the volume
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Center of the volume
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Whether a sphere lies entirely inside the volume
    pub fn contains_sphere(&self, center: DVec3, radius: f64) -> bool {
        (center - radius).cmpge(self.min).all() && (center + radius).cmple(self.max).all()
    }
}

impl Component for WorldBoundsComponent {}

impl Default for WorldBoundsComponent {
    fn default() -> Self {
        WorldBoundsComponent {
            min: DVec3::splat(f64::NEG_INFINITY),
            max: DVec3::splat(f64::INFINITY),
        }
    }
}
