//! World geometry queries.
//!
//! The motion integrator only ever asks the world one question: "what does a
//! ray from here hit first?". Hosts backed by a physics engine implement
//! [`GroundQuery`] on top of their own ray cast; [`StaticWorld`] answers it
//! for a list of axis-aligned boxes.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// First surface hit by a ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// Distance from the ray origin to the impact point (meters).
    pub distance: f32,

    /// World-space impact point.
    pub point: Vec3,

    /// Surface normal at the impact point, pointing away from the surface.
    pub normal: Vec3,
}

/// Ray casts against world geometry.
pub trait GroundQuery {
    /// Cast a ray and return the closest hit within `max_distance`.
    ///
    /// `direction` does not need to be normalized. A zero direction never
    /// hits anything.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;
}

impl<T: GroundQuery + ?Sized> GroundQuery for &T {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        (**self).raycast(origin, direction, max_distance)
    }
}

/// Axis-aligned solid box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Slab test. `direction` must be normalized.
    ///
    /// A ray starting inside the box hits at distance zero, with the normal
    /// facing back along the ray.
    pub fn ray_intersection(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RayHit> {
        let mut t_enter = 0.0_f32;
        let mut t_exit = max_distance;
        let mut normal = Vec3::ZERO;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];

            if d.abs() < f32::EPSILON {
                if o < self.min[axis] || o > self.max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (self.min[axis] - o) * inv;
            let mut t1 = (self.max[axis] - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            if t0 > t_enter {
                t_enter = t0;
                normal = Vec3::ZERO;
                normal[axis] = -d.signum();
            }
            t_exit = t_exit.min(t1);

            if t_enter > t_exit {
                return None;
            }
        }

        if normal == Vec3::ZERO {
            normal = -direction;
        }

        Some(RayHit {
            distance: t_enter,
            point: origin + direction * t_enter,
            normal,
        })
    }
}

/// Static world made of axis-aligned boxes.
///
/// # Example
///
/// ```rust
/// use glam::Vec3;
/// use kinesis::motion::{GroundQuery, StaticWorld};
///
/// let world = StaticWorld::new().with_floor(0.0, 50.0);
/// let hit = world.raycast(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y, 10.0).unwrap();
/// assert_eq!(hit.distance, 2.0);
/// assert_eq!(hit.normal, Vec3::Y);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticWorld {
    boxes: Vec<Aabb>,
}

impl StaticWorld {
    /// Thickness of slabs created by [`StaticWorld::add_floor`].
    pub const FLOOR_THICKNESS: f32 = 1.0;

    /// An empty world. Every ray misses.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_box(&mut self, aabb: Aabb) {
        self.boxes.push(aabb);
    }

    pub fn with_box(mut self, aabb: Aabb) -> Self {
        self.add_box(aabb);
        self
    }

    /// Add a square slab centered on the origin whose top face sits at `top`.
    pub fn add_floor(&mut self, top: f32, half_extent: f32) {
        self.add_box(Aabb::new(
            Vec3::new(-half_extent, top - Self::FLOOR_THICKNESS, -half_extent),
            Vec3::new(half_extent, top, half_extent),
        ));
    }

    pub fn with_floor(mut self, top: f32, half_extent: f32) -> Self {
        self.add_floor(top, half_extent);
        self
    }

    pub fn boxes(&self) -> &[Aabb] {
        &self.boxes
    }
}

impl GroundQuery for StaticWorld {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO || max_distance < 0.0 {
            return None;
        }

        self.boxes
            .iter()
            .filter_map(|aabb| aabb.ray_intersection(origin, dir, max_distance))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
