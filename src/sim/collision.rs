//! Segment ray casts against simple static geometry
//!
//! A small reference [`PhysicsWorld`] so the controller can run headless: ground
//! half-spaces, axis-aligned boxes and spheres. Each primitive returns the
//! fraction along the segment and the surface normal at the entry point.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::world::{ActorId, PhysicsWorld, RayHit};

/// Static collider shapes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    /// Everything at or below `height` is solid
    Ground { height: f32 },
    /// Axis-aligned box
    Aabb { min: Vec3, max: Vec3 },
    Sphere { center: Vec3, radius: f32 },
}

impl Collider {
    /// Intersect the segment `origin -> target`. A segment starting inside the
    /// shape hits at fraction 0.
    pub fn intersect(&self, origin: Vec3, target: Vec3) -> Option<(f32, Vec3)> {
        match *self {
            Collider::Ground { height } => ray_ground(origin, target, height),
            Collider::Aabb { min, max } => ray_aabb(origin, target, min, max),
            Collider::Sphere { center, radius } => ray_sphere(origin, target, center, radius),
        }
    }
}

/// Segment vs. ground half-space
pub fn ray_ground(origin: Vec3, target: Vec3, height: f32) -> Option<(f32, Vec3)> {
    if origin.z <= height {
        return Some((0.0, Vec3::Z));
    }
    if target.z > height {
        return None;
    }
    let t = (origin.z - height) / (origin.z - target.z);
    Some((t, Vec3::Z))
}

/// Segment vs. sphere
pub fn ray_sphere(origin: Vec3, target: Vec3, center: Vec3, radius: f32) -> Option<(f32, Vec3)> {
    let d = target - origin;
    let m = origin - center;
    let c = m.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some((0.0, -d.normalize_or_zero()));
    }

    let a = d.length_squared();
    if a <= f32::EPSILON {
        return None;
    }
    let b = m.dot(d);
    // Moving away from the sphere
    if b > 0.0 {
        return None;
    }
    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }
    let t = (-b - disc.sqrt()) / a;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    let point = origin + d * t;
    Some((t, (point - center).normalize_or_zero()))
}

/// Segment vs. axis-aligned box (slab method)
pub fn ray_aabb(origin: Vec3, target: Vec3, min: Vec3, max: Vec3) -> Option<(f32, Vec3)> {
    let inside = origin.cmpge(min).all() && origin.cmple(max).all();
    let d = target - origin;
    if inside {
        return Some((0.0, -d.normalize_or_zero()));
    }

    let mut t_enter = 0.0_f32;
    let mut t_exit = 1.0_f32;
    let mut normal = Vec3::ZERO;

    for axis in 0..3 {
        let (o, dir, lo, hi) = (origin[axis], d[axis], min[axis], max[axis]);
        if dir.abs() <= f32::EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let inv = 1.0 / dir;
        let (mut t0, mut t1) = ((lo - o) * inv, (hi - o) * inv);
        let mut sign = -1.0;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
            sign = 1.0;
        }
        if t0 > t_enter {
            t_enter = t0;
            normal = Vec3::ZERO;
            normal[axis] = sign;
        }
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    Some((t_enter, normal))
}

/// Reflect velocity off a surface with the given normal
#[inline]
pub fn reflect(vel: Vec3, normal: Vec3) -> Vec3 {
    vel - 2.0 * vel.dot(normal) * normal
}

/// A world made of static colliders
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticWorld {
    colliders: Vec<(ActorId, Collider)>,
    /// Collider belonging to the ball itself, skipped by `ignore_self` casts
    pub self_actor: Option<ActorId>,
    next_id: u32,
}

impl StaticWorld {
    pub fn new() -> Self {
        Self {
            colliders: Vec::new(),
            self_actor: None,
            next_id: 1,
        }
    }

    /// Add a collider, returning the actor it belongs to
    pub fn add(&mut self, collider: Collider) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        self.colliders.push((id, collider));
        id
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl PhysicsWorld for StaticWorld {
    fn raycast(&self, origin: Vec3, target: Vec3, ignore_self: bool) -> Option<RayHit> {
        self.colliders
            .iter()
            .filter(|(id, _)| !(ignore_self && self.self_actor == Some(*id)))
            .filter_map(|(id, collider)| {
                collider
                    .intersect(origin, target)
                    .map(|(fraction, normal)| RayHit {
                        actor: *id,
                        point: origin.lerp(target, fraction),
                        normal,
                        fraction,
                    })
            })
            .min_by(|a, b| {
                a.fraction
                    .partial_cmp(&b.fraction)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}
