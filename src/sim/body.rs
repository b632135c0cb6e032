//! Minimal rigid body for headless runs and tests
//!
//! Stands in for the engine's physics body: explicit Euler with gravity,
//! impulses as instant velocity changes, one-step forces, and a swept
//! reflect-with-restitution response against a [`PhysicsWorld`].

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::collision::reflect;
use super::lod::MeshSelector;
use super::world::{PhysicsBody, PhysicsWorld};

/// Normal speed below which a bounce is killed so the ball can rest
const REST_SPEED: f32 = 30.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicBody {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub mass: f32,
    /// Contact radius (inradius of the complex mesh, inside the face probes)
    pub radius: f32,
    pub gravity: f32,
    pub gravity_enabled: bool,
    pub restitution: f32,
    /// Fraction of tangential speed lost per second while touching a surface
    pub rolling_friction: f32,
    pub collision_shape: MeshSelector,
    /// Force accumulated for the next step
    pending_force: Vec3,
}

impl KinematicBody {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass: 1.0,
            radius: 40.0,
            gravity: 980.0,
            gravity_enabled: true,
            restitution: 0.5,
            rolling_friction: 0.8,
            collision_shape: MeshSelector::Complex,
            pending_force: Vec3::ZERO,
        }
    }

    /// Advance one step, sweeping the ball's leading point through the world
    pub fn integrate(&mut self, dt: f32, world: &impl PhysicsWorld) {
        if self.gravity_enabled {
            self.linear_velocity.z -= self.gravity * dt;
        }
        if self.mass > 0.0 {
            self.linear_velocity += self.pending_force / self.mass * dt;
        }
        self.pending_force = Vec3::ZERO;

        let step = self.linear_velocity * dt;
        let dir = step.normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }

        let target = self.position + step + dir * self.radius;
        match world.raycast(self.position, target, true) {
            Some(hit) => {
                self.position = hit.point + hit.normal * self.radius;
                let mut vel = reflect(self.linear_velocity, hit.normal);
                let vn = vel.dot(hit.normal);
                if vn.abs() < REST_SPEED {
                    vel -= hit.normal * vn;
                } else {
                    vel -= hit.normal * vn * (1.0 - self.restitution);
                }
                let tangential = vel - hit.normal * vel.dot(hit.normal);
                vel -= tangential * (self.rolling_friction * dt).min(1.0);
                self.linear_velocity = vel;
            }
            None => self.position += step,
        }

        let spin = self.angular_velocity.length();
        if spin > f32::EPSILON {
            self.rotation = (Quat::from_axis_angle(self.angular_velocity / spin, spin * dt)
                * self.rotation)
                .normalize();
        }
    }
}

impl PhysicsBody for KinematicBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn scale(&self) -> Vec3 {
        self.scale
    }

    fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    fn linear_velocity(&self) -> Vec3 {
        self.linear_velocity
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.linear_velocity = velocity;
    }

    fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    fn set_angular_velocity(&mut self, velocity: Vec3) {
        self.angular_velocity = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        if self.mass > 0.0 {
            self.linear_velocity += impulse / self.mass;
        }
    }

    fn apply_force(&mut self, force: Vec3) {
        self.pending_force += force;
    }

    fn gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }

    fn mass(&self) -> f32 {
        self.mass
    }

    fn set_collision_shape(&mut self, selector: MeshSelector) {
        // Engine mesh swaps drop the body's velocities
        self.collision_shape = selector;
        self.linear_velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::{Collider, StaticWorld};

    #[test]
    fn test_falls_and_comes_to_rest_on_ground() {
        let mut world = StaticWorld::new();
        world.add(Collider::Ground { height: 0.0 });
        let mut body = KinematicBody::new(Vec3::new(0.0, 0.0, 300.0));

        for _ in 0..600 {
            body.integrate(1.0 / 60.0, &world);
        }

        assert!((body.position.z - body.radius).abs() < 1.0);
        assert!(body.linear_velocity.length() < REST_SPEED);
    }

    #[test]
    fn test_impulse_scales_with_mass() {
        let mut body = KinematicBody::new(Vec3::ZERO);
        body.mass = 2.0;
        body.apply_impulse(Vec3::new(100.0, 0.0, 0.0));
        assert_eq!(body.linear_velocity, Vec3::new(50.0, 0.0, 0.0));
    }

    #[test]
    fn test_force_lasts_one_step() {
        let world = StaticWorld::new();
        let mut body = KinematicBody::new(Vec3::ZERO);
        body.gravity_enabled = false;
        body.apply_force(Vec3::new(600.0, 0.0, 0.0));
        body.integrate(0.1, &world);
        assert!((body.linear_velocity.x - 60.0).abs() < 1e-4);
        body.integrate(0.1, &world);
        assert!((body.linear_velocity.x - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_mesh_swap_drops_velocity() {
        let mut body = KinematicBody::new(Vec3::ZERO);
        body.linear_velocity = Vec3::X * 900.0;
        body.set_collision_shape(MeshSelector::Simple);
        assert_eq!(body.linear_velocity, Vec3::ZERO);
        assert_eq!(body.collision_shape, MeshSelector::Simple);
    }
}
