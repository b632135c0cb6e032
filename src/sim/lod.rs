//! Speed-driven collision mesh selection
//!
//! Fast balls use the simple sphere collider, slow ones the dodecahedron so
//! they can come to rest on a face. Every shot, launch and bumper hit starts a
//! cooldown during which no swap happens.

use serde::{Deserialize, Serialize};

use super::world::PhysicsBody;
use crate::tuning::LodTuning;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshSelector {
    /// Sphere collider
    Simple,
    /// Dodecahedron collider
    #[default]
    Complex,
}

impl MeshSelector {
    pub fn for_speed(speed: f32, threshold: f32) -> Self {
        if speed >= threshold {
            MeshSelector::Simple
        } else {
            MeshSelector::Complex
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LodState {
    pub selector: MeshSelector,
    pub cooldown_remaining: f32,
}

impl LodState {
    pub fn cooldown_active(&self) -> bool {
        self.cooldown_remaining > 0.0
    }

    /// Hold the current mesh for the configured window
    pub fn reset_cooldown(&mut self, tuning: &LodTuning) {
        self.cooldown_remaining = tuning.cooldown;
    }

    /// Pick the mesh for the body's speed. Returns the new selector when a
    /// swap happened.
    pub fn update(
        &mut self,
        body: &mut impl PhysicsBody,
        tuning: &LodTuning,
        dt: f32,
    ) -> Option<MeshSelector> {
        self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
        if self.cooldown_active() {
            return None;
        }

        let linear = body.linear_velocity();
        let desired = MeshSelector::for_speed(linear.length(), tuning.speed_threshold);
        if desired == self.selector {
            return None;
        }

        let angular = body.angular_velocity();
        body.set_collision_shape(desired);
        body.set_linear_velocity(linear);
        body.set_angular_velocity(angular);
        self.selector = desired;
        Some(desired)
    }
}
