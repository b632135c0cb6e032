//! Host seams: physics queries, the ball's rigid body, and render feedback
//!
//! The controller only decides what to apply and when. Integration, collision
//! response and drawing all live behind these traits.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::lod::MeshSelector;

/// Identifies whatever a ray struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// Nearest hit along a ray cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub actor: ActorId,
    pub point: Vec3,
    /// Surface normal at the hit, facing back toward the ray origin
    pub normal: Vec3,
    /// Fraction of the segment travelled before the hit (0-1)
    pub fraction: f32,
}

/// Synchronous ray queries against the visibility channel
pub trait PhysicsWorld {
    /// Cast a segment from `origin` to `target`. With `ignore_self` the ball's
    /// own collider is skipped.
    fn raycast(&self, origin: Vec3, target: Vec3, ignore_self: bool) -> Option<RayHit>;
}

/// The ball's physics body as owned by the engine
pub trait PhysicsBody {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn rotation(&self) -> Quat;
    /// Non-uniform visual scale
    fn scale(&self) -> Vec3;
    fn set_scale(&mut self, scale: Vec3);

    fn linear_velocity(&self) -> Vec3;
    fn set_linear_velocity(&mut self, velocity: Vec3);
    fn angular_velocity(&self) -> Vec3;
    fn set_angular_velocity(&mut self, velocity: Vec3);

    fn apply_impulse(&mut self, impulse: Vec3);
    /// Force applied over the next physics step
    fn apply_force(&mut self, force: Vec3);

    fn gravity_enabled(&self) -> bool;
    fn set_gravity_enabled(&mut self, enabled: bool);
    fn mass(&self) -> f32;

    /// Swap the collision mesh. Engines may reset velocities as a side effect.
    fn set_collision_shape(&mut self, selector: MeshSelector);
}

/// Fire-and-forget material/light/visibility sink
pub trait FeedbackSink {
    fn set_scalar_parameter(&mut self, name: &str, value: f32);
    fn set_visible(&mut self, name: &str, visible: bool);
    fn set_light_intensity(&mut self, intensity: f32);
}

/// Feedback sink that discards everything (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn set_scalar_parameter(&mut self, _name: &str, _value: f32) {}
    fn set_visible(&mut self, _name: &str, _visible: bool) {}
    fn set_light_intensity(&mut self, _intensity: f32) {}
}
