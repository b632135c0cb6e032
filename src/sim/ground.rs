//! Ground sensing and the air-shot budget
//!
//! A fixed-length ray straight down from the ball centre decides grounded vs.
//! airborne. Touching ground refunds every air shot; running out of air shots
//! mid-flight ramps the burn-out scalar used to blacken the ball.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::world::PhysicsWorld;
use crate::approach;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirState {
    pub is_airborne: bool,
    pub shots_taken_in_air: u32,
    pub max_shots_in_air: u32,
    /// 0-1 feedback scalar
    pub burn_out: f32,
}

impl AirState {
    pub fn new(max_shots_in_air: u32) -> Self {
        Self {
            max_shots_in_air,
            ..Default::default()
        }
    }

    /// Whether another charge may start
    pub fn has_shot_available(&self) -> bool {
        self.shots_taken_in_air < self.max_shots_in_air
    }

    pub fn is_exhausted(&self) -> bool {
        self.shots_taken_in_air >= self.max_shots_in_air
    }

    pub fn remaining(&self) -> u32 {
        self.max_shots_in_air.saturating_sub(self.shots_taken_in_air)
    }

    /// Count a shot started in the air
    pub fn spend(&mut self) {
        self.shots_taken_in_air = (self.shots_taken_in_air + 1).min(self.max_shots_in_air);
    }

    pub fn refund(&mut self) {
        self.shots_taken_in_air = self.shots_taken_in_air.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.shots_taken_in_air = 0;
    }

    /// Cast down and classify. Grounded refunds the whole budget.
    pub fn sense(&mut self, world: &impl PhysicsWorld, position: Vec3, probe_distance: f32) -> bool {
        let end = position - Vec3::Z * probe_distance;
        let grounded = world.raycast(position, end, true).is_some();
        if grounded {
            if self.is_airborne {
                log::debug!("Ball landed");
            }
            self.shots_taken_in_air = 0;
        }
        self.is_airborne = !grounded;
        grounded
    }

    /// Ramp burn-out toward 1 while stranded in the air, else toward 0
    pub fn update_burn_out(&mut self, charging: bool, rate: f32, dt: f32) -> f32 {
        let stranded = self.is_airborne && self.is_exhausted() && !charging;
        let target = if stranded { 1.0 } else { 0.0 };
        self.burn_out = approach(self.burn_out, target, rate * dt).clamp(0.0, 1.0);
        self.burn_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::{Collider, StaticWorld};

    fn ground_world() -> StaticWorld {
        let mut world = StaticWorld::new();
        world.add(Collider::Ground { height: 0.0 });
        world
    }

    #[test]
    fn test_sense_grounded_and_airborne() {
        let world = ground_world();
        let mut air = AirState::new(1);

        assert!(air.sense(&world, Vec3::new(0.0, 0.0, 60.0), 100.0));
        assert!(!air.is_airborne);

        assert!(!air.sense(&world, Vec3::new(0.0, 0.0, 150.0), 100.0));
        assert!(air.is_airborne);
    }

    #[test]
    fn test_grounded_resets_air_shots() {
        let world = ground_world();
        let mut air = AirState::new(2);
        air.sense(&world, Vec3::new(0.0, 0.0, 500.0), 100.0);
        air.spend();
        air.spend();
        assert!(!air.has_shot_available());

        air.sense(&world, Vec3::new(0.0, 0.0, 50.0), 100.0);
        assert_eq!(air.shots_taken_in_air, 0);
        assert_eq!(air.remaining(), 2);
    }

    #[test]
    fn test_burn_out_ramps_only_when_stranded() {
        let mut air = AirState::new(1);
        air.is_airborne = true;

        // Shot still available: stays dark
        air.update_burn_out(false, 1.0, 0.5);
        assert_eq!(air.burn_out, 0.0);

        air.spend();
        air.update_burn_out(false, 1.0, 0.5);
        assert!((air.burn_out - 0.5).abs() < 1e-6);
        air.update_burn_out(false, 1.0, 5.0);
        assert_eq!(air.burn_out, 1.0);

        // Charging suppresses it
        air.update_burn_out(true, 1.0, 0.25);
        assert!((air.burn_out - 0.75).abs() < 1e-6);

        air.is_airborne = false;
        air.update_burn_out(false, 1.0, 5.0);
        assert_eq!(air.burn_out, 0.0);
    }
}
