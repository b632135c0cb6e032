//! Dead/launch zone coordination
//!
//! Entering a zone freezes the ball (no gravity, no velocity) and pulls it to
//! the zone centre. Dead zones hold it there; launch zones fire it along their
//! arrow once centred. A short cooldown after entering or launching ignores
//! further zone triggers so the ball cannot bounce between boundaries.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::world::PhysicsBody;
use crate::tuning::ZoneTuning;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneKind {
    #[default]
    None,
    Dead,
    Launch,
}

/// What a zone tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneOutcome {
    /// No zone active
    Inactive,
    /// Still travelling toward the centre
    Approaching,
    /// Reached a dead-zone centre this tick
    Settled,
    /// Sitting frozen at a dead-zone centre
    Holding,
    /// Reached a launch-zone centre and fired
    Launched,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneState {
    pub kind: ZoneKind,
    pub center: Vec3,
    pub launch_direction: Vec3,
    pub launch_power: f32,
    /// Zone triggers are ignored while this is positive
    pub cooldown_remaining: f32,
    /// Ball has reached a dead-zone centre
    pub settled: bool,
    /// Spin the ball had on entry, handed back when a shot frees it
    pub saved_angular_velocity: Vec3,
}

impl ZoneState {
    pub fn is_active(&self) -> bool {
        self.kind != ZoneKind::None
    }

    pub fn cooling_down(&self) -> bool {
        self.cooldown_remaining > 0.0
    }

    pub fn tick_cooldown(&mut self, dt: f32) {
        self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
    }

    /// Freeze the ball into a zone. Returns false while cooling down.
    pub fn enter(
        &mut self,
        kind: ZoneKind,
        center: Vec3,
        launch_direction: Vec3,
        launch_power: f32,
        body: &mut impl PhysicsBody,
        tuning: &ZoneTuning,
    ) -> bool {
        if kind == ZoneKind::None || self.cooling_down() {
            return false;
        }

        self.saved_angular_velocity = body.angular_velocity();
        body.set_gravity_enabled(false);
        body.set_linear_velocity(Vec3::ZERO);
        body.set_angular_velocity(Vec3::ZERO);

        self.kind = kind;
        self.center = center;
        self.launch_direction = launch_direction.normalize_or_zero();
        self.launch_power = launch_power;
        self.settled = false;
        self.cooldown_remaining = tuning.reentry_cooldown;
        true
    }

    /// Leave whatever zone is active without launching
    pub fn clear(&mut self) {
        self.kind = ZoneKind::None;
        self.settled = false;
    }

    /// Pull toward the centre; settle or launch on arrival
    pub fn update(&mut self, body: &mut impl PhysicsBody, tuning: &ZoneTuning, dt: f32) -> ZoneOutcome {
        if !self.is_active() {
            return ZoneOutcome::Inactive;
        }

        let to_center = self.center - body.position();
        let distance = to_center.length();

        if distance > tuning.epsilon {
            // Never step past the centre in one tick
            let speed = if dt > 0.0 {
                tuning.approach_speed.min(distance / dt)
            } else {
                tuning.approach_speed
            };
            body.set_linear_velocity(to_center / distance * speed);
            return ZoneOutcome::Approaching;
        }

        body.set_position(self.center);
        body.set_linear_velocity(Vec3::ZERO);
        body.set_angular_velocity(Vec3::ZERO);

        match self.kind {
            ZoneKind::Dead => {
                if self.settled {
                    ZoneOutcome::Holding
                } else {
                    self.settled = true;
                    ZoneOutcome::Settled
                }
            }
            ZoneKind::Launch => {
                let impulse =
                    self.launch_direction * self.launch_power * body.mass() * tuning.launch_impulse_scale;
                body.apply_impulse(impulse);
                body.set_gravity_enabled(true);
                self.clear();
                self.cooldown_remaining = tuning.reentry_cooldown;
                ZoneOutcome::Launched
            }
            ZoneKind::None => ZoneOutcome::Inactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::KinematicBody;
    use crate::sim::collision::StaticWorld;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_enter_freezes_body() {
        let tuning = ZoneTuning::default();
        let mut zone = ZoneState::default();
        let mut body = KinematicBody::new(Vec3::new(300.0, 0.0, 0.0));
        body.linear_velocity = Vec3::new(10.0, 20.0, 30.0);
        body.angular_velocity = Vec3::Z * 4.0;

        assert!(zone.enter(ZoneKind::Dead, Vec3::ZERO, Vec3::ZERO, 0.0, &mut body, &tuning));
        assert!(!body.gravity_enabled);
        assert_eq!(body.linear_velocity, Vec3::ZERO);
        assert_eq!(body.angular_velocity, Vec3::ZERO);
        assert_eq!(zone.saved_angular_velocity, Vec3::Z * 4.0);
    }

    #[test]
    fn test_reentry_blocked_during_cooldown() {
        let tuning = ZoneTuning::default();
        let mut zone = ZoneState::default();
        let mut body = KinematicBody::new(Vec3::ZERO);

        assert!(zone.enter(ZoneKind::Dead, Vec3::X, Vec3::ZERO, 0.0, &mut body, &tuning));
        zone.tick_cooldown(0.1);
        assert!(!zone.enter(ZoneKind::Launch, Vec3::Y, Vec3::Z, 30.0, &mut body, &tuning));
        assert_eq!(zone.kind, ZoneKind::Dead);
        assert_eq!(zone.center, Vec3::X);

        zone.tick_cooldown(0.25);
        assert!(zone.enter(ZoneKind::Launch, Vec3::Y, Vec3::Z, 30.0, &mut body, &tuning));
        assert_eq!(zone.kind, ZoneKind::Launch);
    }

    #[test]
    fn test_launch_fires_along_arrow_and_clears() {
        let tuning = ZoneTuning::default();
        let world = StaticWorld::new();
        let mut zone = ZoneState::default();
        let mut body = KinematicBody::new(Vec3::new(0.0, 200.0, 0.0));

        zone.enter(ZoneKind::Launch, Vec3::ZERO, Vec3::Z * 5.0, 30.0, &mut body, &tuning);

        let mut outcome = ZoneOutcome::Approaching;
        for _ in 0..120 {
            outcome = zone.update(&mut body, &tuning, DT);
            if outcome == ZoneOutcome::Launched {
                break;
            }
            body.integrate(DT, &world);
        }

        assert_eq!(outcome, ZoneOutcome::Launched);
        assert_eq!(zone.kind, ZoneKind::None);
        assert!(body.gravity_enabled);
        assert_eq!(body.position, Vec3::ZERO);
        let expected = 30.0 * tuning.launch_impulse_scale;
        assert!((body.linear_velocity - Vec3::Z * expected).length() < 1e-2);
        assert!(zone.cooling_down());
    }

    #[test]
    fn test_inactive_zone_does_nothing() {
        let tuning = ZoneTuning::default();
        let mut zone = ZoneState::default();
        let mut body = KinematicBody::new(Vec3::X * 100.0);
        body.linear_velocity = Vec3::Y;
        assert_eq!(zone.update(&mut body, &tuning, DT), ZoneOutcome::Inactive);
        assert_eq!(body.linear_velocity, Vec3::Y);
    }
}
