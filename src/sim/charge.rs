//! Charge/fire state machine
//!
//! Idle --fire--> Charging --release--> Idle (shot)
//!                         --cancel---> Idle (no shot)
//!
//! Charge is a pure function of time held, capped at `max_charge`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargePhase {
    #[default]
    Idle,
    Charging,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeState {
    pub phase: ChargePhase,
    /// Always within `[0, max_charge]`
    pub amount: f32,
    pub elapsed: f32,
}

/// Charge after holding for `elapsed` seconds
#[inline]
pub fn charge_for(elapsed: f32, max_charge: f32, time_to_full: f32) -> f32 {
    if elapsed >= time_to_full {
        return max_charge;
    }
    (elapsed * max_charge / time_to_full).clamp(0.0, max_charge)
}

/// Launch direction from the aim origin through the ball
#[inline]
pub fn shot_direction(ball_position: Vec3, aim_origin: Vec3) -> Vec3 {
    (ball_position - aim_origin).normalize_or_zero()
}

/// Impulse for a released charge
#[inline]
pub fn shot_impulse(direction: Vec3, charge: f32, mass: f32, scale: f32) -> Vec3 {
    direction * charge * mass * scale
}

impl ChargeState {
    pub fn is_charging(&self) -> bool {
        self.phase == ChargePhase::Charging
    }

    /// Idle -> Charging. Returns false if already charging.
    pub fn begin(&mut self) -> bool {
        if self.phase != ChargePhase::Idle {
            return false;
        }
        self.phase = ChargePhase::Charging;
        self.elapsed = 0.0;
        self.amount = 0.0;
        true
    }

    /// Accumulate hold time while charging
    pub fn advance(&mut self, dt: f32, max_charge: f32, time_to_full: f32) {
        if self.phase != ChargePhase::Charging {
            return;
        }
        self.elapsed += dt.max(0.0);
        self.amount = charge_for(self.elapsed, max_charge, time_to_full);
    }

    /// Charging -> Idle, handing back the charge to spend
    pub fn release(&mut self) -> Option<f32> {
        if self.phase != ChargePhase::Charging {
            return None;
        }
        let charge = self.amount;
        self.reset();
        Some(charge)
    }

    /// Charging -> Idle without a shot. No-op when idle.
    pub fn cancel(&mut self) -> bool {
        if self.phase != ChargePhase::Charging {
            return false;
        }
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.phase = ChargePhase::Idle;
        self.amount = 0.0;
        self.elapsed = 0.0;
    }
}
