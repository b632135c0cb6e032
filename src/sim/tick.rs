//! Per-frame controller update and input edges
//!
//! Sensing runs first (ground ray, face probes), then everything that consumes
//! it: squash, burn-out, charge and preview, zone pull, mesh LOD, and finally
//! the material/light feedback.

use super::charge::shot_direction;
use super::preview::predict_path;
use super::state::{Ball, BallEvent, GamePhase};
use super::world::{FeedbackSink, PhysicsBody, PhysicsWorld};
use super::zone::ZoneOutcome;
use crate::consts::LIGHT_INTENSITY_AT_FULL_CHARGE;

/// Material parameter and visibility names driven each tick
pub mod params {
    pub const POWER: &str = "Power";
    pub const BURN_OUT: &str = "BurnOut";
    pub const ALPHA: &str = "Alpha";
    pub const PREVIEW_RINGS: &str = "PreviewRings";
}

/// Discrete input edges, delivered between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    FirePressed,
    FireReleased,
    CancelFire,
    /// Pitch delta in degrees
    LookUp(f32),
    /// Yaw delta in degrees
    LookLeft(f32),
    ZoomIn,
    ZoomOut,
    CameraLockPressed,
    CameraLockReleased,
    Pause,
}

impl Ball {
    /// Apply one input edge immediately
    pub fn handle_input(&mut self, action: InputAction, body: &mut impl PhysicsBody) {
        match action {
            InputAction::Pause => {
                self.phase = match self.phase {
                    GamePhase::Playing => GamePhase::Paused,
                    GamePhase::Paused => GamePhase::Playing,
                    GamePhase::Finished => GamePhase::Finished,
                };
                return;
            }
            InputAction::LookUp(value) => {
                self.camera.look_up(value, &self.tuning.camera);
                return;
            }
            InputAction::LookLeft(value) => {
                self.camera.look_left(value);
                return;
            }
            InputAction::ZoomIn => {
                self.camera.zoom_in(&self.tuning.camera);
                return;
            }
            InputAction::ZoomOut => {
                self.camera.zoom_out(&self.tuning.camera);
                return;
            }
            _ => {}
        }

        if self.phase != GamePhase::Playing {
            return;
        }

        match action {
            InputAction::FirePressed => {
                self.fire();
            }
            InputAction::FireReleased => {
                self.end_fire(body);
            }
            InputAction::CancelFire => {
                self.cancel_fire();
            }
            InputAction::CameraLockPressed => self.camera.lock(body.position()),
            InputAction::CameraLockReleased => self.camera.unlock(),
            _ => {}
        }
    }
}

/// Advance the controller by one frame
pub fn tick(
    ball: &mut Ball,
    world: &impl PhysicsWorld,
    body: &mut impl PhysicsBody,
    feedback: &mut impl FeedbackSink,
    dt: f32,
) {
    // Don't tick if paused or finished
    if ball.phase != GamePhase::Playing {
        return;
    }

    ball.time_ticks += 1;
    ball.illegal_shot_timer = (ball.illegal_shot_timer - dt).max(0.0);
    ball.zone.tick_cooldown(dt);

    // Sensing
    let position = body.position();
    ball.air
        .sense(world, position, ball.tuning.air.ground_probe_distance);
    let hits = ball
        .probes
        .sample(world, position, body.rotation(), body.scale());

    // Squash toward whichever face is down
    let scale = ball.orientation.update(
        &ball.probes,
        &hits,
        ball.tuning.squish.squishiness,
        ball.tuning.squish.rate,
        dt,
    );
    body.set_scale(scale);

    ball.air.update_burn_out(
        ball.charge.is_charging(),
        ball.tuning.air.burn_out_rate,
        dt,
    );

    // Charge and preview
    ball.charge.advance(
        dt,
        ball.tuning.charge.max_charge,
        ball.tuning.charge.time_to_full_charge,
    );
    if ball.charge.is_charging() {
        let direction = shot_direction(position, ball.camera.aim_origin(position));
        let velocity = direction * ball.charge.amount * ball.tuning.charge.shot_impulse_scale;
        ball.preview_path = predict_path(world, position, velocity, &ball.tuning.preview);
    }

    // Zones
    match ball.zone.update(body, &ball.tuning.zone, dt) {
        ZoneOutcome::Settled => {
            log::info!("Ball settled in dead zone");
            ball.push_event(BallEvent::ZoneSettled);
        }
        ZoneOutcome::Launched => {
            log::info!("Launch zone fired ball");
            ball.lod.reset_cooldown(&ball.tuning.lod);
            ball.push_event(BallEvent::ZoneLaunched);
        }
        ZoneOutcome::Inactive | ZoneOutcome::Approaching | ZoneOutcome::Holding => {}
    }

    // Mesh LOD
    if let Some(selector) = ball.lod.update(body, &ball.tuning.lod, dt) {
        log::debug!("Swapped to {:?} mesh", selector);
        ball.push_event(BallEvent::MeshSwapped(selector));
    }

    apply_feedback(ball, feedback);
}

/// Push charge and burn-out state to the material, light and preview rings
pub fn apply_feedback(ball: &Ball, feedback: &mut impl FeedbackSink) {
    let power = ball.power_fraction();
    let charging = ball.charge.is_charging();

    feedback.set_scalar_parameter(params::POWER, power);
    feedback.set_light_intensity(power * LIGHT_INTENSITY_AT_FULL_CHARGE);
    feedback.set_scalar_parameter(params::BURN_OUT, ball.air.burn_out);
    feedback.set_scalar_parameter(params::ALPHA, if charging { 1.0 } else { 0.0 });
    feedback.set_visible(params::PREVIEW_RINGS, charging);
}
