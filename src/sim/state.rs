//! Ball state and discrete transitions
//!
//! Everything the controller owns lives in one [`Ball`] record, mutated in
//! place: once per frame by [`super::tick`], and between frames by input edges
//! and trigger contacts. Invalid transitions are silent no-ops.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::camera::CameraRig;
use super::charge::{ChargeState, shot_direction, shot_impulse};
use super::ground::AirState;
use super::lod::{LodState, MeshSelector};
use super::orientation::OrientationState;
use super::preview::ring_positions;
use super::probe::ProbeTable;
use super::triggers::Contact;
use super::world::PhysicsBody;
use super::zone::{ZoneKind, ZoneState};
use crate::error::ConfigResult;
use crate::tuning::BallTuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    Paused,
    /// Ball reached the finish target
    Finished,
}

/// Notifications for audio, particles and HUD
#[derive(Debug, Clone, PartialEq)]
pub enum BallEvent {
    ShotFired { charge: f32, par: u32 },
    ShotCancelled,
    /// Fire pressed with no air shots left
    ShotRejected,
    ZoneEntered(ZoneKind),
    ZoneSettled,
    ZoneLaunched,
    BumperHit,
    MeshSwapped(MeshSelector),
    LevelFinished { par: u32, next_level: Option<String> },
    Tip(String),
}

/// Stroke counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParScore {
    pub current: u32,
    pub max_allowed: u32,
}

impl ParScore {
    pub fn new(max_allowed: u32) -> Self {
        Self {
            current: 0,
            max_allowed,
        }
    }

    pub fn record_stroke(&mut self) {
        self.current = self.current.saturating_add(1);
    }

    pub fn is_over_par(&self) -> bool {
        self.current > self.max_allowed
    }

    /// HUD text, e.g. "2/5"
    pub fn par_string(&self) -> String {
        format!("{}/{}", self.current, self.max_allowed)
    }
}

/// Complete controller state for one ball (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub tuning: BallTuning,
    pub probes: ProbeTable,
    pub phase: GamePhase,
    pub charge: ChargeState,
    pub air: AirState,
    pub orientation: OrientationState,
    pub zone: ZoneState,
    pub lod: LodState,
    pub camera: CameraRig,
    pub par: ParScore,
    /// The current charge used up an air shot
    pub charge_spent_air_shot: bool,
    /// Seconds left on the "illegal shot" flag
    pub illegal_shot_timer: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Sampled flight path while charging (display only)
    #[serde(skip)]
    pub preview_path: Vec<Vec3>,
    #[serde(skip)]
    events: Vec<BallEvent>,
}

impl Ball {
    /// Build a ball with the stock probe table
    pub fn new(tuning: BallTuning) -> ConfigResult<Self> {
        Self::with_probes(tuning, ProbeTable::default())
    }

    pub fn with_probes(tuning: BallTuning, probes: ProbeTable) -> ConfigResult<Self> {
        tuning.validate()?;
        probes.validate()?;

        Ok(Self {
            probes,
            phase: GamePhase::Playing,
            charge: ChargeState::default(),
            air: AirState::new(tuning.air.max_shots_in_air),
            orientation: OrientationState::default(),
            zone: ZoneState::default(),
            lod: LodState::default(),
            camera: CameraRig::new(&tuning.camera),
            par: ParScore::new(tuning.par.max_par_allowed),
            charge_spent_air_shot: false,
            illegal_shot_timer: 0.0,
            time_ticks: 0,
            preview_path: Vec::new(),
            events: Vec::new(),
            tuning,
        })
    }

    /// Start charging. Ignored while already charging or out of air shots.
    pub fn fire(&mut self) -> bool {
        if self.phase != GamePhase::Playing || self.charge.is_charging() {
            return false;
        }
        if !self.air.has_shot_available() {
            log::debug!(
                "Fire rejected: {} of {} air shots used",
                self.air.shots_taken_in_air,
                self.air.max_shots_in_air
            );
            self.illegal_shot_timer = self.tuning.air.illegal_shot_flash_time;
            self.events.push(BallEvent::ShotRejected);
            return false;
        }

        self.charge.begin();
        // Shots from inside a zone are free
        self.charge_spent_air_shot = self.air.is_airborne && !self.zone.is_active();
        if self.charge_spent_air_shot {
            self.air.spend();
        }
        true
    }

    /// Release the charge as a shot. No-op unless charging.
    pub fn end_fire(&mut self, body: &mut impl PhysicsBody) -> bool {
        let Some(charge) = self.charge.release() else {
            return false;
        };

        let position = body.position();
        let direction = shot_direction(position, self.camera.aim_origin(position));
        let impulse = shot_impulse(
            direction,
            charge,
            body.mass(),
            self.tuning.charge.shot_impulse_scale,
        );

        body.set_linear_velocity(Vec3::ZERO);
        body.apply_impulse(impulse);
        if !body.gravity_enabled() {
            body.set_gravity_enabled(true);
            body.set_angular_velocity(self.zone.saved_angular_velocity);
        }
        if self.zone.is_active() {
            log::debug!("Shot fired out of {:?} zone", self.zone.kind);
            self.zone.clear();
        }

        self.par.record_stroke();
        self.lod.reset_cooldown(&self.tuning.lod);
        self.charge_spent_air_shot = false;
        self.preview_path.clear();
        self.events.push(BallEvent::ShotFired {
            charge,
            par: self.par.current,
        });
        true
    }

    /// Drop the charge without shooting. No-op unless charging.
    pub fn cancel_fire(&mut self) -> bool {
        if !self.charge.cancel() {
            return false;
        }
        if self.tuning.charge.refund_air_shot_on_cancel && self.charge_spent_air_shot {
            self.air.refund();
        }
        self.charge_spent_air_shot = false;
        self.preview_path.clear();
        self.events.push(BallEvent::ShotCancelled);
        true
    }

    /// A bumper kicked the ball: hold the current mesh for a while
    pub fn bumper_hit(&mut self) {
        self.lod.reset_cooldown(&self.tuning.lod);
        self.events.push(BallEvent::BumperHit);
    }

    /// Freeze into a dead or launch zone. Ignored during the re-entry cooldown.
    pub fn zone_enter(
        &mut self,
        kind: ZoneKind,
        center: Vec3,
        launch_direction: Vec3,
        launch_power: f32,
        body: &mut impl PhysicsBody,
    ) -> bool {
        if !self.zone.enter(
            kind,
            center,
            launch_direction,
            launch_power,
            body,
            &self.tuning.zone,
        ) {
            return false;
        }
        log::info!("Entered {:?} zone at {}", kind, center);
        self.air.reset();
        self.events.push(BallEvent::ZoneEntered(kind));
        true
    }

    /// Dispatch a trigger contact
    pub fn on_contact(&mut self, contact: Contact, body: &mut impl PhysicsBody) {
        match contact {
            Contact::Bumper {
                forward,
                bounce_power,
            } => {
                let impulse =
                    forward * body.mass() * bounce_power * self.tuning.zone.bumper_impulse_scale;
                body.set_linear_velocity(Vec3::ZERO);
                body.apply_impulse(impulse);
                self.bumper_hit();
            }
            Contact::Zone {
                kind,
                center,
                launch_direction,
                launch_power,
            } => {
                self.zone_enter(kind, center, launch_direction, launch_power, body);
            }
            Contact::Finish { next_level } => {
                if self.phase == GamePhase::Finished {
                    return;
                }
                self.charge.cancel();
                self.preview_path.clear();
                self.phase = GamePhase::Finished;
                log::info!("Level finished in {} strokes", self.par.current);
                self.events.push(BallEvent::LevelFinished {
                    par: self.par.current,
                    next_level,
                });
            }
            Contact::Information { tip } => self.events.push(BallEvent::Tip(tip)),
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<BallEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: BallEvent) {
        self.events.push(event);
    }

    pub fn par_string(&self) -> String {
        self.par.par_string()
    }

    pub fn current_par(&self) -> u32 {
        self.par.current
    }

    pub fn max_par(&self) -> u32 {
        self.par.max_allowed
    }

    pub fn has_attempted_shot_while_moving(&self) -> bool {
        self.illegal_shot_timer > 0.0
    }

    /// Charge as a 0-1 fraction
    pub fn power_fraction(&self) -> f32 {
        self.charge.amount / self.tuning.charge.max_charge
    }

    /// Indicator ring positions along the preview path
    pub fn indicator_rings(&self) -> Vec<Vec3> {
        ring_positions(&self.preview_path, self.tuning.preview.ring_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::sim::body::KinematicBody;

    fn ball() -> Ball {
        Ball::new(BallTuning::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_tuning() {
        let mut tuning = BallTuning::default();
        tuning.charge.time_to_full_charge = 0.0;
        assert!(matches!(
            Ball::new(tuning),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_par_string() {
        let mut par = ParScore::new(3);
        assert_eq!(par.par_string(), "0/3");
        for _ in 0..4 {
            par.record_stroke();
        }
        assert_eq!(par.par_string(), "4/3");
        assert!(par.is_over_par());
    }

    #[test]
    fn test_cancel_keeps_air_shot_spent_by_default() {
        let mut ball = ball();
        ball.air.is_airborne = true;
        assert!(ball.fire());
        assert_eq!(ball.air.shots_taken_in_air, 1);

        assert!(ball.cancel_fire());
        assert_eq!(ball.air.shots_taken_in_air, 1);
        assert_eq!(ball.current_par(), 0);
        assert!(!ball.fire());
    }

    #[test]
    fn test_cancel_refund_when_configured() {
        let mut tuning = BallTuning::default();
        tuning.charge.refund_air_shot_on_cancel = true;
        let mut ball = Ball::new(tuning).unwrap();
        ball.air.is_airborne = true;

        ball.fire();
        ball.cancel_fire();
        assert_eq!(ball.air.shots_taken_in_air, 0);
        assert!(ball.fire());
    }

    #[test]
    fn test_rejected_fire_raises_flag() {
        let mut ball = ball();
        ball.air.is_airborne = true;
        ball.air.shots_taken_in_air = ball.air.max_shots_in_air;

        assert!(!ball.fire());
        assert!(ball.has_attempted_shot_while_moving());
        assert_eq!(ball.drain_events(), vec![BallEvent::ShotRejected]);
    }

    #[test]
    fn test_fire_inside_zone_does_not_spend_air_shot() {
        let mut ball = ball();
        let mut body = KinematicBody::new(Vec3::new(0.0, 0.0, 1000.0));
        ball.air.is_airborne = true;
        assert!(ball.zone_enter(ZoneKind::Dead, Vec3::ZERO, Vec3::ZERO, 0.0, &mut body));

        assert!(ball.fire());
        assert_eq!(ball.air.shots_taken_in_air, 0);
    }

    #[test]
    fn test_zone_enter_refills_spent_air_budget() {
        let mut ball = ball();
        let mut body = KinematicBody::new(Vec3::new(0.0, 0.0, 1000.0));
        ball.air.is_airborne = true;
        ball.air.shots_taken_in_air = ball.air.max_shots_in_air;
        assert!(!ball.air.has_shot_available());

        assert!(ball.zone_enter(ZoneKind::Launch, Vec3::ZERO, Vec3::Z, 30.0, &mut body));

        assert_eq!(ball.air.shots_taken_in_air, 0);
        assert!(ball.fire());
    }

    #[test]
    fn test_shot_from_zone_restores_gravity_and_clears_zone() {
        let mut ball = ball();
        let mut body = KinematicBody::new(Vec3::new(0.0, 0.0, 500.0));
        body.angular_velocity = Vec3::Y * 2.0;
        ball.zone_enter(ZoneKind::Dead, Vec3::new(0.0, 0.0, 500.0), Vec3::ZERO, 0.0, &mut body);
        assert!(!body.gravity_enabled);

        ball.fire();
        ball.charge.advance(1.0, 3.0, 1.0);
        assert!(ball.end_fire(&mut body));

        assert!(body.gravity_enabled);
        assert_eq!(body.angular_velocity, Vec3::Y * 2.0);
        assert!(!ball.zone.is_active());
        assert!(body.linear_velocity.length() > 0.0);
        assert!(ball.lod.cooldown_active());
    }

    #[test]
    fn test_bumper_kicks_forward() {
        let mut ball = ball();
        let mut body = KinematicBody::new(Vec3::ZERO);
        body.linear_velocity = Vec3::new(0.0, -300.0, 0.0);

        ball.on_contact(
            Contact::Bumper {
                forward: Vec3::X,
                bounce_power: 2.0,
            },
            &mut body,
        );

        assert_eq!(body.linear_velocity, Vec3::X * 2000.0);
        assert!(ball.lod.cooldown_active());
        assert_eq!(ball.drain_events(), vec![BallEvent::BumperHit]);
    }

    #[test]
    fn test_finish_stops_play_once() {
        let mut ball = ball();
        let mut body = KinematicBody::new(Vec3::ZERO);
        ball.par.current = 2;
        let finish = Contact::Finish {
            next_level: Some("Level2".to_string()),
        };

        ball.on_contact(finish.clone(), &mut body);
        ball.on_contact(finish, &mut body);

        assert_eq!(ball.phase, GamePhase::Finished);
        assert_eq!(
            ball.drain_events(),
            vec![BallEvent::LevelFinished {
                par: 2,
                next_level: Some("Level2".to_string())
            }]
        );
        assert!(!ball.fire());
    }

    #[test]
    fn test_tip_is_forwarded() {
        let mut ball = ball();
        let mut body = KinematicBody::new(Vec3::ZERO);
        ball.on_contact(
            Contact::Information {
                tip: "Right-click cancels".to_string(),
            },
            &mut body,
        );
        assert_eq!(
            ball.drain_events(),
            vec![BallEvent::Tip("Right-click cancels".to_string())]
        );
    }

    #[test]
    fn test_state_snapshot_round_trips() {
        let mut ball = ball();
        ball.fire();
        ball.charge.advance(0.5, 3.0, 1.0);
        let json = serde_json::to_string(&ball).unwrap();
        let restored: Ball = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.charge, ball.charge);
        assert_eq!(restored.par, ball.par);
    }
}
