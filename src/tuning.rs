//! Designer tuning for the ball controller
//!
//! Plain numeric configuration consumed at construction. Loadable from JSON;
//! any missing key falls back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigResult, require_in_range, require_positive};

/// Charge/fire tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeTuning {
    /// Charge reached after holding fire for `time_to_full_charge` seconds
    pub max_charge: f32,
    pub time_to_full_charge: f32,
    /// Impulse per unit of charge per unit of mass
    pub shot_impulse_scale: f32,
    /// Give the air shot back when a charge started in the air is cancelled
    pub refund_air_shot_on_cancel: bool,
}

impl Default for ChargeTuning {
    fn default() -> Self {
        Self {
            max_charge: MAX_CHARGE,
            time_to_full_charge: TIME_TO_FULL_CHARGE,
            shot_impulse_scale: SHOT_IMPULSE_SCALE,
            refund_air_shot_on_cancel: false,
        }
    }
}

/// Air-shot budget and ground sensing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirTuning {
    pub max_shots_in_air: u32,
    /// Ball is airborne when nothing is this far below its centre
    pub ground_probe_distance: f32,
    pub burn_out_rate: f32,
    pub illegal_shot_flash_time: f32,
}

impl Default for AirTuning {
    fn default() -> Self {
        Self {
            max_shots_in_air: MAX_SHOTS_IN_AIR,
            ground_probe_distance: GROUND_PROBE_DISTANCE,
            burn_out_rate: BURN_OUT_RATE,
            illegal_shot_flash_time: ILLEGAL_SHOT_FLASH_TIME,
        }
    }
}

/// Squash deformation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquishTuning {
    /// Fraction removed from a compressed axis (0 = rigid)
    pub squishiness: f32,
    /// Scale units per second
    pub rate: f32,
}

impl Default for SquishTuning {
    fn default() -> Self {
        Self {
            squishiness: SQUISHINESS,
            rate: SQUISH_RATE,
        }
    }
}

/// Dead/launch zone behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneTuning {
    pub approach_speed: f32,
    /// Distance from the centre at which the ball snaps in
    pub epsilon: f32,
    pub reentry_cooldown: f32,
    pub launch_impulse_scale: f32,
    pub bumper_impulse_scale: f32,
}

impl Default for ZoneTuning {
    fn default() -> Self {
        Self {
            approach_speed: ZONE_APPROACH_SPEED,
            epsilon: ZONE_EPSILON,
            reentry_cooldown: ZONE_REENTRY_COOLDOWN,
            launch_impulse_scale: LAUNCH_IMPULSE_SCALE,
            bumper_impulse_scale: BUMPER_IMPULSE_SCALE,
        }
    }
}

/// Mesh LOD switching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodTuning {
    /// At or above this speed the simple sphere collider is used
    pub speed_threshold: f32,
    pub cooldown: f32,
}

impl Default for LodTuning {
    fn default() -> Self {
        Self {
            speed_threshold: LOD_SPEED_THRESHOLD,
            cooldown: LOD_COOLDOWN,
        }
    }
}

/// Spring-arm camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub min_arm_length: f32,
    pub max_arm_length: f32,
    /// 1-99; higher zooms in bigger steps
    pub zoom_speed: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            min_arm_length: MIN_ARM_LENGTH,
            max_arm_length: MAX_ARM_LENGTH,
            zoom_speed: ZOOM_SPEED,
            min_pitch: MIN_PITCH,
            max_pitch: MAX_PITCH,
        }
    }
}

/// Trajectory preview sampling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewTuning {
    pub gravity: f32,
    /// Samples per simulated second
    pub sim_frequency: f32,
    pub max_sim_time: f32,
    pub ring_count: usize,
}

impl Default for PreviewTuning {
    fn default() -> Self {
        Self {
            gravity: PREVIEW_GRAVITY,
            sim_frequency: PREVIEW_SIM_FREQUENCY,
            max_sim_time: PREVIEW_MAX_SIM_TIME,
            ring_count: PREVIEW_RING_COUNT,
        }
    }
}

/// Stroke limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParTuning {
    pub max_par_allowed: u32,
}

impl Default for ParTuning {
    fn default() -> Self {
        Self {
            max_par_allowed: MAX_PAR_ALLOWED,
        }
    }
}

/// All designer-tunable values for one ball
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallTuning {
    pub charge: ChargeTuning,
    pub air: AirTuning,
    pub squish: SquishTuning,
    pub zone: ZoneTuning,
    pub lod: LodTuning,
    pub camera: CameraTuning,
    pub preview: PreviewTuning,
    pub par: ParTuning,
}

impl BallTuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let tuning: BallTuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would stall or destabilise the tick loop
    pub fn validate(&self) -> ConfigResult<()> {
        require_positive("charge.max_charge", self.charge.max_charge)?;
        require_positive("charge.time_to_full_charge", self.charge.time_to_full_charge)?;
        require_positive("charge.shot_impulse_scale", self.charge.shot_impulse_scale)?;

        require_positive("air.ground_probe_distance", self.air.ground_probe_distance)?;
        require_positive("air.burn_out_rate", self.air.burn_out_rate)?;

        require_in_range(
            "squish.squishiness",
            self.squish.squishiness,
            0.0,
            1.0,
            "[0.0, 1.0)",
        )?;
        require_positive("squish.rate", self.squish.rate)?;

        require_positive("zone.approach_speed", self.zone.approach_speed)?;
        require_positive("zone.epsilon", self.zone.epsilon)?;

        require_positive("camera.min_arm_length", self.camera.min_arm_length)?;
        require_in_range(
            "camera.max_arm_length",
            self.camera.max_arm_length,
            self.camera.min_arm_length,
            f32::INFINITY,
            "[min_arm_length, ∞)",
        )?;
        require_in_range(
            "camera.zoom_speed",
            self.camera.zoom_speed,
            1.0,
            100.0,
            "[1.0, 100.0)",
        )?;
        require_in_range(
            "camera.max_pitch",
            self.camera.max_pitch,
            self.camera.min_pitch,
            f32::INFINITY,
            "[min_pitch, ∞)",
        )?;

        require_positive("preview.gravity", self.preview.gravity)?;
        require_positive("preview.sim_frequency", self.preview.sim_frequency)?;
        require_positive("preview.max_sim_time", self.preview.max_sim_time)?;
        require_in_range(
            "preview.max_sim_time",
            self.preview.max_sim_time,
            0.0,
            MAX_PREVIEW_SIM_TIME,
            "(0.0, 10.0)",
        )?;
        require_in_range(
            "preview.ring_count",
            self.preview.ring_count as f32,
            0.0,
            (MAX_PREVIEW_RING_COUNT + 1) as f32,
            "[0, 64]",
        )?;
        Ok(())
    }
}
