//! Ultraball - shot-and-flight controller for a physics golf ball
//!
//! Core modules:
//! - `sim`: Deterministic ball controller (charge/fire, air shots, squish sensing,
//!   zones, mesh LOD) plus the host seams it talks through
//! - `tuning`: Data-driven designer constants
//! - `error`: Construction-time configuration errors
//! - `scorecard`: In-memory per-level par records

pub mod error;
pub mod scorecard;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, ConfigResult};
pub use scorecard::Scorecard;
pub use tuning::BallTuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the demo host (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Charge defaults
    pub const MAX_CHARGE: f32 = 3.0;
    pub const TIME_TO_FULL_CHARGE: f32 = 1.0;
    /// Impulse per unit of charge per unit of mass
    pub const SHOT_IMPULSE_SCALE: f32 = 1000.0;

    /// Air shot defaults
    pub const MAX_SHOTS_IN_AIR: u32 = 1;
    /// Length of the downward ground ray
    pub const GROUND_PROBE_DISTANCE: f32 = 100.0;
    /// Burn-out ramp rate (per second)
    pub const BURN_OUT_RATE: f32 = 1.0;
    /// How long the "illegal shot" flag stays raised
    pub const ILLEGAL_SHOT_FLASH_TIME: f32 = 1.0;

    /// Squish defaults
    pub const SQUISHINESS: f32 = 0.11;
    /// Scale units per second the squish approaches its target
    pub const SQUISH_RATE: f32 = 1.0 / 3.0;

    /// Zone defaults
    pub const ZONE_APPROACH_SPEED: f32 = 800.0;
    pub const ZONE_EPSILON: f32 = 10.0;
    pub const ZONE_REENTRY_COOLDOWN: f32 = 0.3;
    pub const LAUNCH_IMPULSE_SCALE: f32 = 100.0;
    pub const LAUNCH_ZONE_EJECT_POWER: f32 = 30.0;

    /// Bumper defaults
    pub const BUMPER_BOUNCE_POWER: f32 = 2.0;
    pub const BUMPER_IMPULSE_SCALE: f32 = 1000.0;

    /// Mesh LOD defaults
    pub const LOD_SPEED_THRESHOLD: f32 = 600.0;
    pub const LOD_COOLDOWN: f32 = 1.0;

    /// Camera defaults (degrees / engine units)
    pub const MIN_ARM_LENGTH: f32 = 200.0;
    pub const MAX_ARM_LENGTH: f32 = 1000.0;
    pub const ZOOM_SPEED: f32 = 93.0;
    pub const MIN_PITCH: f32 = -70.0;
    pub const MAX_PITCH: f32 = 36.0;

    /// Feedback
    pub const LIGHT_INTENSITY_AT_FULL_CHARGE: f32 = 9000.0;

    /// Preview defaults
    pub const PREVIEW_GRAVITY: f32 = 980.0;
    pub const PREVIEW_SIM_FREQUENCY: f32 = 15.0;
    pub const PREVIEW_MAX_SIM_TIME: f32 = 2.0;
    pub const PREVIEW_RING_COUNT: usize = 3;
    /// Upper bounds on preview tuning
    pub const MAX_PREVIEW_SIM_TIME: f32 = 10.0;
    pub const MAX_PREVIEW_RING_COUNT: usize = 64;
    /// Hard cap on samples per preview, whatever the tuning says
    pub const MAX_PREVIEW_STEPS: usize = 1024;

    /// Par defaults
    pub const MAX_PAR_ALLOWED: u32 = 5;
}

/// Move `current` toward `target` by at most `max_step`, never crossing it
#[inline]
pub fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    if current < target {
        (current + max_step).min(target)
    } else {
        (current - max_step).max(target)
    }
}

/// Normalized angle in degrees to [-180, 180)
#[inline]
pub fn normalize_degrees(mut angle: f32) -> f32 {
    while angle >= 180.0 {
        angle -= 360.0;
    }
    while angle < -180.0 {
        angle += 360.0;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approach_never_crosses_target() {
        assert_eq!(approach(1.0, 0.89, 5.0), 0.89);
        assert_eq!(approach(0.89, 1.0, 5.0), 1.0);
        assert!((approach(1.0, 0.0, 0.25) - 0.75).abs() < 1e-6);
        assert!((approach(0.0, 1.0, 0.25) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(190.0), -170.0);
        assert_eq!(normalize_degrees(-190.0), 170.0);
        assert_eq!(normalize_degrees(180.0), -180.0);
        assert_eq!(normalize_degrees(45.0), 45.0);
    }
}
