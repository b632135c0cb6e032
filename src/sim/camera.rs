//! Spring-arm camera rig
//!
//! Absolute yaw/pitch around the ball with a zoomable arm. The camera position
//! is the aim origin for shots unless the player has locked it in place.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::normalize_degrees;
use crate::tuning::CameraTuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    /// Degrees
    pub yaw: f32,
    /// Degrees, negative looks down at the ball
    pub pitch: f32,
    pub arm_length: f32,
    /// Aim origin captured while the lock is held
    pub locked_origin: Option<Vec3>,
}

impl CameraRig {
    pub fn new(tuning: &CameraTuning) -> Self {
        Self {
            yaw: 0.0,
            pitch: (-20.0_f32).clamp(tuning.min_pitch, tuning.max_pitch),
            arm_length: tuning.min_arm_length,
            locked_origin: None,
        }
    }

    /// Unit vector the camera looks along
    pub fn forward(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(pitch.cos() * yaw.cos(), pitch.cos() * yaw.sin(), pitch.sin())
    }

    /// Camera position at the end of the arm
    pub fn position(&self, ball_position: Vec3) -> Vec3 {
        ball_position - self.forward() * self.arm_length
    }

    /// Where shots are aimed from
    pub fn aim_origin(&self, ball_position: Vec3) -> Vec3 {
        self.locked_origin
            .unwrap_or_else(|| self.position(ball_position))
    }

    pub fn look_up(&mut self, value: f32, tuning: &CameraTuning) {
        self.pitch = (self.pitch + value).clamp(tuning.min_pitch, tuning.max_pitch);
    }

    pub fn look_left(&mut self, value: f32) {
        self.yaw = normalize_degrees(self.yaw + value);
    }

    pub fn zoom_in(&mut self, tuning: &CameraTuning) {
        self.arm_length -= self.arm_length / (100.0 - tuning.zoom_speed);
        self.clamp_arm(tuning);
    }

    pub fn zoom_out(&mut self, tuning: &CameraTuning) {
        self.arm_length += self.arm_length / (100.0 - tuning.zoom_speed);
        self.clamp_arm(tuning);
    }

    pub fn lock(&mut self, ball_position: Vec3) {
        self.locked_origin = Some(self.position(ball_position));
    }

    pub fn unlock(&mut self) {
        self.locked_origin = None;
    }

    pub fn is_locked(&self) -> bool {
        self.locked_origin.is_some()
    }

    fn clamp_arm(&mut self, tuning: &CameraTuning) {
        self.arm_length = self
            .arm_length
            .clamp(tuning.min_arm_length, tuning.max_arm_length);
    }
}
