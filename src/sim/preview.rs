//! Trajectory preview while charging
//!
//! Samples a ballistic arc for the shot as it would leave right now, stopping
//! at the first thing it would hit. Display only.

use glam::Vec3;

use super::world::PhysicsWorld;
use crate::consts::MAX_PREVIEW_STEPS;
use crate::tuning::PreviewTuning;

/// Sample the flight path from `start` with launch `velocity`
pub fn predict_path(
    world: &impl PhysicsWorld,
    start: Vec3,
    velocity: Vec3,
    tuning: &PreviewTuning,
) -> Vec<Vec3> {
    let step = 1.0 / tuning.sim_frequency;
    let steps = (tuning.max_sim_time * tuning.sim_frequency)
        .ceil()
        .clamp(0.0, MAX_PREVIEW_STEPS as f32) as usize;
    let gravity = Vec3::new(0.0, 0.0, -tuning.gravity);

    let mut path = Vec::with_capacity(steps + 1);
    path.push(start);

    let mut pos = start;
    let mut vel = velocity;
    for _ in 0..steps {
        let next = pos + vel * step + 0.5 * gravity * step * step;
        if let Some(hit) = world.raycast(pos, next, true) {
            path.push(hit.point);
            break;
        }
        vel += gravity * step;
        pos = next;
        path.push(pos);
    }
    path
}

/// Evenly spaced points along the path for the indicator rings
pub fn ring_positions(path: &[Vec3], count: usize) -> Vec<Vec3> {
    if path.len() < 2 || count == 0 {
        return Vec::new();
    }
    let last = path.len() - 1;
    (1..=count)
        .map(|i| {
            let idx = (i * last) / count;
            path[idx.min(last)]
        })
        .collect()
}
