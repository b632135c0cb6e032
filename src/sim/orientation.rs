//! Squash deformation from face contact
//!
//! The dominant probe picks a target scale (one or two axes compressed by the
//! squishiness). The live scale walks toward it at a fixed rate and stops
//! exactly on it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::probe::{ProbeHits, ProbeTable};
use crate::approach;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientationState {
    /// 1-based face in contact, 0 when none
    pub dominant_probe: usize,
    pub current_scale: Vec3,
    pub target_scale: Vec3,
}

impl Default for OrientationState {
    fn default() -> Self {
        Self {
            dominant_probe: 0,
            current_scale: Vec3::ONE,
            target_scale: Vec3::ONE,
        }
    }
}

/// Target scale for a face index (0 = identity)
pub fn target_scale(table: &ProbeTable, index: usize, squishiness: f32) -> Vec3 {
    match table.get(index) {
        Some(probe) => Vec3::ONE - probe.compress * squishiness,
        None => Vec3::ONE,
    }
}

/// Per-axis walk toward `target` by `rate * dt`, never overshooting
pub fn approach_scale(current: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    let step = (rate * dt).max(0.0);
    Vec3::new(
        approach(current.x, target.x, step),
        approach(current.y, target.y, step),
        approach(current.z, target.z, step),
    )
}

impl OrientationState {
    /// Resolve this tick's contact into a new scale
    pub fn update(
        &mut self,
        table: &ProbeTable,
        hits: &ProbeHits,
        squishiness: f32,
        rate: f32,
        dt: f32,
    ) -> Vec3 {
        self.dominant_probe = hits.dominant();
        self.target_scale = target_scale(table, self.dominant_probe, squishiness);
        self.current_scale = approach_scale(self.current_scale, self.target_scale, rate, dt);
        self.current_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SQUISH_RATE, SQUISHINESS};
    use proptest::prelude::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-6
    }

    #[test]
    fn test_face_six_compresses_z() {
        let table = ProbeTable::default();
        let target = target_scale(&table, 6, 0.11);
        assert!(approx(target, Vec3::new(1.0, 1.0, 0.89)));
    }

    #[test]
    fn test_face_three_compresses_two_axes() {
        let table = ProbeTable::default();
        let target = target_scale(&table, 3, 0.11);
        assert!(approx(target, Vec3::new(0.89, 1.0, 0.89)));
    }

    #[test]
    fn test_no_contact_is_identity() {
        let table = ProbeTable::default();
        assert_eq!(target_scale(&table, 0, 0.11), Vec3::ONE);
    }

    #[test]
    fn test_update_walks_at_rate() {
        let table = ProbeTable::default();
        let mut state = OrientationState::default();
        let mut hits = ProbeHits::default();
        hits.0[5] = true;

        let scale = state.update(&table, &hits, SQUISHINESS, SQUISH_RATE, 0.03);
        assert_eq!(state.dominant_probe, 6);
        assert!((scale.z - (1.0 - 0.01)).abs() < 1e-6);
        assert_eq!(scale.x, 1.0);

        // Losing contact walks back toward identity
        let scale = state.update(&table, &ProbeHits::default(), SQUISHINESS, SQUISH_RATE, 10.0);
        assert_eq!(scale, Vec3::ONE);
        assert_eq!(state.dominant_probe, 0);
    }

    proptest! {
        #[test]
        fn prop_scale_never_overshoots(
            cx in 0.5f32..1.5, cy in 0.5f32..1.5, cz in 0.5f32..1.5,
            face in 0usize..=12,
            squish in 0.0f32..0.9,
            dt in 0.0f32..1000.0,
        ) {
            let table = ProbeTable::default();
            let current = Vec3::new(cx, cy, cz);
            let target = target_scale(&table, face, squish);
            let next = approach_scale(current, target, SQUISH_RATE, dt);

            for axis in 0..3 {
                let (c, t, n) = (current[axis], target[axis], next[axis]);
                if c <= t {
                    prop_assert!(n >= c && n <= t);
                } else {
                    prop_assert!(n <= c && n >= t);
                }
            }
        }
    }
}
