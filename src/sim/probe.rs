//! Face-contact probes
//!
//! Twelve sample points rigidly attached to the ball, one per dodecahedron
//! face. A ray from the ball centre to each point tells whether that face is
//! pressed against something.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::world::PhysicsWorld;
use crate::error::{ConfigError, ConfigResult};

/// Number of face probes on the ball
pub const PROBE_COUNT: usize = 12;

/// One probe: local offset plus which axes squash when its face is down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probe {
    /// Offset from the ball centre in the ball's local frame
    pub offset: Vec3,
    /// 1.0 on every axis that compresses when this face is in contact
    pub compress: Vec3,
}

impl Probe {
    const fn new(offset: Vec3, compress: Vec3) -> Self {
        Self { offset, compress }
    }
}

const X: Vec3 = Vec3::X;
const Y: Vec3 = Vec3::Y;
const Z: Vec3 = Vec3::Z;
const XZ: Vec3 = Vec3::new(1.0, 0.0, 1.0);

/// Static probe configuration, indexed 1..=12 via [`ProbeTable::get`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeTable {
    pub probes: [Probe; PROBE_COUNT],
}

impl Default for ProbeTable {
    fn default() -> Self {
        // Hand-tuned against the Ultraball mesh; treat as data
        Self {
            probes: [
                Probe::new(Vec3::new(0.0, 58.0, 0.0), Y),
                Probe::new(Vec3::new(0.0, -58.0, 0.0), Y),
                Probe::new(Vec3::new(43.0, -25.0, 30.0), XZ),
                Probe::new(Vec3::new(-37.0, 25.0, -30.0), X),
                Probe::new(Vec3::new(-37.0, 25.0, 30.0), X),
                Probe::new(Vec3::new(12.0, 25.0, 48.0), Z),
                Probe::new(Vec3::new(49.0, 25.0, 0.0), X),
                Probe::new(Vec3::new(-51.0, -25.0, 0.0), X),
                Probe::new(Vec3::new(-12.0, -25.0, 48.0), Z),
                Probe::new(Vec3::new(12.0, 25.0, -48.0), Z),
                Probe::new(Vec3::new(-12.0, -25.0, -48.0), Z),
                Probe::new(Vec3::new(37.0, -25.0, -30.0), X),
            ],
        }
    }
}

impl ProbeTable {
    /// Probe by 1-based index
    pub fn get(&self, index: usize) -> Option<&Probe> {
        index.checked_sub(1).and_then(|i| self.probes.get(i))
    }

    pub fn validate(&self) -> ConfigResult<()> {
        for (i, probe) in self.probes.iter().enumerate() {
            if probe.offset.length_squared() <= f32::EPSILON {
                return Err(ConfigError::DegenerateProbe { index: i + 1 });
            }
        }
        Ok(())
    }

    /// World-space probe point for the given ball transform
    pub fn world_point(&self, i: usize, position: Vec3, rotation: Quat, scale: Vec3) -> Vec3 {
        position + rotation * (self.probes[i].offset * scale)
    }

    /// Cast from the ball centre to every probe point
    pub fn sample(
        &self,
        world: &impl PhysicsWorld,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
    ) -> ProbeHits {
        let mut hits = [false; PROBE_COUNT];
        for (i, hit) in hits.iter_mut().enumerate() {
            let target = self.world_point(i, position, rotation, scale);
            *hit = world.raycast(position, target, true).is_some();
        }
        ProbeHits(hits)
    }
}

/// Which probes struck something this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeHits(pub [bool; PROBE_COUNT]);

impl ProbeHits {
    /// 1-based index of the face that is down, 0 when none. Ties go to the
    /// last index scanned.
    pub fn dominant(&self) -> usize {
        self.0
            .iter()
            .rposition(|&hit| hit)
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|&hit| hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::{Collider, StaticWorld};

    #[test]
    fn test_dominant_last_hit_wins() {
        let mut hits = ProbeHits::default();
        assert_eq!(hits.dominant(), 0);

        hits.0[2] = true;
        assert_eq!(hits.dominant(), 3);

        hits.0[8] = true;
        assert_eq!(hits.dominant(), 9);
    }

    #[test]
    fn test_default_table_is_valid() {
        assert!(ProbeTable::default().validate().is_ok());
    }

    #[test]
    fn test_degenerate_probe_rejected() {
        let mut table = ProbeTable::default();
        table.probes[4].offset = Vec3::ZERO;
        assert!(matches!(
            table.validate(),
            Err(ConfigError::DegenerateProbe { index: 5 })
        ));
    }

    #[test]
    fn test_sample_detects_single_face() {
        let table = ProbeTable::default();
        let mut world = StaticWorld::new();
        // Pebble sitting just inside probe 6's point
        world.add(Collider::Sphere {
            center: Vec3::new(12.0, 25.0, 48.0) * 0.9,
            radius: 3.0,
        });

        let hits = table.sample(&world, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE);
        assert_eq!(hits.0.iter().filter(|&&h| h).count(), 1);
        assert_eq!(hits.dominant(), 6);
    }

    #[test]
    fn test_resting_on_ground_hits_lower_faces() {
        let table = ProbeTable::default();
        let mut world = StaticWorld::new();
        world.add(Collider::Ground { height: 0.0 });

        // Centre 40 above ground: only probes reaching below z = -40 touch it
        let hits = table.sample(&world, Vec3::new(0.0, 0.0, 40.0), Quat::IDENTITY, Vec3::ONE);
        assert!(hits.0[9] && hits.0[10]);
        assert!(!hits.0[5] && !hits.0[0]);
        assert_eq!(hits.dominant(), 11);
    }

    #[test]
    fn test_probe_points_follow_rotation() {
        let table = ProbeTable::default();
        let rot = Quat::from_rotation_x(std::f32::consts::PI);
        let p = table.world_point(5, Vec3::ZERO, rot, Vec3::ONE);
        // Face 6 points down once the ball is flipped
        assert!(p.z < -40.0);
    }
}
