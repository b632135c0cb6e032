//! Level trigger actors and the contacts they raise on the ball
//!
//! Bumpers, dead zones, launch zones, finish targets and information zones
//! each own a volume. [`LevelTriggers`] reports overlap-begin contacts, once
//! per entry, which the host hands to [`crate::sim::Ball::on_contact`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::zone::ZoneKind;
use crate::consts::{BUMPER_BOUNCE_POWER, LAUNCH_ZONE_EJECT_POWER};

/// What touching a trigger means for the ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Contact {
    Bumper {
        forward: Vec3,
        bounce_power: f32,
    },
    Zone {
        kind: ZoneKind,
        center: Vec3,
        launch_direction: Vec3,
        launch_power: f32,
    },
    Finish {
        next_level: Option<String>,
    },
    Information {
        tip: String,
    },
}

/// Overlap volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TriggerVolume {
    Sphere { center: Vec3, radius: f32 },
    Box { min: Vec3, max: Vec3 },
}

impl TriggerVolume {
    /// Whether a ball of `radius` at `position` touches the volume
    pub fn overlaps(&self, position: Vec3, radius: f32) -> bool {
        match *self {
            TriggerVolume::Sphere { center, radius: r } => {
                position.distance_squared(center) <= (r + radius) * (r + radius)
            }
            TriggerVolume::Box { min, max } => {
                let closest = position.clamp(min, max);
                position.distance_squared(closest) <= radius * radius
            }
        }
    }

    pub fn center(&self) -> Vec3 {
        match *self {
            TriggerVolume::Sphere { center, .. } => center,
            TriggerVolume::Box { min, max } => (min + max) * 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bumper {
    pub volume: TriggerVolume,
    /// Direction the bumper kicks toward
    pub forward: Vec3,
    pub bounce_power: f32,
}

impl Bumper {
    pub fn new(volume: TriggerVolume, forward: Vec3) -> Self {
        Self {
            volume,
            forward: forward.normalize_or_zero(),
            bounce_power: BUMPER_BOUNCE_POWER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadZone {
    pub volume: TriggerVolume,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchZone {
    pub volume: TriggerVolume,
    /// Point the launch arrow sits at; the ball leaves toward it
    pub arrow: Vec3,
    pub eject_power: f32,
}

impl LaunchZone {
    pub fn new(volume: TriggerVolume, arrow: Vec3) -> Self {
        Self {
            volume,
            arrow,
            eject_power: LAUNCH_ZONE_EJECT_POWER,
        }
    }

    pub fn direction(&self) -> Vec3 {
        (self.arrow - self.volume.center()).normalize_or_zero()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishTarget {
    pub volume: TriggerVolume,
    pub next_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InformationZone {
    pub volume: TriggerVolume,
    pub tip: String,
}

/// Any placeable trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Trigger {
    Bumper(Bumper),
    DeadZone(DeadZone),
    LaunchZone(LaunchZone),
    Finish(FinishTarget),
    Information(InformationZone),
}

impl Trigger {
    pub fn volume(&self) -> &TriggerVolume {
        match self {
            Trigger::Bumper(b) => &b.volume,
            Trigger::DeadZone(d) => &d.volume,
            Trigger::LaunchZone(l) => &l.volume,
            Trigger::Finish(f) => &f.volume,
            Trigger::Information(i) => &i.volume,
        }
    }

    pub fn contact(&self) -> Contact {
        match self {
            Trigger::Bumper(b) => Contact::Bumper {
                forward: b.forward,
                bounce_power: b.bounce_power,
            },
            Trigger::DeadZone(d) => Contact::Zone {
                kind: ZoneKind::Dead,
                center: d.volume.center(),
                launch_direction: Vec3::ZERO,
                launch_power: 0.0,
            },
            Trigger::LaunchZone(l) => Contact::Zone {
                kind: ZoneKind::Launch,
                center: l.volume.center(),
                launch_direction: l.direction(),
                launch_power: l.eject_power,
            },
            Trigger::Finish(f) => Contact::Finish {
                next_level: f.next_level.clone(),
            },
            Trigger::Information(i) => Contact::Information { tip: i.tip.clone() },
        }
    }
}

/// All triggers in a level plus which ones the ball is currently inside
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelTriggers {
    pub triggers: Vec<Trigger>,
    inside: Vec<usize>,
}

impl LevelTriggers {
    pub fn new(triggers: Vec<Trigger>) -> Self {
        Self {
            triggers,
            inside: Vec::new(),
        }
    }

    pub fn add(&mut self, trigger: Trigger) {
        self.triggers.push(trigger);
    }

    /// Contacts for triggers the ball has just started overlapping
    pub fn overlaps_begun(&mut self, position: Vec3, radius: f32) -> Vec<Contact> {
        let mut begun = Vec::new();
        let mut now_inside = Vec::new();
        for (i, trigger) in self.triggers.iter().enumerate() {
            if trigger.volume().overlaps(position, radius) {
                now_inside.push(i);
                if !self.inside.contains(&i) {
                    begun.push(trigger.contact());
                }
            }
        }
        self.inside = now_inside;
        begun
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_shapes() {
        let sphere = TriggerVolume::Sphere {
            center: Vec3::ZERO,
            radius: 100.0,
        };
        assert!(sphere.overlaps(Vec3::X * 140.0, 50.0));
        assert!(!sphere.overlaps(Vec3::X * 160.0, 50.0));

        let boxed = TriggerVolume::Box {
            min: Vec3::splat(-10.0),
            max: Vec3::splat(10.0),
        };
        assert!(boxed.overlaps(Vec3::new(0.0, 0.0, 55.0), 50.0));
        assert!(!boxed.overlaps(Vec3::new(0.0, 0.0, 65.0), 50.0));
    }

    #[test]
    fn test_launch_zone_direction_toward_arrow() {
        let zone = LaunchZone::new(
            TriggerVolume::Sphere {
                center: Vec3::new(0.0, 0.0, 100.0),
                radius: 100.0,
            },
            Vec3::new(40.0, 0.0, 100.0),
        );
        assert_eq!(zone.direction(), Vec3::X);
        match Trigger::LaunchZone(zone).contact() {
            Contact::Zone {
                kind,
                center,
                launch_power,
                ..
            } => {
                assert_eq!(kind, ZoneKind::Launch);
                assert_eq!(center, Vec3::new(0.0, 0.0, 100.0));
                assert_eq!(launch_power, LAUNCH_ZONE_EJECT_POWER);
            }
            other => panic!("unexpected contact {:?}", other),
        }
    }

    #[test]
    fn test_contact_fires_once_per_entry() {
        let mut level = LevelTriggers::new(vec![Trigger::Information(InformationZone {
            volume: TriggerVolume::Sphere {
                center: Vec3::ZERO,
                radius: 100.0,
            },
            tip: "Hold to charge".to_string(),
        })]);

        assert_eq!(level.overlaps_begun(Vec3::X * 50.0, 10.0).len(), 1);
        assert!(level.overlaps_begun(Vec3::X * 60.0, 10.0).is_empty());
        assert!(level.overlaps_begun(Vec3::X * 500.0, 10.0).is_empty());
        assert_eq!(level.overlaps_begun(Vec3::X * 50.0, 10.0).len(), 1);
    }
}
