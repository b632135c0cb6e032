//! Headless demo course
//!
//! Builds a small hole out of static geometry and triggers, plays a scripted
//! round at a fixed timestep, and logs what the ball controller reports.
//! Pass a tuning JSON path as the first argument to override the defaults.

use glam::Vec3;

use ultraball::consts::SIM_DT;
use ultraball::sim::{
    Ball, BallEvent, Bumper, Collider, DeadZone, FinishTarget, InformationZone, InputAction,
    KinematicBody, LaunchZone, LevelTriggers, NullFeedback, StaticWorld, Trigger, TriggerVolume,
    tick,
};
use ultraball::{BallTuning, Scorecard};

const LEVEL_NAME: &str = "Level1";
/// Give up after this many simulated seconds
const MAX_ROUND_SECS: f32 = 60.0;

fn load_tuning() -> BallTuning {
    let Some(path) = std::env::args().nth(1) else {
        return BallTuning::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match BallTuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Bad tuning in {}: {} - using defaults", path, e);
                BallTuning::default()
            }
        },
        Err(e) => {
            log::warn!("Could not read {}: {} - using defaults", path, e);
            BallTuning::default()
        }
    }
}

fn build_course() -> (StaticWorld, LevelTriggers) {
    let mut world = StaticWorld::new();
    world.add(Collider::Ground { height: 0.0 });
    // Back wall behind the tee
    world.add(Collider::Aabb {
        min: Vec3::new(-600.0, -1000.0, 0.0),
        max: Vec3::new(-500.0, 1000.0, 400.0),
    });

    let triggers = LevelTriggers::new(vec![
        Trigger::Information(InformationZone {
            volume: TriggerVolume::Sphere {
                center: Vec3::new(0.0, 0.0, 50.0),
                radius: 100.0,
            },
            tip: "Hold fire to charge, release to shoot".to_string(),
        }),
        Trigger::LaunchZone(LaunchZone::new(
            TriggerVolume::Sphere {
                center: Vec3::new(900.0, 0.0, 100.0),
                radius: 200.0,
            },
            Vec3::new(940.0, 0.0, 140.0),
        )),
        Trigger::Bumper(Bumper::new(
            TriggerVolume::Box {
                min: Vec3::new(2600.0, -1000.0, 0.0),
                max: Vec3::new(2700.0, 1000.0, 200.0),
            },
            Vec3::new(1.0, 0.0, 0.3),
        )),
        Trigger::DeadZone(DeadZone {
            volume: TriggerVolume::Sphere {
                center: Vec3::new(4500.0, 0.0, 600.0),
                radius: 250.0,
            },
        }),
        Trigger::Finish(FinishTarget {
            volume: TriggerVolume::Sphere {
                center: Vec3::new(5200.0, 0.0, 150.0),
                radius: 400.0,
            },
            next_level: Some("Level2".to_string()),
        }),
    ]);

    (world, triggers)
}

/// Inputs keyed by frame, queued as the round unfolds
struct Script {
    pending: Vec<(u64, InputAction)>,
}

impl Script {
    fn new() -> Self {
        Self {
            pending: vec![
                (0, InputAction::LookUp(25.0)),
                (0, InputAction::ZoomOut),
                (10, InputAction::FirePressed),
                (40, InputAction::FireReleased),
            ],
        }
    }

    /// Charge for `hold` frames starting at `frame`
    fn shot(&mut self, frame: u64, hold: u64) {
        self.pending.push((frame, InputAction::FirePressed));
        self.pending.push((frame + hold, InputAction::FireReleased));
    }

    fn due(&mut self, frame: u64) -> Vec<InputAction> {
        let (now, later): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|(f, _)| *f <= frame);
        self.pending = later;
        now.into_iter().map(|(_, action)| action).collect()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Ultraball (headless) starting...");

    let tuning = load_tuning();
    let mut ball = Ball::new(tuning)?;
    let (world, mut triggers) = build_course();
    let mut body = KinematicBody::new(Vec3::new(0.0, 0.0, 50.0));
    let mut feedback = NullFeedback;
    let mut script = Script::new();
    let mut scorecard = Scorecard::new();

    let max_frames = (MAX_ROUND_SECS / SIM_DT) as u64;
    let mut finished = false;

    for frame in 0..max_frames {
        for action in script.due(frame) {
            ball.handle_input(action, &mut body);
        }

        tick(&mut ball, &world, &mut body, &mut feedback, SIM_DT);
        body.integrate(SIM_DT, &world);

        for contact in triggers.overlaps_begun(body.position, body.radius) {
            ball.on_contact(contact, &mut body);
        }

        for event in ball.drain_events() {
            match event {
                BallEvent::ShotFired { charge, par } => {
                    log::info!("Stroke {} fired at charge {:.2}", par, charge);
                }
                BallEvent::ZoneLaunched => {
                    // Spend the air shot on the way down
                    script.shot(frame + 45, 20);
                }
                BallEvent::ZoneSettled => {
                    // Shoot out of the dead zone toward the finish
                    script.shot(frame + 30, 30);
                }
                BallEvent::ShotRejected => log::info!("No air shots left"),
                BallEvent::Tip(tip) => log::info!("Tip: {}", tip),
                BallEvent::LevelFinished { par, next_level } => {
                    let new_best = scorecard.record(LEVEL_NAME, par);
                    log::info!(
                        "Finished {} with par {} (new best: {}), next: {:?}",
                        LEVEL_NAME,
                        ball.par_string(),
                        new_best,
                        next_level
                    );
                    finished = true;
                }
                other => log::debug!("{:?}", other),
            }
        }

        if finished {
            break;
        }

        // Once the ball has come to rest on the ground, take another stroke
        if script.pending.is_empty()
            && !ball.air.is_airborne
            && !ball.zone.is_active()
            && body.linear_velocity.length() < 1.0
        {
            script.shot(frame + 30, 45);
        }
    }

    if !finished {
        log::warn!(
            "Round ended without finishing: par {}, ball at {}",
            ball.par_string(),
            body.position
        );
    }
    log::info!("Scorecard total: {}", scorecard.total());
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
