//! Deterministic ball controller
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Timers are countdown fields, never OS timers
//! - Physics, rendering and input reach it only through the traits in `world`

pub mod body;
pub mod camera;
pub mod charge;
pub mod collision;
pub mod ground;
pub mod lod;
pub mod orientation;
pub mod preview;
pub mod probe;
pub mod state;
pub mod tick;
pub mod triggers;
pub mod world;
pub mod zone;

pub use body::KinematicBody;
pub use camera::CameraRig;
pub use charge::{ChargePhase, ChargeState};
pub use collision::{Collider, StaticWorld};
pub use ground::AirState;
pub use lod::{LodState, MeshSelector};
pub use orientation::OrientationState;
pub use probe::{PROBE_COUNT, Probe, ProbeHits, ProbeTable};
pub use state::{Ball, BallEvent, GamePhase, ParScore};
pub use tick::{InputAction, apply_feedback, tick};
pub use triggers::{
    Bumper, Contact, DeadZone, FinishTarget, InformationZone, LaunchZone, LevelTriggers, Trigger,
    TriggerVolume,
};
pub use world::{ActorId, FeedbackSink, NullFeedback, PhysicsBody, PhysicsWorld, RayHit};
pub use zone::{ZoneKind, ZoneState};
