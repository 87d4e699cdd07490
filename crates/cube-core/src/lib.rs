//! Cube Core Library
//!
//! Face-rotation engine for an interactive 3x3x3 puzzle cube.
//!
//! The library is split in two layers:
//! - Pure modules (`grid`, `face`, `cube`, `scheduler`, `animation`, `mode`,
//!   `picking`, `config`) holding the logical state and rules
//! - `bevy`: ECS integration (plugins, systems, shared stores), with
//!   rendering and window input behind the `windowed` feature

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod animation;
pub mod config;
pub mod cube;
pub mod error;
pub mod face;
pub mod grid;
pub mod mode;
pub mod picking;
pub mod scheduler;

// Bevy integration
pub mod bevy;

pub use animation::{EasingType, QuarterTurn};
pub use config::{EngineConfig, SensorLayout};
pub use cube::{CUBELET_COUNT, CubeModel, CubeletState, FACE_GROUP_SIZE, TurnRecord};
pub use error::CubeError;
pub use face::{FACE_TABLE, Face, FaceSet, FaceSpec, faces_of};
pub use grid::{Axis, GridCoord, Orientation};
pub use mode::{InteractionMode, PointerButton, RouteDecision, route};
pub use picking::{SensorVolume, pick_faces, sensor_volumes};
pub use scheduler::{RotationScheduler, SchedulerPhase};

/// Fixed simulation step in seconds.
pub const TICK_DT: f32 = 1.0 / 60.0;
