//! Systems for the cube engine.
//!
//! Organized by functionality:
//! - setup: Pivot, cubelet and sensor spawning
//! - command: Command queue processing
//! - input: Pointer routing and mode toggles
//! - rotation: Pivot controller (begin, animate, commit)
//! - scheduler: Rotation lock settle timer
//! - state_sync: Sync ECS state to shared stores
//! - camera, rendering: Orbit camera, meshes and status text (windowed)

#[cfg(feature = "windowed")]
pub mod camera;
pub mod command;
pub mod input;
#[cfg(feature = "windowed")]
pub mod rendering;
pub mod rotation;
pub mod scheduler;
pub mod setup;
pub mod state_sync;

#[cfg(feature = "windowed")]
pub use camera::*;
pub use command::*;
pub use input::*;
#[cfg(feature = "windowed")]
pub use rendering::*;
pub use rotation::*;
pub use scheduler::*;
pub use setup::*;
pub use state_sync::*;
