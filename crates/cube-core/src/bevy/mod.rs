//! Bevy integration for the cube engine.
//!
//! This module wires the pure engine into Bevy ECS: cubelet and pivot
//! entities, resources wrapping the logical model and rotation lock,
//! messages between systems, and shared state stores readable from
//! outside the app.

pub mod components;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod state_store;
pub mod systems;

#[cfg(test)]
pub(crate) mod test_utils;

pub use components::*;
pub use events::*;
#[cfg(feature = "windowed")]
pub use plugin::CubeUnifiedPlugin;
pub use plugin::CubeHeadlessPlugin;
pub use resources::*;
pub use state_store::{
    CubeletSnapshot, CubeletStore, EngineStatus, EngineStatusStore, StateStores,
};
