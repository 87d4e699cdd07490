//! ECS Resources for the cube engine.
//!
//! These resources hold the engine state explicitly instead of in globals.

use std::collections::VecDeque;
use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::Mutex;

use crate::config::EngineConfig;
use crate::cube::CubeModel;
use crate::error::CubeError;
use crate::face::Face;
use crate::mode::PointerButton;
use crate::scheduler::RotationScheduler;

/// Authoritative logical state of the cube.
#[derive(Resource, Debug, Clone, Default)]
pub struct CubeModelRes {
    pub model: CubeModel,
}

/// Single-flight rotation lock.
#[derive(Resource, Debug, Clone, Default)]
pub struct RotationLock {
    pub scheduler: RotationScheduler,
}

impl RotationLock {
    /// Whether a new rotation would be accepted right now.
    pub fn can_accept(&self) -> bool {
        self.scheduler.is_idle()
    }
}

/// Engine configuration resource.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct EngineSettings(pub EngineConfig);

impl EngineSettings {
    pub fn new(config: EngineConfig) -> Self {
        Self(config)
    }
}

/// Maps cubelet ids to their entities, plus the pivot entity.
#[derive(Resource, Debug, Clone, Default)]
pub struct CubeletEntityMap {
    /// Indexed by cubelet id.
    pub cubelets: Vec<Entity>,
    pub pivot: Option<Entity>,
}

impl CubeletEntityMap {
    pub fn get(&self, id: usize) -> Option<Entity> {
        self.cubelets.get(id).copied()
    }
}

/// Commands that can be sent to the Bevy app from outside.
#[derive(Debug, Clone, PartialEq)]
pub enum CubeCommand {
    /// Request a quarter turn of a face.
    RotateFace { face: Face },
    /// Flip between View and Action mode.
    ToggleMode,
    /// A pointer press with picked faces, routed like mouse input.
    Pointer { button: PointerButton, hits: Vec<Face> },
    /// Replace the engine configuration.
    UpdateConfig { config: EngineConfig },
    /// Stop processing commands for this frame.
    Yield,
}

/// Thread-safe command queue shared between the app and its callers.
#[derive(Resource, Clone)]
pub struct CommandQueue {
    inner: Arc<Mutex<VecDeque<CubeCommand>>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Push a command to be processed.
    pub fn push(&self, command: CubeCommand) {
        self.inner.lock().push_back(command);
    }

    /// Queues a quarter turn of the face named `face_name`.
    pub fn request_rotation(&self, face_name: &str) -> Result<(), CubeError> {
        let face: Face = face_name.parse()?;
        self.push(CubeCommand::RotateFace { face });
        Ok(())
    }

    /// Queues a mode switch.
    pub fn toggle_mode(&self) {
        self.push(CubeCommand::ToggleMode);
    }

    /// Drain commands until Yield or empty.
    ///
    /// Yield itself is consumed but not returned; anything after it stays
    /// queued for the next frame.
    pub fn drain_until_yield(&self) -> Vec<CubeCommand> {
        let mut guard = self.inner.lock();
        let mut commands = Vec::new();
        while let Some(cmd) = guard.pop_front() {
            if matches!(cmd, CubeCommand::Yield) {
                break;
            }
            commands.push(cmd);
        }
        commands
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}
