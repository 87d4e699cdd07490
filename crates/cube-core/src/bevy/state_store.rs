//! Shared state stores for reading engine state from outside the app.
//!
//! Each store holds one slice of state behind a `RwLock` with a version
//! counter, so pollers can skip work when nothing changed.

use std::sync::Arc;

use bevy::prelude::Resource;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::cube::CubeletState;
use crate::face::Face;
use crate::mode::InteractionMode;

// ============================================================================
// Data Types
// ============================================================================

/// Engine status summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineStatus {
    pub mode: InteractionMode,
    /// True when the rotation lock is idle.
    pub can_accept_input: bool,
    pub status_text: String,
    pub turn_count: u64,
    pub rotating_face: Option<Face>,
    pub accepted: u64,
    pub dropped: u64,
}

impl Default for EngineStatus {
    fn default() -> Self {
        let mode = InteractionMode::default();
        Self {
            mode,
            can_accept_input: true,
            status_text: mode.status_text().to_string(),
            turn_count: 0,
            rotating_face: None,
            accepted: 0,
            dropped: 0,
        }
    }
}

/// Logical state of one cubelet, flattened for consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeletSnapshot {
    pub id: usize,
    pub home: [i32; 3],
    pub coord: [i32; 3],
    /// Orientation as a quaternion `[x, y, z, w]`.
    pub rotation: [f32; 4],
}

impl From<&CubeletState> for CubeletSnapshot {
    fn from(state: &CubeletState) -> Self {
        Self {
            id: state.id,
            home: state.home.as_ivec3().to_array(),
            coord: state.coord.as_ivec3().to_array(),
            rotation: state.orientation.to_quat().to_array(),
        }
    }
}

// ============================================================================
// Individual Stores
// ============================================================================

/// Store for the engine status.
#[derive(Debug, Default)]
pub struct EngineStatusStore {
    status: RwLock<EngineStatus>,
    version: RwLock<u64>,
}

impl EngineStatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_status(&self) -> EngineStatus {
        self.status.read().clone()
    }

    pub fn get_version(&self) -> u64 {
        *self.version.read()
    }

    pub fn current_mode(&self) -> InteractionMode {
        self.status.read().mode
    }

    pub fn can_accept_input(&self) -> bool {
        self.status.read().can_accept_input
    }

    pub fn status_text(&self) -> String {
        self.status.read().status_text.clone()
    }

    /// Replaces the status, bumping the version only if it changed.
    pub fn update(&self, status: EngineStatus) {
        let mut current = self.status.write();
        if *current != status {
            *current = status;
            *self.version.write() += 1;
        }
    }
}

/// Store for per-cubelet snapshots.
#[derive(Debug, Default)]
pub struct CubeletStore {
    cubelets: RwLock<Vec<CubeletSnapshot>>,
    version: RwLock<u64>,
}

impl CubeletStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_cubelets(&self) -> Vec<CubeletSnapshot> {
        self.cubelets.read().clone()
    }

    pub fn get_version(&self) -> u64 {
        *self.version.read()
    }

    pub fn set_cubelets(&self, cubelets: Vec<CubeletSnapshot>) {
        *self.cubelets.write() = cubelets;
        *self.version.write() += 1;
    }
}

// ============================================================================
// Combined Stores
// ============================================================================

/// All state stores combined for easy sharing.
#[derive(Debug, Clone, Resource)]
pub struct StateStores {
    pub status: Arc<EngineStatusStore>,
    pub cubelets: Arc<CubeletStore>,
}

impl StateStores {
    pub fn new() -> Self {
        Self {
            status: Arc::new(EngineStatusStore::new()),
            cubelets: Arc::new(CubeletStore::new()),
        }
    }
}

impl Default for StateStores {
    fn default() -> Self {
        Self::new()
    }
}
