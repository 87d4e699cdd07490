//! Error type shared by the engine modules.

use bevy::math::{IVec3, Vec3};

/// Errors raised by the cube engine.
#[derive(Debug, thiserror::Error)]
pub enum CubeError {
    #[error("unknown face name: {0:?} (expected LEFT, RIGHT, TOP, BOTTOM, FACE or BACK)")]
    InvalidFace(String),
    #[error("coordinate ({x}, {y}, {z}) is outside the 3x3x3 grid")]
    OffGrid { x: i32, y: i32, z: i32 },
    #[error("cubelet {cubelet} drifted: expected {expected}, animated to {actual}")]
    Drift {
        cubelet: usize,
        expected: IVec3,
        actual: Vec3,
    },
    #[error("cube state is inconsistent: {0}")]
    Inconsistent(String),
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
    #[error("config json error: {0}")]
    Json(#[from] serde_json::Error),
}
