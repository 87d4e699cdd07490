//! ECS Messages for the cube engine.
//!
//! Note: In Bevy 0.18+, buffered events use the Message trait.

use bevy::prelude::*;

use crate::face::Face;
use crate::mode::PointerButton;

/// Message to request a quarter turn of one face.
///
/// Dropped by the rotation lock if another turn is in progress.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotateFaceRequest {
    pub face: Face,
}

/// Message to flip between View and Action mode.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ToggleModeEvent;

/// A pointer press with the faces under the cursor already resolved.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct PointerInputEvent {
    pub button: PointerButton,
    /// Faces whose sensor the pointer ray crossed, nearest first.
    pub hits: Vec<Face>,
}

/// Message fired when a face-group has been attached to the pivot.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct RotationStartedEvent {
    pub face: Face,
    /// Cubelet ids captured for this turn.
    pub members: Vec<usize>,
}

/// Message fired when a turn has been committed to the cube model.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct RotationCompletedEvent {
    pub face: Face,
    pub members: Vec<usize>,
    /// Total committed turns, including this one.
    pub turn_count: u64,
}
