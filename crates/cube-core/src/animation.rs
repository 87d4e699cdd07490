//! Time-based quarter-turn animation of the pivot.

use std::f32::consts::FRAC_PI_2;

use bevy::math::Quat;
use serde::{Deserialize, Serialize};

use crate::face::Face;
use crate::grid::Axis;

/// Slack when comparing accumulated fixed-step time against a duration.
const TIME_EPSILON: f32 = 1e-4;

/// Easing type for animation interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl EasingType {
    /// Applies the easing function to a normalized time value (0.0 to 1.0).
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// One in-flight +90° turn of a face-group around the pivot.
#[derive(Debug, Clone)]
pub struct QuarterTurn {
    face: Face,
    members: Vec<usize>,
    duration: f32,
    elapsed: f32,
    easing: EasingType,
}

impl QuarterTurn {
    /// Starts a turn of `face` moving the cubelet ids in `members`.
    pub fn new(face: Face, members: Vec<usize>, duration: f32, easing: EasingType) -> Self {
        Self {
            face,
            members,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn axis(&self) -> Axis {
        self.face.axis()
    }

    /// Cubelet ids captured when the turn was requested.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Normalized, un-eased progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Advances the animation clock. Returns true once the turn is done.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed + TIME_EPSILON >= self.duration
    }

    /// Current pivot angle in radians.
    pub fn angle(&self) -> f32 {
        if self.is_finished() {
            return FRAC_PI_2;
        }
        self.easing.apply(self.progress()) * FRAC_PI_2
    }

    /// Current pivot rotation.
    pub fn rotation(&self) -> Quat {
        Quat::from_axis_angle(self.axis().unit(), self.angle())
    }

    /// Pivot rotation once the turn has completed.
    pub fn final_rotation(&self) -> Quat {
        Quat::from_axis_angle(self.axis().unit(), FRAC_PI_2)
    }
}
