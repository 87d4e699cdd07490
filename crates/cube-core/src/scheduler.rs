//! Single-flight rotation lock.
//!
//! At most one rotation is owned by the engine at a time. A request made
//! while the lock is held is dropped, not queued.

use crate::face::Face;

/// Phase of the rotation lock.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SchedulerPhase {
    #[default]
    Idle,
    Rotating {
        face: Face,
        /// Seconds until the lock releases.
        settle_remaining: f32,
    },
}

/// Gate that serializes face rotations.
#[derive(Debug, Clone, Default)]
pub struct RotationScheduler {
    phase: SchedulerPhase,
    accepted: u64,
    dropped: u64,
}

impl RotationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, SchedulerPhase::Idle)
    }

    /// Face currently holding the lock.
    pub fn rotating_face(&self) -> Option<Face> {
        match self.phase {
            SchedulerPhase::Idle => None,
            SchedulerPhase::Rotating { face, .. } => Some(face),
        }
    }

    /// Number of requests that started a rotation.
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Number of requests dropped because the lock was held.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Takes the lock for `face` if it is free.
    ///
    /// Returns false (and counts a drop) when another rotation holds it.
    pub fn try_begin(&mut self, face: Face, settle_delay: f32) -> bool {
        if !self.is_idle() {
            self.dropped += 1;
            return false;
        }
        self.phase = SchedulerPhase::Rotating {
            face,
            settle_remaining: settle_delay.max(0.0),
        };
        self.accepted += 1;
        true
    }

    /// Advances the settle timer. Returns the face whose lock was released
    /// during this tick, if any.
    pub fn tick(&mut self, dt: f32) -> Option<Face> {
        let SchedulerPhase::Rotating {
            face,
            settle_remaining,
        } = &mut self.phase
        else {
            return None;
        };
        *settle_remaining -= dt;
        if *settle_remaining <= 1e-4 {
            let face = *face;
            self.phase = SchedulerPhase::Idle;
            Some(face)
        } else {
            None
        }
    }
}
