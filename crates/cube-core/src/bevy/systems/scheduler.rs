//! Rotation lock timing.

use bevy::prelude::*;

use crate::bevy::RotationLock;

/// Counts down the settle delay and releases the lock when it expires.
pub fn tick_rotation_lock(time: Res<Time>, mut lock: ResMut<RotationLock>) {
    if lock.can_accept() {
        return;
    }
    if let Some(face) = lock.scheduler.tick(time.delta_secs()) {
        tracing::debug!("[scheduler] lock released after {}", face);
    }
}
