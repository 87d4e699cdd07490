//! State synchronization systems.
//!
//! Syncs ECS state to the shared [`StateStores`].

use bevy::prelude::*;

use crate::bevy::{CubeModelRes, CubeletSnapshot, EngineStatus, RotationLock, StateStores};
use crate::mode::InteractionMode;

/// Publishes mode, lock state and counters. The store only bumps its
/// version when something changed.
pub fn sync_status_to_stores(
    mode: Res<State<InteractionMode>>,
    lock: Res<RotationLock>,
    model: Res<CubeModelRes>,
    state_stores: Res<StateStores>,
) {
    let mode = *mode.get();
    let scheduler = &lock.scheduler;
    state_stores.status.update(EngineStatus {
        mode,
        can_accept_input: scheduler.is_idle(),
        status_text: mode.status_text().to_string(),
        turn_count: model.model.turn_count(),
        rotating_face: scheduler.rotating_face(),
        accepted: scheduler.accepted(),
        dropped: scheduler.dropped(),
    });
}

/// Publishes cubelet snapshots whenever the model changed.
pub fn sync_cubelets_to_stores(model: Res<CubeModelRes>, state_stores: Res<StateStores>) {
    if !model.is_changed() {
        return;
    }
    let cubelets = model
        .model
        .cubelets()
        .iter()
        .map(CubeletSnapshot::from)
        .collect();
    state_stores.cubelets.set_cubelets(cubelets);
}
