//! Mode/input routing systems.
//!
//! - `route_pointer_input`: pointer events → rotation requests or toggles
//! - `apply_mode_toggles`: toggles → `NextState<InteractionMode>`
//! - `emit_pointer_input` (windowed): mouse clicks → pointer events

use bevy::prelude::*;

use crate::bevy::{PointerInputEvent, RotateFaceRequest, RotationLock, ToggleModeEvent};
use crate::mode::{InteractionMode, PointerButton, RouteDecision, route};

/// Physical mouse button → abstract pointer button.
pub fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Toggle),
        _ => None,
    }
}

/// Routes pointer events according to the current mode and lock.
pub fn route_pointer_input(
    mut pointer_events: MessageReader<PointerInputEvent>,
    mode: Res<State<InteractionMode>>,
    lock: Res<RotationLock>,
    mut rotate_events: MessageWriter<RotateFaceRequest>,
    mut toggle_events: MessageWriter<ToggleModeEvent>,
) {
    // Track the effect of earlier events in this frame.
    let mut mode = *mode.get();
    let mut can_accept = lock.can_accept();

    for event in pointer_events.read() {
        match route(mode, can_accept, event.button, &event.hits) {
            RouteDecision::Rotate(face) => {
                tracing::debug!("[input] {:?} click on {}", event.button, face);
                rotate_events.write(RotateFaceRequest { face });
                can_accept = false;
            }
            RouteDecision::ToggleMode => {
                toggle_events.write(ToggleModeEvent);
                mode = mode.toggled();
            }
            RouteDecision::Ignore => {
                tracing::trace!(
                    "[input] ignored {:?} over {:?} ({:?}, can_accept={})",
                    event.button,
                    event.hits,
                    mode,
                    can_accept
                );
            }
        }
    }
}

/// Applies this frame's mode toggles. An even number cancels out.
pub fn apply_mode_toggles(
    mut toggle_events: MessageReader<ToggleModeEvent>,
    mode: Res<State<InteractionMode>>,
    mut next_mode: ResMut<NextState<InteractionMode>>,
) {
    let toggles = toggle_events.read().count();
    if toggles % 2 == 0 {
        return;
    }
    let next = mode.get().toggled();
    tracing::info!("[input] mode {:?} -> {:?}", mode.get(), next);
    next_mode.set(next);
}

/// Turns mouse presses into pointer events, resolving the faces under the
/// cursor against the face sensors.
#[cfg(feature = "windowed")]
pub fn emit_pointer_input(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<bevy::window::PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<crate::bevy::MainCamera>>,
    sensors: Query<&crate::bevy::FaceSensor>,
    mut pointer_events: MessageWriter<PointerInputEvent>,
) {
    let pressed: Vec<PointerButton> = mouse_button
        .get_just_pressed()
        .filter_map(|b| pointer_button(*b))
        .collect();
    if pressed.is_empty() {
        return;
    }

    let hits = cursor_hits(&windows, &cameras, &sensors).unwrap_or_default();
    for button in pressed {
        pointer_events.write(PointerInputEvent {
            button,
            hits: hits.clone(),
        });
    }
}

#[cfg(feature = "windowed")]
fn cursor_hits(
    windows: &Query<&Window, With<bevy::window::PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform), With<crate::bevy::MainCamera>>,
    sensors: &Query<&crate::bevy::FaceSensor>,
) -> Option<Vec<crate::face::Face>> {
    let window = windows.single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_transform) = cameras.single().ok()?;
    let ray = camera.viewport_to_world(camera_transform, cursor).ok()?;
    let volumes: Vec<_> = sensors.iter().map(|s| s.volume).collect();
    Some(crate::picking::pick_faces(&volumes, ray.origin, *ray.direction))
}
