//! Orbit camera system.
//!
//! Active in View mode only:
//! - Left or right mouse button drag: orbit around the cube
//! - Mouse wheel scroll: zoom in/out

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::bevy::{MainCamera, OrbitCamera};

/// Radians of orbit per pixel of drag.
const ORBIT_SENSITIVITY: f32 = 0.008;

/// Zoom factor per scroll unit.
const ZOOM_FACTOR: f32 = 1.1;

/// Drag state for the orbit camera.
#[derive(Resource, Debug, Clone, Default)]
pub struct CameraInputState {
    /// Cursor position at the previous frame of the drag, `None` when not dragging.
    pub last_cursor: Option<Vec2>,
}

/// Spawns the main camera and the lights.
pub fn setup_camera(mut commands: Commands) {
    let orbit = OrbitCamera::default();
    commands.spawn((
        Name::new("Main Camera"),
        Camera3d::default(),
        MainCamera,
        orbit,
        orbit.transform(),
    ));

    commands.spawn((
        Name::new("Key Light"),
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, -6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        Name::new("Fill Light"),
        DirectionalLight {
            illuminance: 3_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-5.0, -3.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// System to handle orbit camera input.
pub fn handle_orbit_camera_input(
    mut cameras: Query<(&mut OrbitCamera, &mut Transform), With<MainCamera>>,
    mut input_state: ResMut<CameraInputState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut scroll_events: MessageReader<MouseWheel>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let drag_delta = track_drag(&mut input_state, &mouse_button, window.cursor_position());
    let scroll: f32 = scroll_events.read().map(|e| e.y).sum();

    if drag_delta == Vec2::ZERO && scroll.abs() < 0.001 {
        return;
    }

    for (mut orbit, mut transform) in cameras.iter_mut() {
        // Dragging right turns the cube right, dragging up tilts it towards the viewer.
        orbit.orbit(-drag_delta.x * ORBIT_SENSITIVITY, drag_delta.y * ORBIT_SENSITIVITY);
        if scroll.abs() >= 0.001 {
            let factor = if scroll > 0.0 { 1.0 / ZOOM_FACTOR } else { ZOOM_FACTOR };
            orbit.zoom(factor);
        }
        *transform = orbit.transform();
    }
}

/// Returns the cursor movement since the previous frame of an ongoing drag.
fn track_drag(
    input_state: &mut CameraInputState,
    mouse_button: &ButtonInput<MouseButton>,
    cursor: Option<Vec2>,
) -> Vec2 {
    let held = mouse_button.any_pressed([MouseButton::Left, MouseButton::Right]);
    let Some(cursor) = cursor.filter(|_| held) else {
        // Released or cursor left the window, end the drag.
        input_state.last_cursor = None;
        return Vec2::ZERO;
    };

    let delta = input_state
        .last_cursor
        .map_or(Vec2::ZERO, |last| cursor - last);
    input_state.last_cursor = Some(cursor);
    delta
}

/// Resets the drag when leaving View mode so it does not jump on return.
pub fn reset_camera_drag(mut input_state: ResMut<CameraInputState>) {
    *input_state = CameraInputState::default();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_drag() {
        let mut state = CameraInputState::default();
        let mut buttons = ButtonInput::<MouseButton>::default();

        // Moving without a button does not orbit.
        assert_eq!(track_drag(&mut state, &buttons, Some(Vec2::new(10.0, 10.0))), Vec2::ZERO);
        assert_eq!(state.last_cursor, None);

        buttons.press(MouseButton::Right);
        assert_eq!(track_drag(&mut state, &buttons, Some(Vec2::new(10.0, 10.0))), Vec2::ZERO);
        let delta = track_drag(&mut state, &buttons, Some(Vec2::new(14.0, 7.0)));
        assert_eq!(delta, Vec2::new(4.0, -3.0));

        buttons.release(MouseButton::Right);
        assert_eq!(track_drag(&mut state, &buttons, Some(Vec2::new(30.0, 7.0))), Vec2::ZERO);
        assert_eq!(state.last_cursor, None);
    }
}
