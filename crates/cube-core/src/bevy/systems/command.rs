//! Command processing system.
//!
//! Processes commands pushed to the shared [`CommandQueue`].

use bevy::prelude::*;

use crate::bevy::{
    CommandQueue, CubeCommand, EngineSettings, PointerInputEvent, RotateFaceRequest,
    ToggleModeEvent,
};

/// System to process all commands from the external command queue.
///
/// Handles commands until a Yield is encountered.
/// Commands after Yield are processed in the next frame.
pub fn process_commands(
    command_queue: Res<CommandQueue>,
    mut settings: ResMut<EngineSettings>,
    mut rotate_events: MessageWriter<RotateFaceRequest>,
    mut toggle_events: MessageWriter<ToggleModeEvent>,
    mut pointer_events: MessageWriter<PointerInputEvent>,
) {
    for command in command_queue.drain_until_yield() {
        match command {
            CubeCommand::RotateFace { face } => {
                tracing::info!("[command] RotateFace: {}", face);
                rotate_events.write(RotateFaceRequest { face });
            }
            CubeCommand::ToggleMode => {
                tracing::info!("[command] ToggleMode");
                toggle_events.write(ToggleModeEvent);
            }
            CubeCommand::Pointer { button, hits } => {
                tracing::debug!("[command] Pointer {:?} over {:?}", button, hits);
                pointer_events.write(PointerInputEvent { button, hits });
            }
            CubeCommand::UpdateConfig { mut config } => match config.validate() {
                Ok(()) => {
                    // Cubelets and sensors are spawned once; their geometry is fixed.
                    let current = settings.0;
                    if config.sensor != current.sensor
                        || (config.cubelet_spacing - current.cubelet_spacing).abs() > f32::EPSILON
                    {
                        tracing::warn!(
                            "[command] UpdateConfig: spacing and sensor layout are fixed at startup"
                        );
                        config.cubelet_spacing = current.cubelet_spacing;
                        config.sensor = current.sensor;
                    }
                    tracing::info!(
                        "[command] UpdateConfig: duration={}s settle={}",
                        config.animation_duration,
                        config.settle_fraction
                    );
                    settings.0 = config;
                }
                Err(e) => tracing::warn!("[command] UpdateConfig rejected: {e}"),
            },
            // Yield is consumed by drain_until_yield(), should not reach here
            CubeCommand::Yield => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bevy::test_utils::TestApp;
    use crate::config::EngineConfig;

    #[test]
    fn test_update_config_applies_valid_config() {
        let mut app = TestApp::new();
        let config = EngineConfig {
            animation_duration: 0.5,
            ..EngineConfig::default()
        };
        app.push_command(CubeCommand::UpdateConfig { config });
        app.update();
        assert_eq!(app.world().resource::<EngineSettings>().0, config);
    }

    #[test]
    fn test_update_config_rejects_invalid_config() {
        let mut app = TestApp::new();
        app.push_command(CubeCommand::UpdateConfig {
            config: EngineConfig {
                settle_fraction: 3.0,
                ..EngineConfig::default()
            },
        });
        app.update();
        assert_eq!(app.world().resource::<EngineSettings>().0, EngineConfig::default());
    }

    #[test]
    fn test_update_config_keeps_geometry() {
        let mut app = TestApp::new();
        app.push_command(CubeCommand::UpdateConfig {
            config: EngineConfig {
                animation_duration: 0.3,
                cubelet_spacing: 2.0,
                ..EngineConfig::default()
            },
        });
        app.update();
        let settings = app.world().resource::<EngineSettings>().0;
        assert_eq!(settings.animation_duration, 0.3);
        assert_eq!(settings.cubelet_spacing, 1.0);
    }

    #[test]
    fn test_yield_defers_rest_to_next_frame() {
        let mut app = TestApp::new();
        app.push_command(CubeCommand::Yield);
        app.push_command(CubeCommand::RotateFace {
            face: crate::face::Face::Top,
        });
        app.update();
        assert_eq!(app.world().resource::<CommandQueue>().len(), 1);
        app.update();
        assert!(app.world().resource::<CommandQueue>().is_empty());
        assert!(!app.world().resource::<crate::bevy::RotationLock>().can_accept());
    }
}
