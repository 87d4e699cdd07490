//! Bevy plugins for the cube engine.
//!
//! Provides:
//! - `CubeHeadlessPlugin`: Logic-only plugin (no rendering/window dependencies) for tests
//! - `CubeUnifiedPlugin`: `CubeHeadlessPlugin` + rendering, camera and mouse input

use bevy::prelude::*;

use crate::TICK_DT;
use crate::bevy::events::*;
use crate::bevy::resources::*;
use crate::bevy::state_store::StateStores;
use crate::bevy::systems;
use crate::config::EngineConfig;
use crate::mode::InteractionMode;

// ============================================================================
// Headless Plugin (logic only, no rendering/window dependencies)
// ============================================================================

/// Headless plugin containing all engine logic without rendering or window dependencies.
///
/// Use this plugin in tests with `MinimalPlugins` + `StatesPlugin` to run
/// ECS systems without a windowing or rendering backend.
#[derive(Default)]
pub struct CubeHeadlessPlugin {
    pub config: EngineConfig,
    pub command_queue: Option<CommandQueue>,
    pub state_stores: Option<StateStores>,
}

impl Plugin for CubeHeadlessPlugin {
    fn build(&self, app: &mut App) {
        // ====================================================================
        // States
        // ====================================================================
        app.init_state::<InteractionMode>();

        // ====================================================================
        // Resources
        // ====================================================================
        app.insert_resource(Time::<Fixed>::from_seconds(f64::from(TICK_DT)))
            .insert_resource(EngineSettings::new(self.config))
            .insert_resource(CubeModelRes::default())
            .insert_resource(RotationLock::default())
            .insert_resource(CubeletEntityMap::default())
            .insert_resource(self.command_queue.clone().unwrap_or_default())
            .insert_resource(self.state_stores.clone().unwrap_or_default());

        // ====================================================================
        // Messages
        // ====================================================================
        app.add_message::<RotateFaceRequest>()
            .add_message::<ToggleModeEvent>()
            .add_message::<PointerInputEvent>()
            .add_message::<RotationStartedEvent>()
            .add_message::<RotationCompletedEvent>();

        // ====================================================================
        // Systems
        // ====================================================================
        app.add_systems(Startup, systems::setup_cube);

        // Command processing, input routing and rotation start
        app.add_systems(
            Update,
            (
                systems::process_commands,
                systems::route_pointer_input,
                systems::apply_mode_toggles,
                systems::begin_rotations,
            )
                .chain(),
        );

        // Animation and lock timing. Commit runs before the lock can release.
        app.add_systems(
            FixedUpdate,
            (systems::advance_rotation, systems::tick_rotation_lock).chain(),
        );

        // State sync
        app.add_systems(
            PostUpdate,
            (
                systems::sync_status_to_stores,
                systems::sync_cubelets_to_stores,
            ),
        );
    }
}

// ============================================================================
// Unified Plugin (headless + rendering)
// ============================================================================

/// Full plugin: engine logic plus meshes, camera, status text and mouse input.
///
/// Expects `DefaultPlugins` (window, renderer, UI) to be added by the caller.
#[cfg(feature = "windowed")]
#[derive(Default)]
pub struct CubeUnifiedPlugin {
    pub config: EngineConfig,
    pub command_queue: Option<CommandQueue>,
    pub state_stores: Option<StateStores>,
}

#[cfg(feature = "windowed")]
impl Plugin for CubeUnifiedPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(CubeHeadlessPlugin {
            config: self.config,
            command_queue: self.command_queue.clone(),
            state_stores: self.state_stores.clone(),
        });

        app.insert_resource(ClearColor(systems::BACKGROUND_COLOR))
            .init_resource::<systems::CameraInputState>();

        app.add_systems(
            Startup,
            (
                systems::spawn_cubelet_visuals.after(systems::setup_cube),
                systems::setup_camera,
                systems::setup_status_text,
            ),
        );

        app.add_systems(
            Update,
            systems::emit_pointer_input.before(systems::route_pointer_input),
        );
        app.add_systems(
            Update,
            systems::handle_orbit_camera_input.run_if(in_state(InteractionMode::View)),
        );
        app.add_systems(OnExit(InteractionMode::View), systems::reset_camera_drag);
        app.add_systems(
            Update,
            systems::update_status_text.run_if(state_changed::<InteractionMode>),
        );
    }
}
