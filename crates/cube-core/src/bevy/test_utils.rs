//! Test utilities for headless Bevy integration tests.
//!
//! Provides `TestApp`, a wrapper around `bevy::app::App` that uses
//! `MinimalPlugins` + `CubeHeadlessPlugin` for testing engine logic
//! without a rendering or windowing backend.

use bevy::prelude::*;

use crate::TICK_DT;
use crate::bevy::plugin::CubeHeadlessPlugin;
use crate::bevy::resources::{CommandQueue, CubeCommand, CubeModelRes, CubeletEntityMap};
use crate::bevy::state_store::StateStores;
use crate::config::EngineConfig;
use crate::cube::CubeModel;
use crate::face::Face;
use crate::mode::{InteractionMode, PointerButton};

/// Every message of type `M` seen since [`TestApp::record_messages`].
#[derive(Resource)]
pub(crate) struct MessageLog<M: Message>(pub Vec<M>);

fn collect_messages<M: Message + Clone>(
    mut reader: MessageReader<M>,
    mut log: ResMut<MessageLog<M>>,
) {
    log.0.extend(reader.read().cloned());
}

/// A headless Bevy app wrapper for testing.
pub(crate) struct TestApp {
    pub app: App,
}

impl TestApp {
    /// Create a new test app with the default config.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create a new test app with a specific engine config.
    pub fn with_config(config: EngineConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::state::app::StatesPlugin);
        app.add_plugins(bevy::input::InputPlugin);
        app.add_plugins(CubeHeadlessPlugin {
            config,
            command_queue: None,
            state_stores: None,
        });
        // Pause virtual time so that only explicit step calls
        // advance the animation.
        app.world_mut().resource_mut::<Time<Virtual>>().pause();
        // Run one update to initialize all resources and state
        app.update();
        Self { app }
    }

    /// Run a single frame update.
    pub fn update(&mut self) {
        self.app.update();
    }

    /// Advance by exactly `n` fixed timesteps, one frame each.
    pub fn step(&mut self, n: usize) {
        let dt = std::time::Duration::from_secs_f32(TICK_DT);
        for _ in 0..n {
            self.app
                .world_mut()
                .resource_mut::<Time<Fixed>>()
                .accumulate_overstep(dt);
            self.app.update();
        }
    }

    /// Start keeping every `M` message in a [`MessageLog`].
    pub fn record_messages<M: Message + Clone>(&mut self) {
        self.app.insert_resource(MessageLog::<M>(Vec::new()));
        self.app.add_systems(Last, collect_messages::<M>);
    }

    /// Messages of type `M` recorded so far.
    pub fn recorded<M: Message + Clone>(&self) -> &[M] {
        &self.app.world().resource::<MessageLog<M>>().0
    }

    /// Push a command to the command queue.
    pub fn push_command(&mut self, cmd: CubeCommand) {
        self.app.world().resource::<CommandQueue>().push(cmd);
    }

    /// Request a rotation by face name and run one frame.
    pub fn request_rotation(&mut self, face_name: &str) {
        self.app
            .world()
            .resource::<CommandQueue>()
            .request_rotation(face_name)
            .unwrap();
        self.update();
    }

    /// Send a pointer press and run one frame.
    pub fn pointer(&mut self, button: PointerButton, hits: Vec<Face>) {
        self.push_command(CubeCommand::Pointer { button, hits });
        self.update();
    }

    /// Switch to Action mode and run until the state change applied.
    pub fn enter_action_mode(&mut self) {
        self.push_command(CubeCommand::ToggleMode);
        self.update();
        // Extra update to apply the state transition
        self.update();
        assert_eq!(self.mode(), InteractionMode::Action);
    }

    pub fn mode(&self) -> InteractionMode {
        *self.app.world().resource::<State<InteractionMode>>().get()
    }

    pub fn status_text(&self) -> String {
        self.app
            .world()
            .resource::<StateStores>()
            .status
            .status_text()
    }

    pub fn model(&self) -> &CubeModel {
        &self.app.world().resource::<CubeModelRes>().model
    }

    pub fn pivot_entity(&self) -> Entity {
        self.app
            .world()
            .resource::<CubeletEntityMap>()
            .pivot
            .unwrap()
    }

    /// Cubelet transforms in id order.
    pub fn cubelet_transforms(&self) -> Vec<Transform> {
        let world = self.app.world();
        world
            .resource::<CubeletEntityMap>()
            .cubelets
            .iter()
            .map(|e| *world.get::<Transform>(*e).unwrap())
            .collect()
    }

    /// Get a reference to the World.
    pub fn world(&self) -> &World {
        self.app.world()
    }
}
