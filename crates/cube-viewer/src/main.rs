//! Cube Viewer
//!
//! Native window for the cube engine. Middle mouse button switches between
//! View mode (drag to orbit, scroll to zoom) and Action mode (left click
//! turns side faces, right click turns top and bottom).
//!
//! Usage: `cube-viewer [config.json]`

use std::path::Path;

use anyhow::Context;
use bevy::prelude::*;
use bevy::winit::{UpdateMode, WinitSettings};
use cube_core::EngineConfig;
use cube_core::bevy::CubeUnifiedPlugin;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default_preset());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    EngineConfig::from_json(&json).with_context(|| format!("invalid config {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args().nth(1);
    let config = load_config(config_path.as_deref().map(Path::new))?;
    tracing::info!(
        "[viewer] animation {}s, settle fraction {}, easing {:?}",
        config.animation_duration,
        config.settle_fraction,
        config.easing
    );

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Cube".to_string(),
                    resolution: (1024, 768).into(),
                    ..default()
                }),
                ..default()
            })
            .disable::<bevy::log::LogPlugin>(),
    );

    app.insert_resource(WinitSettings {
        focused_mode: UpdateMode::Continuous,
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    });

    app.add_plugins(CubeUnifiedPlugin {
        config,
        ..default()
    });

    tracing::info!("[viewer] starting app");
    app.run();
    Ok(())
}
