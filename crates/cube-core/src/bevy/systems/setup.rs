//! Spawns the pivot, the 27 cubelets and the six face sensors.

use bevy::prelude::*;

use crate::bevy::{CubeModelRes, Cubelet, CubeletEntityMap, EngineSettings, FaceSensor, Pivot};
use crate::picking::sensor_volumes;

/// Startup system creating every engine entity exactly once.
pub fn setup_cube(
    mut commands: Commands,
    model: Res<CubeModelRes>,
    settings: Res<EngineSettings>,
    mut entity_map: ResMut<CubeletEntityMap>,
) {
    let spacing = settings.0.cubelet_spacing;

    let pivot = commands
        .spawn((Name::new("Pivot"), Pivot::default(), Transform::IDENTITY))
        .id();
    entity_map.pivot = Some(pivot);

    entity_map.cubelets = model
        .model
        .cubelets()
        .iter()
        .map(|state| {
            commands
                .spawn((
                    Name::new(format!("Cubelet {}", state.home)),
                    Cubelet { id: state.id },
                    Transform::from_translation(state.coord.to_translation(spacing))
                        .with_rotation(state.orientation.to_quat()),
                ))
                .id()
        })
        .collect();

    for volume in sensor_volumes(&settings.0.sensor, spacing) {
        commands.spawn((
            Name::new(format!("Sensor {}", volume.face)),
            FaceSensor { volume },
            Transform::from_translation(volume.center),
        ));
    }

    tracing::info!(
        "[setup] spawned pivot and {} cubelets (spacing={})",
        entity_map.cubelets.len(),
        spacing
    );
}
