//! Cube rendering: cubelet meshes with stickers and the status overlay.

use bevy::prelude::*;

use crate::bevy::{CubeModelRes, Cubelet, CubeletEntityMap, EngineSettings, StatusText};
use crate::face::{Face, faces_of};
use crate::mode::InteractionMode;

/// Body size relative to the cubelet spacing; the rest is the visible gap.
const BODY_SCALE: f32 = 0.96;
const STICKER_SCALE: f32 = 0.84;
const STICKER_THICKNESS: f32 = 0.02;

/// Backdrop colour behind the cube.
pub const BACKGROUND_COLOR: Color = Color::srgb(0.55, 0.7, 0.85);

/// Sticker colour of each face at rest.
pub fn sticker_color(face: Face) -> Color {
    match face {
        Face::Top => Color::srgb(0.95, 0.95, 0.95),
        Face::Bottom => Color::srgb(1.0, 0.84, 0.0),
        Face::Front => Color::srgb(0.0, 0.62, 0.33),
        Face::Back => Color::srgb(0.0, 0.32, 0.73),
        Face::Left => Color::srgb(1.0, 0.35, 0.0),
        Face::Right => Color::srgb(0.77, 0.12, 0.23),
    }
}

/// Adds a body mesh and one sticker per outer face to every cubelet.
///
/// Stickers are children of their cubelet, so they follow its turns.
pub fn spawn_cubelet_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    model: Res<CubeModelRes>,
    settings: Res<EngineSettings>,
    entity_map: Res<CubeletEntityMap>,
    cubelets: Query<(Entity, &Cubelet)>,
) {
    let spacing = settings.0.cubelet_spacing;
    let body_mesh = meshes.add(Cuboid::from_length(spacing * BODY_SCALE));
    let body_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.05, 0.05, 0.05),
        perceptual_roughness: 0.6,
        ..default()
    });
    let sticker_materials: Vec<_> = Face::ALL
        .iter()
        .map(|face| {
            materials.add(StandardMaterial {
                base_color: sticker_color(*face),
                perceptual_roughness: 0.4,
                ..default()
            })
        })
        .collect();

    if let Some(pivot) = entity_map.pivot {
        commands.entity(pivot).insert(Visibility::default());
    }

    for (entity, cubelet) in &cubelets {
        let Some(state) = model.model.cubelet(cubelet.id) else {
            continue;
        };
        commands.entity(entity).insert((
            Mesh3d(body_mesh.clone()),
            MeshMaterial3d(body_material.clone()),
            Visibility::default(),
        ));

        // Stickers are laid out in the cubelet's local frame, which matches
        // the world frame at its home position.
        for face in faces_of(state.home).iter() {
            let normal = face.normal().as_vec3();
            let along = face.axis().unit();
            let size = (Vec3::ONE - along) * (spacing * STICKER_SCALE) + along * STICKER_THICKNESS;
            let offset = normal * (spacing * BODY_SCALE * 0.5 + STICKER_THICKNESS * 0.5);
            let sticker = commands
                .spawn((
                    Name::new(format!("Sticker {face}")),
                    Mesh3d(meshes.add(Cuboid::from_size(size))),
                    MeshMaterial3d(sticker_materials[face.index()].clone()),
                    Transform::from_translation(offset),
                ))
                .id();
            commands.entity(entity).add_child(sticker);
        }
    }
    tracing::info!("[setup] cubelet visuals spawned");
}

/// Spawns the instruction text in the top-left corner.
pub fn setup_status_text(mut commands: Commands, mode: Res<State<InteractionMode>>) {
    commands.spawn((
        Name::new("Status Text"),
        StatusText,
        Text::new(mode.get().status_text()),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
}

/// Rewrites the instruction text after a mode change.
pub fn update_status_text(
    mode: Res<State<InteractionMode>>,
    mut texts: Query<&mut Text, With<StatusText>>,
) {
    for mut text in &mut texts {
        text.0 = mode.get().status_text().to_string();
    }
}
