//! Pivot controller systems.
//!
//! A turn goes through three steps:
//! 1. `begin_rotations` takes the lock, captures the face-group from the
//!    logical model and attaches its entities to the pivot.
//! 2. `advance_rotation` drives the pivot angle on the fixed timestep.
//! 3. On the last tick the turn is committed: the integer model is updated,
//!    every member gets a snapped transform and is detached, and the pivot
//!    returns to identity.

use bevy::prelude::*;

use crate::animation::QuarterTurn;
use crate::bevy::{
    CubeModelRes, Cubelet, CubeletEntityMap, EngineSettings, Pivot, RotateFaceRequest,
    RotationCompletedEvent, RotationLock, RotationStartedEvent,
};
use crate::cube::{CubeModel, TurnRecord};
use crate::error::CubeError;
use crate::grid::GridCoord;

/// Largest distance, in cubelet units, an animated cubelet may end up from
/// its logical position before a drift warning is logged.
const DRIFT_TOLERANCE: f32 = 0.05;

type CubeletTransforms<'w, 's> =
    Query<'w, 's, &'static mut Transform, (With<Cubelet>, Without<Pivot>)>;

/// Starts a quarter turn for each accepted [`RotateFaceRequest`].
#[allow(clippy::too_many_arguments)]
pub fn begin_rotations(
    mut commands: Commands,
    mut requests: MessageReader<RotateFaceRequest>,
    mut lock: ResMut<RotationLock>,
    settings: Res<EngineSettings>,
    mut model: ResMut<CubeModelRes>,
    entity_map: Res<CubeletEntityMap>,
    mut pivots: Query<(&mut Pivot, &mut Transform), Without<Cubelet>>,
    mut cubelets: CubeletTransforms,
    mut started: MessageWriter<RotationStartedEvent>,
    mut completed: MessageWriter<RotationCompletedEvent>,
) {
    let config = settings.0;
    for request in requests.read() {
        let face = request.face;
        if !lock.scheduler.try_begin(face, config.settle_delay()) {
            tracing::debug!(
                "[scheduler] dropped {} request, {:?} still holds the lock",
                face,
                lock.scheduler.rotating_face()
            );
            continue;
        }

        let Some(pivot_entity) = entity_map.pivot else {
            tracing::warn!("[rotation] no pivot spawned, ignoring {}", face);
            continue;
        };
        let Ok((mut pivot, mut pivot_transform)) = pivots.get_mut(pivot_entity) else {
            tracing::warn!("[rotation] pivot entity {:?} missing", pivot_entity);
            continue;
        };

        // Lock released before the animation ended: finish that turn first so
        // the new face-group is taken from a settled cube.
        if let Some(previous) = pivot.turn.take() {
            tracing::debug!("[rotation] completing {} early", previous.face());
            let record = commit_turn(
                &previous,
                &mut pivot_transform,
                &mut model.model,
                &entity_map,
                &mut cubelets,
                &mut commands,
                config.cubelet_spacing,
            );
            completed.write(RotationCompletedEvent {
                face: record.face,
                members: record.members,
                turn_count: model.model.turn_count(),
            });
        }
        debug_assert_eq!(pivot_transform.rotation, Quat::IDENTITY);

        let members = model.model.face_group(face);
        for &id in &members {
            if let Some(entity) = entity_map.get(id) {
                // Pivot sits at the origin with identity rotation, so the
                // local transform equals the world transform.
                commands.entity(entity).insert(ChildOf(pivot_entity));
            }
        }

        tracing::info!(
            "[rotation] {} started: {} cubelets about {:?}",
            face,
            members.len(),
            face.axis()
        );
        started.write(RotationStartedEvent {
            face,
            members: members.clone(),
        });
        pivot.turn = Some(QuarterTurn::new(
            face,
            members,
            config.animation_duration,
            config.easing,
        ));
    }
}

/// Advances the pivot animation and commits the turn on its last tick.
pub fn advance_rotation(
    mut commands: Commands,
    time: Res<Time>,
    settings: Res<EngineSettings>,
    mut model: ResMut<CubeModelRes>,
    entity_map: Res<CubeletEntityMap>,
    mut pivots: Query<(&mut Pivot, &mut Transform), Without<Cubelet>>,
    mut cubelets: CubeletTransforms,
    mut completed: MessageWriter<RotationCompletedEvent>,
) {
    let dt = time.delta_secs();
    for (mut pivot, mut pivot_transform) in &mut pivots {
        let Some(turn) = pivot.turn.as_mut() else {
            continue;
        };
        let finished = turn.advance(dt);
        pivot_transform.rotation = turn.rotation();
        if !finished {
            continue;
        }

        let Some(turn) = pivot.turn.take() else {
            continue;
        };
        let record = commit_turn(
            &turn,
            &mut pivot_transform,
            &mut model.model,
            &entity_map,
            &mut cubelets,
            &mut commands,
            settings.0.cubelet_spacing,
        );
        tracing::info!(
            "[rotation] {} completed (turn #{})",
            record.face,
            model.model.turn_count()
        );
        completed.write(RotationCompletedEvent {
            face: record.face,
            members: record.members,
            turn_count: model.model.turn_count(),
        });
    }
}

/// Applies a finished turn to the model and hands the members back to the
/// world with snapped transforms.
fn commit_turn(
    turn: &QuarterTurn,
    pivot_transform: &mut Transform,
    model: &mut CubeModel,
    entity_map: &CubeletEntityMap,
    cubelets: &mut CubeletTransforms,
    commands: &mut Commands,
    spacing: f32,
) -> TurnRecord {
    let settled_pivot = Transform::from_rotation(turn.final_rotation());
    let record = model.commit_members(turn.face(), turn.members());

    for &id in &record.members {
        let (Some(entity), Some(state)) = (entity_map.get(id), model.cubelet(id)) else {
            continue;
        };
        let Ok(mut transform) = cubelets.get_mut(entity) else {
            continue;
        };

        let animated = settled_pivot.mul_transform(*transform);
        if let Err(err) = check_drift(id, state.coord, animated.translation, spacing) {
            tracing::warn!("[rotation] {err}");
        }

        // The model is authoritative: overwrite whatever the animation left.
        *transform = Transform {
            translation: state.coord.to_translation(spacing),
            rotation: state.orientation.to_quat(),
            scale: transform.scale,
        };
        commands.entity(entity).remove::<ChildOf>();
    }

    *pivot_transform = Transform::IDENTITY;
    record
}

/// Fails if `actual` is not within tolerance of the logical coordinate.
fn check_drift(
    cubelet: usize,
    coord: GridCoord,
    actual: Vec3,
    spacing: f32,
) -> Result<(), CubeError> {
    let expected = coord.to_translation(spacing);
    if actual.distance(expected) > DRIFT_TOLERANCE * spacing {
        return Err(CubeError::Drift {
            cubelet,
            expected: coord.as_ivec3(),
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bevy::test_utils::TestApp;
    use crate::bevy::{CubeCommand, StateStores};
    use crate::config::EngineConfig;
    use crate::face::Face;

    fn coord(x: i32, y: i32, z: i32) -> GridCoord {
        GridCoord::try_new(x, y, z).unwrap()
    }

    fn assert_settled(app: &TestApp) {
        let pivot = app.pivot_entity();
        let world = app.world();
        assert!(!world.get::<Pivot>(pivot).unwrap().is_turning());
        assert_eq!(*world.get::<Transform>(pivot).unwrap(), Transform::IDENTITY);
        assert!(world.get::<Children>(pivot).is_none_or(|c| c.is_empty()));

        let model = &world.resource::<CubeModelRes>().model;
        assert!(model.validate().is_ok());
        let map = world.resource::<CubeletEntityMap>();
        for state in model.cubelets() {
            let entity = map.get(state.id).unwrap();
            assert!(world.get::<ChildOf>(entity).is_none());
            let transform = world.get::<Transform>(entity).unwrap();
            assert!(transform.translation.distance(state.coord.to_translation(1.0)) < 1e-5);
            assert!(transform.rotation.dot(state.orientation.to_quat()).abs() > 1.0 - 1e-5);
        }
    }

    #[test]
    fn test_check_drift() {
        let c = coord(1, 0, -1);
        assert!(check_drift(0, c, Vec3::new(1.01, 0.0, -0.99), 1.0).is_ok());
        let err = check_drift(4, c, Vec3::new(1.3, 0.0, -1.0), 1.0).unwrap_err();
        assert!(matches!(err, CubeError::Drift { cubelet: 4, .. }));
        assert!(check_drift(0, c, Vec3::new(2.02, 0.0, -2.0), 2.0).is_ok());
    }

    #[test]
    fn test_rotation_attaches_group_to_pivot() {
        let mut app = TestApp::new();
        app.request_rotation("RIGHT");

        let pivot = app.pivot_entity();
        let world = app.world();
        assert!(!world.resource::<RotationLock>().can_accept());
        let turn = world.get::<Pivot>(pivot).unwrap().turn.as_ref().unwrap();
        assert_eq!(turn.face(), Face::Right);
        assert_eq!(world.get::<Children>(pivot).unwrap().len(), 9);
    }

    #[test]
    fn test_corner_scenario() {
        let mut app = TestApp::new();
        let corner = app.model().at(coord(1, 1, 1)).unwrap().id;

        app.request_rotation("RIGHT");
        app.step(2);
        // Mid-animation: logical state is untouched.
        assert_eq!(app.model().cubelet(corner).unwrap().coord, coord(1, 1, 1));

        app.step(10);
        let state = *app.model().cubelet(corner).unwrap();
        assert_eq!(state.coord, coord(1, -1, 1));
        assert_eq!(
            state.faces().iter().collect::<Vec<_>>(),
            vec![Face::Right, Face::Bottom, Face::Back]
        );
        assert_eq!(app.model().turn_count(), 1);
        assert!(app.world().resource::<RotationLock>().can_accept());
        assert_settled(&app);
    }

    #[test]
    fn test_rotation_messages() {
        let mut app = TestApp::new();
        app.record_messages::<RotationStartedEvent>();
        app.record_messages::<RotationCompletedEvent>();
        let expected_members = app.model().face_group(Face::Right);

        app.request_rotation("RIGHT");
        assert_eq!(
            app.recorded::<RotationStartedEvent>(),
            [RotationStartedEvent {
                face: Face::Right,
                members: expected_members.clone(),
            }]
        );
        assert!(app.recorded::<RotationCompletedEvent>().is_empty());

        app.step(10);
        let completed = app.recorded::<RotationCompletedEvent>();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].face, Face::Right);
        assert_eq!(completed[0].members.len(), 9);
        assert_eq!(completed[0].members, expected_members);
        assert_eq!(completed[0].turn_count, 1);
        assert_eq!(app.recorded::<RotationStartedEvent>().len(), 1);
    }

    #[test]
    fn test_dropped_request_sends_no_messages() {
        let mut app = TestApp::new();
        app.record_messages::<RotationStartedEvent>();
        app.record_messages::<RotationCompletedEvent>();
        app.request_rotation("LEFT");
        app.request_rotation("TOP");
        app.step(10);

        let started: Vec<Face> = app
            .recorded::<RotationStartedEvent>()
            .iter()
            .map(|m| m.face)
            .collect();
        assert_eq!(started, vec![Face::Left]);
        assert_eq!(app.recorded::<RotationCompletedEvent>().len(), 1);
    }

    #[test]
    fn test_request_while_rotating_is_dropped() {
        let mut app = TestApp::new();
        app.request_rotation("RIGHT");
        app.step(1);
        app.request_rotation("TOP");
        app.step(10);

        let lock = &app.world().resource::<RotationLock>().scheduler;
        assert_eq!(lock.accepted(), 1);
        assert_eq!(lock.dropped(), 1);

        let mut expected = CubeModel::new();
        expected.quarter_turn(Face::Right);
        assert_eq!(app.model().cubelets(), expected.cubelets());
        assert_settled(&app);
    }

    #[test]
    fn test_sequential_turns_match_model() {
        let mut app = TestApp::new();
        let sequence = [
            Face::Right,
            Face::Top,
            Face::Front,
            Face::Left,
            Face::Back,
            Face::Bottom,
        ];
        let mut expected = CubeModel::new();
        for face in sequence {
            app.request_rotation(face.name());
            app.step(10);
            expected.quarter_turn(face);
        }
        assert_eq!(app.model().cubelets(), expected.cubelets());
        assert_eq!(app.model().turn_count(), 6);
        assert_settled(&app);
    }

    #[test]
    fn test_four_turns_restore_transforms() {
        let mut app = TestApp::new();
        let before: Vec<Transform> = app.cubelet_transforms();
        for _ in 0..4 {
            app.request_rotation("BACK");
            app.step(10);
        }
        let after = app.cubelet_transforms();
        for (a, b) in before.iter().zip(&after) {
            assert!(a.translation.distance(b.translation) < 1e-5);
            assert!(a.rotation.dot(b.rotation).abs() > 1.0 - 1e-5);
        }
        assert_settled(&app);
    }

    #[test]
    fn test_early_settle_completes_in_flight_turn() {
        let config = EngineConfig {
            settle_fraction: 0.25,
            ..EngineConfig::default()
        };
        let mut app = TestApp::with_config(config);
        app.record_messages::<RotationStartedEvent>();
        app.record_messages::<RotationCompletedEvent>();

        app.request_rotation("RIGHT");
        // The lock releases after a quarter of the animation.
        app.step(3);
        assert!(app.world().resource::<RotationLock>().can_accept());
        assert_eq!(app.model().turn_count(), 0);
        assert!(app.recorded::<RotationCompletedEvent>().is_empty());

        app.request_rotation("TOP");
        assert_eq!(app.model().turn_count(), 1);
        let completed = app.recorded::<RotationCompletedEvent>();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].face, Face::Right);
        assert_eq!(completed[0].members.len(), 9);
        assert_eq!(completed[0].turn_count, 1);

        // TOP's group was captured after RIGHT was committed.
        let mut after_right = CubeModel::new();
        after_right.quarter_turn(Face::Right);
        let started = app.recorded::<RotationStartedEvent>();
        assert_eq!(started.len(), 2);
        assert_eq!(started[1].face, Face::Top);
        assert_eq!(started[1].members, after_right.face_group(Face::Top));
        assert_ne!(started[1].members, CubeModel::new().face_group(Face::Top));
        app.step(10);

        let mut expected = CubeModel::new();
        expected.quarter_turn(Face::Right);
        expected.quarter_turn(Face::Top);
        assert_eq!(app.model().cubelets(), expected.cubelets());
        assert_settled(&app);

        let status = app.world().resource::<StateStores>().status.get_status();
        assert_eq!(status.turn_count, 2);
        assert_eq!(status.dropped, 0);

        let completed = app.recorded::<RotationCompletedEvent>();
        assert_eq!(completed.len(), 2);
        assert_eq!(completed[1].face, Face::Top);
        assert_eq!(completed[1].turn_count, 2);
    }

    #[test]
    fn test_zero_duration_turn() {
        let mut app = TestApp::new();
        app.push_command(CubeCommand::UpdateConfig {
            config: EngineConfig {
                animation_duration: 0.0,
                ..EngineConfig::default()
            },
        });
        app.update();
        app.request_rotation("LEFT");
        app.step(1);
        assert_eq!(app.model().turn_count(), 1);
        assert_settled(&app);
    }
}
