//! ECS Components for the cube engine.

use bevy::prelude::*;

use crate::animation::QuarterTurn;
use crate::picking::SensorVolume;

/// One of the 27 cubelets. `id` indexes [`crate::cube::CubeModel::cubelets`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cubelet {
    pub id: usize,
}

/// The transient parent that carries a face-group through a quarter turn.
///
/// Outside a turn its transform is identity and it has no children.
#[derive(Component, Debug, Default)]
pub struct Pivot {
    /// The turn currently animating, if any.
    pub turn: Option<QuarterTurn>,
}

impl Pivot {
    pub fn is_turning(&self) -> bool {
        self.turn.is_some()
    }
}

/// Invisible click sensor covering one face.
#[derive(Component, Debug, Clone, Copy)]
pub struct FaceSensor {
    pub volume: SensorVolume,
}

/// Marker component for the main camera.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MainCamera;

/// Camera orbiting the cube centre.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Rotation around the world Y axis, in radians.
    pub yaw: f32,
    /// Elevation above the XZ plane, in radians.
    pub pitch: f32,
    pub radius: f32,
    pub target: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        // Looks at the FACE side (z = -1) from above, slightly off-axis.
        Self {
            yaw: std::f32::consts::PI + 0.6,
            pitch: 0.5,
            radius: 9.0,
            target: Vec3::ZERO,
        }
    }
}

impl OrbitCamera {
    pub const MIN_PITCH: f32 = -1.5;
    pub const MAX_PITCH: f32 = 1.5;
    pub const MIN_RADIUS: f32 = 4.0;
    pub const MAX_RADIUS: f32 = 30.0;

    /// Applies a yaw/pitch delta in radians, keeping the pitch off the poles.
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + delta_pitch).clamp(Self::MIN_PITCH, Self::MAX_PITCH);
    }

    /// Multiplies the distance to the target.
    pub fn zoom(&mut self, factor: f32) {
        self.radius = (self.radius * factor).clamp(Self::MIN_RADIUS, Self::MAX_RADIUS);
    }

    /// Camera transform for the current orbit parameters.
    pub fn transform(&self) -> Transform {
        let offset = Vec3::new(
            self.radius * self.pitch.cos() * self.yaw.sin(),
            self.radius * self.pitch.sin(),
            self.radius * self.pitch.cos() * self.yaw.cos(),
        );
        Transform::from_translation(self.target + offset).looking_at(self.target, Vec3::Y)
    }
}

/// Marker component for the on-screen mode instructions.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct StatusText;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_camera_default_faces_front() {
        let camera = OrbitCamera::default();
        let transform = camera.transform();
        assert!(transform.translation.z < 0.0);
        assert!(transform.translation.y > 0.0);
        assert!((transform.translation.length() - camera.radius).abs() < 1e-4);
        // Forward points at the origin.
        let forward = transform.forward();
        let to_target = (camera.target - transform.translation).normalize();
        assert!(forward.dot(to_target) > 0.999);
    }

    #[test]
    fn test_orbit_clamps() {
        let mut camera = OrbitCamera::default();
        camera.orbit(0.0, 10.0);
        assert_eq!(camera.pitch, OrbitCamera::MAX_PITCH);
        camera.zoom(100.0);
        assert_eq!(camera.radius, OrbitCamera::MAX_RADIUS);
        camera.zoom(0.0);
        assert_eq!(camera.radius, OrbitCamera::MIN_RADIUS);
    }
}
