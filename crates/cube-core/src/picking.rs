//! Click sensors: six boxes hugging the cube faces, hit-tested by ray.

use bevy::math::Vec3;

use crate::config::SensorLayout;
use crate::face::Face;

/// Axis-aligned box attached to one face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorVolume {
    pub face: Face,
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl SensorVolume {
    /// Builds the sensor for `face`. Layout values are in cubelet units.
    pub fn new(face: Face, layout: &SensorLayout, spacing: f32) -> Self {
        let normal = face.normal().as_vec3();
        let along = face.axis().unit();
        let size = Vec3::splat(layout.span) * (Vec3::ONE - along) + along * layout.thickness;
        Self {
            face,
            center: normal * layout.offset_for(face) * spacing,
            half_extents: size * spacing * 0.5,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Slab test. Returns the distance along `dir` to the entry point, or 0
    /// when `origin` is inside the box.
    pub fn ray_distance(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let (min, max) = (self.min(), self.max());
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        for i in 0..3 {
            let (o, d) = (origin[i], dir[i]);
            if d.abs() < f32::EPSILON {
                if o < min[i] || o > max[i] {
                    return None;
                }
                continue;
            }
            let t1 = (min[i] - o) / d;
            let t2 = (max[i] - o) / d;
            t_near = t_near.max(t1.min(t2));
            t_far = t_far.min(t1.max(t2));
            if t_near > t_far {
                return None;
            }
        }
        if t_far < 0.0 {
            return None;
        }
        Some(t_near.max(0.0))
    }
}

/// The six sensors in [`Face::ALL`] order.
pub fn sensor_volumes(layout: &SensorLayout, spacing: f32) -> [SensorVolume; 6] {
    Face::ALL.map(|face| SensorVolume::new(face, layout, spacing))
}

/// Faces whose sensor the ray crosses, nearest first.
pub fn pick_faces(volumes: &[SensorVolume], origin: Vec3, dir: Vec3) -> Vec<Face> {
    let mut hits: Vec<(f32, Face)> = volumes
        .iter()
        .filter_map(|v| v.ray_distance(origin, dir).map(|t| (t, v.face)))
        .collect();
    hits.sort_by(|a, b| a.0.total_cmp(&b.0));
    hits.into_iter().map(|(_, face)| face).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volumes() -> [SensorVolume; 6] {
        sensor_volumes(&SensorLayout::default(), 1.0)
    }

    #[test]
    fn test_sensor_geometry() {
        let top = SensorVolume::new(Face::Top, &SensorLayout::default(), 1.0);
        assert!((top.center - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);
        assert!((top.half_extents - Vec3::new(1.505, 0.505, 1.505)).length() < 1e-5);

        let right = SensorVolume::new(Face::Right, &SensorLayout::default(), 1.0);
        assert!((right.center - Vec3::new(0.99, 0.0, 0.0)).length() < 1e-6);

        let front = SensorVolume::new(Face::Front, &SensorLayout::default(), 2.0);
        assert!((front.center.z + 1.98).abs() < 1e-5);
        assert!((front.half_extents.z - 1.01).abs() < 1e-5);
    }

    #[test]
    fn test_straight_ray_hits_front_first() {
        // Camera sits on the -z side looking towards +z.
        let hits = pick_faces(&volumes(), Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
        assert_eq!(hits.first(), Some(&Face::Front));
        assert!(hits.contains(&Face::Back));
        assert!(!hits.contains(&Face::Top));
    }

    #[test]
    fn test_hits_sorted_nearest_first() {
        let hits = pick_faces(&volumes(), Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);
        assert_eq!(hits, vec![Face::Top, Face::Bottom]);

        let hits = pick_faces(&volumes(), Vec3::new(0.0, -10.0, 0.0), Vec3::Y);
        assert_eq!(hits, vec![Face::Bottom, Face::Top]);
    }

    #[test]
    fn test_miss() {
        let hits = pick_faces(&volumes(), Vec3::new(5.0, 5.0, -10.0), Vec3::Z);
        assert!(hits.is_empty());
        // Pointing away from the cube.
        let hits = pick_faces(&volumes(), Vec3::new(0.0, 0.0, -10.0), Vec3::NEG_Z);
        assert!(hits.is_empty());
    }
}
