//! The six named faces and the position partitioner.
//!
//! Face-group membership is never stored: it is derived from a cubelet's
//! current [`GridCoord`] through the static [`FACE_TABLE`].

use std::fmt;
use std::str::FromStr;

use bevy::math::IVec3;
use serde::{Deserialize, Serialize};

use crate::error::CubeError;
use crate::grid::{Axis, GridCoord};

/// One of the six outer layers of the cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Face {
    /// x = -1
    Left,
    /// x = 1
    Right,
    /// y = 1
    Top,
    /// y = -1
    Bottom,
    /// z = -1, the side facing the default camera. Named `FACE`.
    #[serde(rename = "FACE")]
    Front,
    /// z = 1
    Back,
}

/// Static description of a face: which axis it sits on and at which layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceSpec {
    pub face: Face,
    pub axis: Axis,
    pub layer: i32,
}

/// Face → (axis, layer) lookup, indexed by [`Face::index`].
pub const FACE_TABLE: [FaceSpec; 6] = [
    FaceSpec {
        face: Face::Left,
        axis: Axis::X,
        layer: -1,
    },
    FaceSpec {
        face: Face::Right,
        axis: Axis::X,
        layer: 1,
    },
    FaceSpec {
        face: Face::Top,
        axis: Axis::Y,
        layer: 1,
    },
    FaceSpec {
        face: Face::Bottom,
        axis: Axis::Y,
        layer: -1,
    },
    FaceSpec {
        face: Face::Front,
        axis: Axis::Z,
        layer: -1,
    },
    FaceSpec {
        face: Face::Back,
        axis: Axis::Z,
        layer: 1,
    },
];

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Left,
        Face::Right,
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
    ];

    /// Position of this face in [`FACE_TABLE`] and [`Face::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Top => 2,
            Self::Bottom => 3,
            Self::Front => 4,
            Self::Back => 5,
        }
    }

    pub const fn spec(self) -> FaceSpec {
        FACE_TABLE[self.index()]
    }

    /// Axis the face turns around.
    pub const fn axis(self) -> Axis {
        self.spec().axis
    }

    /// Fixed coordinate of the face on its axis (-1 or 1).
    pub const fn layer(self) -> i32 {
        self.spec().layer
    }

    /// Canonical upper-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Top => "TOP",
            Self::Bottom => "BOTTOM",
            Self::Front => "FACE",
            Self::Back => "BACK",
        }
    }

    /// Outward integer normal.
    pub fn normal(self) -> IVec3 {
        self.axis().unit_i() * self.layer()
    }

    /// Whether `coord` lies on this face.
    pub fn contains(self, coord: GridCoord) -> bool {
        self.axis().component(coord.as_ivec3()) == self.layer()
    }

    /// The 9 coordinates of this face's group.
    pub fn coords(self) -> impl Iterator<Item = GridCoord> {
        GridCoord::all().filter(move |c| self.contains(*c))
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Face {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("FRONT") {
            return Ok(Self::Front);
        }
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CubeError::InvalidFace(s.to_string()))
    }
}

/// A set of faces, stored as a 6-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FaceSet(u8);

impl FaceSet {
    pub const EMPTY: Self = Self(0);

    pub fn insert(&mut self, face: Face) {
        self.0 |= 1 << face.index();
    }

    pub fn contains(self, face: Face) -> bool {
        self.0 & (1 << face.index()) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Faces in [`Face::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Face> {
        Face::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

impl FromIterator<Face> for FaceSet {
    fn from_iter<I: IntoIterator<Item = Face>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for face in iter {
            set.insert(face);
        }
        set
    }
}

/// Returns every face whose group contains `coord`.
///
/// Corners belong to three faces, edges to two, face centres to one and
/// the core to none.
pub fn faces_of(coord: GridCoord) -> FaceSet {
    let set: FaceSet = FACE_TABLE
        .iter()
        .filter(|spec| spec.face.contains(coord))
        .map(|spec| spec.face)
        .collect();
    debug_assert_eq!(set.len(), coord.outer_axes());
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_index() {
        for (i, spec) in FACE_TABLE.iter().enumerate() {
            assert_eq!(spec.face.index(), i);
            assert_eq!(Face::ALL[i], spec.face);
        }
    }

    #[test]
    fn test_axis_per_face() {
        assert_eq!(Face::Left.axis(), Axis::X);
        assert_eq!(Face::Right.axis(), Axis::X);
        assert_eq!(Face::Top.axis(), Axis::Y);
        assert_eq!(Face::Bottom.axis(), Axis::Y);
        assert_eq!(Face::Front.axis(), Axis::Z);
        assert_eq!(Face::Back.axis(), Axis::Z);
    }

    #[test]
    fn test_partition_completeness() {
        let mut union = std::collections::HashSet::new();
        for face in Face::ALL {
            union.extend(face.coords());
        }
        let outer: std::collections::HashSet<_> =
            GridCoord::all().filter(|c| c.outer_axes() > 0).collect();
        assert_eq!(union, outer);
        assert!(faces_of(GridCoord::CORE).is_empty());
    }

    #[test]
    fn test_each_face_has_nine_coords() {
        for face in Face::ALL {
            assert_eq!(face.coords().count(), 9, "{face}");
        }
    }

    #[test]
    fn test_faces_of_corner_edge_center() {
        let corner = GridCoord::try_new(1, 1, 1).unwrap();
        let faces = faces_of(corner);
        assert_eq!(faces.len(), 3);
        for face in [Face::Right, Face::Top, Face::Back] {
            assert!(faces.contains(face));
        }

        let edge = GridCoord::try_new(-1, 0, -1).unwrap();
        assert_eq!(
            faces_of(edge).iter().collect::<Vec<_>>(),
            vec![Face::Left, Face::Front]
        );

        let center = GridCoord::try_new(0, -1, 0).unwrap();
        assert_eq!(faces_of(center).iter().collect::<Vec<_>>(), vec![Face::Bottom]);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("LEFT".parse::<Face>().unwrap(), Face::Left);
        assert_eq!("face".parse::<Face>().unwrap(), Face::Front);
        assert_eq!("Front".parse::<Face>().unwrap(), Face::Front);
        assert_eq!(" back ".parse::<Face>().unwrap(), Face::Back);
        for face in Face::ALL {
            assert_eq!(face.name().parse::<Face>().unwrap(), face);
        }
    }

    #[test]
    fn test_parse_invalid_face() {
        let err = "MIDDLE".parse::<Face>().unwrap_err();
        assert!(matches!(err, CubeError::InvalidFace(name) if name == "MIDDLE"));
    }

    #[test]
    fn test_normal_points_outward() {
        assert_eq!(Face::Front.normal(), IVec3::new(0, 0, -1));
        assert_eq!(Face::Top.normal(), IVec3::Y);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Face::Front).unwrap();
        assert_eq!(json, "\"FACE\"");
        let face: Face = serde_json::from_str("\"BOTTOM\"").unwrap();
        assert_eq!(face, Face::Bottom);
    }
}
