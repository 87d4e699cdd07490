//! Integer grid math for the 3x3x3 cube.
//!
//! Every cubelet's authoritative state lives on the integer grid: a
//! [`GridCoord`] in {-1, 0, 1}³ and an [`Orientation`] that is an exact
//! integer rotation matrix. Quarter turns are applied with a fixed
//! integer formula so no floating-point error ever reaches this state.
//!
//! Sign convention: a quarter turn is +90° right-handed about the positive
//! axis (counter-clockwise when looking from +axis towards the origin).

use std::fmt;

use bevy::math::{IVec3, Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::CubeError;

/// Lowest layer index on any axis.
pub const GRID_MIN: i32 = -1;
/// Highest layer index on any axis.
pub const GRID_MAX: i32 = 1;

/// Rotation axis of a face turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Unit vector along the positive axis.
    pub fn unit(self) -> Vec3 {
        match self {
            Self::X => Vec3::X,
            Self::Y => Vec3::Y,
            Self::Z => Vec3::Z,
        }
    }

    /// Integer unit vector along the positive axis.
    pub fn unit_i(self) -> IVec3 {
        match self {
            Self::X => IVec3::X,
            Self::Y => IVec3::Y,
            Self::Z => IVec3::Z,
        }
    }

    /// Picks this axis' component out of an integer vector.
    pub fn component(self, v: IVec3) -> i32 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
            Self::Z => v.z,
        }
    }
}

/// Rotates an integer vector by +90° about `axis`.
pub fn quarter_turn(v: IVec3, axis: Axis) -> IVec3 {
    match axis {
        Axis::X => IVec3::new(v.x, -v.z, v.y),
        Axis::Y => IVec3::new(v.z, v.y, -v.x),
        Axis::Z => IVec3::new(-v.y, v.x, v.z),
    }
}

/// A cubelet position on the 3x3x3 grid.
///
/// Can only hold coordinates whose components are all in {-1, 0, 1}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoord(IVec3);

impl GridCoord {
    /// The hidden core cubelet.
    pub const CORE: Self = Self(IVec3::ZERO);

    /// Creates a coordinate, rejecting anything off the grid.
    pub fn try_new(x: i32, y: i32, z: i32) -> Result<Self, CubeError> {
        let range = GRID_MIN..=GRID_MAX;
        if range.contains(&x) && range.contains(&y) && range.contains(&z) {
            Ok(Self(IVec3::new(x, y, z)))
        } else {
            Err(CubeError::OffGrid { x, y, z })
        }
    }

    /// Creates a coordinate from an integer vector.
    pub fn from_ivec3(v: IVec3) -> Result<Self, CubeError> {
        Self::try_new(v.x, v.y, v.z)
    }

    /// Snaps a continuous position to the nearest grid coordinate.
    ///
    /// `spacing` is the world distance between neighbouring cubelets.
    pub fn from_translation(translation: Vec3, spacing: f32) -> Result<Self, CubeError> {
        let v = (translation / spacing).round().as_ivec3();
        Self::from_ivec3(v)
    }

    /// All 27 grid coordinates in x-major order.
    pub fn all() -> impl Iterator<Item = GridCoord> {
        (GRID_MIN..=GRID_MAX).flat_map(|x| {
            (GRID_MIN..=GRID_MAX)
                .flat_map(move |y| (GRID_MIN..=GRID_MAX).map(move |z| Self(IVec3::new(x, y, z))))
        })
    }

    pub fn x(self) -> i32 {
        self.0.x
    }

    pub fn y(self) -> i32 {
        self.0.y
    }

    pub fn z(self) -> i32 {
        self.0.z
    }

    pub fn as_ivec3(self) -> IVec3 {
        self.0
    }

    /// World-space translation of this coordinate.
    pub fn to_translation(self, spacing: f32) -> Vec3 {
        self.0.as_vec3() * spacing
    }

    /// The coordinate after a +90° turn about `axis` through the cube centre.
    pub fn quarter_turned(self, axis: Axis) -> Self {
        // Rotations about the centre map the grid onto itself.
        Self(quarter_turn(self.0, axis))
    }

    /// Number of non-zero components: 3 for corners, 2 for edges,
    /// 1 for face centres, 0 for the core.
    pub fn outer_axes(self) -> usize {
        self.0.to_array().iter().filter(|c| **c != 0).count()
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

/// Exact orientation of a cubelet, as an integer rotation matrix.
///
/// Each column is the image of the corresponding basis vector, so every
/// entry is -1, 0 or 1 and the matrix is always a multiple of 90° on
/// every axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation {
    cols: [IVec3; 3],
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Orientation {
    pub const IDENTITY: Self = Self {
        cols: [IVec3::X, IVec3::Y, IVec3::Z],
    };

    /// The orientation after an additional +90° turn about `axis`.
    pub fn quarter_turned(self, axis: Axis) -> Self {
        Self {
            cols: self.cols.map(|c| quarter_turn(c, axis)),
        }
    }

    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// Image of an integer vector under this orientation.
    pub fn apply(self, v: IVec3) -> IVec3 {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }

    /// Rendering rotation for this orientation.
    pub fn to_quat(self) -> Quat {
        let [x, y, z] = self.cols.map(|c| c.as_vec3());
        Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
    }
}
