//! Authoritative logical state of the 27 cubelets.
//!
//! [`CubeModel`] owns every cubelet's grid coordinate and orientation.
//! Rendering transforms are derived from it, never the other way round.

use crate::error::CubeError;
use crate::face::{Face, FaceSet, faces_of};
use crate::grid::{Axis, GridCoord, Orientation};

/// Number of cubelets, including the hidden core.
pub const CUBELET_COUNT: usize = 27;

/// Number of cubelets in one face-group.
pub const FACE_GROUP_SIZE: usize = 9;

/// Logical state of a single cubelet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeletState {
    /// Stable identity, also the index into [`CubeModel::cubelets`].
    pub id: usize,
    /// Coordinate the cubelet was created at.
    pub home: GridCoord,
    /// Current coordinate.
    pub coord: GridCoord,
    /// Accumulated rotation since creation.
    pub orientation: Orientation,
}

impl CubeletState {
    /// Faces whose group currently contains this cubelet.
    pub fn faces(&self) -> FaceSet {
        faces_of(self.coord)
    }

    fn quarter_turn(&mut self, axis: Axis) {
        self.coord = self.coord.quarter_turned(axis);
        self.orientation = self.orientation.quarter_turned(axis);
    }
}

/// Result of committing one quarter turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRecord {
    pub face: Face,
    pub axis: Axis,
    /// Ids of the cubelets that moved.
    pub members: Vec<usize>,
}

/// The whole cube: 27 cubelets on the integer grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeModel {
    cubelets: Vec<CubeletState>,
    turns: u64,
}

impl Default for CubeModel {
    fn default() -> Self {
        Self::new()
    }
}

impl CubeModel {
    /// Creates a cube with one cubelet per grid position, all unrotated.
    pub fn new() -> Self {
        let cubelets = GridCoord::all()
            .enumerate()
            .map(|(id, coord)| CubeletState {
                id,
                home: coord,
                coord,
                orientation: Orientation::IDENTITY,
            })
            .collect();
        Self { cubelets, turns: 0 }
    }

    pub fn cubelets(&self) -> &[CubeletState] {
        &self.cubelets
    }

    pub fn cubelet(&self, id: usize) -> Option<&CubeletState> {
        self.cubelets.get(id)
    }

    /// Number of quarter turns committed so far.
    pub fn turn_count(&self) -> u64 {
        self.turns
    }

    /// Ids of the cubelets currently on `face`, derived from their coordinates.
    pub fn face_group(&self, face: Face) -> Vec<usize> {
        self.cubelets
            .iter()
            .filter(|c| face.contains(c.coord))
            .map(|c| c.id)
            .collect()
    }

    /// The cubelet currently at `coord`, if any.
    pub fn at(&self, coord: GridCoord) -> Option<&CubeletState> {
        self.cubelets.iter().find(|c| c.coord == coord)
    }

    /// Turns `face` by +90° immediately.
    pub fn quarter_turn(&mut self, face: Face) -> TurnRecord {
        let members = self.face_group(face);
        self.commit_members(face, &members)
    }

    /// Applies a quarter turn of `face` to a member set captured earlier.
    ///
    /// The members must be the face-group at the time the turn was
    /// requested; each one is turned exactly once.
    pub fn commit_members(&mut self, face: Face, members: &[usize]) -> TurnRecord {
        let axis = face.axis();
        for &id in members {
            if let Some(cubelet) = self.cubelets.get_mut(id) {
                debug_assert!(face.contains(cubelet.coord), "cubelet {id} left {face} mid-turn");
                cubelet.quarter_turn(axis);
            }
        }
        self.turns += 1;
        TurnRecord {
            face,
            axis,
            members: members.to_vec(),
        }
    }

    /// Checks the rest-state invariants: every position occupied exactly
    /// once and every face-group holding exactly nine cubelets.
    pub fn validate(&self) -> Result<(), CubeError> {
        let mut seen = [false; CUBELET_COUNT];
        for cubelet in &self.cubelets {
            let v = cubelet.coord.as_ivec3();
            let slot = ((v.x + 1) * 9 + (v.y + 1) * 3 + (v.z + 1)) as usize;
            if std::mem::replace(&mut seen[slot], true) {
                return Err(CubeError::Inconsistent(format!(
                    "two cubelets share position {}",
                    cubelet.coord
                )));
            }
        }
        for face in Face::ALL {
            let size = self.face_group(face).len();
            if size != FACE_GROUP_SIZE {
                return Err(CubeError::Inconsistent(format!(
                    "face {face} holds {size} cubelets"
                )));
            }
        }
        Ok(())
    }
}
