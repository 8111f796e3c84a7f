use isle_blocks::FaceRole;
use isle_geom::Vec3;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosY = 0,
    NegY = 1,
    PosX = 2,
    NegX = 3,
    PosZ = 4,
    NegZ = 5,
}

/// Order faces are tested and emitted for each voxel.
pub const EMIT_ORDER: [Face; 6] = [
    Face::PosX,
    Face::NegX,
    Face::PosY,
    Face::NegY,
    Face::PosZ,
    Face::NegZ,
];

/// Two triangles over the four corners returned by [`Face::corners`].
pub const QUAD_INDICES: [u32; 6] = [0, 3, 1, 0, 2, 3];

const R: Vec3 = Vec3::RIGHT;
const U: Vec3 = Vec3::UP;
const F: Vec3 = Vec3::FORWARD;
const O: Vec3 = Vec3::ZERO;

impl Face {
    #[inline]
    pub fn normal(self) -> Vec3 {
        match self {
            Face::PosY => U,
            Face::NegY => -U,
            Face::PosX => R,
            Face::NegX => -R,
            Face::PosZ => F,
            Face::NegZ => -F,
        }
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
            Face::PosX => (1, 0, 0),
            Face::NegX => (-1, 0, 0),
            Face::PosZ => (0, 0, 1),
            Face::NegZ => (0, 0, -1),
        }
    }

    /// Classifies the face into top/bottom/side role for texture lookup.
    #[inline]
    pub fn role(self) -> FaceRole {
        match self {
            Face::PosY => FaceRole::Top,
            Face::NegY => FaceRole::Bottom,
            _ => FaceRole::Side,
        }
    }

    /// Corner offsets from a voxel's minimum corner. Paired with UV corners
    /// `(0,0) (1,0) (0,1) (1,1)` and [`QUAD_INDICES`], every triangle winds
    /// counter-clockwise seen from outside the voxel.
    #[inline]
    pub fn corners(self) -> [Vec3; 4] {
        match self {
            Face::PosX => [R, R + F, R + U, R + F + U],
            Face::NegX => [F, O, F + U, U],
            Face::PosY => [U, U + R, U + F, U + R + F],
            Face::NegY => [R, O, R + F, F],
            Face::PosZ => [F + R, F, F + R + U, F + U],
            Face::NegZ => [O, R, U, R + U],
        }
    }
}
