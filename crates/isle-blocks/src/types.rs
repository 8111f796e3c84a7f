use serde::Deserialize;

pub type BlockId = u8;

// Compact voxel representation stored in chunk buffers
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug)]
pub struct Block {
    pub id: BlockId,
}

impl Block {
    pub const AIR: Block = Block { id: 0 };

    #[inline]
    pub const fn new(id: BlockId) -> Self {
        Self { id }
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self.id == Self::AIR.id
    }
}

// Used by cube faces to resolve which texture to apply
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FaceRole {
    Top,
    Bottom,
    Side,
}

/// How the mesher treats a block type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderKind {
    /// Six atlas-textured faces, culled against neighbors.
    Cube,
    /// Top surface only, emitted into the water stream.
    Liquid,
    /// No geometry; counts as empty space for neighbor visibility.
    None,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockBehavior {
    pub render: RenderKind,
    pub collidable: bool,
}

impl BlockBehavior {
    #[inline]
    pub fn is_empty(self) -> bool {
        self.render == RenderKind::None
    }
}
