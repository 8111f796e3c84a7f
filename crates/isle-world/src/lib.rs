//! Island sizing, terrain sampling, tree layout, and worldgen parameters.
#![forbid(unsafe_code)]

mod chunk_coord;
pub mod terrain;
pub mod trees;
mod underwater;
pub mod worldgen;

pub use chunk_coord::ChunkCoord;
pub use terrain::{TerrainGenerator, TerrainPalette};
pub use trees::{tree_spiral, tree_writes};
pub use underwater::underwater_blend;
pub use worldgen::{MAX_CHUNKS_PER_AXIS, WorldGenConfig, WorldGenParams, load_params_from_path};

pub const CHUNK_W: usize = 16;
pub const CHUNK_H: usize = 32;
pub const CHUNK_D: usize = 16;

/// World-space X/Z of the island's center; falloff and the tree spiral are measured from here.
pub const ISLAND_CENTER: f32 = 64.0;
