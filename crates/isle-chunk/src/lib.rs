//! Chunk buffer and terrain fill.
#![forbid(unsafe_code)]

use isle_blocks::Block;
use isle_world::{CHUNK_D, CHUNK_H, CHUNK_W, ChunkCoord, TerrainGenerator};

pub const CHUNK_VOLUME: usize = CHUNK_W * CHUNK_H * CHUNK_D;

#[derive(Clone, Debug)]
pub struct ChunkBuf {
    pub coord: ChunkCoord,
    blocks: Vec<Block>,
}

impl ChunkBuf {
    pub fn new_air(coord: ChunkCoord) -> Self {
        ChunkBuf {
            coord,
            blocks: vec![Block::AIR; CHUNK_VOLUME],
        }
    }

    /// Wraps an existing block array laid out by [`ChunkBuf::idx`]. Short input
    /// is padded with air, long input truncated.
    pub fn from_blocks_local(coord: ChunkCoord, blocks: Vec<Block>) -> Self {
        let mut b = blocks;
        if b.len() != CHUNK_VOLUME {
            b.resize(CHUNK_VOLUME, Block::AIR);
        }
        ChunkBuf { coord, blocks: b }
    }

    #[inline]
    pub fn idx(x: usize, y: usize, z: usize) -> usize {
        x + y * CHUNK_W + z * CHUNK_W * CHUNK_H
    }

    #[inline]
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_W as i32).contains(&x)
            && (0..CHUNK_H as i32).contains(&y)
            && (0..CHUNK_D as i32).contains(&z)
    }

    /// Unchecked read for loops already bounded by the chunk extents.
    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Block {
        self.blocks[Self::idx(x, y, z)]
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<Block> {
        if !Self::in_bounds(x, y, z) {
            return None;
        }
        Some(self.get_local(x as usize, y as usize, z as usize))
    }

    /// Writes one block; returns false and leaves the buffer untouched when out of range.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: i32, block: Block) -> bool {
        if !Self::in_bounds(x, y, z) {
            return false;
        }
        let i = Self::idx(x as usize, y as usize, z as usize);
        self.blocks[i] = block;
        true
    }

    #[inline]
    pub fn get_world(&self, wx: i32, wy: i32, wz: i32) -> Option<Block> {
        let (ox, oz) = self.coord.origin();
        self.get(wx - ox, wy, wz - oz)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.blocks.iter().any(|b| *b != Block::AIR)
    }

    /// Number of cells holding `block`.
    pub fn count(&self, block: Block) -> usize {
        self.blocks.iter().filter(|b| **b == block).count()
    }
}

pub fn generate_chunk_buffer(coord: ChunkCoord, terrain: &TerrainGenerator) -> ChunkBuf {
    let mut buf = ChunkBuf::new_air(coord);
    let (ox, oz) = coord.origin();
    terrain.generate_into(ox, oz, |x, y, z, block| {
        buf.blocks[ChunkBuf::idx(x, y, z)] = block;
    });
    buf
}
