use isle_blocks::Block;
use isle_chunk::ChunkBuf;
use isle_world::{CHUNK_D, CHUNK_H, CHUNK_W};

/// Horizontally adjacent chunks borrowed for one mesh build. A missing
/// neighbor reads as air across the shared boundary.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChunkNeighbors<'a> {
    /// −X
    pub left: Option<&'a ChunkBuf>,
    /// +X
    pub right: Option<&'a ChunkBuf>,
    /// −Z
    pub front: Option<&'a ChunkBuf>,
    /// +Z
    pub back: Option<&'a ChunkBuf>,
}

impl<'a> ChunkNeighbors<'a> {
    #[inline]
    pub const fn none() -> Self {
        Self {
            left: None,
            right: None,
            front: None,
            back: None,
        }
    }

    #[inline]
    pub fn loaded_count(&self) -> usize {
        [self.left, self.right, self.front, self.back]
            .iter()
            .filter(|n| n.is_some())
            .count()
    }

    /// Block at local coordinates that may step one cell outside `buf` on
    /// X, Z, or above the top. Diagonal steps are not supported.
    #[inline]
    pub(crate) fn sample(&self, buf: &ChunkBuf, x: i32, y: i32, z: i32) -> Block {
        let w = CHUNK_W as i32;
        let d = CHUNK_D as i32;
        if y < 0 || y >= CHUNK_H as i32 {
            return Block::AIR;
        }
        let y = y as usize;
        if x < 0 {
            return edge(self.left, CHUNK_W - 1, y, z as usize);
        }
        if x >= w {
            return edge(self.right, 0, y, z as usize);
        }
        if z < 0 {
            return edge(self.front, x as usize, y, CHUNK_D - 1);
        }
        if z >= d {
            return edge(self.back, x as usize, y, 0);
        }
        buf.get_local(x as usize, y, z as usize)
    }
}

#[inline]
fn edge(chunk: Option<&ChunkBuf>, x: usize, y: usize, z: usize) -> Block {
    chunk.map(|c| c.get_local(x, y, z)).unwrap_or(Block::AIR)
}
