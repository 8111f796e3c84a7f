use crate::{CHUNK_D, CHUNK_W};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cz: self.cz + dz,
        }
    }

    /// World X/Z of the chunk's minimum corner.
    #[inline]
    pub fn origin(self) -> (i32, i32) {
        (self.cx * CHUNK_W as i32, self.cz * CHUNK_D as i32)
    }

    /// Owning chunk and local column for a world X/Z. Uses floor division, so
    /// negative coordinates land in negative chunks.
    #[inline]
    pub fn from_world(wx: i32, wz: i32) -> (ChunkCoord, usize, usize) {
        let w = CHUNK_W as i32;
        let d = CHUNK_D as i32;
        (
            ChunkCoord::new(wx.div_euclid(w), wz.div_euclid(d)),
            wx.rem_euclid(w) as usize,
            wz.rem_euclid(d) as usize,
        )
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cz)
    }
}
