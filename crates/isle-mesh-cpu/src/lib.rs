//! CPU face-culling mesher: one opaque and one water stream per chunk.
#![forbid(unsafe_code)]

mod context;
pub mod face;
mod mesh_build;
mod neighbors;

pub use context::MeshContext;
pub use face::{EMIT_ORDER, Face, QUAD_INDICES};
pub use mesh_build::MeshBuild;
pub use neighbors::ChunkNeighbors;

use isle_blocks::{Block, RenderKind};
use isle_chunk::ChunkBuf;
use isle_geom::Vec3;
use isle_world::{CHUNK_D, CHUNK_H, CHUNK_W, ChunkCoord};

use context::MeshInfo;

/// Liquid surfaces span a whole texture of their own rather than an atlas tile.
const LIQUID_UV_ORIGIN: [f32; 2] = [0.0, 0.0];
const LIQUID_UV_SIZE: f32 = 1.0;

#[derive(Clone, Debug, Default)]
pub struct ChunkMeshCPU {
    pub coord: ChunkCoord,
    pub opaque: MeshBuild,
    pub water: MeshBuild,
    /// Edit revision of the chunk this mesh was built from.
    pub rev: u64,
}

impl ChunkMeshCPU {
    /// Geometry for physics; water is not collidable.
    #[inline]
    pub fn collision(&self) -> &MeshBuild {
        &self.opaque
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.opaque.is_empty() && self.water.is_empty()
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.opaque.quad_count() + self.water.quad_count()
    }
}

/// Whether a cube face of `cur` is visible against neighbor `n`.
#[inline]
fn cube_face_visible(cur: &MeshInfo, n: &MeshInfo) -> bool {
    (!cur.transparent && n.transparent) || n.behavior.is_empty()
}

/// Whether a liquid's surface shows against the block above it. Stacked
/// liquid of the same kind hides the lower surface.
#[inline]
fn liquid_top_visible(cur: Block, above: Block, above_info: &MeshInfo) -> bool {
    above_info.behavior.is_empty() || (above_info.transparent && above != cur)
}

pub fn build_chunk_mesh(
    buf: &ChunkBuf,
    neighbors: ChunkNeighbors<'_>,
    ctx: &MeshContext,
) -> ChunkMeshCPU {
    let mut opaque = MeshBuild::default();
    let mut water = MeshBuild::default();
    let uv_size = ctx.uv_size();
    for x in 0..CHUNK_W {
        for y in 0..CHUNK_H {
            for z in 0..CHUNK_D {
                let cur = buf.get_local(x, y, z);
                let info = ctx.info(cur);
                let p = Vec3::from_grid(x, y, z);
                match info.behavior.render {
                    RenderKind::None => {}
                    RenderKind::Liquid => {
                        let above = neighbors.sample(buf, x as i32, y as i32 + 1, z as i32);
                        if liquid_top_visible(cur, above, &ctx.info(above)) {
                            water.add_face(Face::PosY, p, LIQUID_UV_ORIGIN, LIQUID_UV_SIZE);
                        }
                    }
                    RenderKind::Cube => {
                        for face in EMIT_ORDER {
                            if face == Face::NegY && y == 0 {
                                continue;
                            }
                            let (dx, dy, dz) = face.delta();
                            let n = neighbors.sample(
                                buf,
                                x as i32 + dx,
                                y as i32 + dy,
                                z as i32 + dz,
                            );
                            if !cube_face_visible(&info, &ctx.info(n)) {
                                continue;
                            }
                            opaque.add_face(face, p, info.uv_for(face.role()), uv_size);
                        }
                    }
                }
            }
        }
    }
    log::trace!(
        "meshed chunk ({}, {}): {} opaque quads, {} water quads",
        buf.coord.cx,
        buf.coord.cz,
        opaque.quad_count(),
        water.quad_count()
    );
    ChunkMeshCPU {
        coord: buf.coord,
        opaque,
        water,
        rev: 0,
    }
}
