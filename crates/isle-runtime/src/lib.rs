//! World grid: owns every chunk and its mesh, runs generation, applies edits.
#![forbid(unsafe_code)]

use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

use hashbrown::HashSet;
use isle_atlas::TextureAtlas;
use isle_blocks::{Block, BlockRegistry};
use isle_chunk::{ChunkBuf, generate_chunk_buffer};
use isle_edit::EditTracker;
use isle_mesh_cpu::{ChunkMeshCPU, ChunkNeighbors, MeshContext, build_chunk_mesh};
use isle_world::{
    CHUNK_H, ChunkCoord, TerrainGenerator, TerrainPalette, WorldGenParams, tree_spiral,
    tree_writes, underwater_blend,
};

/// Shared, immutable inputs for generating and meshing a world.
pub struct WorldContext {
    pub reg: Arc<BlockRegistry>,
    pub terrain: TerrainGenerator,
    pub mesh: MeshContext,
}

impl WorldContext {
    pub fn new(
        params: WorldGenParams,
        reg: Arc<BlockRegistry>,
        atlas: Arc<TextureAtlas>,
    ) -> Result<Self, Box<dyn Error>> {
        params.validate()?;
        let palette = TerrainPalette::resolve(&reg, &params.palette)?;
        let mesh = MeshContext::new(reg.clone(), atlas)?;
        Ok(WorldContext {
            reg,
            terrain: TerrainGenerator::new(params, palette),
            mesh,
        })
    }

    #[inline]
    pub fn params(&self) -> &WorldGenParams {
        self.terrain.params()
    }
}

/// Result of a block edit request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// Outside the grid; nothing changed.
    Ignored,
    /// Written; meshes are stale until remeshed.
    Deferred,
    /// Written and these chunks were remeshed, owner first.
    Remeshed(Vec<ChunkCoord>),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    pub chunks: usize,
    pub trees_planted: usize,
    pub trees_skipped: usize,
    pub opaque_quads: usize,
    pub water_quads: usize,
}

pub struct WorldGrid {
    ctx: WorldContext,
    chunks_x: i32,
    chunks_z: i32,
    chunks: Vec<ChunkBuf>,
    meshes: Vec<Option<ChunkMeshCPU>>,
    edits: EditTracker,
    rebuilt: Vec<ChunkCoord>,
    rebuilt_set: HashSet<ChunkCoord>,
    trees_planted: usize,
    trees_skipped: usize,
}

impl WorldGrid {
    /// Fills every chunk, plants the spiral trees, then meshes every chunk once.
    pub fn generate(ctx: WorldContext) -> WorldGrid {
        let t0 = Instant::now();
        let chunks_x = ctx.params().chunks_x;
        let chunks_z = ctx.params().chunks_z;
        let mut chunks = Vec::with_capacity(chunks_x.max(0) as usize * chunks_z.max(0) as usize);
        for cz in 0..chunks_z {
            for cx in 0..chunks_x {
                chunks.push(generate_chunk_buffer(ChunkCoord::new(cx, cz), &ctx.terrain));
            }
        }
        let t_terrain = t0.elapsed();
        let meshes = (0..chunks.len()).map(|_| None).collect();
        let mut grid = WorldGrid {
            ctx,
            chunks_x,
            chunks_z,
            chunks,
            meshes,
            edits: EditTracker::new(chunks_x, chunks_z),
            rebuilt: Vec::new(),
            rebuilt_set: HashSet::new(),
            trees_planted: 0,
            trees_skipped: 0,
        };

        let t1 = Instant::now();
        for (x, z) in tree_spiral(grid.params()) {
            match grid.place_tree(x, z, false) {
                EditOutcome::Ignored => {
                    grid.trees_skipped += 1;
                    log::debug!("no grass for a tree at ({x}, {z})");
                }
                _ => grid.trees_planted += 1,
            }
        }
        let t_trees = t1.elapsed();

        let t2 = Instant::now();
        for cz in 0..chunks_z {
            for cx in 0..chunks_x {
                grid.remesh_chunk(ChunkCoord::new(cx, cz));
            }
        }
        let stats = grid.stats();
        log::info!(
            "generated {}x{} chunks: terrain {:?}, trees {:?} ({} planted, {} skipped), meshing {:?}; {} opaque quads, {} water quads",
            chunks_x,
            chunks_z,
            t_terrain,
            t_trees,
            stats.trees_planted,
            stats.trees_skipped,
            t2.elapsed(),
            stats.opaque_quads,
            stats.water_quads
        );
        grid
    }

    #[inline]
    pub fn params(&self) -> &WorldGenParams {
        self.ctx.params()
    }

    #[inline]
    pub fn registry(&self) -> &Arc<BlockRegistry> {
        &self.ctx.reg
    }

    #[inline]
    pub fn palette(&self) -> &TerrainPalette {
        self.ctx.terrain.palette()
    }

    #[inline]
    pub fn chunk_counts(&self) -> (i32, i32) {
        (self.chunks_x, self.chunks_z)
    }

    #[inline]
    pub fn water_level(&self) -> i32 {
        self.params().water_level
    }

    /// Underwater overlay strength for a viewer at height `player_y`.
    pub fn underwater_blend(&self, player_y: f32) -> f32 {
        let p = self.params();
        underwater_blend(
            player_y,
            p.water_level as f32,
            (p.underwater_start, p.underwater_end),
        )
    }

    #[inline]
    fn index(&self, c: ChunkCoord) -> Option<usize> {
        if (0..self.chunks_x).contains(&c.cx) && (0..self.chunks_z).contains(&c.cz) {
            Some((c.cz * self.chunks_x + c.cx) as usize)
        } else {
            None
        }
    }

    pub fn chunk(&self, c: ChunkCoord) -> Option<&ChunkBuf> {
        self.index(c).map(|i| &self.chunks[i])
    }

    pub fn mesh(&self, c: ChunkCoord) -> Option<&ChunkMeshCPU> {
        self.index(c).and_then(|i| self.meshes[i].as_ref())
    }

    pub fn neighbors(&self, c: ChunkCoord) -> ChunkNeighbors<'_> {
        ChunkNeighbors {
            left: self.chunk(c.offset(-1, 0)),
            right: self.chunk(c.offset(1, 0)),
            front: self.chunk(c.offset(0, -1)),
            back: self.chunk(c.offset(0, 1)),
        }
    }

    pub fn block_at(&self, x: i32, y: i32, z: i32) -> Option<Block> {
        let (c, lx, lz) = ChunkCoord::from_world(x, z);
        self.chunk(c)?.get(lx as i32, y, lz as i32)
    }

    /// Writes one block at world coordinates. With `remesh`, the owning chunk
    /// and any neighbor sharing the touched boundary are rebuilt immediately.
    ///
    /// Panics if `block` is not in the registry.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: Block, remesh: bool) -> EditOutcome {
        self.ctx.reg.expect_type(block.id);
        let (c, lx, lz) = ChunkCoord::from_world(x, z);
        let Some(i) = self.index(c) else {
            log::debug!("ignored edit at ({x}, {y}, {z}): outside the grid");
            return EditOutcome::Ignored;
        };
        if !self.chunks[i].set(lx as i32, y, lz as i32, block) {
            log::debug!("ignored edit at ({x}, {y}, {z}): outside the chunk height");
            return EditOutcome::Ignored;
        }
        let (_, affected) = self.edits.bump_region_around(x, z);
        if !remesh {
            return EditOutcome::Deferred;
        }
        for n in &affected {
            self.remesh_chunk(*n);
        }
        log::debug!("edit at ({x}, {y}, {z}) remeshed {affected:?}");
        EditOutcome::Remeshed(affected)
    }

    /// Plants a tree on the highest grass block of column `(x, z)`. With
    /// `remesh`, every chunk the tree touched is rebuilt once afterwards.
    pub fn place_tree(&mut self, x: i32, z: i32, remesh: bool) -> EditOutcome {
        let (c, lx, lz) = ChunkCoord::from_world(x, z);
        let Some(i) = self.index(c) else {
            return EditOutcome::Ignored;
        };
        let grass = self.palette().grass;
        let buf = &self.chunks[i];
        let Some(top_grass) = (0..CHUNK_H)
            .rev()
            .find(|y| buf.get_local(lx, *y, lz) == grass)
        else {
            return EditOutcome::Ignored;
        };
        let root = top_grass as i32 + 1;
        let palette = *self.palette();
        let mut touched: HashSet<ChunkCoord> = HashSet::new();
        for ([wx, wy, wz], block) in tree_writes(x, root, z, &palette) {
            if self.set_block(wx, wy, wz, block, false) != EditOutcome::Ignored {
                touched.extend(self.edits.affected_chunks(wx, wz));
            }
        }
        if !remesh {
            return EditOutcome::Deferred;
        }
        let mut coords: Vec<ChunkCoord> = touched.into_iter().collect();
        coords.sort();
        // Owner first, matching set_block
        if let Some(pos) = coords.iter().position(|n| *n == c) {
            coords.remove(pos);
        }
        coords.insert(0, c);
        for n in &coords {
            self.remesh_chunk(*n);
        }
        log::debug!("tree at ({x}, {z}) remeshed {coords:?}");
        EditOutcome::Remeshed(coords)
    }

    /// Rebuilds one chunk's mesh from its current blocks. Returns false for
    /// coordinates outside the grid.
    pub fn remesh_chunk(&mut self, c: ChunkCoord) -> bool {
        let Some(i) = self.index(c) else {
            return false;
        };
        let mut mesh = build_chunk_mesh(&self.chunks[i], self.neighbors(c), &self.ctx.mesh);
        let rev = self.edits.get_rev(c);
        mesh.rev = rev;
        self.meshes[i] = Some(mesh);
        self.edits.mark_built(c, rev);
        if self.rebuilt_set.insert(c) {
            self.rebuilt.push(c);
        }
        true
    }

    /// Rebuilds every chunk with deferred edits, in coordinate order.
    pub fn remesh_dirty(&mut self) -> Vec<ChunkCoord> {
        let dirty = self.edits.dirty_chunks();
        for c in &dirty {
            self.remesh_chunk(*c);
        }
        dirty
    }

    pub fn needs_remesh(&self, c: ChunkCoord) -> bool {
        self.edits.needs_rebuild(c)
    }

    /// Chunks whose mesh was rebuilt since the last drain, in first-rebuilt order.
    pub fn drain_rebuilt(&mut self) -> Vec<ChunkCoord> {
        self.rebuilt_set.clear();
        std::mem::take(&mut self.rebuilt)
    }

    pub fn stats(&self) -> WorldStats {
        let mut s = WorldStats {
            chunks: self.chunks.len(),
            trees_planted: self.trees_planted,
            trees_skipped: self.trees_skipped,
            ..WorldStats::default()
        };
        for m in self.meshes.iter().flatten() {
            s.opaque_quads += m.opaque.quad_count();
            s.water_quads += m.water.quad_count();
        }
        s
    }
}
