use isle_blocks::{Block, BlockRegistry};
use isle_chunk::{CHUNK_VOLUME, ChunkBuf, generate_chunk_buffer};
use isle_world::{
    CHUNK_D, CHUNK_H, CHUNK_W, ChunkCoord, TerrainGenerator, TerrainPalette, WorldGenParams,
};
use proptest::prelude::*;

fn terrain(params: WorldGenParams) -> TerrainGenerator {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let reg = BlockRegistry::load_from_path(root.join("../../assets/voxels/blocks.toml")).unwrap();
    let pal = TerrainPalette::resolve(&reg, &params.palette).unwrap();
    TerrainGenerator::new(params, pal)
}

fn numbered(coord: ChunkCoord) -> ChunkBuf {
    let blocks = (0..CHUNK_VOLUME).map(|i| Block::new((i % 251) as u8)).collect();
    ChunkBuf::from_blocks_local(coord, blocks)
}

#[test]
fn idx_layout_is_x_then_y_then_z() {
    assert_eq!(ChunkBuf::idx(0, 0, 0), 0);
    assert_eq!(ChunkBuf::idx(1, 0, 0), 1);
    assert_eq!(ChunkBuf::idx(0, 1, 0), 16);
    assert_eq!(ChunkBuf::idx(0, 0, 1), 16 * 32);
    assert_eq!(ChunkBuf::idx(15, 31, 15), CHUNK_VOLUME - 1);
}

#[test]
fn out_of_range_access_is_rejected() {
    let mut buf = ChunkBuf::new_air(ChunkCoord::new(0, 0));
    let stone = Block::new(2);
    for (x, y, z) in [(-1, 0, 0), (16, 0, 0), (0, -1, 0), (0, 32, 0), (0, 0, -1), (0, 0, 16)] {
        assert_eq!(buf.get(x, y, z), None);
        assert!(!buf.set(x, y, z, stone));
    }
    assert!(!buf.has_non_air());
    assert!(buf.set(15, 31, 15, stone));
    assert_eq!(buf.get(15, 31, 15), Some(stone));
    assert_eq!(buf.count(stone), 1);
}

#[test]
fn short_block_arrays_are_padded_with_air() {
    let buf = ChunkBuf::from_blocks_local(ChunkCoord::new(0, 0), vec![Block::new(3); 10]);
    assert_eq!(buf.blocks().len(), CHUNK_VOLUME);
    assert_eq!(buf.get_local(9, 0, 0), Block::new(3));
    assert_eq!(buf.get_local(10, 0, 0), Block::AIR);
}

#[test]
fn generated_chunk_matches_terrain_sampler() {
    let tg = terrain(WorldGenParams::default());
    let coord = ChunkCoord::new(3, 4);
    let buf = generate_chunk_buffer(coord, &tg);
    let (ox, oz) = coord.origin();
    for x in 0..CHUNK_W {
        for z in 0..CHUNK_D {
            for y in 0..CHUNK_H {
                let expect = tg.block_at(ox + x as i32, y as i32, oz + z as i32);
                assert_eq!(buf.get_local(x, y, z), expect);
            }
        }
    }
    // Bottom layer is all bedrock
    let bedrock = tg.palette().bedrock;
    assert_eq!(buf.count(bedrock), CHUNK_W * CHUNK_D);
}

proptest! {
    // get/set agree with the flat layout for any in-range cell
    #[test]
    fn set_then_get(x in 0i32..16, y in 0i32..32, z in 0i32..16, id in 0u8..=255) {
        let mut buf = numbered(ChunkCoord::new(0, 0));
        let before = buf.blocks().to_vec();
        prop_assert!(buf.set(x, y, z, Block::new(id)));
        prop_assert_eq!(buf.get(x, y, z), Some(Block::new(id)));
        let i = ChunkBuf::idx(x as usize, y as usize, z as usize);
        for (j, (a, b)) in before.iter().zip(buf.blocks()).enumerate() {
            if j != i {
                prop_assert_eq!(a, b);
            }
        }
    }

    // get_world resolves only inside the chunk's own column footprint
    #[test]
    fn get_world_agrees_with_local(cx in -100i32..100, cz in -100i32..100, dx in -2i32..18, y in -2i32..34, dz in -2i32..18) {
        let coord = ChunkCoord::new(cx, cz);
        let buf = numbered(coord);
        let (ox, oz) = coord.origin();
        prop_assert_eq!(buf.get_world(ox + dx, y, oz + dz), buf.get(dx, y, dz));
    }

    #[test]
    fn generation_is_deterministic(seed in any::<i32>(), cx in -4i32..12, cz in -4i32..12) {
        let params = WorldGenParams { seed, ..WorldGenParams::default() };
        let a = generate_chunk_buffer(ChunkCoord::new(cx, cz), &terrain(params.clone()));
        let b = generate_chunk_buffer(ChunkCoord::new(cx, cz), &terrain(params));
        prop_assert_eq!(a.blocks(), b.blocks());
    }
}
