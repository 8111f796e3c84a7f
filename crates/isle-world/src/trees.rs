use isle_blocks::Block;

use crate::ISLAND_CENTER;
use crate::terrain::TerrainPalette;
use crate::worldgen::WorldGenParams;

/// Height of a trunk in logs.
pub const TRUNK_HEIGHT: i32 = 8;

/// Tree candidate columns laid out on a golden-angle spiral around the island
/// center, reaching out to the island radius.
pub fn tree_spiral(params: &WorldGenParams) -> Vec<(i32, i32)> {
    let count = params.tree_count();
    let phi = (1.0 + 5.0f32.sqrt()) / 2.0;
    let radius = ISLAND_CENTER;
    (0..count)
        .map(|i| {
            let distance = if count > 1 {
                i as f32 / (count - 1) as f32
            } else {
                0.0
            };
            let angle = 2.0 * std::f32::consts::PI * phi * i as f32;
            let x = ISLAND_CENTER + radius * distance * angle.cos();
            let z = ISLAND_CENTER + radius * distance * angle.sin();
            (x as i32, z as i32)
        })
        .collect()
}

/// Block writes for one tree rooted at `(x, root_y, z)`, in application order.
/// Later writes overwrite earlier ones, so each trunk step's leaf cap is
/// replaced by the next log and only the top cap survives.
pub fn tree_writes(x: i32, root_y: i32, z: i32, palette: &TerrainPalette) -> Vec<([i32; 3], Block)> {
    let mut out = Vec::with_capacity(TRUNK_HEIGHT as usize * 6 + 4);
    for i in 0..TRUNK_HEIGHT {
        let y = root_y + i;
        out.push(([x, y, z], palette.log));
        if i >= 3 {
            for (dx, dz) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                out.push(([x + dx, y, z + dz], palette.leaf));
            }
        }
        if i == 5 {
            for (dx, dz) in [(-1, -1), (1, -1), (-1, 1), (1, 1)] {
                out.push(([x + dx, y, z + dz], palette.leaf));
            }
        }
        out.push(([x, y + 1, z], palette.leaf));
    }
    out
}
