use std::error::Error;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use isle_blocks::{Block, BlockRegistry};

use crate::worldgen::{Palette, WorldGenParams};
use crate::{CHUNK_D, CHUNK_H, CHUNK_W, ISLAND_CENTER};

/// Block ids for every material the generator and tree planter write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainPalette {
    pub bedrock: Block,
    pub stone: Block,
    pub dirt: Block,
    pub sand: Block,
    pub water: Block,
    pub grass: Block,
    pub snow: Block,
    pub air: Block,
    pub log: Block,
    pub leaf: Block,
}

impl TerrainPalette {
    pub fn resolve(reg: &BlockRegistry, names: &Palette) -> Result<Self, Box<dyn Error>> {
        let pick = |role: &str, name: &str| -> Result<Block, Box<dyn Error>> {
            reg.block_by_name(name)
                .ok_or_else(|| format!("palette {role} block `{name}` is not registered").into())
        };
        Ok(TerrainPalette {
            bedrock: pick("bedrock", &names.bedrock)?,
            stone: pick("stone", &names.stone)?,
            dirt: pick("dirt", &names.dirt)?,
            sand: pick("sand", &names.sand)?,
            water: pick("water", &names.water)?,
            grass: pick("grass", &names.grass)?,
            snow: pick("snow", &names.snow)?,
            air: pick("air", &names.air)?,
            log: pick("log", &names.log)?,
            leaf: pick("leaf", &names.leaf)?,
        })
    }
}

pub struct TerrainGenerator {
    params: WorldGenParams,
    palette: TerrainPalette,
    noise: FastNoiseLite,
}

impl TerrainGenerator {
    pub fn new(params: WorldGenParams, palette: TerrainPalette) -> Self {
        let mut noise = FastNoiseLite::with_seed(params.seed);
        noise.set_noise_type(Some(NoiseType::Value));
        // Sample coordinates are already scaled by `factor`
        noise.set_frequency(Some(1.0));
        Self {
            params,
            palette,
            noise,
        }
    }

    #[inline]
    pub fn params(&self) -> &WorldGenParams {
        &self.params
    }

    #[inline]
    pub fn palette(&self) -> &TerrainPalette {
        &self.palette
    }

    /// Smooth 2D noise in [0, 1] at a world column.
    pub fn height_noise(&self, wx: i32, wz: i32) -> f32 {
        let p = &self.params;
        let sx = p.seed as f32 + wx as f32 * p.factor;
        let sz = p.seed as f32 + wz as f32 * p.factor;
        let n = self.noise.get_noise_2d(sx, sz);
        ((n + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Height of the stone surface for a column after island falloff.
    pub fn stone_layer(&self, wx: i32, wz: i32) -> i32 {
        let base = (10.0 + self.height_noise(wx, wz) * 15.0) as i32;
        let dx = wx as f32 - ISLAND_CENTER;
        let dz = wz as f32 - ISLAND_CENTER;
        let falloff = self.params.island_factor * (dx * dx + dz * dz);
        let multiplier = (1.0 - falloff).clamp(0.0, 2.0);
        (base as f32 * multiplier) as i32
    }

    /// First matching layer rule for height `y` in a column with the given stone layer.
    pub fn column_block(&self, y: i32, stone_layer: i32) -> Block {
        let p = &self.params;
        let pal = &self.palette;
        if y == 0 {
            pal.bedrock
        } else if y < stone_layer {
            pal.stone
        } else if y < stone_layer + 3 && stone_layer > p.water_level {
            pal.dirt
        } else if y == 1 {
            pal.sand
        } else if y < stone_layer + 4 && y < p.water_level {
            pal.sand
        } else if y < p.water_level {
            pal.water
        } else if y < stone_layer + 4 {
            if y < p.max_grass_level {
                pal.grass
            } else if y > p.snow_level {
                pal.snow
            } else {
                pal.stone
            }
        } else {
            pal.air
        }
    }

    pub fn block_at(&self, wx: i32, y: i32, wz: i32) -> Block {
        self.column_block(y, self.stone_layer(wx, wz))
    }

    /// Fills one chunk-sized region whose minimum corner is `(origin_x, 0, origin_z)`.
    /// `write` receives local coordinates.
    pub fn generate_into(
        &self,
        origin_x: i32,
        origin_z: i32,
        mut write: impl FnMut(usize, usize, usize, Block),
    ) {
        for x in 0..CHUNK_W {
            for z in 0..CHUNK_D {
                let stone = self.stone_layer(origin_x + x as i32, origin_z + z as i32);
                for y in 0..CHUNK_H {
                    write(x, y, z, self.column_block(y as i32, stone));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> TerrainPalette {
        let b = Block::new;
        TerrainPalette {
            bedrock: b(1),
            stone: b(2),
            dirt: b(3),
            sand: b(4),
            water: b(5),
            grass: b(6),
            snow: b(7),
            air: b(0),
            log: b(8),
            leaf: b(9),
        }
    }

    #[test]
    fn falloff_flattens_far_columns() {
        let tg = TerrainGenerator::new(WorldGenParams::default(), palette());
        // 0.0002 * 2 * 100^2 = 4, clamped multiplier is 0
        assert_eq!(tg.stone_layer(164, 164), 0);
    }

    #[test]
    fn zero_island_factor_keeps_base_range() {
        let params = WorldGenParams {
            island_factor: 0.0,
            ..WorldGenParams::default()
        };
        let tg = TerrainGenerator::new(params, palette());
        for wx in 0..32 {
            let s = tg.stone_layer(wx, 7);
            assert!((10..=25).contains(&s), "stone layer {s} at {wx}");
        }
    }
}
