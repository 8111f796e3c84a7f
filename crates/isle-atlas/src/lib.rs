//! Packs 16x16 block textures into one square atlas and records each tile's UV origin.
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use image::{Rgba, RgbaImage, imageops};

/// Edge length of every tile, in texels.
pub const TILE_SIZE: u32 = 16;

/// Tiles per atlas row for `n` textures: the smallest power of two whose
/// square holds them all. `n <= 1` gives 1.
pub fn atlas_dimension(n: usize) -> u32 {
    let mut d: u32 = 1;
    while (d as usize) * (d as usize) < n {
        d *= 2;
    }
    d
}

#[derive(Clone, Debug)]
pub struct TextureAtlas {
    image: RgbaImage,
    dimension: u32,
    uvs: HashMap<String, [f32; 2]>,
    order: Vec<String>,
}

impl TextureAtlas {
    /// Texture `i` lands in cell `(i % dimension, i / dimension)`, rows counted
    /// from the bottom of the image so UV v grows upward.
    pub fn build(textures: Vec<(String, RgbaImage)>) -> Result<Self, Box<dyn Error>> {
        let dimension = atlas_dimension(textures.len());
        let side = dimension * TILE_SIZE;
        let mut image = RgbaImage::new(side, side);
        let mut uvs = HashMap::with_capacity(textures.len());
        let mut order = Vec::with_capacity(textures.len());
        for (i, (name, tile)) in textures.into_iter().enumerate() {
            if tile.dimensions() != (TILE_SIZE, TILE_SIZE) {
                let (w, h) = tile.dimensions();
                return Err(format!(
                    "texture `{name}` is {w}x{h}, expected {TILE_SIZE}x{TILE_SIZE}"
                )
                .into());
            }
            if uvs.contains_key(&name) {
                return Err(format!("duplicate texture name `{name}`").into());
            }
            let i = i as u32;
            let col = i % dimension;
            let row = i / dimension;
            let px = col * TILE_SIZE;
            let py = side - (row + 1) * TILE_SIZE;
            imageops::replace(&mut image, &tile, px as i64, py as i64);
            let d = dimension as f32;
            uvs.insert(name.clone(), [col as f32 / d, row as f32 / d]);
            order.push(name);
        }
        log::debug!(
            "packed {} textures into a {}x{} atlas",
            order.len(),
            side,
            side
        );
        Ok(TextureAtlas {
            image,
            dimension,
            uvs,
            order,
        })
    }

    /// Reads every `*.png` in `dir`, named by file stem and packed in stem order.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_png = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("png"));
            if is_png && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_stem().cmp(&b.file_stem()));
        let mut tiles = Vec::with_capacity(paths.len());
        for path in paths {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| format!("non-utf8 texture file name: {}", path.display()))?
                .to_string();
            let img = image::open(&path)
                .map_err(|e| format!("failed to load texture {}: {e}", path.display()))?
                .to_rgba8();
            tiles.push((name, img));
        }
        let atlas = Self::build(tiles)?;
        log::info!(
            "built {}x{} atlas from {} textures in {}",
            atlas.dimension,
            atlas.dimension,
            atlas.len(),
            dir.display()
        );
        Ok(atlas)
    }

    #[inline]
    pub fn dimension(&self) -> u32 {
        self.dimension
    }

    /// Width of one tile in UV space.
    #[inline]
    pub fn tile_uv_size(&self) -> f32 {
        1.0 / self.dimension as f32
    }

    pub fn uv_origin(&self, name: &str) -> Option<[f32; 2]> {
        self.uvs.get(name).copied()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Texture names in packing order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
        let path = path.as_ref();
        self.image.save(path)?;
        log::info!("wrote atlas to {}", path.display());
        Ok(())
    }
}

/// Flat-colored stand-in tiles, one per name, for running without texture files.
/// Colors are a stable function of the name.
pub fn placeholder_tiles<S: AsRef<str>>(names: &[S]) -> Vec<(String, RgbaImage)> {
    names
        .iter()
        .map(|n| {
            let name = n.as_ref();
            let [r, g, b] = name_color(name);
            let tile = RgbaImage::from_fn(TILE_SIZE, TILE_SIZE, |x, y| {
                let edge = x == 0 || y == 0 || x == TILE_SIZE - 1 || y == TILE_SIZE - 1;
                if edge {
                    Rgba([r / 2, g / 2, b / 2, 255])
                } else {
                    Rgba([r, g, b, 255])
                }
            });
            (name.to_string(), tile)
        })
        .collect()
}

// FNV-1a over the name bytes
fn name_color(name: &str) -> [u8; 3] {
    let mut h: u32 = 0x811c_9dc5;
    for b in name.bytes() {
        h ^= b as u32;
        h = h.wrapping_mul(0x0100_0193);
    }
    [(h >> 16) as u8 | 0x20, (h >> 8) as u8 | 0x20, h as u8 | 0x20]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_color_is_stable_and_not_black() {
        assert_eq!(name_color("stone"), name_color("stone"));
        let c = name_color("");
        assert!(c.iter().all(|v| *v >= 0x20));
    }
}
