use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct WorldGenConfig {
    #[serde(default)]
    pub terrain: Terrain,
    #[serde(default)]
    pub trees: Trees,
    #[serde(default)]
    pub world: WorldSize,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub underwater: Underwater,
}

impl WorldGenConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err(|e| format!("failed to read worldgen config {}: {e}", path.display()))?;
        let cfg = Self::from_toml_str(&s)?;
        log::info!("loaded worldgen config from {}", path.display());
        Ok(cfg)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Terrain {
    #[serde(default = "default_seed")]
    pub seed: i32,
    // Noise sampling step per world unit
    #[serde(default = "default_factor")]
    pub factor: f32,
    // Falloff strength of the island edge; 0 disables it
    #[serde(default = "default_island_factor")]
    pub island_factor: f32,
    #[serde(default = "default_water_level")]
    pub water_level: i32,
    #[serde(default = "default_max_grass_level")]
    pub max_grass_level: i32,
    #[serde(default = "default_snow_level")]
    pub snow_level: i32,
}
fn default_seed() -> i32 {
    4113
}
fn default_factor() -> f32 {
    0.07
}
fn default_island_factor() -> f32 {
    0.0002
}
fn default_water_level() -> i32 {
    12
}
fn default_max_grass_level() -> i32 {
    18
}
fn default_snow_level() -> i32 {
    21
}
impl Default for Terrain {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            factor: default_factor(),
            island_factor: default_island_factor(),
            water_level: default_water_level(),
            max_grass_level: default_max_grass_level(),
            snow_level: default_snow_level(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Trees {
    #[serde(default = "default_trees_per_chunk")]
    pub per_chunk: u32,
}
fn default_trees_per_chunk() -> u32 {
    4
}
impl Default for Trees {
    fn default() -> Self {
        Self {
            per_chunk: default_trees_per_chunk(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldSize {
    #[serde(default = "default_chunk_count")]
    pub chunks_x: i32,
    #[serde(default = "default_chunk_count")]
    pub chunks_z: i32,
}
fn default_chunk_count() -> i32 {
    8
}
impl Default for WorldSize {
    fn default() -> Self {
        Self {
            chunks_x: default_chunk_count(),
            chunks_z: default_chunk_count(),
        }
    }
}

// Registry names the generator writes
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Palette {
    #[serde(default = "default_bedrock")]
    pub bedrock: String,
    #[serde(default = "default_stone")]
    pub stone: String,
    #[serde(default = "default_dirt")]
    pub dirt: String,
    #[serde(default = "default_sand")]
    pub sand: String,
    #[serde(default = "default_water")]
    pub water: String,
    #[serde(default = "default_grass")]
    pub grass: String,
    #[serde(default = "default_snow")]
    pub snow: String,
    #[serde(default = "default_air")]
    pub air: String,
    #[serde(default = "default_log")]
    pub log: String,
    #[serde(default = "default_leaf")]
    pub leaf: String,
}
fn default_bedrock() -> String {
    "bedrock".into()
}
fn default_stone() -> String {
    "stone".into()
}
fn default_dirt() -> String {
    "dirt".into()
}
fn default_sand() -> String {
    "sand".into()
}
fn default_water() -> String {
    "water".into()
}
fn default_grass() -> String {
    "grass".into()
}
fn default_snow() -> String {
    "snow".into()
}
fn default_air() -> String {
    "air".into()
}
fn default_log() -> String {
    "log".into()
}
fn default_leaf() -> String {
    "leaf".into()
}
impl Default for Palette {
    fn default() -> Self {
        Self {
            bedrock: default_bedrock(),
            stone: default_stone(),
            dirt: default_dirt(),
            sand: default_sand(),
            water: default_water(),
            grass: default_grass(),
            snow: default_snow(),
            air: default_air(),
            log: default_log(),
            leaf: default_leaf(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Underwater {
    // Offsets from the water level where the overlay starts and finishes fading in
    #[serde(default = "default_start_transition")]
    pub start_transition: f32,
    #[serde(default = "default_end_transition")]
    pub end_transition: f32,
}
fn default_start_transition() -> f32 {
    0.5
}
fn default_end_transition() -> f32 {
    -0.5
}
impl Default for Underwater {
    fn default() -> Self {
        Self {
            start_transition: default_start_transition(),
            end_transition: default_end_transition(),
        }
    }
}

/// Largest chunk count accepted on either world axis.
pub const MAX_CHUNKS_PER_AXIS: i32 = 1024;

// Flattened params used by the generator and world grid (snapshot of config)
#[derive(Clone, Debug, PartialEq)]
pub struct WorldGenParams {
    pub seed: i32,
    pub factor: f32,
    pub island_factor: f32,
    pub water_level: i32,
    pub max_grass_level: i32,
    pub snow_level: i32,
    pub trees_per_chunk: u32,
    pub chunks_x: i32,
    pub chunks_z: i32,
    pub palette: Palette,
    pub underwater_start: f32,
    pub underwater_end: f32,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self::from_config(&WorldGenConfig::default())
    }
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        Self {
            seed: cfg.terrain.seed,
            factor: cfg.terrain.factor,
            island_factor: cfg.terrain.island_factor,
            water_level: cfg.terrain.water_level,
            max_grass_level: cfg.terrain.max_grass_level,
            snow_level: cfg.terrain.snow_level,
            trees_per_chunk: cfg.trees.per_chunk,
            chunks_x: cfg.world.chunks_x,
            chunks_z: cfg.world.chunks_z,
            palette: cfg.palette.clone(),
            underwater_start: cfg.underwater.start_transition,
            underwater_end: cfg.underwater.end_transition,
        }
    }

    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.chunks_x <= 0 || self.chunks_z <= 0 {
            return Err(format!(
                "world must have at least one chunk per axis, got {}x{}",
                self.chunks_x, self.chunks_z
            )
            .into());
        }
        if self.chunks_x > MAX_CHUNKS_PER_AXIS || self.chunks_z > MAX_CHUNKS_PER_AXIS {
            return Err(format!(
                "world is {}x{} chunks, at most {MAX_CHUNKS_PER_AXIS} per axis is supported",
                self.chunks_x, self.chunks_z
            )
            .into());
        }
        if self.underwater_start <= self.underwater_end {
            return Err(format!(
                "underwater start_transition ({}) must be above end_transition ({})",
                self.underwater_start, self.underwater_end
            )
            .into());
        }
        Ok(())
    }

    #[inline]
    pub fn tree_count(&self) -> usize {
        self.chunks_x.max(0) as usize * self.chunks_z.max(0) as usize * self.trees_per_chunk as usize
    }
}

pub fn load_params_from_path(path: &Path) -> Result<WorldGenParams, Box<dyn Error>> {
    let cfg = WorldGenConfig::from_path(path)?;
    let params = WorldGenParams::from_config(&cfg);
    params.validate()?;
    Ok(params)
}
