use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use isle_atlas::{TextureAtlas, placeholder_tiles};
use isle_blocks::BlockRegistry;
use isle_runtime::{EditOutcome, WorldContext, WorldGrid};
use isle_world::{WorldGenConfig, WorldGenParams};

/// Generate an island voxel world, mesh it, and report what was built.
#[derive(Parser, Debug)]
#[command(name = "isle", version)]
struct Args {
    /// Worldgen TOML; built-in defaults when omitted
    #[arg(long)]
    world: Option<PathBuf>,
    /// Block list (TOML, or the JSON layout when the extension is .json)
    #[arg(long, default_value = "assets/voxels/blocks.toml")]
    blocks: PathBuf,
    /// Directory of 16x16 PNG tiles; flat placeholder tiles when omitted
    #[arg(long)]
    textures: Option<PathBuf>,
    /// Write the packed atlas here
    #[arg(long)]
    atlas_out: Option<PathBuf>,
    /// Override the terrain seed
    #[arg(long)]
    seed: Option<i32>,
    /// Block edit applied after generation, as `x,y,z,block` (repeatable)
    #[arg(long = "set", value_parser = parse_edit)]
    edits: Vec<Edit>,
    /// Plant a tree after generation at column `x,z` (repeatable)
    #[arg(long = "plant", value_parser = parse_column)]
    trees: Vec<(i32, i32)>,
    /// Report the underwater blend for a viewer at this height
    #[arg(long)]
    probe_y: Option<f32>,
}

#[derive(Clone, Debug)]
struct Edit {
    x: i32,
    y: i32,
    z: i32,
    block: String,
}

fn parse_edit(s: &str) -> Result<Edit, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z, block] = parts.as_slice() else {
        return Err(format!("expected x,y,z,block, got `{s}`"));
    };
    let num = |v: &str| v.parse::<i32>().map_err(|e| format!("`{v}`: {e}"));
    Ok(Edit {
        x: num(*x)?,
        y: num(*y)?,
        z: num(*z)?,
        block: block.to_string(),
    })
}

fn parse_column(s: &str) -> Result<(i32, i32), String> {
    let (x, z) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,z, got `{s}`"))?;
    let num = |v: &str| v.trim().parse::<i32>().map_err(|e| format!("`{v}`: {e}"));
    Ok((num(x)?, num(z)?))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let cfg = match &args.world {
        Some(path) => WorldGenConfig::from_path(path)?,
        None => WorldGenConfig::default(),
    };
    let mut params = WorldGenParams::from_config(&cfg);
    if let Some(seed) = args.seed {
        params.seed = seed;
    }

    let reg = Arc::new(BlockRegistry::load_from_path(&args.blocks)?);
    let atlas = match &args.textures {
        Some(dir) => TextureAtlas::load_dir(dir)?,
        None => {
            log::info!("no texture directory given, using placeholder tiles");
            TextureAtlas::build(placeholder_tiles(&reg.texture_names()))?
        }
    };
    if let Some(out) = &args.atlas_out {
        atlas.save_png(out)?;
    }

    let ctx = WorldContext::new(params, reg.clone(), Arc::new(atlas))?;
    let mut world = WorldGrid::generate(ctx);

    for (x, z) in &args.trees {
        match world.place_tree(*x, *z, true) {
            EditOutcome::Remeshed(coords) => {
                log::info!("planted tree at ({x}, {z}), remeshed {} chunks", coords.len())
            }
            _ => log::warn!("no grass to plant a tree at ({x}, {z})"),
        }
    }
    for e in &args.edits {
        let block = reg
            .block_by_name(&e.block)
            .ok_or_else(|| format!("unknown block `{}`", e.block))?;
        match world.set_block(e.x, e.y, e.z, block, true) {
            EditOutcome::Remeshed(coords) => {
                log::info!("set ({}, {}, {}) to {}, remeshed {coords:?}", e.x, e.y, e.z, e.block)
            }
            _ => log::warn!("edit at ({}, {}, {}) is outside the world", e.x, e.y, e.z),
        }
    }
    if let Some(y) = args.probe_y {
        log::info!(
            "underwater blend at y = {y}: {:.3} (water level {})",
            world.underwater_blend(y),
            world.water_level()
        );
    }

    let stats = world.stats();
    log::info!(
        "{} chunks, {} trees, {} opaque quads, {} water quads",
        stats.chunks,
        stats.trees_planted,
        stats.opaque_quads,
        stats.water_quads
    );
    Ok(())
}
