use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use super::config::{BlockDef, BlocksConfig, TexturesDef};
use super::types::{Block, BlockBehavior, BlockId, FaceRole, RenderKind};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FaceTextures {
    pub top: Option<String>,
    pub bottom: Option<String>,
    pub side: Option<String>,
}

impl FaceTextures {
    fn compile(def: TexturesDef) -> Self {
        let all = def.all;
        FaceTextures {
            top: def.top.or_else(|| all.clone()),
            bottom: def.bottom.or_else(|| all.clone()),
            side: def.side.or(all),
        }
    }

    #[inline]
    pub fn for_role(&self, role: FaceRole) -> Option<&str> {
        match role {
            FaceRole::Top => self.top.as_deref(),
            FaceRole::Bottom => self.bottom.as_deref(),
            FaceRole::Side => self.side.as_deref(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub transparent: bool,
    pub behavior: BlockBehavior,
    pub textures: FaceTextures,
}

impl BlockType {
    #[inline]
    pub fn texture_for(&self, role: FaceRole) -> Option<&str> {
        self.textures.for_role(role)
    }

    #[inline]
    pub fn block(&self) -> Block {
        Block::new(self.id)
    }
}

/// Block types indexed by id, with a lowercase name lookup.
#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    blocks: Vec<Option<BlockType>>,
    by_name: HashMap<String, BlockId>,
}

impl BlockRegistry {
    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize).and_then(|b| b.as_ref())
    }

    /// Lookup for ids that came out of a chunk buffer. An unregistered id there
    /// means the buffer was filled from a different registry.
    pub fn expect_type(&self, id: BlockId) -> &BlockType {
        match self.get(id) {
            Some(ty) => ty,
            None => panic!("block id {id} is not registered"),
        }
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(&name.to_ascii_lowercase()).copied()
    }

    pub fn block_by_name(&self, name: &str) -> Option<Block> {
        self.id_by_name(name).map(Block::new)
    }

    /// Panics for an unregistered id, like [`BlockRegistry::expect_type`].
    #[inline]
    pub fn behavior(&self, block: Block) -> BlockBehavior {
        self.expect_type(block.id).behavior
    }

    #[inline]
    pub fn is_transparent(&self, block: Block) -> bool {
        self.expect_type(block.id).transparent
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockType> {
        self.blocks.iter().filter_map(|b| b.as_ref())
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Every distinct texture name referenced by any face of any block, sorted.
    pub fn texture_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .iter()
            .flat_map(|ty| {
                [FaceRole::Top, FaceRole::Bottom, FaceRole::Side]
                    .into_iter()
                    .filter_map(|r| ty.texture_for(r).map(str::to_string))
            })
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Loads a block list from disk. `.json` files use the JSON layout, anything
    /// else is parsed as TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let reg = if is_json {
            Self::from_json_str(&text)?
        } else {
            Self::from_toml_str(&text)?
        };
        log::info!(
            "loaded {} block types from {}",
            reg.len(),
            path.display()
        );
        Ok(reg)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn from_json_str(json_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = serde_json::from_str(json_str)?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, Box<dyn Error>> {
        if cfg.blocks.is_empty() {
            return Err("block list is empty".into());
        }
        let mut reg = BlockRegistry::default();
        for def in cfg.blocks {
            let ty = compile_block(def);
            let idx = ty.id as usize;
            if reg.by_name.contains_key(&ty.name) {
                return Err(format!("duplicate block name `{}`", ty.name).into());
            }
            if reg.blocks.len() <= idx {
                reg.blocks.resize(idx + 1, None);
            }
            if let Some(existing) = &reg.blocks[idx] {
                return Err(format!(
                    "duplicate block id {}: `{}` and `{}`",
                    ty.id, existing.name, ty.name
                )
                .into());
            }
            reg.by_name.insert(ty.name.clone(), ty.id);
            reg.blocks[idx] = Some(ty);
        }
        if reg.get(Block::AIR.id).is_none() {
            return Err("block list has no entry with id 0 (air)".into());
        }
        Ok(reg)
    }
}

fn compile_block(def: BlockDef) -> BlockType {
    let name = def.name.to_ascii_lowercase();
    let render = def.render.unwrap_or_else(|| default_render(def.id, &name));
    let collidable = def.collidable.unwrap_or(render == RenderKind::Cube);
    BlockType {
        id: def.id,
        name,
        transparent: def.transparent,
        behavior: BlockBehavior { render, collidable },
        textures: FaceTextures::compile(def.textures),
    }
}

fn default_render(id: BlockId, name: &str) -> RenderKind {
    if id == Block::AIR.id {
        RenderKind::None
    } else if name == "water" {
        RenderKind::Liquid
    } else {
        RenderKind::Cube
    }
}
