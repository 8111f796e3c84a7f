use serde::Deserialize;

use crate::types::{BlockId, RenderKind};

// Top-level blocks file: `[[blocks]]` tables in TOML, or `{"blocks": [...]}` in JSON
#[derive(Deserialize, Debug, Clone)]
pub struct BlocksConfig {
    pub blocks: Vec<BlockDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockDef {
    pub id: BlockId,
    pub name: String,
    // Older JSON block files spell this "transparant"
    #[serde(default, alias = "transparant")]
    pub transparent: bool,
    #[serde(default)]
    pub textures: TexturesDef,
    // Absent means: derive from the id/name (air -> none, water -> liquid, else cube)
    #[serde(default)]
    pub render: Option<RenderKind>,
    #[serde(default)]
    pub collidable: Option<bool>,
}

// Per-face texture names; `all` fills any face left unset
#[derive(Deserialize, Debug, Clone, Default)]
pub struct TexturesDef {
    #[serde(default)]
    pub all: Option<String>,
    #[serde(default)]
    pub top: Option<String>,
    #[serde(default)]
    pub bottom: Option<String>,
    #[serde(default)]
    pub side: Option<String>,
}
