use std::error::Error;
use std::sync::Arc;

use isle_atlas::TextureAtlas;
use isle_blocks::{Block, BlockBehavior, BlockRegistry, FaceRole, RenderKind};

#[derive(Clone, Copy, Debug)]
pub(crate) struct MeshInfo {
    pub transparent: bool,
    pub behavior: BlockBehavior,
    // UV origins for top, bottom, side; unused for non-cube blocks
    pub uvs: [[f32; 2]; 3],
}

impl MeshInfo {
    #[inline]
    pub fn uv_for(&self, role: FaceRole) -> [f32; 2] {
        match role {
            FaceRole::Top => self.uvs[0],
            FaceRole::Bottom => self.uvs[1],
            FaceRole::Side => self.uvs[2],
        }
    }
}

/// Registry and atlas shared by every mesh build, with face UVs resolved up front.
pub struct MeshContext {
    reg: Arc<BlockRegistry>,
    atlas: Arc<TextureAtlas>,
    infos: Vec<Option<MeshInfo>>,
    uv_size: f32,
}

impl MeshContext {
    pub fn new(reg: Arc<BlockRegistry>, atlas: Arc<TextureAtlas>) -> Result<Self, Box<dyn Error>> {
        let mut infos: Vec<Option<MeshInfo>> = Vec::new();
        for ty in reg.iter() {
            let mut uvs = [[0.0; 2]; 3];
            if ty.behavior.render == RenderKind::Cube {
                for (slot, role) in [FaceRole::Top, FaceRole::Bottom, FaceRole::Side]
                    .into_iter()
                    .enumerate()
                {
                    let name = ty.texture_for(role).ok_or_else(|| {
                        format!("block `{}` has no {role:?} texture", ty.name)
                    })?;
                    uvs[slot] = atlas.uv_origin(name).ok_or_else(|| {
                        format!("texture `{name}` for block `{}` is not in the atlas", ty.name)
                    })?;
                }
            }
            let idx = ty.id as usize;
            if infos.len() <= idx {
                infos.resize(idx + 1, None);
            }
            infos[idx] = Some(MeshInfo {
                transparent: ty.transparent,
                behavior: ty.behavior,
                uvs,
            });
        }
        let uv_size = atlas.tile_uv_size();
        Ok(MeshContext {
            reg,
            atlas,
            infos,
            uv_size,
        })
    }

    #[inline]
    pub fn registry(&self) -> &Arc<BlockRegistry> {
        &self.reg
    }

    #[inline]
    pub fn atlas(&self) -> &Arc<TextureAtlas> {
        &self.atlas
    }

    #[inline]
    pub fn uv_size(&self) -> f32 {
        self.uv_size
    }

    /// Atlas UV origin for one face role of a cube block.
    pub fn uv_origin(&self, block: Block, role: FaceRole) -> [f32; 2] {
        self.info(block).uv_for(role)
    }

    #[inline]
    pub(crate) fn info(&self, block: Block) -> MeshInfo {
        match self.infos.get(block.id as usize).and_then(|i| i.as_ref()) {
            Some(info) => *info,
            None => {
                // Every registered id has an entry, so this panics
                let ty = self.reg.expect_type(block.id);
                MeshInfo {
                    transparent: ty.transparent,
                    behavior: ty.behavior,
                    uvs: [[0.0; 2]; 3],
                }
            }
        }
    }
}
