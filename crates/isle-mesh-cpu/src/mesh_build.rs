use isle_geom::Vec3;

use crate::face::{Face, QUAD_INDICES};

const UV_CORNERS: [(f32, f32); 4] = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)];

/// One geometry stream: flat xyz positions, xyz normals, uv pairs, and triangle indices.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub uv: Vec<f32>,
    pub idx: Vec<u32>,
}

impl MeshBuild {
    /// Appends one voxel face at voxel corner `p`. UVs span the square
    /// `uv_origin .. uv_origin + uv_size`.
    pub fn add_face(&mut self, face: Face, p: Vec3, uv_origin: [f32; 2], uv_size: f32) {
        let base = self.vertex_count() as u32;
        let n = face.normal();
        for (corner, (u, v)) in face.corners().into_iter().zip(UV_CORNERS) {
            let c = p + corner;
            self.pos.extend_from_slice(&[c.x, c.y, c.z]);
            self.norm.extend_from_slice(&[n.x, n.y, n.z]);
            self.uv
                .extend_from_slice(&[uv_origin[0] + u * uv_size, uv_origin[1] + v * uv_size]);
        }
        self.idx.extend(QUAD_INDICES.iter().map(|i| base + i));
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.idx.len() / 6
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }

    #[inline]
    pub fn vertex(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos[i * 3], self.pos[i * 3 + 1], self.pos[i * 3 + 2])
    }

    #[inline]
    pub fn normal(&self, i: usize) -> Vec3 {
        Vec3::new(self.norm[i * 3], self.norm[i * 3 + 1], self.norm[i * 3 + 2])
    }
}
