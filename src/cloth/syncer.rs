//! 求解器结果回写
//!
//! 粒子 i 永远对应顶点 i，这个映射在拓扑构建时固定，之后不会重排。

use super::topology::ClothTopology;
use crate::animation::TransformSnapshot;
use crate::physics::{BodyHandle, SimulationBridge};
use glam::Vec3;

/// 可渲染的布料顶点缓冲
#[derive(Debug, Clone, PartialEq)]
pub struct ClothMesh {
    /// 锚点局部空间中的顶点位置
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    /// 网格三角形索引 (每个格子两个三角形)
    pub indices: Vec<u32>,
    pub resolution: usize,
    pub positions_dirty: bool,
    pub normals_dirty: bool,
}

impl ClothMesh {
    /// 从静止位置构建顶点缓冲
    pub fn from_topology(topology: &ClothTopology) -> Self {
        let n = topology.resolution;
        let positions = topology
            .particles
            .iter()
            .map(|particle| particle.rest_position.to_array())
            .collect::<Vec<_>>();

        let mut indices = Vec::with_capacity((n - 1) * (n - 1) * 6);
        for row in 0..n.saturating_sub(1) {
            for col in 0..n.saturating_sub(1) {
                let a = (row * n + col) as u32;
                let b = a + 1;
                let c = a + n as u32;
                let d = c + 1;
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        let mut mesh = Self {
            normals: vec![[0.0, 0.0, 1.0]; positions.len()],
            positions,
            indices,
            resolution: n,
            positions_dirty: true,
            normals_dirty: true,
        };
        mesh.recompute_normals();
        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn position(&self, index: usize) -> Option<Vec3> {
        self.positions.get(index).copied().map(Vec3::from_array)
    }

    /// 上传GPU用的原始字节
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// 按面积加权重新计算顶点法线并清除脏标记
    pub fn recompute_normals(&mut self) {
        let mut accumulated = vec![Vec3::ZERO; self.positions.len()];
        for triangle in self.indices.chunks_exact(3) {
            let [a, b, c] = [
                triangle[0] as usize,
                triangle[1] as usize,
                triangle[2] as usize,
            ];
            let pa = Vec3::from_array(self.positions[a]);
            let pb = Vec3::from_array(self.positions[b]);
            let pc = Vec3::from_array(self.positions[c]);
            let face = (pb - pa).cross(pc - pa);
            accumulated[a] += face;
            accumulated[b] += face;
            accumulated[c] += face;
        }

        for (normal, sum) in self.normals.iter_mut().zip(accumulated) {
            *normal = sum.try_normalize().unwrap_or(Vec3::Z).to_array();
        }
        self.normals_dirty = false;
    }
}

pub struct ClothSyncer;

impl ClothSyncer {
    /// 把求解器中的粒子位置写回顶点缓冲
    ///
    /// 世界坐标先变换到锚点局部空间；读不到位置的粒子保持原顶点不变。
    /// 返回成功写入的顶点数。
    pub fn sync<B: SimulationBridge + ?Sized>(
        bridge: &B,
        bodies: &[BodyHandle],
        anchor: &TransformSnapshot,
        mesh: &mut ClothMesh,
    ) -> usize {
        let to_local = anchor.to_affine().inverse();
        let mut written = 0;

        for (index, handle) in bodies.iter().enumerate() {
            let Some(slot) = mesh.positions.get_mut(index) else {
                break;
            };
            match bridge.read_position(*handle) {
                Some(world) => {
                    *slot = to_local.transform_point3(world).to_array();
                    written += 1;
                }
                None => {
                    tracing::warn!(
                        target: "cloth",
                        "Particle {} has no solver position ({})",
                        index,
                        handle
                    );
                }
            }
        }

        if written > 0 {
            mesh.positions_dirty = true;
            mesh.normals_dirty = true;
        }
        written
    }
}
