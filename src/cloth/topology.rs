//! 布料拓扑构建
//!
//! N×N 粒子网格铺在锚点局部空间的XY平面上，第0行位于 +Y 一侧 (顶部)，
//! 粒子下标为 `row * N + col`。只生成水平和竖直相邻粒子之间的结构约束，
//! 没有剪切和弯曲约束；顶行两个角 (下标 0 与 N−1) 被钉住。

use crate::core::error::{ClothError, ClothResult};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// 固定静止长度的默认值
pub const DEFAULT_REST_DISTANCE: f32 = 0.5;

/// 结构约束的静止长度取值方式
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RestDistance {
    /// 与网格间距无关的常量
    Fixed(f32),
    /// 使用实际网格间距 `size / (N − 1)`
    FromSpacing,
}

impl Default for RestDistance {
    fn default() -> Self {
        RestDistance::Fixed(DEFAULT_REST_DISTANCE)
    }
}

impl RestDistance {
    pub fn resolve(self, spacing: f32) -> f32 {
        match self {
            RestDistance::Fixed(distance) => distance,
            RestDistance::FromSpacing => spacing,
        }
    }
}

/// 布料粒子
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClothParticle {
    pub index: usize,
    /// 质量，0 表示钉住
    pub mass: f32,
    /// 锚点局部空间中的静止位置
    pub rest_position: Vec3,
}

impl ClothParticle {
    pub fn is_pinned(&self) -> bool {
        self.mass == 0.0
    }
}

/// 约束方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDirection {
    /// 同一行相邻列
    Horizontal,
    /// 同一列相邻行
    Vertical,
}

impl LinkDirection {
    /// 从粒子A指向粒子B的局部方向
    pub fn local_axis(self) -> Vec3 {
        match self {
            LinkDirection::Horizontal => Vec3::X,
            LinkDirection::Vertical => Vec3::NEG_Y,
        }
    }
}

/// 结构约束 (刚性距离链接)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClothConstraint {
    pub particle_a: usize,
    pub particle_b: usize,
    pub rest_distance: f32,
    pub direction: LinkDirection,
}

impl ClothConstraint {
    /// 两端刚体上的锚点
    ///
    /// 锚点沿相邻方向各偏移半个静止长度，求解器把两个锚点拉到一起后，
    /// 粒子间距即为 `rest_distance`。
    pub fn anchors(&self, rotation: Quat) -> (Vec3, Vec3) {
        let offset = rotation * self.direction.local_axis() * (self.rest_distance * 0.5);
        (offset, -offset)
    }
}

/// 构建结果
#[derive(Debug, Clone, PartialEq)]
pub struct ClothTopology {
    pub size: f32,
    pub resolution: usize,
    /// 相邻粒子的实际间距
    pub spacing: f32,
    pub particles: Vec<ClothParticle>,
    pub constraints: Vec<ClothConstraint>,
}

impl ClothTopology {
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.resolution + col
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// 钉住的粒子下标
    pub fn pinned(&self) -> Vec<usize> {
        self.particles
            .iter()
            .filter(|particle| particle.is_pinned())
            .map(|particle| particle.index)
            .collect()
    }
}

/// 布料拓扑构建器
#[derive(Debug, Clone)]
pub struct ClothTopologyBuilder {
    size: f32,
    resolution: usize,
    particle_mass: f32,
    rest_distance: RestDistance,
}

impl ClothTopologyBuilder {
    pub fn new(size: f32, resolution: usize) -> Self {
        Self {
            size,
            resolution,
            particle_mass: 0.1,
            rest_distance: RestDistance::default(),
        }
    }

    pub fn with_particle_mass(mut self, mass: f32) -> Self {
        self.particle_mass = mass;
        self
    }

    pub fn with_rest_distance(mut self, rest_distance: RestDistance) -> Self {
        self.rest_distance = rest_distance;
        self
    }

    /// 构建粒子网格与结构约束
    ///
    /// 分辨率小于2会得到没有约束的退化拓扑，直接拒绝。
    pub fn build(&self) -> ClothResult<ClothTopology> {
        let n = self.resolution;
        if n < 2 {
            return Err(ClothError::InvalidResolution(n));
        }
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(ClothError::InvalidSize(self.size));
        }
        if !(self.particle_mass.is_finite() && self.particle_mass > 0.0) {
            return Err(ClothError::InvalidMass(self.particle_mass));
        }

        let spacing = self.size / (n - 1) as f32;
        let half = self.size * 0.5;
        let rest_distance = self.rest_distance.resolve(spacing);

        let mut particles = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                let index = row * n + col;
                let pinned = index == 0 || index == n - 1;
                particles.push(ClothParticle {
                    index,
                    mass: if pinned { 0.0 } else { self.particle_mass },
                    rest_position: Vec3::new(
                        -half + col as f32 * spacing,
                        half - row as f32 * spacing,
                        0.0,
                    ),
                });
            }
        }

        let mut constraints = Vec::with_capacity(2 * n * (n - 1));
        for row in 0..n {
            for col in 0..n {
                let index = row * n + col;
                if col + 1 < n {
                    constraints.push(ClothConstraint {
                        particle_a: index,
                        particle_b: index + 1,
                        rest_distance,
                        direction: LinkDirection::Horizontal,
                    });
                }
                if row + 1 < n {
                    constraints.push(ClothConstraint {
                        particle_a: index,
                        particle_b: index + n,
                        rest_distance,
                        direction: LinkDirection::Vertical,
                    });
                }
            }
        }

        Ok(ClothTopology {
            size: self.size,
            resolution: n,
            spacing,
            particles,
            constraints,
        })
    }
}
