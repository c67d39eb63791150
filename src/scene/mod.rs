//! 场景协作接口
//!
//! 编辑器核心不拥有场景图，只通过 `SceneAccess` 查询和修改节点：
//! - 按ID查找对象并读写变换
//! - 查询几何描述 (可识别的基本体参数或原始包围盒)
//! - 添加 / 删除节点
//!
//! `SceneStore` 是一个简单的内存实现，供宿主和测试使用。

pub mod bounds;
pub mod store;

pub use bounds::Aabb;
pub use store::SceneStore;

use crate::animation::{ObjectId, TransformSnapshot};
use serde::{Deserialize, Serialize};

/// 几何描述
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GeometryDescriptor {
    /// 长方体
    Box { width: f32, height: f32, depth: f32 },
    /// 球体
    Sphere { radius: f32 },
    /// 圆柱 (上下半径可以不同)
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
    },
    /// 任意网格，只提供局部空间包围盒
    Mesh { local_bounds: Aabb },
    /// 布料网格自身
    Cloth { size: f32, resolution: usize },
}

impl GeometryDescriptor {
    /// 局部空间包围盒
    pub fn local_bounds(&self) -> Aabb {
        match *self {
            GeometryDescriptor::Box {
                width,
                height,
                depth,
            } => Aabb::from_half_extents(glam::Vec3::new(width, height, depth) * 0.5),
            GeometryDescriptor::Sphere { radius } => {
                Aabb::from_half_extents(glam::Vec3::splat(radius))
            }
            GeometryDescriptor::Cylinder {
                radius_top,
                radius_bottom,
                height,
            } => {
                let radius = radius_top.max(radius_bottom);
                Aabb::from_half_extents(glam::Vec3::new(radius, height * 0.5, radius))
            }
            GeometryDescriptor::Mesh { local_bounds } => local_bounds,
            GeometryDescriptor::Cloth { size, .. } => {
                Aabb::from_half_extents(glam::Vec3::new(size * 0.5, size * 0.5, 0.0))
            }
        }
    }

    pub fn is_cloth(&self) -> bool {
        matches!(self, GeometryDescriptor::Cloth { .. })
    }
}

/// 场景节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    pub transform: TransformSnapshot,
    /// 没有几何体的节点 (分组、灯光等) 为 `None`
    pub geometry: Option<GeometryDescriptor>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, transform: TransformSnapshot) -> Self {
        Self {
            name: name.into(),
            transform,
            geometry: None,
        }
    }

    pub fn mesh(
        name: impl Into<String>,
        transform: TransformSnapshot,
        geometry: GeometryDescriptor,
    ) -> Self {
        Self {
            name: name.into(),
            transform,
            geometry: Some(geometry),
        }
    }
}

/// 场景访问接口
pub trait SceneAccess {
    /// 对象当前的变换；对象不存在时返回 `None`
    fn transform(&self, id: ObjectId) -> Option<TransformSnapshot>;

    /// 写入对象变换；对象不存在时返回 `false`
    fn set_transform(&mut self, id: ObjectId, transform: TransformSnapshot) -> bool;

    fn geometry(&self, id: ObjectId) -> Option<GeometryDescriptor>;

    /// 所有带几何体的节点
    fn mesh_ids(&self) -> Vec<ObjectId>;

    fn add_node(&mut self, node: SceneNode) -> ObjectId;

    fn remove_node(&mut self, id: ObjectId) -> bool;

    /// 世界空间轴对齐包围盒
    fn world_bounds(&self, id: ObjectId) -> Option<Aabb> {
        let transform = self.transform(id)?;
        let geometry = self.geometry(id)?;
        Some(geometry.local_bounds().transformed(&transform.to_affine()))
    }
}
