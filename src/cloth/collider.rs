//! 碰撞代理构建
//!
//! 每个场景网格恰好生成一个静态代理，外加一个永久的无限地面。
//! 可识别的基本体 (长方体 / 球 / 圆柱) 使用自身参数和对象位姿，
//! 其他几何体用世界空间轴对齐包围盒近似。

use crate::animation::ObjectId;
use crate::physics::{BodyPose, ColliderShape};
use crate::scene::{GeometryDescriptor, SceneAccess};
use glam::Vec3;

/// 静态碰撞代理
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderProxy {
    pub shape: ColliderShape,
    pub pose: BodyPose,
    /// 来源场景对象；地面为 `None`
    pub source: Option<ObjectId>,
}

impl ColliderProxy {
    /// 过原点、法线朝 +Y 的地面
    pub fn ground() -> Self {
        Self {
            shape: ColliderShape::Plane { normal: Vec3::Y },
            pose: BodyPose::default(),
            source: None,
        }
    }

    pub fn is_ground(&self) -> bool {
        self.source.is_none()
    }
}

pub struct ColliderProxyBuilder;

impl ColliderProxyBuilder {
    /// 为单个场景对象推导代理
    ///
    /// 没有几何体、布料节点或已不存在的对象返回 `None`。
    pub fn classify<S: SceneAccess + ?Sized>(scene: &S, id: ObjectId) -> Option<ColliderProxy> {
        let geometry = scene.geometry(id)?;
        let transform = scene.transform(id)?;
        let recognized_pose = BodyPose::new(transform.position, transform.rotation_quat());

        let (shape, pose) = match geometry {
            GeometryDescriptor::Cloth { .. } => return None,
            GeometryDescriptor::Box {
                width,
                height,
                depth,
            } => (
                ColliderShape::Box {
                    half_extents: Vec3::new(width, height, depth) * 0.5,
                },
                recognized_pose,
            ),
            GeometryDescriptor::Sphere { radius } => {
                (ColliderShape::Sphere { radius }, recognized_pose)
            }
            GeometryDescriptor::Cylinder {
                radius_top,
                radius_bottom,
                height,
            } => (
                ColliderShape::Cylinder {
                    radius_top,
                    radius_bottom,
                    height,
                },
                recognized_pose,
            ),
            GeometryDescriptor::Mesh { .. } => {
                let bounds = scene.world_bounds(id)?;
                (
                    ColliderShape::BoxApproximation {
                        half_extents: bounds.half_extents(),
                    },
                    BodyPose::from_position(bounds.center()),
                )
            }
        };

        if shape.is_degenerate() {
            tracing::warn!(
                target: "cloth",
                "Degenerate {} collider for object {}",
                shape.kind_name(),
                id
            );
        }

        Some(ColliderProxy {
            shape,
            pose,
            source: Some(id),
        })
    }

    /// 推导整个场景的代理集合，地面总是第一个
    pub fn build<S: SceneAccess + ?Sized>(scene: &S) -> Vec<ColliderProxy> {
        let mut proxies = vec![ColliderProxy::ground()];
        proxies.extend(
            scene
                .mesh_ids()
                .into_iter()
                .filter_map(|id| Self::classify(scene, id)),
        );
        tracing::debug!(target: "cloth", "Derived {} collider proxies", proxies.len());
        proxies
    }
}
