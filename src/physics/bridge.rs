use super::shape::ColliderShape;
use crate::core::error::PhysicsResult;
use crate::impl_default;
use glam::{Quat, Vec3};
use std::fmt;

/// 求解器中的刚体句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u64);

impl BodyHandle {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body:{}", self.0)
    }
}

/// 静态刚体的世界位姿
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl_default!(BodyPose {
    position: Vec3::ZERO,
    rotation: Quat::IDENTITY,
});

impl BodyPose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

/// 外部约束 / 积分求解器的最小能力集
///
/// 编辑器核心从不自己做数值积分，拓扑与碰撞代理只通过这个接口交给求解器，
/// 因此可以用确定性的桩实现来测试。
pub trait SimulationBridge {
    /// 创建粒子刚体；质量为 0 表示钉住 (不参与积分)
    fn create_particle_body(&mut self, position: Vec3, mass: f32) -> BodyHandle;

    /// 创建静态 (零质量) 碰撞体
    fn create_static_body(&mut self, shape: &ColliderShape, pose: BodyPose) -> BodyHandle;

    /// 在两个刚体的局部锚点之间添加距离约束
    fn add_distance_constraint(
        &mut self,
        body_a: BodyHandle,
        anchor_a: Vec3,
        body_b: BodyHandle,
        anchor_b: Vec3,
    ) -> PhysicsResult<()>;

    fn remove_all_constraints(&mut self);

    /// 删除刚体；句柄未知时返回 `false`
    fn remove_body(&mut self, handle: BodyHandle) -> bool;

    /// 按固定步长推进一次
    fn step(&mut self, dt: f32);

    fn read_position(&self, handle: BodyHandle) -> Option<Vec3>;
}
