//! 物理求解器桥接
//!
//! - `bridge`: 编辑器核心依赖的窄接口 `SimulationBridge`
//! - `shape`: 碰撞代理形状及其Rapier转换
//! - `rapier_bridge`: 基于Rapier3D的实现
//! - `stub`: 确定性桩实现

pub mod bridge;
pub mod rapier_bridge;
pub mod shape;
pub mod stub;

pub use bridge::{BodyHandle, BodyPose, SimulationBridge};
pub use rapier_bridge::{RapierBridge, DEFAULT_PARTICLE_RADIUS};
pub use shape::ColliderShape;
pub use stub::{DeterministicBridge, StubBody, StubConstraint};
