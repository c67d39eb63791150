//! 布料模块
//!
//! - `topology`: N×N粒子网格与结构约束
//! - `collider`: 场景网格的简化碰撞代理
//! - `syncer`: 求解器输出回写到顶点缓冲
//! - `simulation`: 布料的创建、运行与重置
//!
//! 数值积分和约束求解全部交给 [`SimulationBridge`](crate::physics::SimulationBridge)。

pub mod collider;
pub mod simulation;
pub mod syncer;
pub mod topology;


pub use crate::physics::ColliderShape;
pub use collider::{ColliderProxy, ColliderProxyBuilder};
pub use simulation::{ClothDesc, ClothInstance, ClothSimulation};
pub use syncer::{ClothMesh, ClothSyncer};
pub use topology::{
    ClothConstraint, ClothParticle, ClothTopology, ClothTopologyBuilder, LinkDirection,
    RestDistance, DEFAULT_REST_DISTANCE,
};
