//! 确定性桩求解器
//!
//! 不做真正的约束求解：每次 `step` 让所有非钉住粒子按重力做一次显式欧拉位移，
//! 并记录所有调用，便于在无头环境和测试中验证拓扑与同步逻辑。

use super::bridge::{BodyHandle, BodyPose, SimulationBridge};
use super::shape::ColliderShape;
use crate::core::error::{PhysicsError, PhysicsResult};
use bevy_ecs::prelude::*;
use glam::Vec3;
use std::collections::BTreeMap;

/// 桩求解器中的刚体
#[derive(Debug, Clone, PartialEq)]
pub enum StubBody {
    Particle {
        position: Vec3,
        velocity: Vec3,
        mass: f32,
    },
    Static {
        shape: ColliderShape,
        pose: BodyPose,
    },
}

/// 记录的距离约束
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StubConstraint {
    pub body_a: BodyHandle,
    pub anchor_a: Vec3,
    pub body_b: BodyHandle,
    pub anchor_b: Vec3,
}

#[derive(Resource, Debug, Clone)]
pub struct DeterministicBridge {
    pub gravity: Vec3,
    bodies: BTreeMap<BodyHandle, StubBody>,
    constraints: Vec<StubConstraint>,
    last_handle: u64,
    steps: u64,
}

impl Default for DeterministicBridge {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, -9.82, 0.0))
    }
}

impl DeterministicBridge {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity,
            bodies: BTreeMap::new(),
            constraints: Vec::new(),
            last_handle: 0,
            steps: 0,
        }
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&StubBody> {
        self.bodies.get(&handle)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn constraints(&self) -> &[StubConstraint] {
        &self.constraints
    }

    /// 所有静态碰撞体
    pub fn static_bodies(&self) -> Vec<(ColliderShape, BodyPose)> {
        self.bodies
            .values()
            .filter_map(|body| match body {
                StubBody::Static { shape, pose } => Some((*shape, *pose)),
                StubBody::Particle { .. } => None,
            })
            .collect()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn insert(&mut self, body: StubBody) -> BodyHandle {
        self.last_handle += 1;
        let handle = BodyHandle(self.last_handle);
        self.bodies.insert(handle, body);
        handle
    }
}

impl SimulationBridge for DeterministicBridge {
    fn create_particle_body(&mut self, position: Vec3, mass: f32) -> BodyHandle {
        self.insert(StubBody::Particle {
            position,
            velocity: Vec3::ZERO,
            mass,
        })
    }

    fn create_static_body(&mut self, shape: &ColliderShape, pose: BodyPose) -> BodyHandle {
        self.insert(StubBody::Static {
            shape: *shape,
            pose,
        })
    }

    fn add_distance_constraint(
        &mut self,
        body_a: BodyHandle,
        anchor_a: Vec3,
        body_b: BodyHandle,
        anchor_b: Vec3,
    ) -> PhysicsResult<()> {
        for handle in [body_a, body_b] {
            if !self.bodies.contains_key(&handle) {
                return Err(PhysicsError::UnknownBody(handle.as_u64()));
            }
        }
        self.constraints.push(StubConstraint {
            body_a,
            anchor_a,
            body_b,
            anchor_b,
        });
        Ok(())
    }

    fn remove_all_constraints(&mut self) {
        self.constraints.clear();
    }

    fn remove_body(&mut self, handle: BodyHandle) -> bool {
        self.bodies.remove(&handle).is_some()
    }

    fn step(&mut self, dt: f32) {
        self.steps += 1;
        let gravity = self.gravity;
        for body in self.bodies.values_mut() {
            if let StubBody::Particle {
                position,
                velocity,
                mass,
            } = body
            {
                if *mass > 0.0 {
                    *velocity += gravity * dt;
                    *position += *velocity * dt;
                }
            }
        }
    }

    fn read_position(&self, handle: BodyHandle) -> Option<Vec3> {
        match self.bodies.get(&handle)? {
            StubBody::Particle { position, .. } => Some(*position),
            StubBody::Static { pose, .. } => Some(pose.position),
        }
    }
}
