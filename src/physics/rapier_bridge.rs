//! 基于Rapier3D的求解器适配
//!
//! 粒子为带小球碰撞体的动态刚体 (钉住的粒子为固定刚体)，
//! 距离约束用球形关节实现：两个局部锚点被约束到同一点。

use super::bridge::{BodyHandle, BodyPose, SimulationBridge};
use super::shape::ColliderShape;
use crate::config::{EditorConfig, PhysicsConfig};
use crate::core::error::{PhysicsError, PhysicsResult};
use bevy_ecs::prelude::*;
use glam::Vec3;
use rapier3d::na::{Quaternion, UnitQuaternion};
use rapier3d::prelude::DefaultBroadPhase;
use rapier3d::prelude::*;
use std::collections::HashMap;
use std::num::NonZeroUsize;

/// 默认粒子碰撞球半径
pub const DEFAULT_PARTICLE_RADIUS: f32 = 0.1;

// --- Resources ---

#[derive(Resource)]
pub struct RapierBridge {
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: Box<dyn BroadPhase>,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    particle_radius: f32,
    bodies: HashMap<BodyHandle, RigidBodyHandle>,
    joints: Vec<ImpulseJointHandle>,
    last_handle: u64,
}

impl Default for RapierBridge {
    fn default() -> Self {
        Self::new(&PhysicsConfig::default(), DEFAULT_PARTICLE_RADIUS)
    }
}

impl RapierBridge {
    pub fn new(config: &PhysicsConfig, particle_radius: f32) -> Self {
        let [gx, gy, gz] = config.gravity;
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.fixed_timestep;
        integration_parameters.num_solver_iterations =
            NonZeroUsize::new(config.solver_iterations).unwrap_or(NonZeroUsize::MIN);

        Self {
            gravity: vector![gx, gy, gz],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: Box::new(DefaultBroadPhase::new()),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            particle_radius,
            bodies: HashMap::new(),
            joints: Vec::new(),
            last_handle: 0,
        }
    }

    /// 按编辑器配置创建：物理参数与布料粒子半径
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(&config.physics, config.cloth.particle_radius)
    }

    pub fn particle_radius(&self) -> f32 {
        self.particle_radius
    }

    /// 当前由本适配器管理的刚体数量
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.impulse_joint_set.len()
    }

    pub fn is_fixed(&self, handle: BodyHandle) -> Option<bool> {
        let rb = self.rigid_body_set.get(*self.bodies.get(&handle)?)?;
        Some(rb.is_fixed())
    }

    fn register(&mut self, rb_handle: RigidBodyHandle) -> BodyHandle {
        self.last_handle += 1;
        let handle = BodyHandle(self.last_handle);
        self.bodies.insert(handle, rb_handle);
        handle
    }

    fn resolve(&self, handle: BodyHandle) -> PhysicsResult<RigidBodyHandle> {
        self.bodies
            .get(&handle)
            .copied()
            .ok_or(PhysicsError::UnknownBody(handle.as_u64()))
    }
}

impl SimulationBridge for RapierBridge {
    fn create_particle_body(&mut self, position: Vec3, mass: f32) -> BodyHandle {
        let builder = if mass > 0.0 {
            RigidBodyBuilder::dynamic()
        } else {
            RigidBodyBuilder::fixed()
        };
        let rb = builder
            .translation(vector![position.x, position.y, position.z])
            .build();
        let rb_handle = self.rigid_body_set.insert(rb);

        let mut collider = ColliderBuilder::ball(self.particle_radius);
        if mass > 0.0 {
            collider = collider.mass(mass);
        }

        // 分离借用
        let RapierBridge {
            rigid_body_set,
            collider_set,
            ..
        } = self;
        collider_set.insert_with_parent(collider.build(), rb_handle, rigid_body_set);

        self.register(rb_handle)
    }

    fn create_static_body(&mut self, shape: &ColliderShape, pose: BodyPose) -> BodyHandle {
        let rotation = pose.rotation;
        let isometry = Isometry::from_parts(
            Translation::new(pose.position.x, pose.position.y, pose.position.z),
            UnitQuaternion::new_normalize(Quaternion::new(
                rotation.w, rotation.x, rotation.y, rotation.z,
            )),
        );
        let rb = RigidBodyBuilder::fixed().position(isometry).build();
        let rb_handle = self.rigid_body_set.insert(rb);

        let collider = ColliderBuilder::new(shape.to_rapier_shape()).build();
        let RapierBridge {
            rigid_body_set,
            collider_set,
            ..
        } = self;
        collider_set.insert_with_parent(collider, rb_handle, rigid_body_set);

        self.register(rb_handle)
    }

    fn add_distance_constraint(
        &mut self,
        body_a: BodyHandle,
        anchor_a: Vec3,
        body_b: BodyHandle,
        anchor_b: Vec3,
    ) -> PhysicsResult<()> {
        let rb_a = self.resolve(body_a)?;
        let rb_b = self.resolve(body_b)?;

        let joint = GenericJointBuilder::new(JointAxesMask::LOCKED_SPHERICAL_AXES)
            .local_anchor1(point![anchor_a.x, anchor_a.y, anchor_a.z])
            .local_anchor2(point![anchor_b.x, anchor_b.y, anchor_b.z])
            .build();
        let handle = self.impulse_joint_set.insert(rb_a, rb_b, joint, true);
        self.joints.push(handle);
        Ok(())
    }

    fn remove_all_constraints(&mut self) {
        for handle in self.joints.drain(..) {
            // 刚体被删除时关节已随之移除，这里的句柄可能已经失效
            self.impulse_joint_set.remove(handle, true);
        }
    }

    fn remove_body(&mut self, handle: BodyHandle) -> bool {
        let Some(rb_handle) = self.bodies.remove(&handle) else {
            return false;
        };
        self.rigid_body_set
            .remove(
                rb_handle,
                &mut self.island_manager,
                &mut self.collider_set,
                &mut self.impulse_joint_set,
                &mut self.multibody_joint_set,
                true,
            )
            .is_some()
    }

    fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut *self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    fn read_position(&self, handle: BodyHandle) -> Option<Vec3> {
        let rb = self.rigid_body_set.get(*self.bodies.get(&handle)?)?;
        let pos = rb.translation();
        Some(Vec3::new(pos.x, pos.y, pos.z))
    }
}
