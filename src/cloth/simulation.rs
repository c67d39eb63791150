use super::collider::{ColliderProxy, ColliderProxyBuilder};
use super::syncer::{ClothMesh, ClothSyncer};
use super::topology::{ClothTopology, ClothTopologyBuilder, RestDistance};
use crate::animation::{ObjectId, TransformSnapshot};
use crate::config::{ClothConfig, PhysicsConfig};
use crate::core::error::EditorResult;
use crate::physics::{BodyHandle, SimulationBridge};
use crate::scene::{GeometryDescriptor, SceneAccess, SceneNode};
use glam::Vec3;

/// 布料创建参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClothDesc {
    pub size: f32,
    pub resolution: usize,
    pub anchor: TransformSnapshot,
    pub particle_mass: f32,
}

impl ClothDesc {
    pub fn new(size: f32, resolution: usize, anchor: TransformSnapshot) -> Self {
        Self {
            size,
            resolution,
            anchor,
            particle_mass: ClothConfig::default().particle_mass,
        }
    }

    pub fn from_config(config: &ClothConfig) -> Self {
        Self {
            size: config.size,
            resolution: config.resolution,
            anchor: TransformSnapshot::from_position(Vec3::from_array(config.anchor_position)),
            particle_mass: config.particle_mass,
        }
    }
}

/// 一块已创建的布料
#[derive(Debug, Clone)]
pub struct ClothInstance {
    /// 场景中的网格节点
    pub node: ObjectId,
    pub anchor: TransformSnapshot,
    pub topology: ClothTopology,
    /// 与粒子下标一一对应
    pub bodies: Vec<BodyHandle>,
    pub mesh: ClothMesh,
}

/// 布料生命周期管理
///
/// 持有所有布料实例和当前的碰撞代理。求解器和场景都由调用方传入，
/// 这里只记录句柄。
#[derive(Debug, Clone)]
pub struct ClothSimulation {
    cloths: Vec<ClothInstance>,
    colliders: Vec<(ColliderProxy, BodyHandle)>,
    running: bool,
    rest_distance: RestDistance,
    fixed_timestep: f32,
}

impl Default for ClothSimulation {
    fn default() -> Self {
        Self::new(RestDistance::default(), PhysicsConfig::default().fixed_timestep)
    }
}

impl ClothSimulation {
    pub fn new(rest_distance: RestDistance, fixed_timestep: f32) -> Self {
        Self {
            cloths: Vec::new(),
            colliders: Vec::new(),
            running: false,
            rest_distance,
            fixed_timestep,
        }
    }

    pub fn from_config(cloth: &ClothConfig, physics: &PhysicsConfig) -> Self {
        Self::new(cloth.rest_distance, physics.fixed_timestep)
    }

    pub fn cloths(&self) -> &[ClothInstance] {
        &self.cloths
    }

    pub fn cloths_mut(&mut self) -> &mut [ClothInstance] {
        &mut self.cloths
    }

    pub fn cloth(&self, node: ObjectId) -> Option<&ClothInstance> {
        self.cloths.iter().find(|cloth| cloth.node == node)
    }

    pub fn cloth_mut(&mut self, node: ObjectId) -> Option<&mut ClothInstance> {
        self.cloths.iter_mut().find(|cloth| cloth.node == node)
    }

    pub fn colliders(&self) -> impl Iterator<Item = &ColliderProxy> {
        self.colliders.iter().map(|(proxy, _)| proxy)
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn fixed_timestep(&self) -> f32 {
        self.fixed_timestep
    }

    /// 创建布料：网格节点、粒子刚体、结构约束，随后重建碰撞代理
    ///
    /// 参数校验在任何副作用之前完成，失败时场景和求解器都不会被修改。
    pub fn create_cloth<S, B>(
        &mut self,
        desc: &ClothDesc,
        scene: &mut S,
        bridge: &mut B,
    ) -> EditorResult<ObjectId>
    where
        S: SceneAccess + ?Sized,
        B: SimulationBridge + ?Sized,
    {
        let topology = ClothTopologyBuilder::new(desc.size, desc.resolution)
            .with_particle_mass(desc.particle_mass)
            .with_rest_distance(self.rest_distance)
            .build()?;

        let node = scene.add_node(SceneNode::mesh(
            "Cloth",
            desc.anchor,
            GeometryDescriptor::Cloth {
                size: desc.size,
                resolution: desc.resolution,
            },
        ));

        let to_world = desc.anchor.to_affine();
        let bodies = topology
            .particles
            .iter()
            .map(|particle| {
                bridge.create_particle_body(
                    to_world.transform_point3(particle.rest_position),
                    particle.mass,
                )
            })
            .collect::<Vec<_>>();

        let rotation = desc.anchor.rotation_quat();
        for constraint in &topology.constraints {
            let (anchor_a, anchor_b) = constraint.anchors(rotation);
            bridge.add_distance_constraint(
                bodies[constraint.particle_a],
                anchor_a,
                bodies[constraint.particle_b],
                anchor_b,
            )?;
        }

        tracing::info!(
            target: "cloth",
            "Cloth {} created: {} particles, {} constraints",
            node,
            topology.particle_count(),
            topology.constraint_count()
        );

        let mesh = ClothMesh::from_topology(&topology);
        self.cloths.push(ClothInstance {
            node,
            anchor: desc.anchor,
            topology,
            bodies,
            mesh,
        });

        self.rebuild_colliders(&*scene, bridge);
        Ok(node)
    }

    /// 丢弃旧的碰撞代理并按当前场景重建
    pub fn rebuild_colliders<S, B>(&mut self, scene: &S, bridge: &mut B)
    where
        S: SceneAccess + ?Sized,
        B: SimulationBridge + ?Sized,
    {
        self.clear_colliders(bridge);
        self.colliders = ColliderProxyBuilder::build(scene)
            .into_iter()
            .map(|proxy| {
                let handle = bridge.create_static_body(&proxy.shape, proxy.pose);
                (proxy, handle)
            })
            .collect();
    }

    /// 切换运行状态，返回切换后的状态
    pub fn toggle_physics(&mut self) -> bool {
        self.running = !self.running;
        tracing::info!(
            target: "cloth",
            "Physics {}",
            if self.running { "running" } else { "paused" }
        );
        self.running
    }

    /// 停止模拟并销毁所有布料、约束和碰撞代理
    pub fn reset_physics<S, B>(&mut self, scene: &mut S, bridge: &mut B)
    where
        S: SceneAccess + ?Sized,
        B: SimulationBridge + ?Sized,
    {
        self.running = false;
        bridge.remove_all_constraints();

        let count = self.cloths.len();
        for cloth in self.cloths.drain(..) {
            for handle in cloth.bodies {
                bridge.remove_body(handle);
            }
            scene.remove_node(cloth.node);
        }
        self.clear_colliders(bridge);

        tracing::info!(target: "cloth", "Physics reset, {} cloth removed", count);
    }

    /// 运行中时推进一个固定步长并回写所有布料
    ///
    /// 不做子步也不累计剩余时间，模拟速度与渲染帧率绑定。
    pub fn step<B: SimulationBridge + ?Sized>(&mut self, bridge: &mut B) -> bool {
        if !self.running {
            return false;
        }

        bridge.step(self.fixed_timestep);
        for cloth in &mut self.cloths {
            ClothSyncer::sync(&*bridge, &cloth.bodies, &cloth.anchor, &mut cloth.mesh);
        }
        tracing::debug!(target: "cloth", "Stepped {} cloth", self.cloths.len());
        true
    }

    fn clear_colliders<B: SimulationBridge + ?Sized>(&mut self, bridge: &mut B) {
        for (_, handle) in self.colliders.drain(..) {
            bridge.remove_body(handle);
        }
    }
}
