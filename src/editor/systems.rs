//! 编辑器ECS系统
//!
//! 宿主每个渲染帧更新一次 `FrameClock` 然后运行调度器。

use super::session::EditorSession;
use crate::physics::SimulationBridge;
use crate::impl_default_and_new;
use crate::scene::SceneStore;
use bevy_ecs::prelude::*;

/// 墙钟时间资源
#[derive(Resource, Debug, Clone, Copy)]
pub struct FrameClock {
    pub elapsed_seconds: f64,
    pub delta_seconds: f64,
}

impl_default_and_new!(FrameClock {
    elapsed_seconds: 0.0,
    delta_seconds: 0.0,
});

impl FrameClock {
    pub fn advance(&mut self, delta_seconds: f64) {
        self.delta_seconds = delta_seconds.max(0.0);
        self.elapsed_seconds += self.delta_seconds;
    }
}

/// 时间轴播放系统
pub fn timeline_playback_system(
    clock: Res<FrameClock>,
    mut session: ResMut<EditorSession>,
    mut scene: ResMut<SceneStore>,
) {
    let updated = session.tick_timeline(clock.elapsed_seconds, &mut *scene);
    if updated > 0 {
        tracing::debug!(target: "editor", "Timeline updated {} objects", updated);
    }
}

/// 布料步进系统
pub fn cloth_step_system<B: SimulationBridge + Resource>(
    mut session: ResMut<EditorSession>,
    mut bridge: ResMut<B>,
) {
    session.tick_physics(&mut *bridge);
}

/// 重新计算被同步标脏的布料法线
pub fn cloth_normals_system(mut session: ResMut<EditorSession>) {
    for cloth in session.cloth.cloths_mut() {
        if cloth.mesh.normals_dirty {
            cloth.mesh.recompute_normals();
        }
    }
}

/// 创建编辑器每帧调度器
pub fn build_editor_schedule<B: SimulationBridge + Resource>() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            timeline_playback_system,
            cloth_step_system::<B>,
            cloth_normals_system,
        )
            .chain(),
    );
    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{ObjectId, TransformSnapshot};
    use crate::config::EditorConfig;
    use crate::physics::DeterministicBridge;
    use crate::scene::{SceneAccess, SceneNode};
    use glam::Vec3;

    fn world_with_animation() -> (World, ObjectId) {
        let mut config = EditorConfig::default();
        config.timeline.duration = 100.0;
        let mut session = EditorSession::new(&config).unwrap();
        let mut scene = SceneStore::new();
        let cube = scene.add_node(SceneNode::new("Cube", TransformSnapshot::default()));
        session.add_keyframe(0.0, cube, TransformSnapshot::from_position(Vec3::ZERO));
        session.add_keyframe(
            50.0,
            cube,
            TransformSnapshot::from_position(Vec3::new(10.0, 0.0, 0.0)),
        );

        let mut world = World::new();
        world.insert_resource(session);
        world.insert_resource(scene);
        world.insert_resource(FrameClock::new());
        world.insert_resource(DeterministicBridge::default());
        (world, cube)
    }

    #[test]
    fn test_schedule_advances_playback() {
        let (mut world, cube) = world_with_animation();
        world.resource_mut::<EditorSession>().toggle_playback();
        let mut schedule = build_editor_schedule::<DeterministicBridge>();

        // 第一次tick立即推进一帧
        schedule.run(&mut world);
        assert_eq!(world.resource::<EditorSession>().timeline.current_time, 1.0);
        let x = world.resource::<SceneStore>().transform(cube).unwrap().position.x;
        assert!((x - 0.2).abs() < 1e-6);

        // 不足一帧间隔时不推进
        world.resource_mut::<FrameClock>().advance(0.01);
        schedule.run(&mut world);
        assert_eq!(world.resource::<EditorSession>().timeline.current_time, 1.0);

        world.resource_mut::<FrameClock>().advance(0.5);
        schedule.run(&mut world);
        assert_eq!(world.resource::<EditorSession>().timeline.current_time, 2.0);
    }

    #[test]
    fn test_schedule_steps_cloth_and_recomputes_normals() {
        let (mut world, _) = world_with_animation();
        let mut bridge = world.remove_resource::<DeterministicBridge>().unwrap();
        let mut scene = world.remove_resource::<SceneStore>().unwrap();
        {
            let mut session = world.resource_mut::<EditorSession>();
            session
                .create_cloth(
                    2.0,
                    3,
                    TransformSnapshot::from_position(Vec3::new(0.0, 5.0, 0.0)),
                    &mut scene,
                    &mut bridge,
                )
                .unwrap();
            session.toggle_physics();
        }
        world.insert_resource(scene);
        world.insert_resource(bridge);

        let mut schedule = build_editor_schedule::<DeterministicBridge>();
        schedule.run(&mut world);

        assert_eq!(world.resource::<DeterministicBridge>().steps(), 1);
        let session = world.resource::<EditorSession>();
        let mesh = &session.cloth.cloths()[0].mesh;
        assert!(mesh.positions_dirty);
        assert!(!mesh.normals_dirty);
    }
}
