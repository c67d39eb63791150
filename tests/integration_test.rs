use glam::Vec3;
use studio_engine::animation::{
    AnimationService, InterpolationMode, KeyframeStore, ObjectId, TimelineState,
    TransformSnapshot,
};
use studio_engine::cloth::{ClothTopologyBuilder, ColliderProxyBuilder, ColliderShape};
use studio_engine::config::{EditorConfig, PhysicsConfig};
use studio_engine::editor::EditorSession;
use studio_engine::physics::{
    DeterministicBridge, RapierBridge, SimulationBridge, DEFAULT_PARTICLE_RADIUS,
};
use studio_engine::scene::{Aabb, GeometryDescriptor, SceneAccess, SceneNode, SceneStore};

fn position(store: &KeyframeStore, timeline: &TimelineState, id: ObjectId) -> Option<Vec3> {
    AnimationService::sample(store, timeline)
        .into_iter()
        .find(|(sampled, _)| *sampled == id)
        .map(|(_, transform)| transform.position)
}

fn scenario_store() -> (TimelineState, KeyframeStore, ObjectId) {
    let timeline = TimelineState::new(100.0, 30.0).unwrap();
    let mut store = KeyframeStore::new();
    let cube = ObjectId::new(1);
    store.add_keyframe(0.0, cube, TransformSnapshot::from_position(Vec3::ZERO));
    store.add_keyframe(
        50.0,
        cube,
        TransformSnapshot::from_position(Vec3::new(10.0, 0.0, 0.0)),
    );
    (timeline, store, cube)
}

#[test]
fn test_midpoint_linear_and_smooth() {
    let (mut timeline, store, cube) = scenario_store();
    AnimationService::set_current_time(&mut timeline, 25.0);

    AnimationService::set_interpolation_mode(&mut timeline, InterpolationMode::Linear);
    assert_eq!(position(&store, &timeline, cube), Some(Vec3::new(5.0, 0.0, 0.0)));

    AnimationService::set_interpolation_mode(&mut timeline, InterpolationMode::Smooth);
    assert_eq!(position(&store, &timeline, cube), Some(Vec3::new(5.0, 0.0, 0.0)));
}

#[test]
fn test_wrap_from_last_keyframe_to_first() {
    let (mut timeline, store, cube) = scenario_store();
    AnimationService::set_current_time(&mut timeline, 75.0);
    assert_eq!(position(&store, &timeline, cube), Some(Vec3::new(5.0, 0.0, 0.0)));
}

#[test]
fn test_loop_closure() {
    let (mut timeline, store, cube) = scenario_store();
    AnimationService::set_current_time(&mut timeline, 0.0);
    let start = position(&store, &timeline, cube);
    AnimationService::set_current_time(&mut timeline, 100.0);
    assert_eq!(position(&store, &timeline, cube), start);
}

#[test]
fn test_set_current_time_clamps() {
    let (mut timeline, _, _) = scenario_store();
    AnimationService::set_current_time(&mut timeline, -10.0);
    assert_eq!(timeline.current_time, 0.0);
    AnimationService::set_current_time(&mut timeline, 1000.0);
    assert_eq!(timeline.current_time, 100.0);
}

#[test]
fn test_persistence_round_trip() {
    let mut config = EditorConfig::default();
    config.timeline.duration = 100.0;
    let mut session = EditorSession::new(&config).unwrap();
    let cube = ObjectId::new(1);
    let sphere = ObjectId::new(2);
    session.add_keyframe(
        0.0,
        cube,
        TransformSnapshot::new(Vec3::ZERO, Vec3::new(0.0, 0.5, 0.0), Vec3::ONE),
    );
    session.add_keyframe(
        33.3,
        cube,
        TransformSnapshot::new(Vec3::new(1.5, -2.0, 0.25), Vec3::ZERO, Vec3::splat(2.0)),
    );
    session.add_keyframe(33.3, sphere, TransformSnapshot::from_position(Vec3::ONE));
    session.add_keyframe(80.0, sphere, TransformSnapshot::from_position(Vec3::ZERO));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keyframes.json");
    session.save_keyframes(&path).unwrap();

    let mut restored = EditorSession::new(&config).unwrap();
    restored.load_keyframes(&path).unwrap();

    for mode in [InterpolationMode::Linear, InterpolationMode::Smooth] {
        session.set_interpolation_mode(mode);
        restored.set_interpolation_mode(mode);
        for step in 0..=200 {
            let t = step as f32 * 0.5;
            AnimationService::set_current_time(&mut session.timeline, t);
            AnimationService::set_current_time(&mut restored.timeline, t);
            assert_eq!(
                AnimationService::sample(&session.keyframes, &session.timeline),
                AnimationService::sample(&restored.keyframes, &restored.timeline),
            );
        }
    }
}

#[test]
fn test_load_missing_file_is_an_error() {
    let mut session = EditorSession::new(&EditorConfig::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    assert!(session.load_keyframes(dir.path().join("missing.json")).is_err());
}

#[test]
fn test_cloth_four_by_four() {
    let topology = ClothTopologyBuilder::new(4.0, 4).build().unwrap();
    assert_eq!(topology.particle_count(), 16);
    assert_eq!(topology.constraint_count(), 24);
    assert_eq!(topology.pinned(), vec![0, 3]);
}

#[test]
fn test_collider_derivation() {
    let mut scene = SceneStore::new();
    let table = scene.add_node(SceneNode::mesh(
        "Table",
        TransformSnapshot::from_position(Vec3::new(0.0, 1.0, 0.0)),
        GeometryDescriptor::Box {
            width: 3.0,
            height: 0.2,
            depth: 2.0,
        },
    ));
    let statue = scene.add_node(SceneNode::mesh(
        "Statue",
        TransformSnapshot::from_position(Vec3::new(-4.0, 0.0, 2.0)),
        GeometryDescriptor::Mesh {
            local_bounds: Aabb::new(Vec3::new(-0.5, 0.0, -0.5), Vec3::new(0.5, 2.0, 0.5)),
        },
    ));

    let proxies = ColliderProxyBuilder::build(&scene);
    assert_eq!(proxies.len(), 3);
    assert!(proxies[0].is_ground());

    let table_proxy = proxies.iter().find(|p| p.source == Some(table)).unwrap();
    assert_eq!(
        table_proxy.shape,
        ColliderShape::Box {
            half_extents: Vec3::new(1.5, 0.1, 1.0)
        }
    );

    let bounds = scene.world_bounds(statue).unwrap();
    let statue_proxy = proxies.iter().find(|p| p.source == Some(statue)).unwrap();
    assert_eq!(
        statue_proxy.shape,
        ColliderShape::BoxApproximation {
            half_extents: bounds.half_extents()
        }
    );
    assert_eq!(statue_proxy.pose.position, bounds.center());
}

#[test]
fn test_cloth_lifecycle_with_stub_solver() {
    let mut session = EditorSession::new(&EditorConfig::default()).unwrap();
    let mut scene = SceneStore::new();
    scene.add_node(SceneNode::mesh(
        "Ball",
        TransformSnapshot::from_position(Vec3::new(0.0, 2.0, 0.0)),
        GeometryDescriptor::Sphere { radius: 1.0 },
    ));
    let mut bridge = DeterministicBridge::default();

    let anchor = TransformSnapshot::from_position(Vec3::new(0.0, 5.0, 0.0));
    let node = session
        .create_cloth(4.0, 4, anchor, &mut scene, &mut bridge)
        .unwrap();
    // 16个粒子 + 地面 + 球
    assert_eq!(bridge.body_count(), 18);
    assert_eq!(bridge.constraints().len(), 24);

    session.toggle_physics();
    for _ in 0..10 {
        session.tick_physics(&mut bridge);
    }
    assert_eq!(bridge.steps(), 10);

    let cloth = session.cloth.cloth(node).unwrap();
    for (index, handle) in cloth.bodies.iter().enumerate() {
        let world = bridge.read_position(*handle).unwrap();
        let local = cloth.mesh.position(index).unwrap();
        assert!((world - Vec3::new(0.0, 5.0, 0.0) - local).length() < 1e-5);
    }

    session.reset_physics(&mut scene, &mut bridge);
    assert!(!session.cloth.is_running());
    assert_eq!(bridge.body_count(), 0);
    assert!(bridge.constraints().is_empty());
    assert_eq!(scene.len(), 1);

    // 重置后不再步进
    session.tick_physics(&mut bridge);
    assert_eq!(bridge.steps(), 10);
}

#[test]
fn test_cloth_hangs_from_pins_with_rapier() {
    let mut session = EditorSession::new(&EditorConfig::default()).unwrap();
    let mut scene = SceneStore::new();
    let mut bridge = RapierBridge::new(&PhysicsConfig::default(), DEFAULT_PARTICLE_RADIUS);

    let anchor = TransformSnapshot::from_position(Vec3::new(0.0, 5.0, 0.0));
    let node = session
        .create_cloth(1.0, 5, anchor, &mut scene, &mut bridge)
        .unwrap();
    assert_eq!(bridge.constraint_count(), 2 * 5 * 4);

    session.toggle_physics();
    for _ in 0..30 {
        session.tick_physics(&mut bridge);
    }

    let cloth = session.cloth.cloth(node).unwrap();
    // 钉住的两个角保持静止位置
    assert_eq!(cloth.mesh.position(0), Some(Vec3::new(-0.5, 0.5, 0.0)));
    assert_eq!(cloth.mesh.position(4), Some(Vec3::new(0.5, 0.5, 0.0)));
    // 静止长度大于网格间距，底部中间的粒子被拉开并在重力下落
    let bottom = cloth.mesh.position(22).unwrap();
    assert!(bottom.y < -0.5);
    assert!(bottom.is_finite());
}
