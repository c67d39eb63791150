//! 编辑会话上下文
//!
//! 选中对象、时间轴、关键帧和布料都属于同一个会话，由宿主显式传入每个操作，
//! 没有任何全局状态。

use crate::animation::{
    AnimationService, InterpolationMode, KeyframeStore, ObjectId, PlaybackState,
    SerializedTimeline, TimelineState, TransformSnapshot,
};
use crate::cloth::{ClothDesc, ClothSimulation};
use crate::config::{ClothConfig, EditorConfig};
use crate::core::error::{AnimationError, AnimationResult, EditorResult};
use crate::physics::SimulationBridge;
use crate::scene::SceneAccess;
use bevy_ecs::prelude::*;
use std::path::Path;

/// 编辑会话
#[derive(Resource, Debug, Clone)]
pub struct EditorSession {
    pub timeline: TimelineState,
    pub keyframes: KeyframeStore,
    pub cloth: ClothSimulation,
    selection: Option<ObjectId>,
    cloth_defaults: ClothConfig,
}

impl EditorSession {
    pub fn new(config: &EditorConfig) -> EditorResult<Self> {
        Ok(Self {
            timeline: TimelineState::from_config(&config.timeline)?,
            keyframes: KeyframeStore::new(),
            cloth: ClothSimulation::from_config(&config.cloth, &config.physics),
            selection: None,
            cloth_defaults: config.cloth.clone(),
        })
    }

    pub fn selection(&self) -> Option<ObjectId> {
        self.selection
    }

    pub fn select(&mut self, id: ObjectId) {
        self.selection = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// 把选中对象的当前变换记录到当前时间
    ///
    /// 返回实际写入的关键帧时间。
    pub fn add_keyframe_at_current_time<S: SceneAccess + ?Sized>(
        &mut self,
        scene: &S,
    ) -> AnimationResult<f32> {
        let id = self.selection.ok_or(AnimationError::NothingSelected)?;
        let snapshot = scene
            .transform(id)
            .ok_or(AnimationError::ObjectNotFound(id))?;
        Ok(AnimationService::add_keyframe(
            &mut self.keyframes,
            &self.timeline,
            self.timeline.current_time,
            id,
            snapshot,
        ))
    }

    /// 显式记录任意对象的关键帧
    pub fn add_keyframe(&mut self, time: f32, id: ObjectId, snapshot: TransformSnapshot) -> f32 {
        AnimationService::add_keyframe(&mut self.keyframes, &self.timeline, time, id, snapshot)
    }

    /// 跳转时间并立即把插值结果写回场景
    pub fn set_current_time<S: SceneAccess + ?Sized>(&mut self, time: f32, scene: &mut S) -> usize {
        AnimationService::set_current_time(&mut self.timeline, time);
        AnimationService::apply_to_scene(&self.keyframes, &self.timeline, scene)
    }

    pub fn set_interpolation_mode(&mut self, mode: InterpolationMode) {
        AnimationService::set_interpolation_mode(&mut self.timeline, mode);
    }

    pub fn toggle_playback(&mut self) -> PlaybackState {
        AnimationService::toggle_playback(&mut self.timeline)
    }

    /// 跳到关键帧列表中第 `index` 个关键帧
    pub fn jump_to_keyframe<S: SceneAccess + ?Sized>(
        &mut self,
        index: usize,
        scene: &mut S,
    ) -> Option<f32> {
        let time = self.keyframes.as_slice().get(index)?.time();
        self.set_current_time(time, scene);
        Some(time)
    }

    /// 每帧的时间轴推进，返回更新的对象数
    pub fn tick_timeline<S: SceneAccess + ?Sized>(&mut self, now_seconds: f64, scene: &mut S) -> usize {
        AnimationService::tick(&self.keyframes, &mut self.timeline, now_seconds, scene)
    }

    /// 每帧的物理推进，返回本帧是否推进了求解器
    pub fn tick_physics<B: SimulationBridge + ?Sized>(&mut self, bridge: &mut B) -> bool {
        self.cloth.step(bridge)
    }

    pub fn tick<S, B>(&mut self, now_seconds: f64, scene: &mut S, bridge: &mut B)
    where
        S: SceneAccess + ?Sized,
        B: SimulationBridge + ?Sized,
    {
        self.tick_timeline(now_seconds, scene);
        self.tick_physics(bridge);
    }

    pub fn create_cloth<S, B>(
        &mut self,
        size: f32,
        resolution: usize,
        anchor: TransformSnapshot,
        scene: &mut S,
        bridge: &mut B,
    ) -> EditorResult<ObjectId>
    where
        S: SceneAccess + ?Sized,
        B: SimulationBridge + ?Sized,
    {
        let desc = ClothDesc {
            size,
            resolution,
            anchor,
            particle_mass: self.cloth_defaults.particle_mass,
        };
        self.cloth.create_cloth(&desc, scene, bridge)
    }

    /// 使用配置中的默认尺寸、分辨率和锚点创建布料
    pub fn create_default_cloth<S, B>(&mut self, scene: &mut S, bridge: &mut B) -> EditorResult<ObjectId>
    where
        S: SceneAccess + ?Sized,
        B: SimulationBridge + ?Sized,
    {
        let desc = ClothDesc::from_config(&self.cloth_defaults);
        self.cloth.create_cloth(&desc, scene, bridge)
    }

    pub fn toggle_physics(&mut self) -> bool {
        self.cloth.toggle_physics()
    }

    pub fn reset_physics<S, B>(&mut self, scene: &mut S, bridge: &mut B)
    where
        S: SceneAccess + ?Sized,
        B: SimulationBridge + ?Sized,
    {
        self.cloth.reset_physics(scene, bridge);
    }

    pub fn export_keyframes(&self) -> AnimationResult<String> {
        SerializedTimeline::capture(&self.timeline, &self.keyframes).to_json()
    }

    /// 保存时间轴设置和全部关键帧
    pub fn save_keyframes<P: AsRef<Path>>(&self, path: P) -> AnimationResult<()> {
        SerializedTimeline::capture(&self.timeline, &self.keyframes).save_to_file(path)?;
        tracing::info!(target: "editor", "Saved {} keyframes", self.keyframes.len());
        Ok(())
    }

    /// 加载并替换当前的关键帧，播放停止，推进策略保持不变
    pub fn load_keyframes<P: AsRef<Path>>(&mut self, path: P) -> AnimationResult<()> {
        let serialized = SerializedTimeline::load_from_file(path)?;
        self.restore(&serialized)
    }

    pub fn import_keyframes(&mut self, json: &str) -> AnimationResult<()> {
        let serialized = SerializedTimeline::from_json(json)?;
        self.restore(&serialized)
    }

    fn restore(&mut self, serialized: &SerializedTimeline) -> AnimationResult<()> {
        let (mut timeline, keyframes) = serialized.restore()?;
        timeline.clock = self.timeline.clock;
        AnimationService::set_current_time(&mut timeline, self.timeline.current_time);
        self.timeline = timeline;
        self.keyframes = keyframes;
        tracing::info!(target: "editor", "Loaded {} keyframes", self.keyframes.len());
        Ok(())
    }
}
