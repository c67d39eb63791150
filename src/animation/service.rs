//! 动画服务层
//!
//! 遵循贫血模型，将时间轴与关键帧的业务逻辑封装在Service中：
//! - `TimelineState` / `KeyframeStore`: 纯数据
//! - `AnimationService`: 业务逻辑
//! - `editor::systems`: 每帧调度

use super::interpolation::{InterpolationMode, Interpolator};
use super::keyframe::{KeyframeStore, ObjectId, TransformSnapshot};
use super::timeline::{PlaybackClock, PlaybackState, TimelineState};
use crate::scene::SceneAccess;

/// 动画服务 - 封装时间轴业务逻辑
pub struct AnimationService;

impl AnimationService {
    /// 把任意时间规整到关键帧允许的 [0, duration) 区间
    ///
    /// 恰好等于 `duration` 的时间与循环起点重合，折算为 0。
    pub fn normalize_keyframe_time(timeline: &TimelineState, time: f32) -> f32 {
        let clamped = Self::clamp_time(timeline, time);
        if clamped >= timeline.duration {
            0.0
        } else {
            clamped
        }
    }

    /// 记录关键帧
    pub fn add_keyframe(
        store: &mut KeyframeStore,
        timeline: &TimelineState,
        time: f32,
        id: ObjectId,
        snapshot: TransformSnapshot,
    ) -> f32 {
        let time = Self::normalize_keyframe_time(timeline, time);
        store.add_keyframe(time, id, snapshot);
        tracing::info!(target: "animation", "Keyframe added at frame {} for object {}", time.round(), id);
        time
    }

    /// 跳转到指定时间，限制在 [0, duration]
    pub fn set_current_time(timeline: &mut TimelineState, time: f32) {
        timeline.current_time = Self::clamp_time(timeline, time);
    }

    pub fn set_interpolation_mode(timeline: &mut TimelineState, mode: InterpolationMode) {
        timeline.interpolation = mode;
    }

    /// 切换播放 / 停止
    pub fn toggle_playback(timeline: &mut TimelineState) -> PlaybackState {
        timeline.state = match timeline.state {
            PlaybackState::Stopped => PlaybackState::Playing,
            PlaybackState::Playing => PlaybackState::Stopped,
        };
        timeline.accumulator = 0.0;
        if timeline.state == PlaybackState::Stopped {
            timeline.last_advance = None;
        }
        tracing::debug!(target: "animation", "Playback {:?}", timeline.state);
        timeline.state
    }

    /// 按墙钟时间推进播放头，返回前进的帧数
    ///
    /// 停止状态下什么也不做。推进时按 `duration` 取模循环。
    pub fn advance(timeline: &mut TimelineState, now_seconds: f64) -> u32 {
        if !timeline.is_playing() {
            return 0;
        }

        let interval = timeline.frame_interval();
        let frames = match timeline.clock {
            PlaybackClock::FrameGated => {
                let due = timeline
                    .last_advance
                    .map_or(true, |last| now_seconds - last >= interval);
                if !due {
                    return 0;
                }
                timeline.last_advance = Some(now_seconds);
                1
            }
            PlaybackClock::Accumulated {
                max_frames_per_tick,
            } => {
                let Some(last) = timeline.last_advance.replace(now_seconds) else {
                    return 0;
                };
                timeline.accumulator += (now_seconds - last).max(0.0);
                let pending = (timeline.accumulator / interval).floor();
                let frames = pending.min(f64::from(max_frames_per_tick)) as u32;
                if pending > f64::from(max_frames_per_tick) {
                    // 落后太多时丢弃剩余的积压
                    timeline.accumulator = 0.0;
                } else {
                    timeline.accumulator -= f64::from(frames) * interval;
                }
                frames
            }
        };

        if frames > 0 {
            timeline.current_time =
                (timeline.current_time + frames as f32).rem_euclid(timeline.duration);
        }
        frames
    }

    /// 采样当前时间的变换
    pub fn sample(
        store: &KeyframeStore,
        timeline: &TimelineState,
    ) -> Vec<(ObjectId, TransformSnapshot)> {
        Interpolator::sample(
            store,
            timeline.current_time,
            timeline.duration,
            timeline.interpolation,
        )
    }

    /// 把插值结果写回场景，返回实际更新的对象数
    ///
    /// 场景中已不存在的对象会被跳过。
    pub fn apply_to_scene<S: SceneAccess + ?Sized>(
        store: &KeyframeStore,
        timeline: &TimelineState,
        scene: &mut S,
    ) -> usize {
        let mut applied = 0;
        for (id, transform) in Self::sample(store, timeline) {
            if scene.set_transform(id, transform) {
                applied += 1;
            } else {
                tracing::warn!(target: "animation", "Skipping orphaned keyframe object {}", id);
            }
        }
        applied
    }

    /// 每帧调用：推进播放头并更新场景，返回更新的对象数
    pub fn tick<S: SceneAccess + ?Sized>(
        store: &KeyframeStore,
        timeline: &mut TimelineState,
        now_seconds: f64,
        scene: &mut S,
    ) -> usize {
        if Self::advance(timeline, now_seconds) == 0 {
            return 0;
        }
        Self::apply_to_scene(store, timeline, scene)
    }

    fn clamp_time(timeline: &TimelineState, time: f32) -> f32 {
        if time.is_nan() {
            return 0.0;
        }
        time.clamp(0.0, timeline.duration)
    }
}
