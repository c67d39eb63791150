//! 关键帧插值
//!
//! 时间轴被视为首尾相接的闭环：当前时间落在最后一个关键帧之后 (或第一个之前) 时，
//! 前一关键帧取最后一个，后一关键帧回绕到第一个。
//! 早于第一个关键帧的时间权重被限制为0，即保持最后一个关键帧的姿态。

use super::keyframe::{Keyframe, KeyframeStore, ObjectId, TransformSnapshot};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// 插值模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMode {
    /// 线性插值
    #[default]
    Linear,
    /// smoothstep缓动 `a²(3−2a)`
    #[serde(alias = "bezier")]
    Smooth,
}

impl InterpolationMode {
    /// 对归一化的alpha应用缓动曲线
    pub fn ease(self, alpha: f32) -> f32 {
        match self {
            InterpolationMode::Linear => alpha,
            InterpolationMode::Smooth => alpha * alpha * (3.0 - 2.0 * alpha),
        }
    }
}

/// 包围当前时间的两个关键帧
#[derive(Debug, Clone, Copy)]
pub struct Bracket<'a> {
    pub prev: &'a Keyframe,
    pub next: &'a Keyframe,
    /// 未缓动的混合系数，已限制在 [0, 1]
    pub alpha: f32,
    /// 后一关键帧是否回绕到了时间轴开头
    pub wrapped: bool,
}

/// 插值器
pub struct Interpolator;

impl Interpolator {
    /// 查找包围时间 `time` 的两个关键帧
    ///
    /// 少于两个关键帧时返回 `None`。
    pub fn bracket(store: &KeyframeStore, time: f32, duration: f32) -> Option<Bracket<'_>> {
        let keyframes = store.as_slice();
        let count = keyframes.len();
        if count < 2 {
            return None;
        }

        // 时间 <= time 的最大下标；不存在时取最后一个关键帧
        let prev_index = match keyframes.partition_point(|k| k.time() <= time) {
            0 => count - 1,
            i => i - 1,
        };
        let next_index = (prev_index + 1) % count;

        let prev = &keyframes[prev_index];
        let next = &keyframes[next_index];
        let prev_time = prev.time();
        let next_time = next.time();

        let wrapped = prev_time > next_time;
        let raw = if wrapped {
            // 早于第一个关键帧时分子为负，限制后停在最后一个关键帧
            (time - prev_time) / ((duration - prev_time) + next_time)
        } else {
            (time - prev_time) / (next_time - prev_time)
        };

        let alpha = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) };

        Some(Bracket {
            prev,
            next,
            alpha,
            wrapped,
        })
    }

    /// 按分量混合两个快照
    ///
    /// 欧拉角同样按分量线性插值后直接作为欧拉角使用，
    /// 不保证最短路径，也不处理万向节锁。
    pub fn blend(
        from: &TransformSnapshot,
        to: &TransformSnapshot,
        alpha: f32,
    ) -> TransformSnapshot {
        TransformSnapshot {
            position: lerp_exact(from.position, to.position, alpha),
            rotation: lerp_exact(from.rotation, to.rotation, alpha),
            scale: lerp_exact(from.scale, to.scale, alpha),
        }
    }

    /// 采样时间 `time` 处的变换
    ///
    /// 只返回同时出现在两个包围关键帧中的对象，结果按对象ID排序。
    pub fn sample(
        store: &KeyframeStore,
        time: f32,
        duration: f32,
        mode: InterpolationMode,
    ) -> Vec<(ObjectId, TransformSnapshot)> {
        let Some(bracket) = Self::bracket(store, time, duration) else {
            return Vec::new();
        };

        let alpha = mode.ease(bracket.alpha);
        let mut sampled: Vec<_> = bracket
            .prev
            .iter()
            .filter_map(|(id, from)| {
                bracket
                    .next
                    .get(id)
                    .map(|to| (id, Self::blend(from, to, alpha)))
            })
            .collect();
        sampled.sort_unstable_by_key(|(id, _)| *id);
        sampled
    }
}

/// 端点精确的线性插值
fn lerp_exact(from: Vec3, to: Vec3, alpha: f32) -> Vec3 {
    if alpha <= 0.0 {
        from
    } else if alpha >= 1.0 {
        to
    } else {
        from.lerp(to, alpha)
    }
}
