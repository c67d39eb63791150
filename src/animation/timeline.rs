use super::interpolation::InterpolationMode;
use crate::config::TimelineConfig;
use crate::core::error::{AnimationError, AnimationResult};
use serde::{Deserialize, Serialize};

/// 播放状态，只能通过显式切换改变
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
}

/// 播放推进策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackClock {
    /// 距上次推进的墙钟时间达到 `1/fps` 时前进恰好一帧，不追帧
    #[default]
    FrameGated,
    /// 固定步长累加器，每次tick最多追 `max_frames_per_tick` 帧
    Accumulated { max_frames_per_tick: u32 },
}

/// 时间轴状态 (纯数据结构)
///
/// 业务逻辑位于 `AnimationService`。
#[derive(Debug, Clone)]
pub struct TimelineState {
    /// 当前时间 (帧)，范围 [0, duration]
    pub current_time: f32,
    /// 总长度 (帧)
    pub duration: f32,
    /// 帧率
    pub fps: f32,
    /// 插值模式
    pub interpolation: InterpolationMode,
    /// 播放状态
    pub state: PlaybackState,
    /// 推进策略
    pub clock: PlaybackClock,
    /// 上次推进时的墙钟时间 (秒)
    pub(crate) last_advance: Option<f64>,
    /// 累加器中尚未消耗的时间 (秒)
    pub(crate) accumulator: f64,
}

impl TimelineState {
    pub fn new(duration: f32, fps: f32) -> AnimationResult<Self> {
        if !(duration.is_finite() && duration > 0.0 && fps.is_finite() && fps > 0.0) {
            return Err(AnimationError::InvalidTimeline { duration, fps });
        }
        Ok(Self {
            current_time: 0.0,
            duration,
            fps,
            interpolation: InterpolationMode::default(),
            state: PlaybackState::Stopped,
            clock: PlaybackClock::default(),
            last_advance: None,
            accumulator: 0.0,
        })
    }

    pub fn from_config(config: &TimelineConfig) -> AnimationResult<Self> {
        let mut timeline = Self::new(config.duration, config.fps)?;
        timeline.interpolation = config.interpolation;
        timeline.clock = config.clock;
        Ok(timeline)
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// 一帧对应的墙钟秒数
    pub fn frame_interval(&self) -> f64 {
        1.0 / f64::from(self.fps)
    }

    /// 四舍五入后的帧号
    pub fn frame(&self) -> u32 {
        self.current_time.round().max(0.0) as u32
    }

    /// (秒, 秒内帧号)
    pub fn timecode(&self) -> (u32, u32) {
        let frame = self.frame();
        let fps = self.fps.round().max(1.0) as u32;
        (frame / fps, frame % fps)
    }
}
