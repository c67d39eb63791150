use super::{ConfigError, ConfigResult};
use crate::animation::{InterpolationMode, PlaybackClock};
use crate::impl_default;
use serde::{Deserialize, Serialize};

/// 时间轴配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// 时间轴总长度 (帧)
    pub duration: f32,

    /// 播放帧率
    pub fps: f32,

    /// 默认插值模式
    pub interpolation: InterpolationMode,

    /// 播放推进策略
    pub clock: PlaybackClock,
}

impl_default!(TimelineConfig {
    duration: 250.0,
    fps: 30.0,
    interpolation: InterpolationMode::Linear,
    clock: PlaybackClock::FrameGated,
});

impl TimelineConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "Timeline duration must be positive, got {}",
                self.duration
            )));
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "Timeline fps must be positive, got {}",
                self.fps
            )));
        }
        if let PlaybackClock::Accumulated { max_frames_per_tick } = self.clock {
            if max_frames_per_tick == 0 {
                return Err(ConfigError::ValidationError(
                    "Accumulated clock needs max_frames_per_tick >= 1".to_string(),
                ));
            }
        }
        Ok(())
    }
}
