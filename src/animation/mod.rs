//! 动画系统模块
//!
//! 提供关键帧录制、循环时间轴插值和播放推进。
//!
//! ## 功能特性
//!
//! - 按时间排序的关键帧存储 (每个关键帧保存多个对象的变换快照)
//! - 带首尾回绕的线性 / smoothstep 插值
//! - 按帧率门控的循环播放
//! - 关键帧的JSON持久化
//!
//! ## 使用示例
//!
//! ```rust
//! use studio_engine::animation::{
//!     AnimationService, InterpolationMode, KeyframeStore, ObjectId, TimelineState,
//!     TransformSnapshot,
//! };
//! use glam::Vec3;
//!
//! let mut timeline = TimelineState::new(100.0, 30.0).unwrap();
//! let mut store = KeyframeStore::new();
//! let cube = ObjectId::new(1);
//!
//! store.add_keyframe(0.0, cube, TransformSnapshot::from_position(Vec3::ZERO));
//! store.add_keyframe(50.0, cube, TransformSnapshot::from_position(Vec3::new(10.0, 0.0, 0.0)));
//!
//! AnimationService::set_interpolation_mode(&mut timeline, InterpolationMode::Linear);
//! AnimationService::set_current_time(&mut timeline, 25.0);
//!
//! let sampled = AnimationService::sample(&store, &timeline);
//! assert_eq!(sampled[0].1.position, Vec3::new(5.0, 0.0, 0.0));
//! ```

pub mod interpolation;
pub mod keyframe;
pub mod serialization;
pub mod service;
pub mod timeline;

#[cfg(test)]
mod tests;

pub use interpolation::{Bracket, InterpolationMode, Interpolator};
pub use keyframe::{Keyframe, KeyframeStore, ObjectId, TransformSnapshot};
pub use serialization::{KeyframeRecord, SerializedTimeline};
pub use service::AnimationService;
pub use timeline::{PlaybackClock, PlaybackState, TimelineState};
