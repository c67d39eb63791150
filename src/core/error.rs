//! 统一错误处理模块
//!
//! 提供编辑器核心范围内的错误类型定义
//!
//! ## 错误类型分层
//!
//! - `AnimationError`: 关键帧录制、时间轴持久化
//! - `ClothError`: 布料拓扑构建参数校验
//! - `PhysicsError`: 求解器桥接层 (句柄失效等)
//! - `ConfigError`: 配置加载与校验 (定义在 `config` 模块)
//!
//! `EditorError` 汇总以上所有错误。常规使用中没有任何操作会产生致命错误，
//! 这些错误都可以被调用方安全地忽略或提示给用户。

use crate::animation::ObjectId;
use crate::config::ConfigError;
use thiserror::Error;

/// 编辑器核心错误类型
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),

    #[error("Cloth error: {0}")]
    Cloth(#[from] ClothError),

    #[error("Physics error: {0}")]
    Physics(#[from] PhysicsError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 动画系统错误
#[derive(Error, Debug)]
pub enum AnimationError {
    #[error("No object selected")]
    NothingSelected,

    #[error("Object {0} not found in scene")]
    ObjectNotFound(ObjectId),

    #[error("Invalid timeline: duration {duration}, fps {fps}")]
    InvalidTimeline { duration: f32, fps: f32 },

    #[error("Keyframe serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 布料系统错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClothError {
    #[error("Cloth resolution must be at least 2 particles per edge, got {0}")]
    InvalidResolution(usize),

    #[error("Cloth size must be positive and finite, got {0}")]
    InvalidSize(f32),

    #[error("Particle mass must be positive and finite, got {0}")]
    InvalidMass(f32),
}

/// 物理桥接错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhysicsError {
    #[error("Unknown body handle: {0}")]
    UnknownBody(u64),
}

/// 结果类型别名
pub type EditorResult<T> = Result<T, EditorError>;
pub type AnimationResult<T> = Result<T, AnimationError>;
pub type ClothResult<T> = Result<T, ClothError>;
pub type PhysicsResult<T> = Result<T, PhysicsError>;
