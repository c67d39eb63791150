//! 核心模块
//!
//! - `error` - 错误类型定义
//! - `logging` - 日志初始化
//! - `macros` - 默认值宏

pub mod error;
pub mod logging;
#[macro_use]
pub mod macros;

// 重新导出错误类型
pub use error::{
    AnimationError, AnimationResult, ClothError, ClothResult, EditorError, EditorResult,
    PhysicsError, PhysicsResult,
};

pub use logging::init_logging;
