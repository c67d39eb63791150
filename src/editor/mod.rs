//! 编辑器会话与每帧调度
//!
//! `EditorSession` 是暴露给UI协作方的唯一入口；`systems` 把它接入 `bevy_ecs` 调度器。

pub mod session;
pub mod systems;

pub use session::EditorSession;
pub use systems::{
    build_editor_schedule, cloth_normals_system, cloth_step_system, timeline_playback_system,
    FrameClock,
};
