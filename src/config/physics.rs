use super::{ConfigError, ConfigResult};
use crate::impl_default;
use serde::{Deserialize, Serialize};

/// 物理求解器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// 重力加速度
    pub gravity: [f32; 3],

    /// 每个渲染帧推进的固定步长 (秒)
    pub fixed_timestep: f32,

    /// 约束求解迭代次数
    pub solver_iterations: usize,
}

impl_default!(PhysicsConfig {
    gravity: [0.0, -9.82, 0.0],
    fixed_timestep: 1.0 / 60.0,
    solver_iterations: 10,
});

impl PhysicsConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(ConfigError::ValidationError(
                "Invalid physics timestep".to_string(),
            ));
        }
        if self.solver_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "Solver needs at least one iteration".to_string(),
            ));
        }
        Ok(())
    }
}
