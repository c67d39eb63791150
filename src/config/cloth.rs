use super::{ConfigError, ConfigResult};
use crate::cloth::RestDistance;
use crate::impl_default;
use serde::{Deserialize, Serialize};

/// 布料默认参数
///
/// `CreateCloth` 未显式给出的参数都从这里取。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothConfig {
    /// 布料边长 (世界单位)
    pub size: f32,

    /// 每条边的粒子数
    pub resolution: usize,

    /// 单个粒子质量
    pub particle_mass: f32,

    /// 粒子碰撞球半径
    pub particle_radius: f32,

    /// 布料锚点位置
    pub anchor_position: [f32; 3],

    /// 结构约束静止长度
    pub rest_distance: RestDistance,
}

impl_default!(ClothConfig {
    size: 4.0,
    resolution: 15,
    particle_mass: 0.1,
    particle_radius: 0.1,
    anchor_position: [0.0, 5.0, 0.0],
    rest_distance: RestDistance::default(),
});

impl ClothConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.resolution < 2 {
            return Err(ConfigError::ValidationError(format!(
                "Cloth resolution must be >= 2, got {}",
                self.resolution
            )));
        }
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "Cloth size must be positive, got {}",
                self.size
            )));
        }
        if !(self.particle_mass.is_finite() && self.particle_mass > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "Particle mass must be positive, got {}",
                self.particle_mass
            )));
        }
        if !(self.particle_radius.is_finite() && self.particle_radius > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "Particle radius must be positive, got {}",
                self.particle_radius
            )));
        }
        if let RestDistance::Fixed(distance) = self.rest_distance {
            if !(distance.is_finite() && distance >= 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "Fixed rest distance must be non-negative, got {distance}"
                )));
            }
        }
        Ok(())
    }
}
