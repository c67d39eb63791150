use glam::Vec3;
use rapier3d::na::Unit;
use rapier3d::prelude::*;

/// 圆台近似时每个圆周的采样点数
const FRUSTUM_SEGMENTS: usize = 16;

/// 碰撞代理形状
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// 无限平面 (法线方向为外侧)
    Plane { normal: Vec3 },
    /// 长方体 (半尺寸)
    Box { half_extents: Vec3 },
    /// 球体
    Sphere { radius: f32 },
    /// 圆柱 / 圆台，沿局部Y轴
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
    },
    /// 对无法识别的几何体用世界包围盒近似
    BoxApproximation { half_extents: Vec3 },
}

impl ColliderShape {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ColliderShape::Plane { .. } => "plane",
            ColliderShape::Box { .. } => "box",
            ColliderShape::Sphere { .. } => "sphere",
            ColliderShape::Cylinder { .. } => "cylinder",
            ColliderShape::BoxApproximation { .. } => "box-approximation",
        }
    }

    /// 是否退化为零体积
    pub fn is_degenerate(&self) -> bool {
        match *self {
            ColliderShape::Plane { normal } => normal.length_squared() == 0.0,
            ColliderShape::Box { half_extents }
            | ColliderShape::BoxApproximation { half_extents } => half_extents.min_element() <= 0.0,
            ColliderShape::Sphere { radius } => radius <= 0.0,
            ColliderShape::Cylinder {
                radius_top,
                radius_bottom,
                height,
            } => height <= 0.0 || radius_top.max(radius_bottom) <= 0.0,
        }
    }

    /// 转换为Rapier形状
    pub fn to_rapier_shape(&self) -> SharedShape {
        match *self {
            ColliderShape::Plane { normal } => {
                let normal = if normal.length_squared() > 0.0 {
                    normal
                } else {
                    Vec3::Y
                };
                SharedShape::halfspace(Unit::new_normalize(vector![normal.x, normal.y, normal.z]))
            }
            ColliderShape::Box { half_extents }
            | ColliderShape::BoxApproximation { half_extents } => {
                SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            ColliderShape::Sphere { radius } => SharedShape::ball(radius),
            ColliderShape::Cylinder {
                radius_top,
                radius_bottom,
                height,
            } => {
                let half_height = height * 0.5;
                if radius_top == radius_bottom {
                    return SharedShape::cylinder(half_height, radius_top);
                }
                // 上下半径不同时取两圈采样点的凸包
                let mut points = Vec::with_capacity(FRUSTUM_SEGMENTS * 2);
                for i in 0..FRUSTUM_SEGMENTS {
                    let angle = i as f32 / FRUSTUM_SEGMENTS as f32 * std::f32::consts::TAU;
                    let (sin, cos) = angle.sin_cos();
                    points.push(point![cos * radius_top, half_height, sin * radius_top]);
                    points.push(point![cos * radius_bottom, -half_height, sin * radius_bottom]);
                }
                SharedShape::convex_hull(&points).unwrap_or_else(|| {
                    SharedShape::cylinder(half_height, radius_top.max(radius_bottom))
                })
            }
        }
    }
}
