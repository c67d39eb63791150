//! 核心宏定义
//!
//! 提供统一的宏来减少默认值样板代码

/// 为结构体实现Default trait的宏
///
/// 使用示例:
/// ```rust
/// use studio_engine::impl_default;
///
/// struct ClothDefaults {
///     resolution: usize,
///     particle_mass: f32,
/// }
///
/// impl_default!(ClothDefaults {
///     resolution: 15,
///     particle_mass: 0.1,
/// });
///
/// assert_eq!(ClothDefaults::default().resolution, 15);
/// ```
#[macro_export]
macro_rules! impl_default {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}

/// 同时实现Default和new()的宏
///
/// 使用示例:
/// ```rust
/// use studio_engine::impl_default_and_new;
///
/// struct Counter {
///     ticks: u32,
/// }
///
/// impl_default_and_new!(Counter { ticks: 0 });
///
/// assert_eq!(Counter::new().ticks, 0);
/// ```
#[macro_export]
macro_rules! impl_default_and_new {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }

        impl $struct_name {
            pub fn new() -> Self {
                Self::default()
            }
        }
    };
}
