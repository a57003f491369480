//! 核心宏定义
//!
//! 提供统一的宏来减少样板代码

/// 为结构体实现Default trait的宏
///
/// 使用示例:
/// ```rust
/// use particle_engine::impl_default;
///
/// struct SpawnWindow {
///     count: u32,
///     height: f32,
/// }
///
/// impl_default!(SpawnWindow {
///     count: 3,
///     height: 10.0,
/// });
///
/// assert_eq!(SpawnWindow::default().count, 3);
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
/// use particle_engine::impl_default_and_new;
///
/// struct Counter {
///     frames: u64,
/// }
///
/// impl_default_and_new!(Counter { frames: 0 });
///
/// assert_eq!(Counter::new().frames, 0);
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

#[cfg(test)]
mod tests {

    struct Probe {
        hits: u32,
        label: String,
    }

    impl_default_and_new!(Probe {
        hits: 0,
        label: String::from("probe"),
    });

    #[test]
    fn test_impl_default_and_new() {
        let a = Probe::default();
        let b = Probe::new();

        assert_eq!(a.hits, 0);
        assert_eq!(a.label, "probe");
        assert_eq!(b.hits, 0);
        assert_eq!(b.label, "probe");
    }
}
