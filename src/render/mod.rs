//! 渲染接口层
//!
//! 只定义模拟核心与外部渲染器之间的数据：绘制请求、GPU 实例数据和粒子调色板。

pub mod draw;
pub mod palette;

pub use draw::{
    DrawList, DrawRequest, InstanceData, MeshKind, PICK_MARKER_ALBEDO, PICK_MARKER_SCALE,
    SPHERE_METALLIC, SPHERE_ROUGHNESS,
};
pub use palette::{palette_color, random_color};
