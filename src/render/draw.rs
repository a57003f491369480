//! 绘制请求
//!
//! 模拟核心不接触 GPU，只按帧输出“用某个变换和材质绘制球/立方体”的有序请求，
//! 由外部渲染器消费。

use crate::math::Transform;
use glam::{Mat4, Vec3};
use serde::Serialize;

/// 动态与静态粒子球体的粗糙度
pub const SPHERE_ROUGHNESS: f32 = 0.3;
/// 动态与静态粒子球体的金属度
pub const SPHERE_METALLIC: f32 = 0.0;

/// 拾取标记球的缩放
pub const PICK_MARKER_SCALE: f32 = 3.0;
/// 拾取标记球的颜色（超出 [0,1] 以便在色调映射后呈高亮）
pub const PICK_MARKER_ALBEDO: [f32; 3] = [100.0, 100.0, 100.0];

/// 网格类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshKind {
    Sphere,
    Cube,
}

impl MeshKind {
    /// GPU 实例数据中的网格编号
    pub fn index(self) -> u32 {
        match self {
            MeshKind::Sphere => 0,
            MeshKind::Cube => 1,
        }
    }
}

/// 单个绘制请求
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawRequest {
    pub mesh: MeshKind,
    /// 模型矩阵（列主序）
    pub transform: Mat4,
    pub albedo: [f32; 3],
    pub roughness: f32,
    pub metallic: f32,
}

impl DrawRequest {
    pub fn new(mesh: MeshKind, transform: Mat4, albedo: [f32; 3], roughness: f32, metallic: f32) -> Self {
        Self {
            mesh,
            transform,
            albedo,
            roughness,
            metallic,
        }
    }

    /// 粒子球体：平移到 `center` 并按半径缩放
    pub fn sphere(center: Vec3, radius: f32, albedo: [f32; 3]) -> Self {
        let transform = Transform::from_position_scale(center, radius).matrix();
        Self::new(MeshKind::Sphere, transform, albedo, SPHERE_ROUGHNESS, SPHERE_METALLIC)
    }

    /// 拾取命中点的高亮标记
    pub fn pick_marker(point: Vec3) -> Self {
        let transform = Transform::from_position_scale(point, PICK_MARKER_SCALE).matrix();
        Self::new(MeshKind::Sphere, transform, PICK_MARKER_ALBEDO, 1.0, 1.0)
    }

    /// 打包为 GPU 实例数据
    pub fn to_instance(&self) -> InstanceData {
        InstanceData {
            model: self.transform.to_cols_array_2d(),
            albedo: self.albedo,
            roughness: self.roughness,
            metallic: self.metallic,
            mesh: self.mesh.index(),
            _padding: [0; 2],
        }
    }
}

/// 每实例 GPU 数据
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    /// 模型矩阵 (4x4)
    pub model: [[f32; 4]; 4],
    pub albedo: [f32; 3],
    pub roughness: f32,
    pub metallic: f32,
    pub mesh: u32,
    _padding: [u32; 2],
}

/// 一帧的有序绘制列表
///
/// 由模拟上下文持有并逐帧复用，避免每帧重新分配。
#[derive(Debug, Clone, Default, Serialize)]
pub struct DrawList {
    requests: Vec<DrawRequest>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            requests: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, request: DrawRequest) {
        self.requests.push(request);
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawRequest> {
        self.requests.iter()
    }

    pub fn as_slice(&self) -> &[DrawRequest] {
        &self.requests
    }

    /// 按网格类型统计请求数
    pub fn count(&self, mesh: MeshKind) -> usize {
        self.requests.iter().filter(|r| r.mesh == mesh).count()
    }

    /// 打包全部实例数据，顺序与绘制顺序一致
    pub fn instances(&self) -> Vec<InstanceData> {
        self.requests.iter().map(DrawRequest::to_instance).collect()
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawRequest;
    type IntoIter = std::slice::Iter<'a, DrawRequest>;

    fn into_iter(self) -> Self::IntoIter {
        self.requests.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<InstanceData>(), 96);
        let request = DrawRequest::sphere(Vec3::new(1.0, 2.0, 3.0), 2.0, [0.1, 0.2, 0.3]);
        let instance = request.to_instance();
        let bytes: &[u8] = bytemuck::bytes_of(&instance);
        assert_eq!(bytes.len(), 96);
        assert_eq!(instance.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(instance.model[0][0], 2.0);
        assert_eq!(instance.mesh, 0);
    }

    #[test]
    fn test_sphere_request_material() {
        let request = DrawRequest::sphere(Vec3::ZERO, 1.5, [1.0, 0.0, 0.0]);
        assert_eq!(request.mesh, MeshKind::Sphere);
        assert_eq!(request.roughness, SPHERE_ROUGHNESS);
        assert_eq!(request.metallic, SPHERE_METALLIC);
        assert_eq!(request.transform, Mat4::from_scale(Vec3::splat(1.5)));
    }

    #[test]
    fn test_pick_marker() {
        let marker = DrawRequest::pick_marker(Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(marker.albedo, PICK_MARKER_ALBEDO);
        assert_eq!(marker.roughness, 1.0);
        assert_eq!(marker.metallic, 1.0);
        assert_eq!(marker.transform.w_axis.truncate(), Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(marker.transform.x_axis.x, PICK_MARKER_SCALE);
    }

    #[test]
    fn test_draw_list_preserves_order() {
        let mut list = DrawList::with_capacity(4);
        list.push(DrawRequest::pick_marker(Vec3::ZERO));
        list.push(DrawRequest::sphere(Vec3::ONE, 1.0, [1.0; 3]));
        list.push(DrawRequest::new(MeshKind::Cube, Mat4::IDENTITY, [1.0; 3], 0.9, 0.0));

        assert_eq!(list.len(), 3);
        assert_eq!(list.count(MeshKind::Sphere), 2);
        assert_eq!(list.as_slice()[2].mesh, MeshKind::Cube);
        assert_eq!(list.instances()[2].mesh, 1);

        list.clear();
        assert!(list.is_empty());
    }
}
