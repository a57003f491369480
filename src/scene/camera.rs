//! 透视相机

use crate::config::CameraConfig;
use crate::math::{look_at, perspective, try_inverse, WORLD_UP};
use crate::physics::CameraView;
use glam::{Mat4, Vec3};

/// 透视相机
///
/// 有注视目标时看向目标，否则沿 `front` 方向观察。
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    target: Option<Vec3>,
    front: Vec3,
    fov_degrees: f32,
    near: f32,
    far: f32,
    viewport: (f32, f32),
}

impl Camera {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            position: config.position,
            target: config.target,
            front: config.front,
            fov_degrees: config.fov_degrees,
            near: config.near,
            far: config.far,
            viewport: (config.viewport_width, config.viewport_height),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    /// 注视固定目标
    pub fn look_at(&mut self, target: Vec3) {
        self.target = Some(target);
    }

    /// 取消注视目标，改为沿 `front` 观察
    pub fn look_along(&mut self, front: Vec3) {
        self.target = None;
        self.front = front;
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.fov_degrees = fov_degrees;
    }

    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
    }

    /// 视口宽高比；高度为零时退化为 1
    pub fn aspect(&self) -> f32 {
        let (width, height) = self.viewport;
        if height > 0.0 && width > 0.0 {
            width / height
        } else {
            1.0
        }
    }

    pub fn projection(&self) -> Mat4 {
        perspective(self.fov_degrees.to_radians(), self.aspect(), self.near, self.far)
    }

    pub fn view(&self) -> Mat4 {
        let target = self.target.unwrap_or(self.position + self.front);
        look_at(self.position, target, WORLD_UP)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

impl CameraView for Camera {
    fn inverse_projection(&self) -> Option<Mat4> {
        try_inverse(&self.projection())
    }

    fn inverse_view(&self) -> Option<Mat4> {
        try_inverse(&self.view())
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn viewport_size(&self) -> (f32, f32) {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::PickingService;

    #[test]
    fn test_default_camera_looks_at_target() {
        let camera = Camera::from_config(&CameraConfig::default());
        let eye = camera.view().transform_point3(Vec3::new(0.0, 20.0, 0.0));
        // 目标点位于视图空间 -Z 轴上
        assert!(eye.x.abs() < 1e-3);
        assert!(eye.y.abs() < 1e-3);
        assert!(eye.z < 0.0);
    }

    #[test]
    fn test_center_ray_follows_front_without_target() {
        let mut camera = Camera::from_config(&CameraConfig::default());
        camera.look_along(Vec3::Z);
        let ray = PickingService::screen_ray(&camera, 400.0, 300.0).unwrap();
        assert!(ray.direction.abs_diff_eq(Vec3::Z, 1e-4));
    }

    #[test]
    fn test_aspect_falls_back_for_empty_viewport() {
        let mut camera = Camera::from_config(&CameraConfig::default());
        assert!((camera.aspect() - 800.0 / 600.0).abs() < 1e-6);
        camera.set_viewport(0.0, 0.0);
        assert_eq!(camera.aspect(), 1.0);
        assert!(PickingService::screen_ray(&camera, 0.0, 0.0).is_none());
    }

    #[test]
    fn test_view_projection_maps_target_to_screen_center() {
        let camera = Camera::from_config(&CameraConfig::default());
        let clip = camera.view_projection() * Vec3::new(0.0, 20.0, 0.0).extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4);
        assert!(ndc.y.abs() < 1e-4);
    }
}
