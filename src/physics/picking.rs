//! 屏幕拾取：由屏幕坐标构造世界射线并与粒子求交

use crate::config::PickMode;
use crate::domain::{Particle, ParticleId};
use crate::math::try_inverse;
use glam::{Mat4, Vec3, Vec4};

/// 拾取所需的相机视图
///
/// 实现方提供投影矩阵与视图矩阵的逆；矩阵不可逆时返回 `None`，拾取随之失败。
pub trait CameraView {
    fn inverse_projection(&self) -> Option<Mat4>;
    fn inverse_view(&self) -> Option<Mat4>;
    /// 相机世界坐标，即射线起点；须与视图矩阵的眼点一致
    fn position(&self) -> Vec3;
    /// 视口尺寸（像素）
    fn viewport_size(&self) -> (f32, f32);
}

/// 由显式矩阵构成的相机视图
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixCamera {
    pub projection: Mat4,
    pub view: Mat4,
    pub position: Vec3,
    pub viewport: (f32, f32),
}

impl CameraView for MatrixCamera {
    fn inverse_projection(&self) -> Option<Mat4> {
        try_inverse(&self.projection)
    }

    fn inverse_view(&self) -> Option<Mat4> {
        try_inverse(&self.view)
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn viewport_size(&self) -> (f32, f32) {
        self.viewport
    }
}

/// 世界空间射线，方向为单位向量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// 方向长度为零或非有限时返回 `None`
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// 拾取结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// 被击中粒子在输入切片中的下标
    pub index: usize,
    pub particle_id: ParticleId,
    /// 射线与包围球的第一个交点
    pub point: Vec3,
    /// 起点到交点的距离
    pub distance: f32,
}

/// 拾取服务
pub struct PickingService;

impl PickingService {
    /// 屏幕坐标转世界射线
    ///
    /// `(screen_x, screen_y)` 以视口左上角为原点。先经逆投影得到视图空间近平面点
    /// 并做透视除法，再经逆视图矩阵变换到世界空间，射线从相机位置指向该点。
    /// 视口为空或矩阵不可逆时返回 `None`。
    pub fn screen_ray<C: CameraView + ?Sized>(camera: &C, screen_x: f32, screen_y: f32) -> Option<Ray> {
        let (width, height) = camera.viewport_size();
        if !(width > 0.0 && height > 0.0) {
            tracing::debug!(target: "physics", width, height, "pick ignored for empty viewport");
            return None;
        }

        let ndc = Vec4::new(
            2.0 * screen_x / width - 1.0,
            1.0 - 2.0 * screen_y / height,
            -1.0,
            1.0,
        );

        let view_space = camera.inverse_projection()? * ndc;
        if view_space.w == 0.0 || !view_space.is_finite() {
            return None;
        }
        let near_point = view_space.truncate() / view_space.w;

        // 视图空间中相机位于原点，近平面点本身就是视线方向；
        // 直接变换方向可避免远离原点时 `world_point - eye` 的相消误差
        let direction = camera.inverse_view()?.transform_vector3(near_point);
        Ray::new(camera.position(), direction)
    }

    /// 射线与粒子集合求交
    ///
    /// `FirstHit` 返回切片顺序中第一个被击中的粒子；`Nearest` 返回距离最近者。
    pub fn cast(ray: &Ray, particles: &[Particle], mode: PickMode) -> Option<PickHit> {
        let mut hits = particles.iter().enumerate().filter_map(|(index, particle)| {
            particle
                .body()
                .ray_hit(ray.origin, ray.direction)
                .map(|hit| PickHit {
                    index,
                    particle_id: particle.id(),
                    point: hit.point,
                    distance: hit.t,
                })
        });

        match mode {
            PickMode::FirstHit => hits.next(),
            PickMode::Nearest => hits.min_by(|a, b| a.distance.total_cmp(&b.distance)),
        }
    }

    /// 从屏幕坐标发射射线并拾取粒子
    pub fn shoot_ray<C: CameraView + ?Sized>(
        camera: &C,
        screen_x: f32,
        screen_y: f32,
        particles: &[Particle],
        mode: PickMode,
    ) -> Option<PickHit> {
        let ray = Self::screen_ray(camera, screen_x, screen_y)?;
        let hit = Self::cast(&ray, particles, mode);
        tracing::debug!(
            target: "physics",
            screen_x,
            screen_y,
            hit = ?hit.map(|h| h.particle_id),
            "pick ray cast"
        );
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{look_at, perspective, WORLD_UP};

    fn camera(position: Vec3, target: Vec3) -> MatrixCamera {
        MatrixCamera {
            projection: perspective(20f32.to_radians(), 800.0 / 600.0, 0.01, 1000.0),
            view: look_at(position, target, WORLD_UP),
            position,
            viewport: (800.0, 600.0),
        }
    }

    fn fixed(id: u64, position: Vec3, radius: f32) -> Particle {
        Particle::fixed(ParticleId::new(id), position, radius).unwrap()
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let eye = Vec3::new(0.0, 30.0, -150.0);
        let cam = camera(eye, Vec3::ZERO);
        let ray = PickingService::screen_ray(&cam, 400.0, 300.0).unwrap();
        let expected = (Vec3::ZERO - eye).normalize();
        assert!(ray.direction.abs_diff_eq(expected, 1e-4));
        assert_eq!(ray.origin, eye);
    }

    #[test]
    fn test_screen_edges_map_to_expected_sides() {
        let cam = camera(Vec3::new(0.0, 0.0, -100.0), Vec3::ZERO);
        let left = PickingService::screen_ray(&cam, 0.0, 300.0).unwrap();
        let top = PickingService::screen_ray(&cam, 400.0, 0.0).unwrap();
        // 右手坐标系下从 -Z 看向 +Z，屏幕左侧对应世界 +X
        assert!(left.direction.x > 0.0);
        assert!(top.direction.y > 0.0);
    }

    #[test]
    fn test_zero_viewport_yields_no_ray() {
        let mut cam = camera(Vec3::new(0.0, 0.0, -100.0), Vec3::ZERO);
        cam.viewport = (0.0, 600.0);
        assert!(PickingService::screen_ray(&cam, 0.0, 0.0).is_none());
    }

    #[test]
    fn test_singular_projection_yields_no_ray() {
        let mut cam = camera(Vec3::new(0.0, 0.0, -100.0), Vec3::ZERO);
        cam.projection = Mat4::ZERO;
        assert!(PickingService::screen_ray(&cam, 400.0, 300.0).is_none());
    }

    #[test]
    fn test_shoot_ray_hits_particle_at_center() {
        let cam = camera(Vec3::new(0.0, 30.0, -150.0), Vec3::ZERO);
        let particles = vec![fixed(7, Vec3::ZERO, 10.0)];
        let hit = PickingService::shoot_ray(&cam, 400.0, 300.0, &particles, PickMode::FirstHit).unwrap();
        assert_eq!(hit.index, 0);
        assert_eq!(hit.particle_id, ParticleId::new(7));
        let expected = Vec3::new(0.0, 30.0, -150.0).length() - 10.0;
        assert!((hit.distance - expected).abs() < 1e-2);
    }

    #[test]
    fn test_cast_misses_when_pointing_away() {
        let ray = Ray::new(Vec3::new(0.0, 30.0, -150.0), Vec3::X).unwrap();
        let particles = vec![fixed(1, Vec3::ZERO, 10.0)];
        assert!(PickingService::cast(&ray, &particles, PickMode::FirstHit).is_none());
    }

    #[test]
    fn test_first_hit_versus_nearest() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -100.0), Vec3::Z).unwrap();
        let particles = vec![
            fixed(1, Vec3::new(0.0, 0.0, 50.0), 5.0),
            fixed(2, Vec3::ZERO, 5.0),
        ];

        let first = PickingService::cast(&ray, &particles, PickMode::FirstHit).unwrap();
        let nearest = PickingService::cast(&ray, &particles, PickMode::Nearest).unwrap();

        assert_eq!(first.particle_id, ParticleId::new(1));
        assert_eq!(nearest.particle_id, ParticleId::new(2));
        assert!((nearest.distance - 95.0).abs() < 1e-3);
        assert!(ray.point_at(nearest.distance).abs_diff_eq(nearest.point, 1e-4));
    }

    #[test]
    fn test_ray_rejects_zero_direction() {
        assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
    }
}
