//! 场景搭建：由配置生成静态粒子与地面绘制

use crate::config::{GroundConfig, SceneConfig};
use crate::domain::{DomainError, Particle, ParticleId};
use crate::math::Transform;
use crate::render::{random_color, DrawRequest, MeshKind};
use glam::Vec3;
use rand::Rng;

/// 按配置生成静态粒子，ID 从 `next_id` 开始递增分配
pub fn build_static_particles<R: Rng + ?Sized>(
    scene: &SceneConfig,
    rng: &mut R,
    next_id: &mut u64,
) -> Result<Vec<Particle>, DomainError> {
    scene
        .static_bodies
        .iter()
        .map(|body| {
            let id = ParticleId::new(*next_id);
            *next_id += 1;
            let particle = Particle::fixed(id, body.position, body.radius)?.with_color(random_color(rng));
            Ok(if body.visible { particle } else { particle.hidden() })
        })
        .collect()
}

/// 地面方块的绘制请求（颜色在创建时确定，之后每帧复用）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ground {
    request: DrawRequest,
}

impl Ground {
    /// 地面未启用时返回 `None`
    pub fn from_config<R: Rng + ?Sized>(config: &GroundConfig, rng: &mut R) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let albedo = config.albedo.unwrap_or_else(|| random_color(rng));
        let transform = Transform::new(config.position, Vec3::ZERO, config.scale);
        Some(Self {
            request: DrawRequest::new(
                MeshKind::Cube,
                transform.matrix(),
                albedo,
                config.roughness,
                config.metallic,
            ),
        })
    }

    pub fn draw_request(&self) -> DrawRequest {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticBodyConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_scene_builds_seven_static_bodies() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut next_id = 10;
        let statics = build_static_particles(&SceneConfig::default(), &mut rng, &mut next_id).unwrap();

        assert_eq!(statics.len(), 7);
        assert_eq!(next_id, 17);
        assert_eq!(statics[0].id(), ParticleId::new(10));
        assert!(statics.iter().all(|p| !p.is_dynamic()));
        let floor = statics.last().unwrap();
        assert_eq!(floor.radius(), 1000.0);
        assert!(!floor.visible);
        assert!(statics[..6].iter().all(|p| p.visible));
    }

    #[test]
    fn test_invalid_static_body_is_rejected() {
        let mut scene = SceneConfig::default();
        scene.static_bodies = vec![StaticBodyConfig::new(Vec3::ZERO, -1.0)];
        let mut rng = StdRng::seed_from_u64(1);
        let mut next_id = 0;
        assert!(build_static_particles(&scene, &mut rng, &mut next_id).is_err());
    }

    #[test]
    fn test_ground_request() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut config = GroundConfig::default();
        config.albedo = Some([0.2, 0.4, 0.6]);
        let ground = Ground::from_config(&config, &mut rng).unwrap();
        let request = ground.draw_request();

        assert_eq!(request.mesh, MeshKind::Cube);
        assert_eq!(request.albedo, [0.2, 0.4, 0.6]);
        assert_eq!(request.roughness, 0.9);
        assert_eq!(request.metallic, 0.0);
        assert_eq!(request.transform.y_axis.y, 0.1);

        config.enabled = false;
        assert!(Ground::from_config(&config, &mut rng).is_none());
    }
}
