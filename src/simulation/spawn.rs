//! 动态粒子采样

use crate::config::SpawnConfig;
use crate::domain::{DomainError, Particle, ParticleId};
use crate::render::random_color;
use glam::Vec3;
use rand::Rng;

/// 按生成参数随机采样一个动态粒子
///
/// 位置为 `(x, height, depth)`，初速度竖直向上。调用方需保证各区间非空
/// （[`SpawnConfig::validate`] 已检查）。
pub fn sample_particle<R: Rng + ?Sized>(
    spawn: &SpawnConfig,
    gravity: Vec3,
    rng: &mut R,
    id: ParticleId,
) -> Result<Particle, DomainError> {
    let x = rng.gen_range(spawn.x_range.clone());
    let radius = rng.gen_range(spawn.radius_range.clone());
    let elasticity = rng.gen_range(spawn.elasticity_range.clone());
    let launch_speed = rng.gen_range(spawn.launch_speed_range.clone());
    let color = random_color(rng);

    Particle::dynamic(id, Vec3::new(x, spawn.height, spawn.depth), radius, elasticity)?
        .with_acceleration(gravity)
        .with_color(color)
        .with_velocity(Vec3::new(0.0, launch_speed, 0.0))
}
