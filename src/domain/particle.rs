//! 粒子实体
//!
//! 带包围球的质点。动态粒子参与积分并接受冲量；静态粒子只对动态粒子施加响应，
//! 速度恒为零。

use crate::domain::bounding::{BoundingBody, BoundingSphere};
use crate::domain::errors::{DomainError, PhysicsError};
use crate::math::Transform;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 默认重力加速度（场景单位）
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -98.0, 0.0);

/// 粒子ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(pub u64);

impl ParticleId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 粒子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// 参与积分与碰撞响应
    Dynamic,
    /// 固定不动，只对动态粒子产生响应
    Static,
}

/// 粒子 - 富领域对象
///
/// # 示例
///
/// ```rust
/// use particle_engine::domain::{Particle, ParticleId};
/// use glam::Vec3;
///
/// let mut ball = Particle::dynamic(ParticleId::new(1), Vec3::new(0.0, 10.0, 0.0), 1.5, 0.5)?;
/// ball.set_velocity(Vec3::new(0.0, 70.0, 0.0))?;
/// ball.tick(1.0 / 45.0);
/// assert_eq!(ball.body().center(), ball.position());
/// # Ok::<(), particle_engine::domain::DomainError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    id: ParticleId,
    position: Vec3,
    velocity: Vec3,
    acceleration: Vec3,
    body: BoundingBody,
    kind: BodyKind,
    elasticity: f32,
    /// 是否生成绘制请求（不影响碰撞）
    pub visible: bool,
    /// 材质颜色
    pub color: [f32; 3],
}

impl Particle {
    /// 创建粒子
    ///
    /// # 错误
    ///
    /// 位置非有限、半径不为正、或弹性系数不在 `[0, 1]` 时返回
    /// [`PhysicsError::InvalidParameter`]。
    pub fn new(
        id: ParticleId,
        position: Vec3,
        radius: f32,
        kind: BodyKind,
        elasticity: f32,
    ) -> Result<Self, DomainError> {
        if !position.is_finite() {
            return Err(PhysicsError::invalid(format!("Invalid position for particle {}", id)).into());
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(PhysicsError::invalid(format!(
                "Radius must be positive for particle {}: {}",
                id, radius
            ))
            .into());
        }
        if !(0.0..=1.0).contains(&elasticity) {
            return Err(PhysicsError::invalid(format!(
                "Elasticity must lie in [0, 1] for particle {}: {}",
                id, elasticity
            ))
            .into());
        }

        Ok(Self {
            id,
            position,
            velocity: Vec3::ZERO,
            acceleration: DEFAULT_GRAVITY,
            body: BoundingBody::sphere(position, radius),
            kind,
            elasticity,
            visible: true,
            color: [1.0, 1.0, 1.0],
        })
    }

    /// 创建动态粒子
    pub fn dynamic(
        id: ParticleId,
        position: Vec3,
        radius: f32,
        elasticity: f32,
    ) -> Result<Self, DomainError> {
        Self::new(id, position, radius, BodyKind::Dynamic, elasticity)
    }

    /// 创建静态粒子
    pub fn fixed(id: ParticleId, position: Vec3, radius: f32) -> Result<Self, DomainError> {
        Self::new(id, position, radius, BodyKind::Static, 1.0)
    }

    /// 设置初速度（构建器形式）
    pub fn with_velocity(mut self, velocity: Vec3) -> Result<Self, DomainError> {
        self.set_velocity(velocity)?;
        Ok(self)
    }

    pub fn with_acceleration(mut self, acceleration: Vec3) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    /// 不可见粒子仍参与碰撞
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }

    pub fn body(&self) -> &BoundingBody {
        &self.body
    }

    /// 包围球视图
    pub fn sphere(&self) -> BoundingSphere {
        match self.body {
            BoundingBody::Sphere(sphere) => sphere,
        }
    }

    pub fn radius(&self) -> f32 {
        self.body.bounding_radius()
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }

    pub fn elasticity(&self) -> f32 {
        self.elasticity
    }

    /// 设置位置并同步包围体
    pub fn set_position(&mut self, position: Vec3) -> Result<(), DomainError> {
        if !position.is_finite() {
            return Err(PhysicsError::invalid(format!("Invalid position for particle {}", self.id)).into());
        }
        self.position = position;
        self.sync_body();
        Ok(())
    }

    /// 设置速度
    ///
    /// 静态粒子的速度恒为零，修改会返回 [`PhysicsError::StaticBodyMutation`]。
    pub fn set_velocity(&mut self, velocity: Vec3) -> Result<(), DomainError> {
        if !self.is_dynamic() {
            return Err(PhysicsError::StaticBodyMutation(format!(
                "Cannot set velocity on static particle {}",
                self.id
            ))
            .into());
        }
        if !velocity.is_finite() {
            return Err(PhysicsError::invalid(format!("Invalid velocity for particle {}", self.id)).into());
        }
        self.velocity = velocity;
        Ok(())
    }

    /// 半隐式欧拉积分：先更新速度，再用新速度更新位置
    pub fn tick(&mut self, dt: f32) {
        if !self.is_dynamic() {
            return;
        }
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
        self.sync_body();
    }

    /// 动量（所有动态粒子质量视为 1）
    pub fn momentum(&self) -> Vec3 {
        self.velocity
    }

    /// 动能（单位质量）
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.velocity.length_squared()
    }

    /// 绘制变换：平移到位置，按半径等比缩放
    pub fn transform(&self) -> Transform {
        Transform::from_position_scale(self.position, self.radius())
    }

    /// 位移并同步包围体（碰撞修正专用）
    pub(crate) fn displace(&mut self, delta: Vec3) {
        self.position += delta;
        self.sync_body();
    }

    /// 覆盖速度（碰撞响应专用，调用方保证是动态粒子）
    pub(crate) fn replace_velocity(&mut self, velocity: Vec3) {
        debug_assert!(self.is_dynamic(), "resolver wrote velocity of static particle");
        self.velocity = velocity;
    }

    fn sync_body(&mut self) {
        self.body.set_center(self.position);
    }
}
