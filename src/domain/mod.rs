//! 领域层模块
//!
//! 包围体与粒子实体，以及领域错误类型

pub mod bounding;
pub mod errors;
pub mod particle;

// 重新导出主要类型
pub use bounding::{BoundingBody, BoundingSphere, RayHit};
pub use errors::{DomainError, PhysicsError};
pub use particle::{BodyKind, Particle, ParticleId, DEFAULT_GRAVITY};
