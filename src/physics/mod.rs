//! 物理层
//!
//! 碰撞响应（动态-静态、动态-动态）与屏幕拾取。粒子的积分由
//! [`Particle::tick`](crate::domain::Particle::tick) 负责。

pub mod collision;
pub mod picking;

pub use crate::config::{PairIteration, PickMode};
pub use collision::{CollisionService, CollisionStats, Contact, DEFAULT_POSITION_BIAS};
pub use picking::{CameraView, MatrixCamera, PickHit, PickingService, Ray};
