//! 领域特定错误类型

use thiserror::Error;

/// 领域层错误枚举
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// 物理领域错误
    #[error("Physics domain error: {0}")]
    Physics(#[from] PhysicsError),
}

/// 物理领域错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// 粒子未找到
    #[error("Particle not found: {0}")]
    ParticleNotFound(u64),
    /// 无效物理参数
    #[error("Invalid physics parameter: {0}")]
    InvalidParameter(String),
    /// 试图修改静态粒子的运动状态
    #[error("Static particle cannot be mutated: {0}")]
    StaticBodyMutation(String),
}

impl PhysicsError {
    /// 便捷构造：无效参数
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_from_physics_error() {
        let physics_error = PhysicsError::InvalidParameter("test".to_string());
        let domain_error: DomainError = physics_error.into();
        assert!(matches!(
            domain_error,
            DomainError::Physics(PhysicsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_domain_error_display_wraps_source() {
        let error: DomainError = PhysicsError::ParticleNotFound(9).into();
        assert_eq!(error.to_string(), "Physics domain error: Particle not found: 9");
    }

    #[test]
    fn test_physics_error_messages() {
        assert_eq!(
            PhysicsError::ParticleNotFound(3).to_string(),
            "Particle not found: 3"
        );
        assert!(PhysicsError::invalid("radius")
            .to_string()
            .contains("radius"));
        assert!(matches!(
            PhysicsError::StaticBodyMutation("velocity".to_string()),
            PhysicsError::StaticBodyMutation(_)
        ));
    }
}
