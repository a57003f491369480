//! 统一错误处理模块
//!
//! ## 错误类型分层
//!
//! - **配置错误** (`config::ConfigError`): 配置文件读取、解析与验证
//! - **领域层错误** (`domain::errors`): 粒子构造参数、静态体修改等业务规则
//!
//! `EngineError` 同时承载以上两类错误（以及帧报告的序列化错误），供上下文创建和宿主程序使用。
//! 几何退化（球心重合、奇异矩阵等）不是错误，统一以 `None` 表示“本帧无交互”。

use crate::config::ConfigError;
use crate::domain::errors::DomainError;
use thiserror::Error;

/// 引擎核心错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Report serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::PhysicsError;

    #[test]
    fn test_engine_error_from_domain_error() {
        let domain: DomainError = PhysicsError::ParticleNotFound(7).into();
        let engine: EngineError = domain.into();
        assert!(matches!(
            engine,
            EngineError::Domain(DomainError::Physics(PhysicsError::ParticleNotFound(7)))
        ));
    }

    #[test]
    fn test_engine_error_from_config_error() {
        let engine: EngineError = ConfigError::ValidationError("dt".to_string()).into();
        assert!(engine.to_string().contains("dt"));
    }

    #[test]
    fn test_engine_error_from_serialization_error() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let engine: EngineError = json_err.into();
        assert!(matches!(engine, EngineError::Serialization(_)));
    }
}
