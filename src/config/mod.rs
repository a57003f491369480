/// 统一配置系统
///
/// 提供TOML/JSON配置文件、环境变量覆盖与验证
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub mod physics;
pub mod scene;

pub use physics::{PairIteration, PhysicsConfig, PickMode, SpawnConfig, TimestepConfig};
pub use scene::{CameraConfig, GroundConfig, SceneConfig, StaticBodyConfig};

use crate::{impl_default, impl_default_and_new};

/// 配置文件的默认查找位置
pub const DEFAULT_TOML_PATH: &str = "particle_engine.toml";
pub const DEFAULT_JSON_PATH: &str = "particle_engine.json";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 模拟主配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// 随机数种子（None 表示使用系统熵）
    #[serde(default)]
    pub seed: Option<u64>,

    /// 物理参数
    #[serde(default)]
    pub physics: PhysicsConfig,

    /// 时间步
    #[serde(default)]
    pub timestep: TimestepConfig,

    /// 生成参数
    #[serde(default)]
    pub spawn: SpawnConfig,

    /// 场景布局
    #[serde(default)]
    pub scene: SceneConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl_default_and_new!(SimulationConfig {
    seed: None,
    physics: PhysicsConfig::default(),
    timestep: TimestepConfig::default(),
    spawn: SpawnConfig::default(),
    scene: SceneConfig::default(),
    logging: LoggingConfig::default(),
});

impl SimulationConfig {
    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 保存为JSON文件
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| env::var(key).ok());
    }

    /// 从任意键值来源覆盖配置
    ///
    /// 无法解析的值会被忽略并记录警告，保留原值。
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("PARTICLE_ENGINE_SEED") {
            match val.parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => warn_ignored("PARTICLE_ENGINE_SEED", &val),
            }
        }

        if let Some(val) = lookup("PARTICLE_ENGINE_DT") {
            match val.parse() {
                Ok(dt) => self.timestep.dt = dt,
                Err(_) => warn_ignored("PARTICLE_ENGINE_DT", &val),
            }
        }

        if let Some(val) = lookup("PARTICLE_ENGINE_SPAWN_COUNT") {
            match val.parse() {
                Ok(count) => self.spawn.count = count,
                Err(_) => warn_ignored("PARTICLE_ENGINE_SPAWN_COUNT", &val),
            }
        }

        if let Some(val) = lookup("PARTICLE_ENGINE_PAIR_ITERATION") {
            match val.parse() {
                Ok(mode) => self.physics.pair_iteration = mode,
                Err(_) => warn_ignored("PARTICLE_ENGINE_PAIR_ITERATION", &val),
            }
        }

        if let Some(val) = lookup("PARTICLE_ENGINE_PICK_MODE") {
            match val.parse() {
                Ok(mode) => self.physics.pick_mode = mode,
                Err(_) => warn_ignored("PARTICLE_ENGINE_PICK_MODE", &val),
            }
        }

        if let Some(val) = lookup("PARTICLE_ENGINE_LOG_LEVEL") {
            match val.parse() {
                Ok(level) => self.logging.level = level,
                Err(_) => warn_ignored("PARTICLE_ENGINE_LOG_LEVEL", &val),
            }
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.physics.validate()?;
        self.timestep.validate()?;
        self.spawn.validate()?;
        self.scene.validate()?;
        Ok(())
    }

    /// 自动查找并加载配置文件
    ///
    /// 按以下顺序查找：
    /// 1. ./particle_engine.toml
    /// 2. ./particle_engine.json
    /// 3. 使用默认配置
    pub fn load_or_default() -> Self {
        if let Ok(config) = Self::from_toml_file(DEFAULT_TOML_PATH) {
            tracing::info!(target: "config", "Loaded config from {}", DEFAULT_TOML_PATH);
            return config;
        }

        if let Ok(config) = Self::from_json_file(DEFAULT_JSON_PATH) {
            tracing::info!(target: "config", "Loaded config from {}", DEFAULT_JSON_PATH);
            return config;
        }

        tracing::info!(target: "config", "Using default configuration");
        Self::default()
    }
}

fn warn_ignored(key: &str, value: &str) {
    tracing::warn!(target: "config", "Ignoring invalid override {}={}", key, value);
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别（`RUST_LOG` 优先）
    pub level: LogLevel,

    /// 是否输出 target
    pub show_targets: bool,
}

impl_default!(LoggingConfig {
    level: LogLevel::Info,
    show_targets: true,
});

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// 跟踪
    Trace,
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warn,
    /// 错误
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ConfigError::ParseError(format!("unknown log level '{}'", other))),
        }
    }
}

/// 校验有限且为正的标量
pub(crate) fn ensure_positive(name: &str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn.count, 3);
        assert_eq!(config.scene.static_bodies.len(), 7);
    }

    #[test]
    fn test_toml_serialization() {
        let mut config = SimulationConfig::default();
        config.seed = Some(42);
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: SimulationConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.seed, Some(42));
        assert_eq!(parsed.scene.static_bodies.len(), config.scene.static_bodies.len());
        assert_eq!(parsed.physics.pair_iteration, config.physics.pair_iteration);
    }

    #[test]
    fn test_json_serialization() {
        let config = SimulationConfig::default();
        let json_str = serde_json::to_string(&config).unwrap();
        let parsed: SimulationConfig = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.timestep.dt, config.timestep.dt);
        assert_eq!(parsed.physics.gravity, config.physics.gravity);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            seed = 7

            [physics]
            gravity = [0.0, -9.81, 0.0]
            position_bias = 0.01
            pair_iteration = "unordered"
            pick_mode = "nearest"
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.physics.pair_iteration, PairIteration::Unordered);
        assert_eq!(config.physics.pick_mode, PickMode::Nearest);
        assert_eq!(config.spawn.count, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = SimulationConfig::from_toml_str("seed = \"abc\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_overrides_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("PARTICLE_ENGINE_SEED", "99"),
            ("PARTICLE_ENGINE_DT", "0.01"),
            ("PARTICLE_ENGINE_PAIR_ITERATION", "unordered"),
            ("PARTICLE_ENGINE_PICK_MODE", "bogus"),
            ("PARTICLE_ENGINE_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = SimulationConfig::default();
        config.apply_overrides_from(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.seed, Some(99));
        assert_eq!(config.timestep.dt, 0.01);
        assert_eq!(config.physics.pair_iteration, PairIteration::Unordered);
        assert_eq!(config.physics.pick_mode, PickMode::FirstHit);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("sim.toml");
        let json_path = dir.path().join("sim.json");

        let mut config = SimulationConfig::default();
        config.spawn.count = 5;
        config.save_toml(&toml_path).unwrap();
        config.save_json(&json_path).unwrap();

        assert_eq!(SimulationConfig::from_toml_file(&toml_path).unwrap().spawn.count, 5);
        assert_eq!(SimulationConfig::from_json_file(&json_path).unwrap().spawn.count, 5);
        assert!(matches!(
            SimulationConfig::from_toml_file(dir.path().join("missing.toml")),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("loud".parse::<LogLevel>().is_err());
    }
}
