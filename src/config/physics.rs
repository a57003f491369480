use super::{ensure_positive, ConfigError, ConfigResult};
use crate::impl_default;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::str::FromStr;

/// 动态粒子两两碰撞的遍历方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairIteration {
    /// 遍历所有有序对 (i, j)，i ≠ j，每对每帧访问两次
    Ordered,
    /// 每个无序对每帧只访问一次
    Unordered,
}

impl FromStr for PairIteration {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ordered" => Ok(Self::Ordered),
            "unordered" => Ok(Self::Unordered),
            other => Err(ConfigError::ParseError(format!(
                "unknown pair iteration '{}'",
                other
            ))),
        }
    }
}

/// 射线拾取策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickMode {
    /// 列表顺序中第一个命中的粒子
    FirstHit,
    /// 沿射线最近的粒子
    Nearest,
}

impl FromStr for PickMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first_hit" | "first-hit" | "first" => Ok(Self::FirstHit),
            "nearest" => Ok(Self::Nearest),
            other => Err(ConfigError::ParseError(format!("unknown pick mode '{}'", other))),
        }
    }
}

/// 物理参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// 新建粒子的恒定加速度
    pub gravity: Vec3,

    /// 静态碰撞位置修正的额外推出量（世界单位）
    pub position_bias: f32,

    /// 动态-动态遍历方式
    pub pair_iteration: PairIteration,

    /// 拾取策略
    pub pick_mode: PickMode,
}

impl_default!(PhysicsConfig {
    gravity: Vec3::new(0.0, -98.0, 0.0),
    position_bias: 0.05,
    pair_iteration: PairIteration::Ordered,
    pick_mode: PickMode::FirstHit,
});

impl PhysicsConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.gravity.is_finite() {
            return Err(ConfigError::ValidationError(
                "gravity must be finite".to_string(),
            ));
        }
        if !self.position_bias.is_finite() || self.position_bias < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "position_bias must be non-negative, got {}",
                self.position_bias
            )));
        }
        Ok(())
    }
}

/// 时间步配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimestepConfig {
    /// 常规步长（秒）
    pub dt: f32,

    /// 慢动作/精细模式步长（秒）
    pub fast_dt: f32,

    /// 累加器每帧最多子步数
    pub max_substeps: u32,
}

impl_default!(TimestepConfig {
    dt: 1.0 / 45.0,
    fast_dt: 1.0 / 240.0,
    max_substeps: 8,
});

impl TimestepConfig {
    /// 根据帧输入选择步长
    pub fn select(&self, fast: bool) -> f32 {
        if fast {
            self.fast_dt
        } else {
            self.dt
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        ensure_positive("timestep.dt", self.dt)?;
        ensure_positive("timestep.fast_dt", self.fast_dt)?;
        if self.max_substeps == 0 {
            return Err(ConfigError::ValidationError(
                "timestep.max_substeps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// 粒子生成参数
///
/// 每个区间都是半开区间 `[start, end)`，且必须非空。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// 每次生成请求产生的粒子数
    pub count: u32,

    /// X 坐标区间
    pub x_range: Range<f32>,

    /// 生成高度（Y）
    pub height: f32,

    /// 生成深度（Z）
    pub depth: f32,

    /// 半径区间
    pub radius_range: Range<f32>,

    /// 弹性系数区间
    pub elasticity_range: Range<f32>,

    /// 向上初速度区间
    pub launch_speed_range: Range<f32>,
}

impl_default!(SpawnConfig {
    count: 3,
    x_range: -20.0..20.0,
    height: 10.0,
    depth: 2.0,
    radius_range: 1.5..3.0,
    elasticity_range: 0.4..0.9,
    launch_speed_range: 70.0..80.0,
});

impl SpawnConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        validate_range("spawn.x_range", &self.x_range)?;
        validate_range("spawn.radius_range", &self.radius_range)?;
        validate_range("spawn.elasticity_range", &self.elasticity_range)?;
        validate_range("spawn.launch_speed_range", &self.launch_speed_range)?;

        if !self.height.is_finite() || !self.depth.is_finite() {
            return Err(ConfigError::ValidationError(
                "spawn position must be finite".to_string(),
            ));
        }
        if self.radius_range.start <= 0.0 {
            return Err(ConfigError::ValidationError(
                "spawn.radius_range must be strictly positive".to_string(),
            ));
        }
        if self.elasticity_range.start < 0.0 || self.elasticity_range.end > 1.0 {
            return Err(ConfigError::ValidationError(
                "spawn.elasticity_range must lie within [0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_range(name: &str, range: &Range<f32>) -> ConfigResult<()> {
    if range.start.is_finite() && range.end.is_finite() && range.start < range.end {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "{} must be a non-empty finite range, got {:?}",
            name, range
        )))
    }
}
