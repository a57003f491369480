use super::{ensure_positive, ConfigError, ConfigResult};
use crate::impl_default;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// 场景布局配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// 静态球体（场景建立时创建，常驻）
    pub static_bodies: Vec<StaticBodyConfig>,

    /// 地面方块（仅绘制，不参与碰撞）
    pub ground: GroundConfig,

    /// 相机
    pub camera: CameraConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            static_bodies: vec![
                StaticBodyConfig::new(Vec3::new(0.0, 0.0, 20.0), 10.0),
                StaticBodyConfig::new(Vec3::new(15.0, 0.0, 15.0), 10.0),
                StaticBodyConfig::new(Vec3::new(-15.0, 0.0, 13.0), 10.0),
                StaticBodyConfig::new(Vec3::new(0.0, 8.0, 20.0), 5.0),
                StaticBodyConfig::new(Vec3::new(15.0, 8.0, 15.0), 5.0),
                StaticBodyConfig::new(Vec3::new(-15.0, 8.0, 13.0), 5.0),
                // 不可见的“地板”：巨大球体的顶部近似平面
                StaticBodyConfig::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0).hidden(),
            ],
            ground: GroundConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        for (index, body) in self.static_bodies.iter().enumerate() {
            body.validate()
                .map_err(|e| ConfigError::ValidationError(format!("static_bodies[{}]: {}", index, e)))?;
        }
        self.ground.validate()?;
        self.camera.validate()
    }
}

/// 静态球体描述
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticBodyConfig {
    pub position: Vec3,
    pub radius: f32,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl StaticBodyConfig {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            radius,
            visible: true,
        }
    }

    /// 标记为不可见（仍参与碰撞）
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !self.position.is_finite() {
            return Err(ConfigError::ValidationError(
                "position must be finite".to_string(),
            ));
        }
        ensure_positive("radius", self.radius)
    }
}

/// 地面方块
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    pub enabled: bool,
    pub position: Vec3,
    pub scale: Vec3,
    /// None 表示使用随机调色板颜色
    pub albedo: Option<[f32; 3]>,
    pub roughness: f32,
    pub metallic: f32,
}

impl_default!(GroundConfig {
    enabled: true,
    position: Vec3::ZERO,
    scale: Vec3::new(100.0, 0.1, 100.0),
    albedo: None,
    roughness: 0.9,
    metallic: 0.0,
});

impl GroundConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.position.is_finite() || !self.scale.is_finite() {
            return Err(ConfigError::ValidationError(
                "ground transform must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// 相机配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    /// 注视目标；None 时沿 `front` 方向观察
    pub target: Option<Vec3>,
    pub front: Vec3,
    /// 垂直视场角（度）
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl_default!(CameraConfig {
    position: Vec3::new(0.0, 50.0, -150.0),
    target: Some(Vec3::new(0.0, 20.0, 0.0)),
    front: Vec3::Z,
    fov_degrees: 20.0,
    near: 0.01,
    far: 1000.0,
    viewport_width: 800.0,
    viewport_height: 600.0,
});

impl CameraConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        ensure_positive("camera.fov_degrees", self.fov_degrees)?;
        ensure_positive("camera.near", self.near)?;
        ensure_positive("camera.viewport_width", self.viewport_width)?;
        ensure_positive("camera.viewport_height", self.viewport_height)?;
        if self.far <= self.near {
            return Err(ConfigError::ValidationError(
                "camera.far must be greater than camera.near".to_string(),
            ));
        }
        if !self.position.is_finite() {
            return Err(ConfigError::ValidationError(
                "camera.position must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_has_hidden_floor() {
        let scene = SceneConfig::default();
        let floor = scene.static_bodies.last().unwrap();
        assert!(!floor.visible);
        assert_eq!(floor.radius, 1000.0);
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_zero_radius_rejected() {
        let mut scene = SceneConfig::default();
        scene.static_bodies.push(StaticBodyConfig::new(Vec3::ZERO, 0.0));
        let err = scene.validate().unwrap_err();
        assert!(err.to_string().contains("static_bodies[7]"));
    }

    #[test]
    fn test_camera_clip_planes_validated() {
        let mut camera = CameraConfig::default();
        camera.far = camera.near;
        assert!(camera.validate().is_err());
    }
}
