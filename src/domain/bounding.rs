//! 包围体
//!
//! 目前只有球体一种形状。所有查询都是纯函数，“无结果”一律用 `None` 表示，
//! 不会用零向量代替。

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// 射线命中信息
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// 沿单位方向的射线参数（即到起点的距离）
    pub t: f32,
    /// 世界坐标命中点
    pub point: Vec3,
}

/// 包围球
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// 两球是否相交（相切也算）
    pub fn overlaps(&self, other: &BoundingSphere) -> bool {
        let radii_sum = self.radius + other.radius;
        self.center.distance_squared(other.center) <= radii_sum * radii_sum
    }

    /// 两球表面交线圆的圆心
    ///
    /// 不相交、一球完全包含另一球、或球心重合时返回 `None`。
    pub fn intersection_point(&self, other: &BoundingSphere) -> Option<Vec3> {
        let delta = other.center - self.center;
        let distance = delta.length();
        if distance == 0.0
            || distance > self.radius + other.radius
            || distance < (self.radius - other.radius).abs()
        {
            return None;
        }

        let a = (self.radius * self.radius - other.radius * other.radius + distance * distance)
            / (2.0 * distance);
        Some(self.center + delta * (a / distance))
    }

    /// 从本球心指向表面交线的单位法线
    pub fn intersection_normal(&self, other: &BoundingSphere) -> Option<Vec3> {
        let point = self.intersection_point(other)?;
        (point - self.center).try_normalize()
    }

    /// 穿透深度向量
    ///
    /// 方向沿球心连线、由本球指向 `other`，长度为 `(ra + rb) - distance`。
    /// 从本球位置减去该向量即可消除重叠。球心重合时方向无定义，返回 `None`。
    pub fn intersection_depth(&self, other: &BoundingSphere) -> Option<Vec3> {
        let delta = other.center - self.center;
        let distance = delta.length();
        let radii_sum = self.radius + other.radius;
        if distance >= radii_sum || distance == 0.0 {
            return None;
        }
        Some(delta / distance * (radii_sum - distance))
    }

    /// 射线与球求交，返回 `t >= 0` 的最近交点
    ///
    /// 方向在内部归一化；零长度方向、未命中或球完全在起点之后时返回 `None`。
    pub fn ray_hit(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        let direction = direction.try_normalize()?;
        let to_center = self.center - origin;
        let tca = to_center.dot(direction);
        let d2 = to_center.length_squared() - tca * tca;
        let radius2 = self.radius * self.radius;
        if d2 > radius2 {
            return None;
        }

        let thc = (radius2 - d2).sqrt();
        let t0 = tca - thc;
        let t1 = tca + thc;
        if t0 < 0.0 && t1 < 0.0 {
            return None;
        }

        // 起点在球内时取出射点
        let t = if t0 >= 0.0 { t0 } else { t1 };
        Some(RayHit {
            t,
            point: origin + direction * t,
        })
    }

    /// 射线与球求交，只返回交点
    pub fn ray_intersection(&self, origin: Vec3, direction: Vec3) -> Option<Vec3> {
        self.ray_hit(origin, direction).map(|hit| hit.point)
    }
}

/// 包围体（带标签的形状变体）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BoundingBody {
    Sphere(BoundingSphere),
}

impl BoundingBody {
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Self::Sphere(BoundingSphere::new(center, radius))
    }

    pub fn center(&self) -> Vec3 {
        match self {
            Self::Sphere(sphere) => sphere.center,
        }
    }

    pub(crate) fn set_center(&mut self, center: Vec3) {
        match self {
            Self::Sphere(sphere) => sphere.center = center,
        }
    }

    /// 包围半径（用于绘制缩放与质量比例）
    pub fn bounding_radius(&self) -> f32 {
        match self {
            Self::Sphere(sphere) => sphere.radius,
        }
    }

    pub fn overlaps(&self, other: &BoundingBody) -> bool {
        match (self, other) {
            (Self::Sphere(a), Self::Sphere(b)) => a.overlaps(b),
        }
    }

    pub fn intersection_depth(&self, other: &BoundingBody) -> Option<Vec3> {
        match (self, other) {
            (Self::Sphere(a), Self::Sphere(b)) => a.intersection_depth(b),
        }
    }

    pub fn intersection_normal(&self, other: &BoundingBody) -> Option<Vec3> {
        match (self, other) {
            (Self::Sphere(a), Self::Sphere(b)) => a.intersection_normal(b),
        }
    }

    pub fn ray_hit(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        match self {
            Self::Sphere(sphere) => sphere.ray_hit(origin, direction),
        }
    }
}
