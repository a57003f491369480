//! 碰撞检测与冲量响应
//!
//! 所有动态粒子质量视为 1。响应按调用顺序依次作用，不做多接触平均。

use crate::config::PairIteration;
use crate::domain::Particle;
use crate::math::reflect;
use glam::Vec3;

/// 静态碰撞位置修正的默认额外推出量（世界单位）
pub const DEFAULT_POSITION_BIAS: f32 = 0.05;

/// 一次碰撞响应的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// 由第一个粒子指向第二个粒子的单位法线
    pub normal: Vec3,
    /// 穿透深度
    pub depth: f32,
    /// 施加到第一个粒子上的速度变化（第二个动态粒子受到相反的量）
    pub impulse: Vec3,
}

/// 单帧碰撞统计（按实际执行的响应次数计）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    pub dynamic_contacts: usize,
    pub static_contacts: usize,
}

/// 碰撞服务 - 无状态的碰撞响应逻辑
pub struct CollisionService;

impl CollisionService {
    /// 动态粒子与静态粒子的碰撞响应
    ///
    /// 只修改 `dynamic`：速度沿接触法线镜面反射并乘以弹性系数，
    /// 位置沿法线反方向推出 `depth + bias`。不相交或球心重合时返回 `None`。
    pub fn resolve_static(dynamic: &mut Particle, fixed: &Particle, bias: f32) -> Option<Contact> {
        if !dynamic.is_dynamic() {
            return None;
        }

        let depth_vector = dynamic.body().intersection_depth(fixed.body())?;
        let normal = depth_vector.try_normalize()?;

        let before = dynamic.velocity();
        let after = reflect(before, normal) * dynamic.elasticity();
        dynamic.replace_velocity(after);

        let depth = depth_vector.dot(normal);
        dynamic.displace(-normal * (depth + bias));

        tracing::trace!(
            target: "physics",
            dynamic = %dynamic.id(),
            fixed = %fixed.id(),
            depth,
            "static contact resolved"
        );

        Some(Contact {
            normal,
            depth,
            impulse: after - before,
        })
    }

    /// 两个动态粒子之间的碰撞响应
    ///
    /// 等质量冲量 `j = -(1 + e)(v_rel · n) / 2`，`e` 取两者弹性系数的较小值；
    /// 位置修正按对方半径分配：`p1` 后退 `c * r2`，`p2` 前进 `c * r1`，
    /// 其中 `c = n * depth / (r1 + r2)`。
    pub fn resolve_dynamic_pair(first: &mut Particle, second: &mut Particle) -> Option<Contact> {
        if !first.is_dynamic() || !second.is_dynamic() {
            return None;
        }

        let delta = second.position() - first.position();
        let distance = delta.length();
        let (r1, r2) = (first.radius(), second.radius());
        let radii_sum = r1 + r2;
        if distance >= radii_sum {
            return None;
        }
        let normal = delta.try_normalize()?;
        let depth = radii_sum - distance;

        let relative_velocity = first.velocity() - second.velocity();
        let restitution = first.elasticity().min(second.elasticity());
        let impulse = normal * (-(1.0 + restitution) * relative_velocity.dot(normal) / 2.0);
        first.replace_velocity(first.velocity() + impulse);
        second.replace_velocity(second.velocity() - impulse);

        let correction = normal * (depth / radii_sum);
        first.displace(-correction * r2);
        second.displace(correction * r1);

        tracing::trace!(
            target: "physics",
            first = %first.id(),
            second = %second.id(),
            depth,
            "dynamic contact resolved"
        );

        Some(Contact {
            normal,
            depth,
            impulse,
        })
    }

    /// 对所有动态粒子做两两响应，返回发生响应的次数
    ///
    /// `Ordered` 遍历全部有序对 (i, j)，i ≠ j，以 j 为第一个粒子，
    /// 因而每对被访问两次，第二次访问时若仍相交则再次响应；`Unordered` 每对只访问一次。
    /// 返回值统计实际执行的响应次数，而非相交对数。
    pub fn resolve_dynamic_set(particles: &mut [Particle], mode: PairIteration) -> usize {
        let count = particles.len();
        let mut contacts = 0;

        match mode {
            PairIteration::Ordered => {
                for i in 0..count {
                    for j in 0..count {
                        if i == j {
                            continue;
                        }
                        let (first, second) = pair_mut(particles, j, i);
                        if Self::resolve_dynamic_pair(first, second).is_some() {
                            contacts += 1;
                        }
                    }
                }
            }
            PairIteration::Unordered => {
                for i in 0..count {
                    for j in (i + 1)..count {
                        let (first, second) = pair_mut(particles, i, j);
                        if Self::resolve_dynamic_pair(first, second).is_some() {
                            contacts += 1;
                        }
                    }
                }
            }
        }

        contacts
    }

    /// 每个动态粒子依次对每个静态粒子做响应，返回发生响应的次数
    pub fn resolve_static_set(dynamic: &mut [Particle], statics: &[Particle], bias: f32) -> usize {
        let mut contacts = 0;
        for particle in dynamic.iter_mut() {
            for fixed in statics {
                if Self::resolve_static(particle, fixed, bias).is_some() {
                    contacts += 1;
                }
            }
        }
        contacts
    }
}

/// 同时可变借用切片中两个不同的元素，按 (a, b) 顺序返回
///
/// 前置条件：`a != b`，调用方的遍历已跳过 i == j。
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b, "pair_mut requires distinct indices");
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
