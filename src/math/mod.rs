//! 向量与矩阵工具
//!
//! 基础类型直接使用 `glam`（列主序 `Mat4`）。这里只补充 glam 没有的部分：
//! 可失败的矩阵求逆、反射、按“偏航/俯仰/滚转（度）”约定的欧拉角，
//! 以及在眼点与目标重合时退化为单位矩阵的 look-at。

mod transform;

pub use glam::{Mat4, Quat, Vec3, Vec4};
pub use transform::Transform;

/// 世界坐标系的上方向
pub const WORLD_UP: Vec3 = Vec3::Y;

/// look-at 中判定眼点与目标重合的阈值
const LOOK_AT_EPSILON: f32 = 1e-6;

/// 求逆矩阵；行列式为零或非有限时返回 `None`
pub fn try_inverse(m: &Mat4) -> Option<Mat4> {
    let det = m.determinant();
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    let inverse = m.inverse();
    inverse.is_finite().then_some(inverse)
}

/// 镜面反射：`v - 2(v·n)n`，`n` 需为单位向量
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - n * (2.0 * v.dot(n))
}

/// 右手系观察矩阵
///
/// 眼点与目标重合时方向无定义，返回单位矩阵。
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    if (eye - target).abs().max_element() < LOOK_AT_EPSILON {
        return Mat4::IDENTITY;
    }
    let view = Mat4::look_at_rh(eye, target, up);
    if view.is_finite() {
        view
    } else {
        // up 与视线平行
        Mat4::IDENTITY
    }
}

/// OpenGL 约定（NDC z ∈ [-1, 1]）的透视投影
pub fn perspective(fov_y_radians: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh_gl(fov_y_radians, aspect, near, far)
}

/// OpenGL 约定的正交投影
pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    Mat4::orthographic_rh_gl(left, right, bottom, top, near, far)
}

/// 欧拉角 `[yaw, pitch, roll]`（度）转四元数
///
/// 俯仰绕 X、偏航绕 Y、滚转绕 Z，组合顺序为 `Rz * Ry * Rx`。
pub fn euler_to_quat(euler_degrees: Vec3) -> Quat {
    let yaw = euler_degrees.x.to_radians();
    let pitch = euler_degrees.y.to_radians();
    let roll = euler_degrees.z.to_radians();
    Quat::from_rotation_z(roll) * Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch)
}

/// 欧拉角 `[yaw, pitch, roll]`（度）转旋转矩阵
pub fn euler_to_matrix(euler_degrees: Vec3) -> Mat4 {
    Mat4::from_quat(euler_to_quat(euler_degrees))
}

/// 以 w = 1 变换点，不做透视除法
#[inline]
pub fn transform_point4(m: &Mat4, p: Vec3) -> Vec4 {
    *m * p.extend(1.0)
}
