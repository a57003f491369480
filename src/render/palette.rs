//! 余弦调色板
//!
//! `color(t) = a + b * cos(2π(c * t + d))`，参数取 `a = b = 0.5`、`c = 1`、
//! `d = (0, 0.1, 0.2)`，在 `t ∈ [0, 1)` 上给出一圈柔和的彩虹色。

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

const PALETTE_A: Vec3 = Vec3::splat(0.5);
const PALETTE_B: Vec3 = Vec3::splat(0.5);
const PALETTE_C: Vec3 = Vec3::ONE;
const PALETTE_D: Vec3 = Vec3::new(0.0, 0.1, 0.2);

/// 取调色板上 `t` 处的颜色
pub fn palette_color(t: f32) -> [f32; 3] {
    let phase = (PALETTE_C * t + PALETTE_D) * TAU;
    let color = PALETTE_A + PALETTE_B * Vec3::new(phase.x.cos(), phase.y.cos(), phase.z.cos());
    color.to_array()
}

/// 随机取一个调色板颜色
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> [f32; 3] {
    palette_color(rng.gen::<f32>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_palette_endpoints() {
        let start = palette_color(0.0);
        assert!((start[0] - 1.0).abs() < 1e-6);
        // t = 0.5 时红色通道为最小值
        let middle = palette_color(0.5);
        assert!(middle[0].abs() < 1e-6);
    }

    #[test]
    fn test_palette_stays_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..256 {
            let color = random_color(&mut rng);
            assert!(color.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }
}
