//! 固定时间步累加器
//!
//! 将可变的帧间隔转换为若干个固定长度的子步，用于需要严格可复现的宿主循环。

use crate::config::TimestepConfig;

/// 固定时间步累加器
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f64,
    accumulator: f64,
    max_substeps: u32,
}

impl FixedTimestep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step: f64::from(step),
            accumulator: 0.0,
            max_substeps: max_substeps.max(1),
        }
    }

    /// 从时间步配置创建（使用常规步长）
    pub fn from_config(config: &TimestepConfig) -> Self {
        Self::new(config.dt, config.max_substeps)
    }

    /// 固定步长（秒）
    pub fn step(&self) -> f32 {
        self.step as f32
    }

    /// 切换步长，保留已累加的时间
    pub fn set_step(&mut self, step: f32) {
        self.step = f64::from(step);
    }

    /// 推进一帧，返回本帧需要执行的子步数
    ///
    /// 超出 `max_substeps` 的积压时间会被丢弃，避免慢帧之后的“死亡螺旋”。
    pub fn advance(&mut self, frame_seconds: f32) -> u32 {
        if !frame_seconds.is_finite() || frame_seconds <= 0.0 {
            return 0;
        }

        self.accumulator += f64::from(frame_seconds);
        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }

        if substeps == self.max_substeps && self.accumulator >= self.step {
            tracing::warn!(
                target: "simulation",
                dropped = self.accumulator,
                "Fixed timestep backlog dropped"
            );
            self.accumulator = 0.0;
        }
        substeps
    }

    /// 剩余累加时间占一个步长的比例（用于渲染插值）
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_accumulates_partial_frames() {
        let mut timestep = FixedTimestep::new(0.1, 8);
        assert_eq!(timestep.advance(0.05), 0);
        assert_eq!(timestep.advance(0.06), 1);
        assert!((timestep.alpha() - 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut timestep = FixedTimestep::new(0.01, 4);
        assert_eq!(timestep.advance(1.0), 4);
        assert_eq!(timestep.alpha(), 0.0);
    }

    #[test]
    fn test_advance_ignores_invalid_frame_time() {
        let mut timestep = FixedTimestep::new(1.0 / 45.0, 8);
        assert_eq!(timestep.advance(-1.0), 0);
        assert_eq!(timestep.advance(f32::NAN), 0);
    }
}
