//! 无窗口宿主循环
//!
//! 加载配置、初始化日志、创建模拟上下文，然后用脚本化的输入驱动若干帧。

use crate::config::SimulationConfig;
use crate::simulation::{FrameInput, FrameReport, SimulationContext};
use serde::Serialize;

use super::error::EngineResult;
use super::logging::init_logging;
use super::timestep::FixedTimestep;

/// 演示运行的帧数
pub const DEMO_FRAMES: u64 = 240;
/// 每隔多少帧生成一批粒子
const SPAWN_INTERVAL: u64 = 30;
/// 每隔多少帧在屏幕中心拾取一次
const PICK_INTERVAL: u64 = 45;

/// 一次无窗口运行的汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub substeps: u64,
    pub spawned: usize,
    pub removed: usize,
    pub dynamic_contacts: usize,
    pub static_contacts: usize,
    /// 运行结束时剩余的动态粒子数
    pub final_particles: usize,
}

impl RunSummary {
    fn absorb(&mut self, report: &FrameReport) {
        self.frames += 1;
        self.substeps += u64::from(report.substeps);
        self.spawned += report.spawned;
        self.removed += report.removed.len();
        self.dynamic_contacts += report.dynamic_contacts;
        self.static_contacts += report.static_contacts;
    }
}

/// 宿主入口
///
/// # 示例
///
/// ```no_run
/// use particle_engine::core::Engine;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     Engine::run()?;
///     Ok(())
/// }
/// ```
pub struct Engine;

impl Engine {
    /// 使用默认查找路径的配置（叠加环境变量覆盖）运行演示
    pub fn run() -> EngineResult<()> {
        let mut config = SimulationConfig::load_or_default();
        config.apply_env_overrides();
        init_logging(&config.logging);
        tracing::info!(target: "engine", "Engine starting");

        let summary = Self::run_headless(config, DEMO_FRAMES)?;
        let summary = serde_json::to_string(&summary)?;
        tracing::info!(target: "engine", %summary, "Run finished");

        tracing::info!(target: "engine", "Engine shutting down");
        Ok(())
    }

    /// 以脚本化输入运行 `frames` 帧，每帧的墙钟时长取常规步长
    pub fn run_headless(config: SimulationConfig, frames: u64) -> EngineResult<RunSummary> {
        let mut context = SimulationContext::new(config)?;
        let mut timestep = FixedTimestep::from_config(&context.config().timestep);
        let frame_seconds = context.config().timestep.dt;
        let viewport = context.camera().viewport();

        let mut summary = RunSummary::default();
        for frame in 0..frames {
            let input = Self::scripted_input(frame, viewport);
            let report = context.advance(frame_seconds, &input, &mut timestep)?;
            summary.absorb(&report);

            if report.spawned > 0 || !report.removed.is_empty() {
                let report = serde_json::to_string(&report)?;
                tracing::info!(target: "engine", %report, "Frame report");
            }
        }

        summary.final_particles = context.dynamic_particles().len();
        Ok(summary)
    }

    /// 演示脚本：定期生成粒子，并错开若干帧在屏幕中心拾取
    pub fn scripted_input(frame: u64, viewport: (f32, f32)) -> FrameInput {
        let mut input = FrameInput::new();
        if frame % SPAWN_INTERVAL == 0 {
            input = input.spawn();
        }
        if frame % PICK_INTERVAL == PICK_INTERVAL / 3 {
            input = input.pick(viewport.0 / 2.0, viewport.1 / 2.0);
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::InputEvent;

    #[test]
    fn test_scripted_input_schedule() {
        let viewport = (800.0, 600.0);
        assert_eq!(Engine::scripted_input(0, viewport).events, vec![InputEvent::SpawnRequested]);
        assert!(Engine::scripted_input(1, viewport).events.is_empty());
        assert_eq!(
            Engine::scripted_input(15, viewport).events,
            vec![InputEvent::PickRequested { x: 400.0, y: 300.0 }]
        );
    }

    #[test]
    fn test_run_headless_summary() {
        let mut config = SimulationConfig::default();
        config.seed = Some(21);
        let summary = Engine::run_headless(config, 90).unwrap();

        assert_eq!(summary.frames, 90);
        assert_eq!(summary.spawned, 9);
        assert!(summary.substeps > 0);
        assert_eq!(summary.final_particles, summary.spawned - summary.removed);
    }
}
