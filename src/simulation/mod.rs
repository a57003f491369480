//! 模拟驱动
//!
//! [`SimulationContext`] 持有整个场景状态，宿主每帧送入 [`FrameInput`]，
//! 取回 [`FrameReport`] 与绘制列表。

pub mod context;
pub mod input;
pub mod spawn;

pub use context::{FrameReport, SimulationContext};
pub use input::{FrameInput, InputEvent};
pub use spawn::sample_particle;
