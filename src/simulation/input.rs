//! 帧输入

use serde::{Deserialize, Serialize};

/// 宿主送入模拟的输入事件
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    /// 生成一批动态粒子
    SpawnRequested,
    /// 在屏幕坐标处拾取（左上角为原点，单位像素）
    PickRequested { x: f32, y: f32 },
}

/// 单帧输入：按顺序处理的事件和步长选择
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    pub events: Vec<InputEvent>,
    /// 为 true 时使用精细步长
    #[serde(default)]
    pub fast: bool,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event(mut self, event: InputEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn spawn(self) -> Self {
        self.with_event(InputEvent::SpawnRequested)
    }

    pub fn pick(self, x: f32, y: f32) -> Self {
        self.with_event(InputEvent::PickRequested { x, y })
    }

    pub fn fast(mut self, fast: bool) -> Self {
        self.fast = fast;
        self
    }
}
