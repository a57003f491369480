//! 核心模块
//!
//! - `engine` - 无窗口宿主循环
//! - `error` - 引擎级错误类型
//! - `logging` - tracing 日志初始化
//! - `timestep` - 固定时间步累加器

pub mod engine;
pub mod error;
pub mod logging;
pub mod timestep;
#[macro_use]
pub mod macros;

pub use engine::{Engine, RunSummary};
pub use error::{EngineError, EngineResult};
pub use logging::init_logging;
pub use timestep::FixedTimestep;
