//! # Transition Runtime
//!
//! 屏幕过渡（淡入淡出等）的核心运行时库。
//!
//! ## 架构概述
//!
//! `transition-runtime` 是纯逻辑核心，不依赖任何 IO 或渲染引擎。
//! 它通过**命令驱动模式**与宿主层（Host）通信：
//!
//! ```text
//! Host                                Runtime
//!   │                                    │
//!   │── start_transition / tick(now) ──►│
//!   │                                    │ 推进插值与状态机
//!   │◄── Vec<Command> + CompletionEvent ─│
//!   │                                    │
//! ```
//!
//! Host 持有真实时钟，把单调时间（秒）注入 `tick(now)`；
//! Runtime 返回声明式的 [`Command`]，由 Host 落实为涂色、可见性
//! 切换与场景加载。完成通知在 tick 返回前同步派发给订阅者。
//!
//! ## 核心类型
//!
//! - [`Fader`]：单次颜色插值的叶子组件
//! - [`TransitionCoordinator`]：单一在飞行的过渡状态机
//! - [`TransitionController`]：顶层场景流程编排
//! - [`Command`]：Runtime 向 Host 发出的指令
//! - [`CompletionEvent`]：过渡阶段完成通知
//!
//! ## 使用示例
//!
//! ```ignore
//! use transition_runtime::{ControllerConfig, SceneFlow, TransitionController};
//!
//! let flow = SceneFlow::new("main_menu");
//! let mut controller = TransitionController::new(ControllerConfig::fade_to_black(flow))?;
//!
//! // 开场揭示
//! let mut commands = controller.begin("intro", clock.now())?;
//!
//! // 主循环
//! loop {
//!     for cmd in commands.drain(..) {
//!         host.execute(cmd); // 涂色 / 切换可见性 / 加载场景
//!     }
//!     commands = controller.tick(clock.now())?;
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`color`]：RGBA 颜色与插值
//! - [`command`]：Command 定义
//! - [`event`]：完成事件与订阅者列表
//! - [`state`]：相位与状态机枚举
//! - [`error`]：错误类型定义
//! - [`fader`]：颜色淡入淡出器
//! - [`scheduler`]：tick 驱动的定时器表
//! - [`runtime`]：协调器与控制器

pub mod color;
pub mod command;
pub mod error;
pub mod event;
pub mod fader;
pub mod runtime;
pub mod scheduler;
pub mod state;

// 重导出核心类型
pub use color::Color;
pub use command::{Command, TransitionKind, TransitionRequest};
pub use error::{ConfigError, RequestError, TransitionError, TransitionResult};
pub use event::{CompletionEvent, CompletionListener, Listeners};
pub use fader::Fader;
pub use runtime::controller::{ControllerConfig, SceneFlow, SceneRule, TransitionController};
pub use runtime::coordinator::{
    IgnoreReason, StartOutcome, TickOutput, TransitionCoordinator, Transiter,
};
pub use scheduler::{Scheduler, TimerId};
pub use state::{FadeDirection, FadePhase, TransitionState};
