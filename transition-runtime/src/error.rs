//! # Error 模块
//!
//! 定义 transition-runtime 中使用的错误类型。
//!
//! 错误分两层：配置错误在启动期是致命的，由顶层应用中止启动；
//! 请求错误在调用期被拒绝且不修改任何状态。被忽略的过渡请求
//! **不是错误**（见 `StartOutcome::Ignored`），正常控制流不走异常路径。

use thiserror::Error;

use crate::command::TransitionKind;

/// 配置错误（启动期致命）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 未注册任何 transiter
    #[error("未注册任何 transiter")]
    NoTransiters,

    /// 请求的种类没有对应的 transiter
    #[error("过渡种类 {kind:?} 没有注册 transiter")]
    MissingTransiter { kind: TransitionKind },

    /// 场景流程缺少默认回退场景
    #[error("场景流程缺少默认场景")]
    MissingDefaultScene,
}

/// 请求错误（调用期前置条件不满足）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    /// 非正时长
    #[error("无效的过渡时长 {duration}，必须大于 0")]
    InvalidDuration { duration: f64 },
}

/// transition-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransitionError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 请求错误
    #[error("请求错误: {0}")]
    Request(#[from] RequestError),
}

/// Result 类型别名
pub type TransitionResult<T> = Result<T, TransitionError>;
