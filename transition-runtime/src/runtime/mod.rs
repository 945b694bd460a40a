//! # Runtime 模块
//!
//! 过渡执行核心，负责状态机推进与顶层编排。
//!
//! ## 模块结构
//!
//! - [`coordinator`]：过渡协调器（状态机 + transiter 表）
//! - [`controller`]：顶层控制器（场景流程编排）

pub mod controller;
pub mod coordinator;

pub use controller::TransitionController;
pub use coordinator::TransitionCoordinator;
