//! # State 模块
//!
//! 定义过渡系统的状态模型。
//!
//! ## 术语约定
//!
//! - **Phase**：单个 Fader 的细粒度相位（[`FadePhase`]）
//! - **State**：Coordinator 的粗粒度状态（[`TransitionState`]）
//!
//! "In / Out" 的视觉含义（哪端算遮蔽、哪端算可见）由调用方的颜色约定
//! 决定，状态机本身只保证相位推进的顺序。

use serde::{Deserialize, Serialize};

/// 淡入淡出方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FadeDirection {
    /// 向 "In" 端点过渡
    In,
    /// 向 "Out" 端点过渡
    Out,
}

impl FadeDirection {
    /// 该方向进行中的相位
    pub fn fading_phase(self) -> FadePhase {
        match self {
            Self::In => FadePhase::FadingIn,
            Self::Out => FadePhase::FadingOut,
        }
    }

    /// 该方向完成后的相位
    pub fn settled_phase(self) -> FadePhase {
        match self {
            Self::In => FadePhase::SettledIn,
            Self::Out => FadePhase::SettledOut,
        }
    }
}

/// 单个 Fader 的相位
///
/// 仅在 `start_time` 与 `start_time + duration` 之间严格处于
/// `FadingIn` / `FadingOut`；到达或超过终点时被强制为对应的 Settled 相位。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FadePhase {
    /// 从未开始过任何插值
    #[default]
    Idle,
    /// 正在向 "In" 端点插值
    FadingIn,
    /// 正在向 "Out" 端点插值
    FadingOut,
    /// 已停在 "In" 端点
    SettledIn,
    /// 已停在 "Out" 端点
    SettledOut,
}

impl FadePhase {
    /// 是否正在插值
    pub fn is_fading(self) -> bool {
        matches!(self, Self::FadingIn | Self::FadingOut)
    }

    /// 是否停在某个端点
    pub fn is_settled(self) -> bool {
        matches!(self, Self::SettledIn | Self::SettledOut)
    }
}

/// Coordinator 的粗粒度状态
///
/// # 状态转换
///
/// ```text
/// TransitedIn  --start-->    TransitingOut --complete--> TransitedOut
/// TransitedOut --start-->    TransitingIn  --complete--> TransitedIn
/// ```
///
/// 其余转换全部非法；Transiting 期间的请求被忽略（不排队）。
/// 初始值为 `TransitedIn`（屏幕完全可见）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransitionState {
    /// 正在向 "In" 端点过渡
    TransitingIn,
    /// 正在向 "Out" 端点过渡
    TransitingOut,
    /// 已停在 "In" 端点（完全可见）
    #[default]
    TransitedIn,
    /// 已停在 "Out" 端点（完全遮蔽）
    TransitedOut,
}

impl TransitionState {
    /// 是否有过渡在进行
    pub fn is_transiting(self) -> bool {
        matches!(self, Self::TransitingIn | Self::TransitingOut)
    }

    /// 是否停在某个端点（允许发起新过渡）
    pub fn is_settled(self) -> bool {
        matches!(self, Self::TransitedIn | Self::TransitedOut)
    }
}
