//! # Fader 模块
//!
//! 单次颜色插值的叶子组件。
//!
//! ## 职责
//!
//! - 记录一次从起始色到目标色的插值
//! - 按注入的时间推进，汇报自身相位
//! - 插值到达 100% 时**恰好一次**返回完成相位
//!
//! ## 完成判定
//!
//! 完成以 `stage >= 1.0` 判定，而不是比较插值颜色是否等于端点色——
//! 浮点颜色在非整步长下可能永远跳过精确端点，导致完成通知丢失。
//! 完成时颜色被精确压到目标色。

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::RequestError;
use crate::state::{FadeDirection, FadePhase};

/// 颜色淡入淡出器
///
/// 每个过渡种类在启动时创建一个实例，跨多次过渡复用，不会中途销毁。
/// 只有 [`start_transition`](Fader::start_transition) 和每 tick 的
/// [`advance`](Fader::advance) 会修改它。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fader {
    /// 起始颜色
    start_color: Color,
    /// 目标颜色
    end_color: Color,
    /// 动画时长（秒）
    duration: f64,
    /// 本轮开始时刻（注入的单调时钟，秒）
    start_time: f64,
    /// 当前相位
    phase: FadePhase,
    /// 当前插值颜色
    current_color: Color,
}

impl Fader {
    /// 创建新的 Fader（初始 Idle，颜色透明）
    pub fn new() -> Self {
        Self {
            start_color: Color::CLEAR,
            end_color: Color::CLEAR,
            duration: 0.0,
            start_time: 0.0,
            phase: FadePhase::Idle,
            current_color: Color::CLEAR,
        }
    }

    /// 开始一轮插值
    ///
    /// 时长必须大于 0，否则返回 [`RequestError::InvalidDuration`]
    /// 且不修改任何状态。单次过渡的互斥由 Coordinator 的状态机保证，
    /// 这里不重复检查。
    pub fn start_transition(
        &mut self,
        from: Color,
        to: Color,
        duration: f64,
        direction: FadeDirection,
        now: f64,
    ) -> Result<(), RequestError> {
        if !(duration > 0.0) {
            return Err(RequestError::InvalidDuration { duration });
        }

        self.start_color = from;
        self.end_color = to;
        self.duration = duration;
        self.start_time = now;
        self.current_color = from;
        self.phase = direction.fading_phase();
        Ok(())
    }

    /// 按当前时刻推进插值
    ///
    /// 每 tick 调用一次：先更新颜色，再判定是否完成。完成时把颜色
    /// 精确压到目标色、相位置为对应的 Settled 值，并恰好一次返回
    /// 完成相位；已完成（或 Idle）时再调用是无副作用的 no-op。
    pub fn advance(&mut self, now: f64) -> Option<FadePhase> {
        let direction = match self.phase {
            FadePhase::FadingIn => FadeDirection::In,
            FadePhase::FadingOut => FadeDirection::Out,
            _ => return None,
        };

        let stage = ((now - self.start_time) / self.duration).clamp(0.0, 1.0);
        self.current_color = self.start_color.lerp(self.end_color, stage as f32);

        if stage >= 1.0 {
            self.current_color = self.end_color;
            self.phase = direction.settled_phase();
            Some(self.phase)
        } else {
            None
        }
    }

    /// 瞬时停到 "In" 端点（无动画，不派发完成通知）
    pub fn snap_in(&mut self, color: Color) {
        self.current_color = color;
        self.phase = FadePhase::SettledIn;
    }

    /// 瞬时停到 "Out" 端点（无动画，不派发完成通知）
    pub fn snap_out(&mut self, color: Color) {
        self.current_color = color;
        self.phase = FadePhase::SettledOut;
    }

    /// 当前插值颜色（供渲染方读取）
    pub fn current_color(&self) -> Color {
        self.current_color
    }

    /// 当前相位
    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    /// 是否正在插值
    pub fn is_transiting(&self) -> bool {
        self.phase.is_fading()
    }
}

impl Default for Fader {
    fn default() -> Self {
        Self::new()
    }
}
