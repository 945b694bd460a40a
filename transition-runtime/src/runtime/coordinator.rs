//! # Coordinator 模块
//!
//! 过渡协调器：持有每个种类的 transiter，维护粗粒度状态机，
//! 保证全系统同一时间至多一个过渡在进行。
//!
//! ## 执行模型
//!
//! ```text
//! start_transition(request, now) -> StartOutcome
//! tick(now)                      -> TickOutput
//! ```
//!
//! 1. 只有停在端点（TransitedIn / TransitedOut）时才接受新请求
//! 2. 每 tick 先产出颜色更新指令，再判定完成
//! 3. 完成事件在 tick 返回前同步派发给所有订阅者，恰好一次

use std::collections::HashMap;

use crate::color::Color;
use crate::command::{Command, TransitionKind, TransitionRequest};
use crate::error::{ConfigError, RequestError, TransitionError};
use crate::event::{CompletionEvent, CompletionListener, Listeners};
use crate::fader::Fader;
use crate::state::{FadeDirection, TransitionState};

/// 按种类实现过渡动画的 transiter
///
/// 种类到实现的映射在启动时一次性解析完成，运行期查表不会失败。
#[derive(Debug)]
pub enum Transiter {
    /// 无动画：开始即完成
    Instant,
    /// 颜色淡入淡出
    Fade(Fader),
}

impl Transiter {
    /// 为指定种类创建 transiter
    fn for_kind(kind: TransitionKind) -> Self {
        match kind {
            TransitionKind::None => Self::Instant,
            TransitionKind::FadeInOut => Self::Fade(Fader::new()),
        }
    }
}

/// `start_transition` 的结果
///
/// 被忽略的请求不是错误：忽略是保持单一在飞行不变量的正常控制流。
#[derive(Debug)]
pub enum StartOutcome {
    /// 过渡已开始（Instant 种类会在返回前直接完成）
    Started {
        /// 发给 Host 的指令
        commands: Vec<Command>,
        /// 开始即完成时产生的事件（Instant 种类）
        events: Vec<CompletionEvent>,
    },
    /// 请求被忽略（不排队、不报错、不改状态）
    Ignored {
        /// 忽略原因
        reason: IgnoreReason,
    },
}

impl StartOutcome {
    /// 是否确实开始了过渡
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }
}

/// 请求被忽略的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// 已有过渡在进行中
    AlreadyTransiting,
}

/// 一次 tick 的产出
#[derive(Debug, Default)]
pub struct TickOutput {
    /// 发给 Host 的指令
    pub commands: Vec<Command>,
    /// 本次 tick 完成的过渡（单一在飞行，至多一个）
    pub events: Vec<CompletionEvent>,
}

/// 过渡协调器
///
/// 状态机：
///
/// ```text
/// TransitedIn  --start--> TransitingOut --complete--> TransitedOut
/// TransitedOut --start--> TransitingIn  --complete--> TransitedIn
/// ```
#[derive(Debug)]
pub struct TransitionCoordinator {
    /// 粗粒度状态
    state: TransitionState,
    /// 种类 -> transiter 表（启动时填充）
    transiters: HashMap<TransitionKind, Transiter>,
    /// 正在进行的过渡种类（单一在飞行不变量）
    active: Option<TransitionKind>,
    /// 完成事件订阅者
    listeners: Listeners,
}

impl TransitionCoordinator {
    /// 创建协调器，为给定的全部种类注册 transiter
    ///
    /// 种类列表为空是启动期致命配置错误。初始状态为 `TransitedIn`。
    pub fn new(kinds: &[TransitionKind]) -> Result<Self, ConfigError> {
        if kinds.is_empty() {
            return Err(ConfigError::NoTransiters);
        }

        let mut transiters = HashMap::new();
        for &kind in kinds {
            transiters
                .entry(kind)
                .or_insert_with(|| Transiter::for_kind(kind));
        }

        Ok(Self {
            state: TransitionState::TransitedIn,
            transiters,
            active: None,
            listeners: Listeners::new(),
        })
    }

    /// 注册全部种类的便捷构造
    pub fn with_all_kinds() -> Self {
        let mut transiters = HashMap::new();
        for &kind in TransitionKind::ALL.iter() {
            transiters.insert(kind, Transiter::for_kind(kind));
        }

        Self {
            state: TransitionState::TransitedIn,
            transiters,
            active: None,
            listeners: Listeners::new(),
        }
    }

    /// 订阅完成事件
    pub fn subscribe(&mut self, listener: CompletionListener) {
        self.listeners.subscribe(listener);
    }

    /// 当前粗粒度状态
    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// 是否有过渡在进行
    pub fn is_transiting(&self) -> bool {
        self.state.is_transiting()
    }

    /// 只读访问某种类的 Fader（Instant 种类返回 None）
    pub fn fader(&self, kind: TransitionKind) -> Option<&Fader> {
        match self.transiters.get(&kind) {
            Some(Transiter::Fade(fader)) => Some(fader),
            _ => None,
        }
    }

    /// 发起一次过渡
    ///
    /// 只允许在 `TransitedIn` / `TransitedOut` 状态发起；过渡进行中的
    /// 请求被静默忽略（返回 `Ignored`，不排队）。时长非法时报错，
    /// 且不留下任何状态变化。
    pub fn start_transition(
        &mut self,
        request: TransitionRequest,
        now: f64,
    ) -> Result<StartOutcome, TransitionError> {
        if self.state.is_transiting() {
            return Ok(StartOutcome::Ignored {
                reason: IgnoreReason::AlreadyTransiting,
            });
        }

        // 先校验，后改状态：失败的请求不能留下任何痕迹
        if !(request.duration > 0.0) {
            return Err(RequestError::InvalidDuration {
                duration: request.duration,
            }
            .into());
        }

        let next_state = match self.state {
            TransitionState::TransitedIn => TransitionState::TransitingOut,
            _ => TransitionState::TransitingIn,
        };
        let direction = match next_state {
            TransitionState::TransitingOut => FadeDirection::Out,
            _ => FadeDirection::In,
        };

        let Some(transiter) = self.transiters.get_mut(&request.kind) else {
            return Err(ConfigError::MissingTransiter { kind: request.kind }.into());
        };

        match transiter {
            Transiter::Instant => {
                self.state = next_state;
                let event = Self::complete(&mut self.state, &mut self.listeners, request.kind);
                Ok(StartOutcome::Started {
                    commands: Vec::new(),
                    events: vec![event],
                })
            }
            Transiter::Fade(fader) => {
                fader.start_transition(
                    request.from_color,
                    request.to_color,
                    request.duration,
                    direction,
                    now,
                )?;
                self.state = next_state;
                self.active = Some(request.kind);

                Ok(StartOutcome::Started {
                    commands: vec![
                        Command::SetSurfaceVisible {
                            kind: request.kind,
                            visible: true,
                        },
                        Command::SetSurfaceColor {
                            kind: request.kind,
                            color: request.from_color,
                        },
                    ],
                    events: Vec::new(),
                })
            }
        }
    }

    /// 每 tick 推进一次进行中的过渡
    ///
    /// 顺序保证：先产出颜色更新指令，再判定完成；完成事件在返回前
    /// 同步派发，订阅者看到的是已更新的协调器状态。没有进行中的
    /// 过渡时是 no-op。
    pub fn tick(&mut self, now: f64) -> TickOutput {
        let mut output = TickOutput::default();

        let Some(kind) = self.active else {
            return output;
        };
        let Some(Transiter::Fade(fader)) = self.transiters.get_mut(&kind) else {
            return output;
        };

        let settled = fader.advance(now);
        output.commands.push(Command::SetSurfaceColor {
            kind,
            color: fader.current_color(),
        });

        if settled.is_some() {
            self.active = None;
            let event = Self::complete(&mut self.state, &mut self.listeners, kind);
            output.events.push(event);
        }

        output
    }

    /// 瞬时置为完全遮蔽态（无动画、无完成通知）
    ///
    /// 用于开场即遮蔽的场合；过渡进行中时忽略。
    pub fn snap_out(&mut self, kind: TransitionKind, color: Color) -> Vec<Command> {
        self.snap(kind, color, TransitionState::TransitedOut)
    }

    /// 瞬时置为完全可见态（无动画、无完成通知）
    pub fn snap_in(&mut self, kind: TransitionKind, color: Color) -> Vec<Command> {
        self.snap(kind, color, TransitionState::TransitedIn)
    }

    fn snap(
        &mut self,
        kind: TransitionKind,
        color: Color,
        target: TransitionState,
    ) -> Vec<Command> {
        if self.state.is_transiting() {
            return Vec::new();
        }

        self.state = target;
        match self.transiters.get_mut(&kind) {
            Some(Transiter::Fade(fader)) => {
                if target == TransitionState::TransitedOut {
                    fader.snap_out(color);
                } else {
                    fader.snap_in(color);
                }
                vec![
                    Command::SetSurfaceVisible { kind, visible: true },
                    Command::SetSurfaceColor { kind, color },
                ]
            }
            _ => Vec::new(),
        }
    }

    /// Fader 完成后推进状态机并派发事件（每轮恰好一次）
    ///
    /// 关联函数而非方法：调用点还持有 transiter 表的可变借用。
    fn complete(
        state: &mut TransitionState,
        listeners: &mut Listeners,
        kind: TransitionKind,
    ) -> CompletionEvent {
        *state = match *state {
            TransitionState::TransitingOut => TransitionState::TransitedOut,
            _ => TransitionState::TransitedIn,
        };

        let event = CompletionEvent {
            kind,
            settled_fully_out: *state == TransitionState::TransitedOut,
        };
        listeners.notify(&event);
        event
    }
}
