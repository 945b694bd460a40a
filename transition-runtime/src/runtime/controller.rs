//! # Controller 模块
//!
//! 顶层编排：响应场景加载、驱动 Coordinator、按场景流程配置决定
//! 下一步动作。
//!
//! ## 约定
//!
//! Controller 采用固定的颜色约定：`from_color` 是完全可见（未遮蔽）
//! 端，`to_color` 是完全遮蔽端。于是：
//!
//! - **遮蔽过渡**（cover）：from -> to，结束于 `TransitedOut`，
//!   此刻换场景不会穿帮，产出 [`Command::LoadScene`]
//! - **揭示过渡**（reveal）：to -> from，结束于 `TransitedIn`，
//!   若当前场景配置了停留时长，到点后自动开始下一次遮蔽

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::command::{Command, TransitionKind, TransitionRequest};
use crate::error::{ConfigError, TransitionError};
use crate::event::{CompletionEvent, CompletionListener};
use crate::runtime::coordinator::{StartOutcome, TransitionCoordinator};
use crate::scheduler::{Scheduler, TimerId};
use crate::state::TransitionState;

/// 单个场景的流程规则
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneRule {
    /// 下一个场景（None 时回退到默认场景）
    #[serde(default)]
    pub next: Option<String>,
    /// 揭示完成后停留多少秒自动开始下一次遮蔽（None 表示等外部触发）
    #[serde(default)]
    pub hold: Option<f64>,
}

/// 场景流程配置
///
/// 把"场景名 -> 下一步"从散落的字符串 switch 收拢成显式映射；
/// 查不到的场景一律回退到 `default_scene`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFlow {
    /// 各场景的规则
    #[serde(default)]
    pub rules: HashMap<String, SceneRule>,
    /// 默认回退场景
    pub default_scene: String,
}

impl SceneFlow {
    /// 创建只有默认场景的流程
    pub fn new(default_scene: impl Into<String>) -> Self {
        Self {
            rules: HashMap::new(),
            default_scene: default_scene.into(),
        }
    }

    /// 添加一条场景规则
    pub fn with_rule(mut self, scene: impl Into<String>, rule: SceneRule) -> Self {
        self.rules.insert(scene.into(), rule);
        self
    }

    /// 解析某场景之后应加载的场景
    pub fn next_scene(&self, current: Option<&str>) -> &str {
        current
            .and_then(|scene| self.rules.get(scene))
            .and_then(|rule| rule.next.as_deref())
            .unwrap_or(&self.default_scene)
    }

    /// 某场景揭示完成后的停留时长
    pub fn hold_for(&self, scene: &str) -> Option<f64> {
        self.rules.get(scene).and_then(|rule| rule.hold)
    }
}

/// Controller 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// 完全可见（未遮蔽）端的颜色，通常为透明
    pub from_color: Color,
    /// 完全遮蔽端的颜色，通常为黑色
    pub to_color: Color,
    /// 单段过渡时长（秒）
    pub duration: f64,
    /// 使用的过渡种类
    pub kind: TransitionKind,
    /// 场景流程
    pub flow: SceneFlow,
}

impl ControllerConfig {
    /// 常用默认：两秒黑场淡入淡出
    pub fn fade_to_black(flow: SceneFlow) -> Self {
        Self {
            from_color: Color::CLEAR,
            to_color: Color::BLACK,
            duration: 2.0,
            kind: TransitionKind::FadeInOut,
            flow,
        }
    }
}

/// 定时动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAction {
    /// 停留结束，开始下一次遮蔽过渡
    BeginCover,
}

/// 过渡控制器
///
/// 持有 Coordinator 与定时器表，对外只暴露 tick 驱动的接口。
#[derive(Debug)]
pub struct TransitionController {
    coordinator: TransitionCoordinator,
    scheduler: Scheduler<PendingAction>,
    config: ControllerConfig,
    /// 当前场景（`begin` / `scene_loaded` 时记录）
    current_scene: Option<String>,
    /// 待触发的自动遮蔽定时器（换场景时作废）
    pending_cover: Option<TimerId>,
}

impl TransitionController {
    /// 创建控制器
    ///
    /// 默认场景为空是启动期致命配置错误。
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        if config.flow.default_scene.is_empty() {
            return Err(ConfigError::MissingDefaultScene);
        }

        Ok(Self {
            coordinator: TransitionCoordinator::with_all_kinds(),
            scheduler: Scheduler::new(),
            config,
            current_scene: None,
            pending_cover: None,
        })
    }

    /// 开场
    ///
    /// 屏幕先瞬时置为遮蔽色，随后向可见端过渡（开场揭示）。
    pub fn begin(
        &mut self,
        scene: impl Into<String>,
        now: f64,
    ) -> Result<Vec<Command>, TransitionError> {
        self.current_scene = Some(scene.into());
        self.cancel_pending_cover();

        let mut commands = self
            .coordinator
            .snap_out(self.config.kind, self.config.to_color);
        commands.extend(self.start_reveal(now)?);
        Ok(commands)
    }

    /// 场景加载完成的回调
    ///
    /// 记录当前场景并开始揭示过渡；旧场景的自动遮蔽定时器作废。
    pub fn scene_loaded(
        &mut self,
        scene: impl Into<String>,
        now: f64,
    ) -> Result<Vec<Command>, TransitionError> {
        self.current_scene = Some(scene.into());
        self.cancel_pending_cover();
        self.start_reveal(now)
    }

    /// 开始遮蔽过渡（可见 -> 遮蔽）
    ///
    /// 仅在 `TransitedIn` 状态有效，否则静默忽略。
    pub fn start_cover(&mut self, now: f64) -> Result<Vec<Command>, TransitionError> {
        if self.coordinator.state() != TransitionState::TransitedIn {
            return Ok(Vec::new());
        }

        let request = TransitionRequest::new(
            self.config.from_color,
            self.config.to_color,
            self.config.duration,
            self.config.kind,
        );
        self.request_transition(request, now)
    }

    /// 开始揭示过渡（遮蔽 -> 可见）
    ///
    /// 仅在 `TransitedOut` 状态有效，否则静默忽略。
    pub fn start_reveal(&mut self, now: f64) -> Result<Vec<Command>, TransitionError> {
        if self.coordinator.state() != TransitionState::TransitedOut {
            return Ok(Vec::new());
        }

        let request = TransitionRequest::new(
            self.config.to_color,
            self.config.from_color,
            self.config.duration,
            self.config.kind,
        );
        self.request_transition(request, now)
    }

    /// 直接发起过渡请求
    ///
    /// 被忽略的请求返回空指令，不报错。
    pub fn request_transition(
        &mut self,
        request: TransitionRequest,
        now: f64,
    ) -> Result<Vec<Command>, TransitionError> {
        match self.coordinator.start_transition(request, now)? {
            StartOutcome::Started {
                mut commands,
                events,
            } => {
                for event in &events {
                    self.react(event, now, &mut commands);
                }
                Ok(commands)
            }
            StartOutcome::Ignored { .. } => Ok(Vec::new()),
        }
    }

    /// 每 tick 驱动
    ///
    /// 先触发到期的定时动作，再推进 Coordinator，最后响应完成事件。
    pub fn tick(&mut self, now: f64) -> Result<Vec<Command>, TransitionError> {
        let mut commands = Vec::new();

        for action in self.scheduler.poll(now) {
            match action {
                PendingAction::BeginCover => {
                    self.pending_cover = None;
                    commands.extend(self.start_cover(now)?);
                }
            }
        }

        let output = self.coordinator.tick(now);
        commands.extend(output.commands);
        for event in &output.events {
            self.react(event, now, &mut commands);
        }

        Ok(commands)
    }

    /// 订阅完成事件（转发给 Coordinator）
    pub fn subscribe(&mut self, listener: CompletionListener) {
        self.coordinator.subscribe(listener);
    }

    /// 当前粗粒度状态
    pub fn state(&self) -> TransitionState {
        self.coordinator.state()
    }

    /// 当前场景
    pub fn current_scene(&self) -> Option<&str> {
        self.current_scene.as_deref()
    }

    /// 响应一次完成事件
    fn react(&mut self, event: &CompletionEvent, now: f64, commands: &mut Vec<Command>) {
        if event.settled_fully_out {
            // 屏幕已完全遮蔽：此刻换场景不会穿帮
            let scene = self
                .config
                .flow
                .next_scene(self.current_scene.as_deref())
                .to_string();
            commands.push(Command::LoadScene { scene });
        } else if let Some(scene) = self.current_scene.as_deref() {
            // 揭示完成：若该场景配置了停留时长，到点后自动遮蔽
            if let Some(hold) = self.config.flow.hold_for(scene) {
                let id = self
                    .scheduler
                    .schedule_after(now, hold, PendingAction::BeginCover);
                self.pending_cover = Some(id);
            }
        }
    }

    /// 作废待触发的自动遮蔽定时器
    fn cancel_pending_cover(&mut self) {
        if let Some(id) = self.pending_cover.take() {
            self.scheduler.cancel(id);
        }
    }
}
