//! # Command 模块
//!
//! 定义 Runtime 向 Host 发出的所有指令。
//! Command 是 Runtime 与 Host 之间的**唯一通信方式**。
//!
//! ## 设计原则
//!
//! - **声明式**：Command 描述"做什么"，不描述"怎么做"
//! - **无副作用**：Command 本身不执行任何操作
//! - **引擎无关**：不包含任何渲染引擎的类型

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::color::Color;

/// 过渡种类
///
/// transiter 表的枚举键。Coordinator 在启动时为每个种类各创建一个
/// transiter，运行期查表不会失败；缺失只可能是启动期配置错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransitionKind {
    /// 无动画，开始即完成
    None,
    /// 颜色淡入淡出
    #[default]
    FadeInOut,
}

impl TransitionKind {
    /// 全部种类（用于启动时穷举注册）
    pub const ALL: [TransitionKind; 2] = [TransitionKind::None, TransitionKind::FadeInOut];
}

impl FromStr for TransitionKind {
    type Err = ();

    /// 从字符串解析种类（不区分大小写）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "fadeinout" | "fade" => Ok(Self::FadeInOut),
            _ => Err(()),
        }
    }
}

/// 一次过渡请求
///
/// 临时值：Coordinator 只消费它，不存储它。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionRequest {
    /// 起始颜色
    pub from_color: Color,
    /// 目标颜色
    pub to_color: Color,
    /// 动画时长（秒，必须大于 0）
    pub duration: f64,
    /// 过渡种类
    pub kind: TransitionKind,
}

impl TransitionRequest {
    /// 创建过渡请求
    pub fn new(from_color: Color, to_color: Color, duration: f64, kind: TransitionKind) -> Self {
        Self {
            from_color,
            to_color,
            duration,
            kind,
        }
    }

    /// 反向请求（颜色对调）
    ///
    /// 没有取消原语："取消"一次过渡的唯一办法是等它完成后立即反向。
    pub fn reversed(self) -> Self {
        Self {
            from_color: self.to_color,
            to_color: self.from_color,
            ..self
        }
    }
}

/// Runtime 向 Host 发出的指令
///
/// Host 接收 Command 后，将其落实为真实的涂色、可见性切换与场景加载。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// 设置遮罩表面的颜色（进行中的过渡每 tick 至多一条）
    SetSurfaceColor {
        /// 表面所属的过渡种类
        kind: TransitionKind,
        /// 当前插值颜色
        color: Color,
    },

    /// 设置遮罩表面的可见性（过渡开始时一条）
    SetSurfaceVisible {
        /// 表面所属的过渡种类
        kind: TransitionKind,
        /// 是否可见
        visible: bool,
    },

    /// 加载场景（屏幕完全遮蔽后触发）
    LoadScene {
        /// 场景名
        scene: String,
    },
}
