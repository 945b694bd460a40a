//! # Event 模块
//!
//! 完成通知与订阅者列表。
//!
//! ## 设计说明
//!
//! 原型里常见的 delegate + null 检查在这里被显式的订阅者列表取代：
//! 容器永远有效（可能为空），派发是同步、有序的，调用方在派发返回时
//! 能看到完全更新后的 Coordinator 状态。

use serde::{Deserialize, Serialize};

use crate::command::TransitionKind;

/// 过渡阶段完成事件
///
/// 每当一个 transiter 完成一轮插值，Coordinator 恰好派发一次。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    /// 完成的过渡种类
    pub kind: TransitionKind,
    /// 整体是否已完全遮蔽（状态进入 `TransitedOut` 时为 true）
    pub settled_fully_out: bool,
}

/// 完成事件监听器
pub type CompletionListener = Box<dyn FnMut(&CompletionEvent)>;

/// 订阅者列表
///
/// 按订阅顺序同步调用每个监听器。
#[derive(Default)]
pub struct Listeners {
    subs: Vec<CompletionListener>,
}

impl Listeners {
    /// 创建空列表
    pub fn new() -> Self {
        Self { subs: Vec::new() }
    }

    /// 订阅完成事件
    pub fn subscribe(&mut self, listener: CompletionListener) {
        self.subs.push(listener);
    }

    /// 同步派发事件给所有订阅者
    pub fn notify(&mut self, event: &CompletionEvent) {
        for sub in &mut self.subs {
            sub(event);
        }
    }

    /// 订阅者数量
    pub fn len(&self) -> usize {
        self.subs.len()
    }

    /// 是否没有订阅者
    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("subscribers", &self.subs.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_with_no_subscribers() {
        let mut listeners = Listeners::new();
        assert!(listeners.is_empty());

        // 空容器派发不会出错
        listeners.notify(&CompletionEvent {
            kind: TransitionKind::FadeInOut,
            settled_fully_out: true,
        });
    }

    #[test]
    fn test_notify_in_subscription_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();

        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            listeners.subscribe(Box::new(move |_| order.borrow_mut().push(tag)));
        }
        assert_eq!(listeners.len(), 3);

        listeners.notify(&CompletionEvent {
            kind: TransitionKind::None,
            settled_fully_out: false,
        });

        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_every_subscriber_sees_each_event() {
        let count = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::new();

        for _ in 0..2 {
            let count = Rc::clone(&count);
            listeners.subscribe(Box::new(move |_| *count.borrow_mut() += 1));
        }

        let event = CompletionEvent {
            kind: TransitionKind::FadeInOut,
            settled_fully_out: true,
        };
        listeners.notify(&event);
        listeners.notify(&event);

        assert_eq!(*count.borrow(), 4);
    }

    #[test]
    fn test_event_serialization() {
        let event = CompletionEvent {
            kind: TransitionKind::FadeInOut,
            settled_fully_out: true,
        };

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: CompletionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
