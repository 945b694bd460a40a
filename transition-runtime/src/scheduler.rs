//! # Scheduler 模块
//!
//! 基于同一注入时钟的定时器表，取代"等待 N 秒再继续"的协程写法。
//!
//! ## 模型
//!
//! - [`schedule`](Scheduler::schedule) 登记一个在指定时刻到期的 token
//! - [`poll`](Scheduler::poll) 取出全部到期 token（按到期先后）并移除
//! - [`cancel`](Scheduler::cancel) 在到期前显式取消
//!
//! Scheduler 不读取真实时间；与 Fader 一样由外部 tick 驱动，
//! 同一 tick 内到期的动作在 `poll` 返回前全部取出。

use serde::{Deserialize, Serialize};

/// 定时器句柄
///
/// 由 [`Scheduler::schedule`] 返回，用于在到期前取消。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(u64);

/// 定时器条目
#[derive(Debug, Clone)]
struct TimerEntry<T> {
    id: TimerId,
    fire_at: f64,
    token: T,
}

/// tick 驱动的定时器表
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    entries: Vec<TimerEntry<T>>,
    next_id: u64,
}

impl<T> Scheduler<T> {
    /// 创建空表
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// 登记一个在 `fire_at` 时刻到期的 token
    pub fn schedule(&mut self, fire_at: f64, token: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(TimerEntry { id, fire_at, token });
        id
    }

    /// 登记一个从 `now` 起延迟 `delay` 秒到期的 token
    ///
    /// 负的延迟按 0 处理（下一次 `poll` 即到期）。
    pub fn schedule_after(&mut self, now: f64, delay: f64, token: T) -> TimerId {
        self.schedule(now + delay.max(0.0), token)
    }

    /// 取消尚未到期的定时器
    ///
    /// 返回是否确实移除了条目（已触发或不存在时为 false）。
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        before != self.entries.len()
    }

    /// 取出全部到期 token（按到期时刻排序）并移除对应条目
    pub fn poll(&mut self, now: f64) -> Vec<T> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].fire_at <= now {
                due.push(self.entries.remove(i));
            } else {
                i += 1;
            }
        }
        // 稳定排序：同刻到期的保持登记顺序
        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at));
        due.into_iter().map(|entry| entry.token).collect()
    }

    /// 待触发的定时器数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否没有待触发的定时器
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 清空全部定时器
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
