//! 选择策略
//!
//! 各仿真器共享的进程选择规则。所有规则在主键相等时都由更小的 `Pid` 胜出。

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

use super::error::ScheduleError;
use super::process::Process;
use crate::sim::SimTime;

/// 优先级方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityOrder {
    /// 数值越小优先级越高
    #[default]
    LowerFirst,
    /// 数值越大优先级越高
    HigherFirst,
}

impl PriorityOrder {
    /// 比较两个优先级值，`Less` 表示 `a` 更应当先运行。
    pub fn compare(self, a: i64, b: i64) -> Ordering {
        match self {
            PriorityOrder::LowerFirst => a.cmp(&b),
            PriorityOrder::HigherFirst => b.cmp(&a),
        }
    }
}

/// 仿真期间每个进程的私有工作记录（按输入位置索引，不与调用方数据别名）。
#[derive(Debug, Clone)]
pub(crate) struct Slot<'a> {
    pub process: &'a Process,
    pub remaining: u64,
    pub first_run: Option<SimTime>,
    /// 上一次执行结束的时刻；从未运行时为 `None`
    pub last_ran: Option<SimTime>,
    pub waited: u64,
}

impl<'a> Slot<'a> {
    pub fn new(process: &'a Process) -> Self {
        Self {
            process,
            remaining: process.burst,
            first_run: None,
            last_ran: None,
            waited: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.remaining == 0
    }

    /// 在 `now` 开始运行前累计等待时间，并记录首次运行时刻。
    pub fn dispatch_at(&mut self, now: SimTime) {
        let ready_since = self.last_ran.unwrap_or(self.process.arrival);
        self.waited = self.waited.saturating_add(now.since(ready_since));
        if self.first_run.is_none() {
            self.first_run = Some(now);
        }
    }
}

/// 校验输入：突发时间为正，标识符唯一。
pub(crate) fn validate(processes: &[Process]) -> Result<(), ScheduleError> {
    let mut seen = HashSet::with_capacity(processes.len());
    for p in processes {
        if p.burst == 0 {
            return Err(ScheduleError::ZeroBurst { pid: p.id });
        }
        if !seen.insert(p.id) {
            return Err(ScheduleError::DuplicatePid { pid: p.id });
        }
    }
    Ok(())
}
