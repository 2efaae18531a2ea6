//! 调度输入
//!
//! 调用方提供的进程描述，仿真期间保持只读。

use serde::{Deserialize, Serialize};

use crate::sim::{Pid, SimTime};

/// 一个待调度的进程
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub id: Pid,
    #[serde(rename = "arrival_time")]
    pub arrival: SimTime,
    /// 所需的 CPU 时间，必须大于 0
    #[serde(rename = "burst_time")]
    pub burst: u64,
    /// 优先级；缺省视为 0
    #[serde(default)]
    pub priority: Option<i64>,
}

impl Process {
    pub fn new(id: u32, arrival: u64, burst: u64) -> Self {
        Self {
            id: Pid(id),
            arrival: SimTime(arrival),
            burst,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn priority_or_default(&self) -> i64 {
        self.priority.unwrap_or(0)
    }
}
