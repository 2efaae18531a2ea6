//! 安全性/死锁检测的执行轨迹

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::sim::Pid;

/// 轨迹中的一步：`work` 与 `finish` 是该步之后的快照。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyStep {
    pub step: usize,
    /// 本步涉及的进程；初始/结论步为 `None`
    pub pid: Option<Pid>,
    pub work: Vec<i64>,
    pub finish: Vec<bool>,
    pub message: String,
}

#[derive(Debug, Default)]
pub(crate) struct TraceRecorder {
    steps: Vec<SafetyStep>,
}

impl TraceRecorder {
    pub fn push(&mut self, pid: Option<Pid>, work: &[i64], finish: &[bool], message: String) {
        let step = self.steps.len();
        trace!(step, pid = ?pid, work = ?work, %message, "轨迹步");
        self.steps.push(SafetyStep {
            step,
            pid,
            work: work.to_vec(),
            finish: finish.to_vec(),
            message,
        });
    }

    pub fn into_steps(self) -> Vec<SafetyStep> {
        self.steps
    }
}
