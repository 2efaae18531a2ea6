//! 死锁检测
//!
//! 反复回收“当前请求可被满足”的进程的分配，直到某一轮没有任何进展；
//! 剩下未完成的进程即为死锁进程。

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::error::SafetyError;
use super::state::DetectionState;
use super::trace::{SafetyStep, TraceRecorder};
use super::vector::{self, ResourceVec};
use crate::sim::Pid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionOutcome {
    DeadlockFree,
    Deadlocked,
    /// 总量小于分配之和，未进行检测；按死锁上报
    InconsistentState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlockResult {
    pub outcome: DetectionOutcome,
    pub deadlocked: Vec<Pid>,
    pub message: String,
    pub trace: Vec<SafetyStep>,
}

impl DeadlockResult {
    /// 数据不一致时同样返回 true，调用方不会把坏输入当作无死锁。
    pub fn has_deadlock(&self) -> bool {
        matches!(
            self.outcome,
            DetectionOutcome::Deadlocked | DetectionOutcome::InconsistentState
        )
    }
}

fn join_pids(pids: &[Pid]) -> String {
    pids.iter()
        .map(Pid::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// 检测当前分配/请求状态中是否存在死锁。
#[tracing::instrument(skip(state), fields(processes = state.processes.len(), resources = state.resources()))]
pub fn detect_deadlock(state: &DetectionState) -> Result<DeadlockResult, SafetyError> {
    state.check_shape()?;
    let mut work: ResourceVec = state.available();
    if let Some(j) = vector::first_negative(&work) {
        let message = format!(
            "Invalid state: negative available {} ({})",
            state.resource_name(j),
            work[j]
        );
        warn!(%message, "状态不一致，跳过检测");
        return Ok(DeadlockResult {
            outcome: DetectionOutcome::InconsistentState,
            deadlocked: Vec::new(),
            message,
            trace: Vec::new(),
        });
    }

    // 不持有任何资源的进程不可能处于死锁环中
    let mut finish: Vec<bool> = state.processes.iter().map(|p| p.holds_nothing()).collect();
    let mut rec = TraceRecorder::default();
    rec.push(None, &work, &finish, "Initial state".to_string());

    loop {
        let mut progressed = false;
        for (i, p) in state.processes.iter().enumerate() {
            if finish[i] || !vector::fits(&p.request, &work) {
                continue;
            }
            vector::add_into(&mut work, &p.allocation);
            finish[i] = true;
            progressed = true;
            debug!(pid = %p.id, work = ?work, "进程完成并释放资源");
            rec.push(
                Some(p.id),
                &work,
                &finish,
                format!("Process {} completes and releases resources", p.id),
            );
        }
        if !progressed {
            break;
        }
    }

    let deadlocked: Vec<Pid> = state
        .processes
        .iter()
        .zip(&finish)
        .filter(|(_, done)| !**done)
        .map(|(p, _)| p.id)
        .collect();

    let result = if deadlocked.is_empty() {
        rec.push(
            None,
            &work,
            &finish,
            "All processes can complete - No deadlock".to_string(),
        );
        DeadlockResult {
            outcome: DetectionOutcome::DeadlockFree,
            deadlocked,
            message: "No deadlock detected".to_string(),
            trace: rec.into_steps(),
        }
    } else {
        let joined = join_pids(&deadlocked);
        rec.push(
            None,
            &work,
            &finish,
            format!("Deadlock detected with processes: {joined}"),
        );
        DeadlockResult {
            outcome: DetectionOutcome::Deadlocked,
            deadlocked,
            message: format!("Deadlock detected involving processes: {joined}"),
            trace: rec.into_steps(),
        }
    };
    info!(outcome = ?result.outcome, deadlocked = ?result.deadlocked, "✅ 死锁检测完成");
    Ok(result)
}
