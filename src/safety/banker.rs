//! 银行家算法
//!
//! 安全性检查：在 `need <= work` 的约束下寻找一条让所有进程都能完成的执行顺序。
//! 请求评估：在私有副本上假设性地批准请求，再对结果状态做同样的搜索。

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::error::SafetyError;
use super::state::BankerState;
use super::trace::{SafetyStep, TraceRecorder};
use super::vector::{self, ResourceVec};
use crate::sim::Pid;

/// 被拒绝的请求的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestRejection {
    UnknownProcess,
    NegativeRequest,
    ExceedsNeed,
    ExceedsAvailable,
}

/// 安全性判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum SafetyOutcome {
    Safe,
    Unsafe,
    /// 调用方数据自相矛盾（可用资源或 need 为负），未进行搜索
    InconsistentState,
    /// 请求在搜索前即被拒绝
    Rejected { reason: RequestRejection },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyResult {
    pub outcome: SafetyOutcome,
    /// 已发现的完成顺序；不安全时为部分顺序
    pub safe_sequence: Vec<Pid>,
    /// 搜索起点的可用向量（请求评估时为批准后的值）
    pub available: ResourceVec,
    pub message: String,
    pub trace: Vec<SafetyStep>,
}

impl SafetyResult {
    pub fn is_safe(&self) -> bool {
        self.outcome == SafetyOutcome::Safe
    }

    fn without_search(outcome: SafetyOutcome, available: ResourceVec, message: String) -> Self {
        Self {
            outcome,
            safe_sequence: Vec::new(),
            available,
            message,
            trace: Vec::new(),
        }
    }
}

/// 对已按维度校验过的状态检查前置条件，返回描述问题的消息。
fn inconsistency(state: &BankerState, available: &[i64]) -> Option<String> {
    if let Some(j) = vector::first_negative(available) {
        return Some(format!(
            "Invalid state: negative available {} ({})",
            state.resource_name(j),
            available[j]
        ));
    }
    for p in &state.processes {
        if let Some(j) = vector::first_negative(&p.need()) {
            return Some(format!(
                "Invalid state: {} allocation exceeds maximum for {}",
                p.id,
                state.resource_name(j)
            ));
        }
    }
    None
}

struct Search {
    safe: bool,
    sequence: Vec<Pid>,
    trace: Vec<SafetyStep>,
}

/// 经典安全性搜索：每一轮按下标顺序扫描未完成进程，能完成的立即回收其分配。
fn safety_search(
    ids: &[Pid],
    allocation: &[ResourceVec],
    need: &[ResourceVec],
    mut work: ResourceVec,
    initial_message: String,
) -> Search {
    let n = ids.len();
    let mut finish = vec![false; n];
    let mut sequence = Vec::with_capacity(n);
    let mut rec = TraceRecorder::default();
    rec.push(None, &work, &finish, initial_message);

    while sequence.len() < n {
        let mut progressed = false;
        for i in 0..n {
            if finish[i] || !vector::fits(&need[i], &work) {
                continue;
            }
            vector::add_into(&mut work, &allocation[i]);
            finish[i] = true;
            sequence.push(ids[i]);
            progressed = true;
            debug!(pid = %ids[i], work = ?work, "进程可以执行");
            rec.push(
                Some(ids[i]),
                &work,
                &finish,
                format!("Process {} can execute", ids[i]),
            );
        }
        if !progressed {
            rec.push(
                None,
                &work,
                &finish,
                "No process can execute - Unsafe state".to_string(),
            );
            return Search {
                safe: false,
                sequence,
                trace: rec.into_steps(),
            };
        }
    }

    Search {
        safe: true,
        sequence,
        trace: rec.into_steps(),
    }
}

fn columns(state: &BankerState) -> (Vec<Pid>, Vec<ResourceVec>, Vec<ResourceVec>) {
    let ids = state.processes.iter().map(|p| p.id).collect();
    let alloc = state.processes.iter().map(|p| p.allocation.clone()).collect();
    let need = state.processes.iter().map(|p| p.need()).collect();
    (ids, alloc, need)
}

/// 检查当前状态是否安全。
#[tracing::instrument(skip(state), fields(processes = state.processes.len(), resources = state.resources()))]
pub fn check_safety(state: &BankerState) -> Result<SafetyResult, SafetyError> {
    state.check_shape()?;
    let available = state.available();
    if let Some(message) = inconsistency(state, &available) {
        warn!(%message, "状态不一致，跳过搜索");
        return Ok(SafetyResult::without_search(
            SafetyOutcome::InconsistentState,
            available,
            message,
        ));
    }

    let (ids, alloc, need) = columns(state);
    let search = safety_search(&ids, &alloc, &need, available.clone(), "Initial state".to_string());
    let (outcome, message) = if search.safe {
        (SafetyOutcome::Safe, "System is in a safe state")
    } else {
        (
            SafetyOutcome::Unsafe,
            "System is in an unsafe state - deadlock possible",
        )
    };
    info!(?outcome, sequence = ?search.sequence, "✅ 安全性检查完成");
    Ok(SafetyResult {
        outcome,
        safe_sequence: search.sequence,
        available,
        message: message.to_string(),
        trace: search.trace,
    })
}

/// 评估进程 `pid` 的资源请求。调用方的 `state` 不会被修改。
#[tracing::instrument(skip(state), fields(processes = state.processes.len()))]
pub fn evaluate_request(
    state: &BankerState,
    pid: Pid,
    request: &[i64],
) -> Result<SafetyResult, SafetyError> {
    state.check_shape()?;
    if request.len() != state.resources() {
        return Err(SafetyError::RequestDimensionMismatch {
            expected: state.resources(),
            found: request.len(),
        });
    }

    let mut available = state.available();
    if let Some(message) = inconsistency(state, &available) {
        warn!(%message, "状态不一致，拒绝评估请求");
        return Ok(SafetyResult::without_search(
            SafetyOutcome::InconsistentState,
            available,
            message,
        ));
    }

    let reject = |reason: RequestRejection,
                  available: ResourceVec,
                  message: String|
     -> Result<SafetyResult, SafetyError> {
        debug!(?reason, %message, "请求被拒绝");
        Ok(SafetyResult::without_search(
            SafetyOutcome::Rejected { reason },
            available,
            message,
        ))
    };

    let Some(idx) = state.index_of(pid) else {
        return reject(
            RequestRejection::UnknownProcess,
            available,
            format!("Invalid process ID: {pid}"),
        );
    };
    if let Some(j) = vector::first_negative(request) {
        return reject(
            RequestRejection::NegativeRequest,
            available,
            format!("Request for {} is negative", state.resource_name(j)),
        );
    }
    let (ids, mut alloc, mut need) = columns(state);
    if let Some(j) = vector::first_exceeding(request, &need[idx]) {
        return reject(
            RequestRejection::ExceedsNeed,
            available,
            format!(
                "Request exceeds need of {} for {}",
                pid,
                state.resource_name(j)
            ),
        );
    }
    if let Some(j) = vector::first_exceeding(request, &available) {
        let message = format!(
            "Request exceeds available {} ({} > {})",
            state.resource_name(j),
            request[j],
            available[j]
        );
        return reject(RequestRejection::ExceedsAvailable, available, message);
    }

    // 假设性批准，仅作用于私有副本
    vector::sub_into(&mut available, request);
    vector::add_into(&mut alloc[idx], request);
    vector::sub_into(&mut need[idx], request);

    let search = safety_search(
        &ids,
        &alloc,
        &need,
        available.clone(),
        format!("Initial state after granting {pid}'s request"),
    );
    let (outcome, message) = if search.safe {
        (SafetyOutcome::Safe, "Request can be safely granted")
    } else {
        (SafetyOutcome::Unsafe, "Request would lead to an unsafe state")
    };
    info!(%pid, ?outcome, "✅ 请求评估完成");
    Ok(SafetyResult {
        outcome,
        safe_sequence: search.sequence,
        available,
        message: message.to_string(),
        trace: search.trace,
    })
}
