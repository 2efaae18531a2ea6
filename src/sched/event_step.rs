//! 事件步进仿真器（FCFS / SJF 非抢占 / 优先级非抢占）
//!
//! 每次选中一个已到达的进程并让它一次运行完，随后再重新选择。

use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::error::ScheduleError;
use super::policy::{PriorityOrder, validate};
use super::process::Process;
use super::result::{ProcessMetrics, ScheduleResult, Timeline};
use crate::sim::SimTime;

/// 非抢占调度的选择规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonPreemptiveRule {
    /// 到达最早者优先
    ArrivalOrder,
    /// 突发时间最短者优先
    ShortestBurst,
    Priority(PriorityOrder),
}

impl NonPreemptiveRule {
    fn compare(self, a: &Process, b: &Process) -> Ordering {
        let primary = match self {
            NonPreemptiveRule::ArrivalOrder => a.arrival.cmp(&b.arrival),
            NonPreemptiveRule::ShortestBurst => a.burst.cmp(&b.burst),
            NonPreemptiveRule::Priority(order) => {
                order.compare(a.priority_or_default(), b.priority_or_default())
            }
        };
        primary.then(a.id.cmp(&b.id))
    }
}

/// 运行非抢占仿真。
#[tracing::instrument(skip(processes), fields(n = processes.len()))]
pub fn run_non_preemptive(
    processes: &[Process],
    rule: NonPreemptiveRule,
) -> Result<ScheduleResult, ScheduleError> {
    validate(processes)?;

    let mut pool: Vec<&Process> = processes.iter().collect();
    let mut now = SimTime::ZERO;
    let mut timeline = Timeline::new();
    let mut metrics = BTreeMap::new();

    while !pool.is_empty() {
        if !pool.iter().any(|p| p.arrival <= now) {
            // 没有已到达的进程：直接跳到下一次到达
            if let Some(next) = pool.iter().map(|p| p.arrival).min() {
                debug!(from = %now, to = %next, "CPU 空闲，跳到下一次到达");
                now = next;
            }
        }

        let picked = pool
            .iter()
            .enumerate()
            .filter(|(_, p)| p.arrival <= now)
            .min_by(|(_, a), (_, b)| rule.compare(a, b))
            .map(|(i, _)| i);
        let Some(idx) = picked else {
            break;
        };
        let p = pool.swap_remove(idx);

        let waiting_time = now.since(p.arrival);
        let end = now.plus(p.burst);
        debug!(pid = %p.id, start = %now, end = %end, "选中进程运行至完成");
        timeline.record(p.id, now, end);
        metrics.insert(
            p.id,
            ProcessMetrics {
                pid: p.id,
                waiting_time,
                response_time: waiting_time,
                turnaround_time: waiting_time + p.burst,
            },
        );
        now = end;
    }

    let result = ScheduleResult::finish(timeline, metrics);
    info!(segments = result.timeline.len(), finish = %now, "✅ 非抢占调度完成");
    Ok(result)
}

/// 先来先服务
pub fn run_fcfs(processes: &[Process]) -> Result<ScheduleResult, ScheduleError> {
    run_non_preemptive(processes, NonPreemptiveRule::ArrivalOrder)
}

/// 非抢占式短作业优先
pub fn run_sjf_non_preemptive(processes: &[Process]) -> Result<ScheduleResult, ScheduleError> {
    run_non_preemptive(processes, NonPreemptiveRule::ShortestBurst)
}

/// 非抢占式优先级调度
pub fn run_priority_non_preemptive(
    processes: &[Process],
    order: PriorityOrder,
) -> Result<ScheduleResult, ScheduleError> {
    run_non_preemptive(processes, NonPreemptiveRule::Priority(order))
}
