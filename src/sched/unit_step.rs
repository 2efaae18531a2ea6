//! 单位步进仿真器（SJF 抢占 / 优先级抢占）
//!
//! 每个时间单位重新选择一次运行进程，从而允许抢占。

use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, info, trace};

use super::error::ScheduleError;
use super::policy::{PriorityOrder, Slot, validate};
use super::process::Process;
use super::result::{ProcessMetrics, ScheduleResult, Timeline};

/// 抢占调度的选择规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreemptiveRule {
    /// 剩余时间最短者优先
    ShortestRemaining,
    Priority(PriorityOrder),
}

impl PreemptiveRule {
    fn compare(self, a: &Slot<'_>, b: &Slot<'_>) -> Ordering {
        let primary = match self {
            PreemptiveRule::ShortestRemaining => a.remaining.cmp(&b.remaining),
            PreemptiveRule::Priority(order) => order.compare(
                a.process.priority_or_default(),
                b.process.priority_or_default(),
            ),
        };
        primary.then(a.process.id.cmp(&b.process.id))
    }
}

/// 运行抢占式仿真。
#[tracing::instrument(skip(processes), fields(n = processes.len()))]
pub fn run_preemptive(
    processes: &[Process],
    rule: PreemptiveRule,
) -> Result<ScheduleResult, ScheduleError> {
    validate(processes)?;

    let mut slots: Vec<Slot<'_>> = processes.iter().map(Slot::new).collect();
    let mut timeline = Timeline::new();
    let mut metrics = BTreeMap::new();
    let Some(mut now) = processes.iter().map(|p| p.arrival).min() else {
        return Ok(ScheduleResult::empty());
    };
    let mut unfinished = slots.len();

    while unfinished > 0 {
        let picked = slots
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_done() && s.process.arrival <= now)
            .min_by(|(_, a), (_, b)| rule.compare(a, b))
            .map(|(i, _)| i);

        let Some(idx) = picked else {
            // 就绪集为空：跳到下一个未完成进程的到达时刻，而不是逐单位空转
            let next = slots
                .iter()
                .filter(|s| !s.is_done())
                .map(|s| s.process.arrival)
                .min();
            match next {
                Some(next) if next > now => {
                    debug!(from = %now, to = %next, "CPU 空闲，跳到下一次到达");
                    now = next;
                    continue;
                }
                _ => break,
            }
        };

        let slot = &mut slots[idx];
        slot.dispatch_at(now);
        slot.remaining -= 1;
        let end = now.plus(1);
        slot.last_ran = Some(end);
        timeline.record(slot.process.id, now, end);
        trace!(pid = %slot.process.id, at = %now, remaining = slot.remaining, "执行一个时间单位");

        if slot.is_done() {
            let first_run = slot.first_run.unwrap_or(now);
            let m = ProcessMetrics {
                pid: slot.process.id,
                waiting_time: slot.waited,
                response_time: first_run.since(slot.process.arrival),
                turnaround_time: end.since(slot.process.arrival),
            };
            debug!(pid = %m.pid, completion = %end, "进程完成");
            metrics.insert(m.pid, m);
            unfinished -= 1;
        }
        now = end;
    }

    let result = ScheduleResult::finish(timeline, metrics);
    info!(segments = result.timeline.len(), finish = %now, "✅ 抢占调度完成");
    Ok(result)
}

/// 抢占式短作业优先（最短剩余时间优先）
pub fn run_sjf_preemptive(processes: &[Process]) -> Result<ScheduleResult, ScheduleError> {
    run_preemptive(processes, PreemptiveRule::ShortestRemaining)
}

/// 抢占式优先级调度
pub fn run_priority_preemptive(
    processes: &[Process],
    order: PriorityOrder,
) -> Result<ScheduleResult, ScheduleError> {
    run_preemptive(processes, PreemptiveRule::Priority(order))
}
