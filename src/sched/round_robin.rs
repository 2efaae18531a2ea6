//! 时间片轮转仿真器
//!
//! 固定顺序的轮转：进程按 `Pid` 排成固定的轮转次序，每一轮中每个已到达且未完成的
//! 进程最多执行一个时间片。不维护 FIFO 就绪队列，被抢占进程和新到达进程都不会被
//! 重新插入队尾。

use std::collections::BTreeMap;
use tracing::{debug, info};

use super::error::ScheduleError;
use super::policy::{Slot, validate};
use super::process::Process;
use super::result::{ProcessMetrics, ScheduleResult, Timeline};

/// 以给定时间片运行轮转仿真。
#[tracing::instrument(skip(processes), fields(n = processes.len()))]
pub fn run_round_robin(processes: &[Process], quantum: u64) -> Result<ScheduleResult, ScheduleError> {
    if quantum == 0 {
        return Err(ScheduleError::ZeroQuantum);
    }
    validate(processes)?;

    let mut slots: Vec<Slot<'_>> = processes.iter().map(Slot::new).collect();
    slots.sort_by_key(|s| s.process.id);

    let Some(mut now) = slots.first().map(|s| s.process.arrival) else {
        return Ok(ScheduleResult::empty());
    };
    let mut timeline = Timeline::new();
    let mut metrics = BTreeMap::new();
    let mut cycle = 0u64;

    while slots.iter().any(|s| !s.is_done()) {
        cycle += 1;
        let mut ran_this_cycle = false;

        for slot in slots.iter_mut() {
            if slot.is_done() || slot.process.arrival > now {
                continue;
            }
            slot.dispatch_at(now);
            let slice = quantum.min(slot.remaining);
            let end = now.plus(slice);
            slot.remaining -= slice;
            slot.last_ran = Some(end);
            timeline.record(slot.process.id, now, end);
            debug!(cycle, pid = %slot.process.id, start = %now, end = %end, "执行时间片");
            now = end;
            ran_this_cycle = true;

            if slot.is_done() {
                let first_run = slot.first_run.unwrap_or(now);
                let m = ProcessMetrics {
                    pid: slot.process.id,
                    waiting_time: slot.waited,
                    response_time: first_run.since(slot.process.arrival),
                    turnaround_time: end.since(slot.process.arrival),
                };
                metrics.insert(m.pid, m);
            }
        }

        if !ran_this_cycle {
            let next = slots
                .iter()
                .filter(|s| !s.is_done())
                .map(|s| s.process.arrival)
                .min();
            match next {
                Some(next) if next > now => {
                    debug!(from = %now, to = %next, "本轮无进程可运行，跳到下一次到达");
                    now = next;
                }
                _ => break,
            }
        }
    }

    let result = ScheduleResult::finish(timeline, metrics);
    info!(quantum, cycles = cycle, segments = result.timeline.len(), "✅ 时间片轮转完成");
    Ok(result)
}
