//! 多级队列组合器
//!
//! 按列表顺序依次运行每个队列的子仿真，把各自的时间线首尾相接拼成一条全局时间线，
//! 并把进程重新编号到同一个标识符空间。

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

use super::algorithm::Algorithm;
use super::error::ScheduleError;
use super::process::Process;
use super::result::{ProcessMetrics, ScheduleResult, Timeline};
use crate::sim::{Pid, PidAllocator, SimTime};

/// 多级队列中的一个队列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue {
    pub id: u32,
    pub algorithm: Algorithm,
    pub processes: Vec<Process>,
}

/// 全局进程标识符的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOrigin {
    pub global: Pid,
    /// 队列在输入列表中的位置
    pub queue_index: usize,
    pub queue_id: u32,
    pub local: Pid,
}

/// 组合结果：调度结果加上全局标识符映射
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComposedSchedule {
    pub result: ScheduleResult,
    pub origins: Vec<ProcessOrigin>,
}

struct Renumber<'a> {
    alloc: &'a mut PidAllocator,
    origins: Vec<ProcessOrigin>,
    local: HashMap<Pid, Pid>,
}

impl Renumber<'_> {
    fn global(&mut self, queue_index: usize, queue_id: u32, local: Pid) -> Pid {
        if let Some(&g) = self.local.get(&local) {
            return g;
        }
        let global = self.alloc.allocate();
        self.local.insert(local, global);
        self.origins.push(ProcessOrigin {
            global,
            queue_index,
            queue_id,
            local,
        });
        global
    }
}

/// 组合多个队列，全局标识符由调用方传入的 `alloc` 分配。
#[tracing::instrument(skip(queues, alloc), fields(queues = queues.len()))]
pub fn compose(queues: &[Queue], alloc: &mut PidAllocator) -> Result<ComposedSchedule, ScheduleError> {
    let mut timeline = Timeline::new();
    let mut metrics: BTreeMap<Pid, ProcessMetrics> = BTreeMap::new();
    let mut renumber = Renumber {
        alloc,
        origins: Vec::new(),
        local: HashMap::new(),
    };
    let mut global_end = SimTime::ZERO;

    for (qi, queue) in queues.iter().enumerate() {
        let sub = queue.algorithm.run(&queue.processes)?;
        renumber.local.clear();

        if let (Some(base), Some(last)) = (sub.timeline.first_start(), sub.timeline.last_end()) {
            for seg in sub.timeline.segments() {
                let pid = renumber.global(qi, queue.id, seg.pid);
                let start = global_end.plus(seg.start.since(base));
                let end = global_end.plus(seg.end.since(base));
                timeline.record(pid, start, end);
            }
            debug!(
                queue = queue.id,
                algorithm = %queue.algorithm,
                shift_from = %base,
                shift_to = %global_end,
                "队列时间线已拼接"
            );
            global_end = global_end.plus(last.since(base));
        }

        for m in sub.metrics.values() {
            let pid = renumber.global(qi, queue.id, m.pid);
            metrics.insert(pid, ProcessMetrics { pid, ..*m });
        }
    }

    let result = ScheduleResult::finish(timeline, metrics);
    info!(
        processes = result.metrics.len(),
        finish = %global_end,
        "✅ 多级队列组合完成"
    );
    Ok(ComposedSchedule {
        result,
        origins: renumber.origins,
    })
}

/// 以从 1 开始的全新编号组合多级队列。
pub fn run_multi_level_queue(queues: &[Queue]) -> Result<ScheduleResult, ScheduleError> {
    let mut alloc = PidAllocator::default();
    compose(queues, &mut alloc).map(|c| c.result)
}
