//! 调度结果
//!
//! 甘特图片段、单进程指标以及汇总平均值。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::sim::{Pid, SimTime};

/// 甘特图中的一段连续执行：`[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSegment {
    pub pid: Pid,
    pub start: SimTime,
    pub end: SimTime,
}

impl TimelineSegment {
    pub fn len(&self) -> u64 {
        self.end.since(self.start)
    }
}

/// 按时间顺序追加的片段序列
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    segments: Vec<TimelineSegment>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一段执行；若与上一段属于同一进程且首尾相接则合并。
    pub fn record(&mut self, pid: Pid, start: SimTime, end: SimTime) {
        debug_assert!(end > start, "empty segment");
        if let Some(last) = self.segments.last_mut() {
            if last.pid == pid && last.end == start {
                last.end = end;
                return;
            }
        }
        self.segments.push(TimelineSegment { pid, start, end });
    }

    pub fn segments(&self) -> &[TimelineSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn first_start(&self) -> Option<SimTime> {
        self.segments.first().map(|s| s.start)
    }

    pub fn last_end(&self) -> Option<SimTime> {
        self.segments.last().map(|s| s.end)
    }

    /// 某进程所有片段的总时长
    pub fn busy_time(&self, pid: Pid) -> u64 {
        self.segments
            .iter()
            .filter(|s| s.pid == pid)
            .map(TimelineSegment::len)
            .sum()
    }
}

/// 单进程统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub waiting_time: u64,
    pub response_time: u64,
    pub turnaround_time: u64,
}

/// 三项指标在全部进程上的平均值；无进程时全部为 0。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    pub waiting_time: f64,
    pub response_time: f64,
    pub turnaround_time: f64,
}

impl Averages {
    pub fn over<'a>(metrics: impl IntoIterator<Item = &'a ProcessMetrics>) -> Self {
        let mut n = 0u64;
        let (mut w, mut r, mut t) = (0u64, 0u64, 0u64);
        for m in metrics {
            n += 1;
            w = w.saturating_add(m.waiting_time);
            r = r.saturating_add(m.response_time);
            t = t.saturating_add(m.turnaround_time);
        }
        if n == 0 {
            return Self::default();
        }
        let n = n as f64;
        Self {
            waiting_time: w as f64 / n,
            response_time: r as f64 / n,
            turnaround_time: t as f64 / n,
        }
    }
}

/// 一次调度仿真的完整结果，返回后不再修改。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub timeline: Timeline,
    pub metrics: BTreeMap<Pid, ProcessMetrics>,
    pub averages: Averages,
}

impl ScheduleResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn finish(timeline: Timeline, metrics: BTreeMap<Pid, ProcessMetrics>) -> Self {
        let averages = Averages::over(metrics.values());
        Self {
            timeline,
            metrics,
            averages,
        }
    }

    pub fn metrics_for(&self, pid: Pid) -> Option<&ProcessMetrics> {
        self.metrics.get(&pid)
    }
}
