//! 调度算法的封闭枚举
//!
//! 每个变体携带自己需要的参数（时间片、优先级方向），分派时由编译器检查穷尽性。

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ScheduleError;
use super::event_step::{run_fcfs, run_priority_non_preemptive, run_sjf_non_preemptive};
use super::policy::PriorityOrder;
use super::process::Process;
use super::result::ScheduleResult;
use super::round_robin::run_round_robin;
use super::unit_step::{run_priority_preemptive, run_sjf_preemptive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Algorithm {
    Fcfs,
    SjfNonPreemptive,
    SjfPreemptive,
    PriorityNonPreemptive {
        #[serde(default)]
        order: PriorityOrder,
    },
    PriorityPreemptive {
        #[serde(default)]
        order: PriorityOrder,
    },
    RoundRobin {
        quantum: u64,
    },
}

impl Algorithm {
    pub fn run(&self, processes: &[Process]) -> Result<ScheduleResult, ScheduleError> {
        match *self {
            Algorithm::Fcfs => run_fcfs(processes),
            Algorithm::SjfNonPreemptive => run_sjf_non_preemptive(processes),
            Algorithm::SjfPreemptive => run_sjf_preemptive(processes),
            Algorithm::PriorityNonPreemptive { order } => {
                run_priority_non_preemptive(processes, order)
            }
            Algorithm::PriorityPreemptive { order } => run_priority_preemptive(processes, order),
            Algorithm::RoundRobin { quantum } => run_round_robin(processes, quantum),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "fcfs",
            Algorithm::SjfNonPreemptive => "sjf_non_preemptive",
            Algorithm::SjfPreemptive => "sjf_preemptive",
            Algorithm::PriorityNonPreemptive { .. } => "priority_non_preemptive",
            Algorithm::PriorityPreemptive { .. } => "priority_preemptive",
            Algorithm::RoundRobin { .. } => "round_robin",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::RoundRobin { quantum } => write!(f, "round_robin(q={quantum})"),
            Algorithm::PriorityNonPreemptive { order } | Algorithm::PriorityPreemptive { order } => {
                write!(f, "{}({order:?})", self.name())
            }
            _ => f.write_str(self.name()),
        }
    }
}
