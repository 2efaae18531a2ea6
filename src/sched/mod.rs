//! CPU 调度仿真模块
//!
//! 包含各类调度仿真器、多级队列组合器以及共享的输入/结果类型。
//! 所有仿真器都是纯函数：不修改输入，同一输入总是得到相同结果。

mod algorithm;
mod error;
mod event_step;
mod multi_level;
mod policy;
mod process;
mod result;
mod round_robin;
mod unit_step;

pub use algorithm::Algorithm;
pub use error::ScheduleError;
pub use event_step::{
    NonPreemptiveRule, run_fcfs, run_non_preemptive, run_priority_non_preemptive,
    run_sjf_non_preemptive,
};
pub use multi_level::{ComposedSchedule, ProcessOrigin, Queue, compose, run_multi_level_queue};
pub use policy::PriorityOrder;
pub use process::Process;
pub use result::{Averages, ProcessMetrics, ScheduleResult, Timeline, TimelineSegment};
pub use round_robin::run_round_robin;
pub use unit_step::{PreemptiveRule, run_preemptive, run_priority_preemptive, run_sjf_preemptive};
