//! 仿真基础模块
//!
//! 仿真时间、进程标识符以及 JSON workload 配置层。

mod id;
mod time;
mod workload;

pub use id::{Pid, PidAllocator};
pub use time::SimTime;
pub use workload::{
    AlgorithmKind, AlgorithmSpec, QueueSpec, RequestSpec, ResourceProcessSpec, ResourceWorkload,
    SchedulePlan, ScheduleWorkload, WorkloadError, WorkloadMeta,
};
