//! 调度配置错误

use thiserror::Error;

use crate::sim::Pid;

/// 调度调用的配置错误：整次调用被拒绝，不产生部分结果。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("process {pid} has a zero burst time")]
    ZeroBurst { pid: Pid },

    #[error("process id {pid} appears more than once")]
    DuplicatePid { pid: Pid },

    #[error("round-robin quantum must be greater than zero")]
    ZeroQuantum,

    #[error("round robin requires a quantum")]
    MissingQuantum,
}
