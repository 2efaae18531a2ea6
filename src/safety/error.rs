//! 资源状态的硬错误
//!
//! 只有无法产生有意义轨迹的畸形输入才走这里；不安全、死锁、非法请求都是正常结果。

use thiserror::Error;

use crate::sim::Pid;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SafetyError {
    #[error("{pid} {field} vector has {found} entries, expected {expected}")]
    DimensionMismatch {
        pid: Pid,
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("request vector has {found} entries, expected {expected}")]
    RequestDimensionMismatch { expected: usize, found: usize },

    #[error("{found} resource names given for {expected} resource types")]
    ResourceNamesMismatch { expected: usize, found: usize },

    #[error("process id {pid} appears more than once")]
    DuplicatePid { pid: Pid },
}
