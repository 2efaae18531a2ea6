//! 标识符类型
//!
//! 定义进程标识符以及组合多级队列时使用的全局标识符分配器。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 进程标识符
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Pid(pub u32);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// 单调递增的 `Pid` 分配器。
///
/// 由调用方持有并显式传入组合器，不存在进程级的全局计数器。
#[derive(Debug, Clone)]
pub struct PidAllocator {
    next: u32,
}

impl PidAllocator {
    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    pub fn allocate(&mut self) -> Pid {
        let pid = Pid(self.next);
        self.next = self.next.wrapping_add(1);
        pid
    }

    /// 下一次 `allocate` 将返回的标识符
    pub fn peek(&self) -> Pid {
        Pid(self.next)
    }
}

impl Default for PidAllocator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}
