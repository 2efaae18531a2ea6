//! 仿真时间类型
//!
//! 定义离散仿真时间（以抽象时间单位计）及其算术辅助函数。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 仿真时间（抽象时间单位，tick）。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// 向后推进 `ticks` 个时间单位（饱和）。
    pub fn plus(self, ticks: u64) -> SimTime {
        SimTime(self.0.saturating_add(ticks))
    }

    /// 距离 `earlier` 经过的时间单位；`earlier` 在后面时返回 0。
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
