//! 资源分配安全性模块
//!
//! 银行家算法（安全性检查与请求评估）以及死锁检测。每次调用都在私有副本上计算，
//! 返回判定、消息和完整的执行轨迹。

mod banker;
mod deadlock;
mod error;
mod state;
mod trace;
mod vector;

pub use banker::{RequestRejection, SafetyOutcome, SafetyResult, check_safety, evaluate_request};
pub use deadlock::{DeadlockResult, DetectionOutcome, detect_deadlock};
pub use error::SafetyError;
pub use state::{BankerProcess, BankerState, DetectionProcess, DetectionState};
pub use trace::SafetyStep;
pub use vector::{ResourceVec, available, fits, resource_name};
