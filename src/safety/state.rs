//! 资源分配状态
//!
//! 银行家算法使用 (allocation, max)，死锁检测使用 (allocation, request)。

use serde::{Deserialize, Serialize};

use super::error::SafetyError;
use super::vector::{self, ResourceVec};
use crate::sim::Pid;

/// 银行家算法中的一个进程
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankerProcess {
    pub id: Pid,
    pub allocation: ResourceVec,
    pub max: ResourceVec,
}

impl BankerProcess {
    /// need = max - allocation
    pub fn need(&self) -> ResourceVec {
        self.max
            .iter()
            .zip(&self.allocation)
            .map(|(m, a)| m.saturating_sub(*a))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankerState {
    #[serde(default)]
    pub resource_names: Vec<String>,
    pub total: ResourceVec,
    pub processes: Vec<BankerProcess>,
}

impl BankerState {
    pub fn resources(&self) -> usize {
        self.total.len()
    }

    /// 检查各向量维度一致、标识符唯一。
    pub fn check_shape(&self) -> Result<(), SafetyError> {
        let m = self.resources();
        vector::check_names(&self.resource_names, m)?;
        for p in &self.processes {
            vector::check_len(p.id, "allocation", &p.allocation, m)?;
            vector::check_len(p.id, "max", &p.max, m)?;
        }
        vector::check_unique(self.processes.iter().map(|p| p.id))
    }

    pub fn available(&self) -> ResourceVec {
        vector::available(
            &self.total,
            self.processes.iter().map(|p| p.allocation.as_slice()),
        )
    }

    pub fn index_of(&self, pid: Pid) -> Option<usize> {
        self.processes.iter().position(|p| p.id == pid)
    }

    pub fn resource_name(&self, j: usize) -> String {
        vector::resource_name(&self.resource_names, j)
    }
}

/// 死锁检测中的一个进程
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionProcess {
    pub id: Pid,
    pub allocation: ResourceVec,
    /// 尚未满足的请求
    pub request: ResourceVec,
}

impl DetectionProcess {
    pub fn holds_nothing(&self) -> bool {
        self.allocation.iter().all(|a| *a == 0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionState {
    #[serde(default)]
    pub resource_names: Vec<String>,
    pub total: ResourceVec,
    pub processes: Vec<DetectionProcess>,
}

impl DetectionState {
    pub fn resources(&self) -> usize {
        self.total.len()
    }

    pub fn check_shape(&self) -> Result<(), SafetyError> {
        let m = self.resources();
        vector::check_names(&self.resource_names, m)?;
        for p in &self.processes {
            vector::check_len(p.id, "allocation", &p.allocation, m)?;
            vector::check_len(p.id, "request", &p.request, m)?;
        }
        vector::check_unique(self.processes.iter().map(|p| p.id))
    }

    pub fn available(&self) -> ResourceVec {
        vector::available(
            &self.total,
            self.processes.iter().map(|p| p.allocation.as_slice()),
        )
    }

    pub fn resource_name(&self, j: usize) -> String {
        vector::resource_name(&self.resource_names, j)
    }
}
