//! JSON workload files
//!
//! Schedule workloads describe processes (or multi-level queues) plus the
//! algorithm to run; resource workloads describe totals and per-process
//! allocation/max/request vectors.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::safety::{BankerProcess, BankerState, DetectionProcess, DetectionState, SafetyError};
use crate::sched::{
    Algorithm, ComposedSchedule, PriorityOrder, Process, Queue, ScheduleError, compose,
};
use crate::sim::{Pid, PidAllocator};

#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("failed to read workload: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse workload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("workload contains no {0}")]
    EmptyWorkload(&'static str),

    #[error("queue {id}: {source}")]
    Queue {
        id: u32,
        #[source]
        source: ScheduleError,
    },

    #[error("queue {id} cannot itself be a multi-level queue")]
    NestedMultiLevel { id: u32 },

    #[error("process {pid} has no `max` vector")]
    MissingMax { pid: Pid },

    #[error("process {pid} has no `request` vector")]
    MissingRequest { pid: Pid },

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Safety(#[from] SafetyError),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkloadMeta {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    Fcfs,
    SjfNonPreemptive,
    SjfPreemptive,
    PriorityNonPreemptive,
    PriorityPreemptive,
    RoundRobin,
    MultiLevelQueue,
}

impl AlgorithmKind {
    /// Resolve into the closed `Algorithm` variant, validating its parameters.
    /// Returns `None` for `MultiLevelQueue`, which is not a per-queue algorithm.
    pub fn resolve(
        self,
        quantum: Option<u64>,
        order: Option<PriorityOrder>,
    ) -> Result<Option<Algorithm>, ScheduleError> {
        let order = order.unwrap_or_default();
        let alg = match self {
            AlgorithmKind::Fcfs => Algorithm::Fcfs,
            AlgorithmKind::SjfNonPreemptive => Algorithm::SjfNonPreemptive,
            AlgorithmKind::SjfPreemptive => Algorithm::SjfPreemptive,
            AlgorithmKind::PriorityNonPreemptive => Algorithm::PriorityNonPreemptive { order },
            AlgorithmKind::PriorityPreemptive => Algorithm::PriorityPreemptive { order },
            AlgorithmKind::RoundRobin => match quantum {
                None => return Err(ScheduleError::MissingQuantum),
                Some(0) => return Err(ScheduleError::ZeroQuantum),
                Some(quantum) => Algorithm::RoundRobin { quantum },
            },
            AlgorithmKind::MultiLevelQueue => return Ok(None),
        };
        Ok(Some(alg))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmSpec {
    pub kind: AlgorithmKind,
    #[serde(default)]
    pub quantum: Option<u64>,
    #[serde(default)]
    pub order: Option<PriorityOrder>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueSpec {
    pub id: u32,
    pub algorithm: AlgorithmKind,
    #[serde(default)]
    pub quantum: Option<u64>,
    #[serde(default)]
    pub order: Option<PriorityOrder>,
    #[serde(default)]
    pub processes: Vec<Process>,
}

impl QueueSpec {
    pub fn to_queue(&self) -> Result<Queue, WorkloadError> {
        let algorithm = self
            .algorithm
            .resolve(self.quantum, self.order)
            .map_err(|source| WorkloadError::Queue { id: self.id, source })?
            .ok_or(WorkloadError::NestedMultiLevel { id: self.id })?;
        Ok(Queue {
            id: self.id,
            algorithm,
            processes: self.processes.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleWorkload {
    pub schema_version: u32,
    #[serde(default)]
    pub meta: Option<WorkloadMeta>,
    #[serde(default)]
    pub algorithm: Option<AlgorithmSpec>,
    #[serde(default)]
    pub processes: Vec<Process>,
    #[serde(default)]
    pub queues: Vec<QueueSpec>,
}

/// What a schedule workload asks to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulePlan {
    Single {
        algorithm: Algorithm,
        processes: Vec<Process>,
    },
    MultiLevel(Vec<Queue>),
}

impl SchedulePlan {
    /// Run the plan; `origins` is only populated for multi-level plans.
    pub fn run(&self) -> Result<ComposedSchedule, ScheduleError> {
        match self {
            SchedulePlan::Single {
                algorithm,
                processes,
            } => Ok(ComposedSchedule {
                result: algorithm.run(processes)?,
                origins: Vec::new(),
            }),
            SchedulePlan::MultiLevel(queues) => compose(queues, &mut PidAllocator::default()),
        }
    }
}

impl ScheduleWorkload {
    pub fn from_path(path: &Path) -> Result<Self, WorkloadError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// The algorithm kind to run; defaults to multi-level when queues are
    /// present and to FCFS otherwise.
    pub fn kind(&self) -> AlgorithmKind {
        match &self.algorithm {
            Some(spec) => spec.kind,
            None if !self.queues.is_empty() => AlgorithmKind::MultiLevelQueue,
            None => AlgorithmKind::Fcfs,
        }
    }

    pub fn plan(&self) -> Result<SchedulePlan, WorkloadError> {
        let (quantum, order) = self
            .algorithm
            .as_ref()
            .map(|a| (a.quantum, a.order))
            .unwrap_or_default();
        match self.kind().resolve(quantum, order)? {
            Some(algorithm) => {
                if self.processes.is_empty() {
                    return Err(WorkloadError::EmptyWorkload("processes"));
                }
                Ok(SchedulePlan::Single {
                    algorithm,
                    processes: self.processes.clone(),
                })
            }
            None => {
                if self.queues.is_empty() {
                    return Err(WorkloadError::EmptyWorkload("queues"));
                }
                let queues = self
                    .queues
                    .iter()
                    .map(QueueSpec::to_queue)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(SchedulePlan::MultiLevel(queues))
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceProcessSpec {
    pub id: Pid,
    pub allocation: Vec<i64>,
    #[serde(default)]
    pub max: Option<Vec<i64>>,
    #[serde(default)]
    pub request: Option<Vec<i64>>,
}

/// A resource request to evaluate against the Banker's state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestSpec {
    pub pid: Pid,
    pub resources: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceWorkload {
    pub schema_version: u32,
    #[serde(default)]
    pub meta: Option<WorkloadMeta>,
    #[serde(default)]
    pub resource_names: Vec<String>,
    pub total: Vec<i64>,
    #[serde(default)]
    pub processes: Vec<ResourceProcessSpec>,
    #[serde(default)]
    pub request: Option<RequestSpec>,
}

impl ResourceWorkload {
    pub fn from_path(path: &Path) -> Result<Self, WorkloadError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn ensure_processes(&self) -> Result<(), WorkloadError> {
        if self.processes.is_empty() {
            return Err(WorkloadError::EmptyWorkload("processes"));
        }
        Ok(())
    }

    pub fn banker_state(&self) -> Result<BankerState, WorkloadError> {
        self.ensure_processes()?;
        let processes = self
            .processes
            .iter()
            .map(|p| {
                let max = p.max.clone().ok_or(WorkloadError::MissingMax { pid: p.id })?;
                Ok(BankerProcess {
                    id: p.id,
                    allocation: p.allocation.clone(),
                    max,
                })
            })
            .collect::<Result<Vec<_>, WorkloadError>>()?;
        let state = BankerState {
            resource_names: self.resource_names.clone(),
            total: self.total.clone(),
            processes,
        };
        state.check_shape()?;
        Ok(state)
    }

    pub fn detection_state(&self) -> Result<DetectionState, WorkloadError> {
        self.ensure_processes()?;
        let processes = self
            .processes
            .iter()
            .map(|p| {
                let request = p
                    .request
                    .clone()
                    .ok_or(WorkloadError::MissingRequest { pid: p.id })?;
                Ok(DetectionProcess {
                    id: p.id,
                    allocation: p.allocation.clone(),
                    request,
                })
            })
            .collect::<Result<Vec<_>, WorkloadError>>()?;
        let state = DetectionState {
            resource_names: self.resource_names.clone(),
            total: self.total.clone(),
            processes,
        };
        state.check_shape()?;
        Ok(state)
    }
}
