//! Repair requests and outcomes.

use thiserror::Error;

use crate::problem::RosterProblem;
use crate::schedule::ScheduleModel;

/// A partial schedule to complete.
///
/// Rows among the first `config.workers` that contain an unassigned cell
/// are *free*: the solver fills their unassigned cells and keeps their
/// assigned ones. Every other row is pinned and must come back unchanged.
#[derive(Debug, Clone, Copy)]
pub struct RepairRequest<'a> {
    pub problem: &'a RosterProblem,
    pub partial: &'a ScheduleModel,
}

impl<'a> RepairRequest<'a> {
    pub fn new(problem: &'a RosterProblem, partial: &'a ScheduleModel) -> Self {
        Self { problem, partial }
    }

    /// Indices of the free rows, ascending.
    pub fn free_workers(&self) -> Vec<usize> {
        let workers = self.problem.config().workers;
        self.partial
            .free_workers()
            .into_iter()
            .filter(|&w| w < workers)
            .collect()
    }
}

/// How a repair attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairStatus {
    /// Proven cheapest completion.
    Optimal,
    /// A completion was found but the search was cut short.
    Feasible,
    /// No completion satisfies the labor rules.
    Infeasible,
    /// The search budget ran out before any completion was found.
    BudgetExhausted,
    /// The partial schedule does not have the configured shape.
    InvalidRequest,
}

/// Result of a [`RepairSolver`](super::RepairSolver) call.
#[derive(Debug, Clone)]
pub struct RepairOutcome {
    pub status: RepairStatus,
    /// Complete feasible schedule, present for `Optimal` and `Feasible`.
    pub schedule: Option<ScheduleModel>,
    /// Cost of `schedule`.
    pub cost: Option<f64>,
    /// Search nodes expanded.
    pub nodes: usize,
}

impl RepairOutcome {
    /// An outcome without a schedule.
    pub fn empty(status: RepairStatus, nodes: usize) -> Self {
        Self {
            status,
            schedule: None,
            cost: None,
            nodes,
        }
    }

    pub fn is_solution_found(&self) -> bool {
        matches!(self.status, RepairStatus::Optimal | RepairStatus::Feasible)
            && self.schedule.is_some()
    }

    /// The completed schedule and its cost, or why there is none.
    pub fn into_solution(self) -> Result<(ScheduleModel, f64), RepairError> {
        match (self.status, self.schedule, self.cost) {
            (RepairStatus::Optimal | RepairStatus::Feasible, Some(schedule), Some(cost)) => {
                Ok((schedule, cost))
            }
            (RepairStatus::BudgetExhausted, _, _) => {
                Err(RepairError::BudgetExhausted { nodes: self.nodes })
            }
            (RepairStatus::InvalidRequest, _, _) => Err(RepairError::InvalidRequest),
            _ => Err(RepairError::NoFeasibleCompletion),
        }
    }
}

/// Why a repair produced no schedule. Never fatal to a search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepairError {
    #[error("no feasible completion exists")]
    NoFeasibleCompletion,

    #[error("search budget exhausted after {nodes} nodes")]
    BudgetExhausted { nodes: usize },

    #[error("partial schedule does not match the configured shape")]
    InvalidRequest,
}
