//! VND execution loop.
//!
//! # Algorithm
//!
//! 1. Validate the initial schedule, set k = 0
//! 2. While k < k_max:
//!    a. Generate every candidate of neighborhood k
//!    b. Keep the feasible candidates strictly cheaper than the current
//!    schedule (checked operators validate before scoring)
//!    c. If any remain, adopt the cheapest (ties: first generated) and set
//!    k = 0; otherwise k = k + 1
//! 3. Return the current schedule
//!
//! When the loop ends naturally the last k_max passes were non-improving,
//! one per neighborhood.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

use super::config::VndConfig;
use crate::error::SearchError;
use crate::io::{Checkpoint, NoCheckpoint};
use crate::neighborhood::{Feasibility, Neighborhood};
use crate::problem::RosterProblem;
use crate::schedule::ScheduleModel;

/// One scan of one neighborhood.
#[derive(Debug, Clone, PartialEq)]
pub struct PassRecord {
    /// Name of the neighborhood scanned.
    pub neighborhood: &'static str,
    /// Number of distinct candidates generated.
    pub candidates: usize,
    /// Cost adopted by this pass, if it improved.
    pub improved_to: Option<f64>,
}

impl PassRecord {
    pub fn improved(&self) -> bool {
        self.improved_to.is_some()
    }
}

/// Result of a VND run.
#[derive(Debug, Clone)]
pub struct VndResult {
    /// The final schedule.
    pub best: ScheduleModel,

    /// Cost of `best`.
    pub best_cost: f64,

    /// Cost of the initial schedule.
    pub initial_cost: f64,

    /// Number of improvements adopted.
    pub steps: usize,

    /// Every neighborhood pass, in order.
    pub passes: Vec<PassRecord>,

    /// Candidates generated over the whole run.
    pub evaluations: usize,

    /// Whether no neighborhood improves `best`.
    pub local_optimum: bool,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Initial cost followed by the cost after each adopted step.
    pub cost_history: Vec<f64>,
}

/// Executes Variable Neighborhood Descent.
pub struct VndRunner;

impl VndRunner {
    /// Descends from `initial` to a local optimum of `neighborhoods`.
    ///
    /// # Errors
    ///
    /// [`SearchError::InfeasibleStart`] if `initial` violates a constraint.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid or `neighborhoods` is empty.
    pub fn run(
        problem: &RosterProblem,
        initial: ScheduleModel,
        neighborhoods: &[Neighborhood],
        config: &VndConfig,
    ) -> Result<VndResult, SearchError> {
        Self::run_with(problem, initial, neighborhoods, config, &mut NoCheckpoint, None)
    }

    /// Runs VND, handing every adopted schedule to `checkpoint` and
    /// stopping early when `cancel` is set.
    pub fn run_with(
        problem: &RosterProblem,
        initial: ScheduleModel,
        neighborhoods: &[Neighborhood],
        config: &VndConfig,
        checkpoint: &mut dyn Checkpoint,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<VndResult, SearchError> {
        config.validate().expect("invalid VndConfig");
        assert!(!neighborhoods.is_empty(), "at least one neighborhood required");

        problem.validate(&initial)?;

        let k_max = neighborhoods.len();
        let mut current = initial;
        let mut current_cost = problem.cost(&current);
        let initial_cost = current_cost;

        let mut k = 0;
        let mut steps = 0usize;
        let mut evaluations = 0usize;
        let mut passes = Vec::new();
        let mut cost_history = vec![current_cost];
        let mut cancelled = false;

        info!(
            event = "vnd_start",
            neighborhoods = k_max,
            initial_cost,
        );

        while k < k_max {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let neighborhood = &neighborhoods[k];
            let mut candidates = neighborhood.candidates(&current, problem.config());
            evaluations += candidates.len();

            let found = best_improvement(
                problem,
                &candidates,
                neighborhood.guarantee(),
                current_cost,
                config.parallel,
            );
            passes.push(PassRecord {
                neighborhood: neighborhood.name(),
                candidates: candidates.len(),
                improved_to: found.map(|(_, cost)| cost),
            });

            let Some((index, cost)) = found else {
                k += 1;
                continue;
            };

            current = candidates.swap_remove(index);
            current_cost = cost;
            steps += 1;
            cost_history.push(cost);
            checkpoint.save(&current, cost)?;
            debug!(
                event = "vnd_step",
                step = steps,
                neighborhood = neighborhood.name(),
                cost,
            );
            k = 0;

            if config.max_steps.is_some_and(|max| steps >= max) {
                break;
            }
        }

        let local_optimum = k >= k_max;
        info!(
            event = "vnd_end",
            steps,
            passes = passes.len(),
            evaluations,
            best_cost = current_cost,
            local_optimum,
            cancelled,
        );

        Ok(VndResult {
            best: current,
            best_cost: current_cost,
            initial_cost,
            steps,
            passes,
            evaluations,
            local_optimum,
            cancelled,
            cost_history,
        })
    }
}

/// Index and cost of the cheapest feasible candidate below `threshold`.
///
/// Ties go to the lowest index, so the parallel and sequential reductions
/// agree.
#[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
fn best_improvement(
    problem: &RosterProblem,
    candidates: &[ScheduleModel],
    guarantee: Feasibility,
    threshold: f64,
    parallel: bool,
) -> Option<(usize, f64)> {
    let score = |(index, candidate): (usize, &ScheduleModel)| {
        problem
            .evaluate(candidate, guarantee)
            .filter(|&cost| cost < threshold)
            .map(|cost| (index, cost))
    };

    #[cfg(feature = "parallel")]
    if parallel {
        return candidates
            .par_iter()
            .enumerate()
            .filter_map(score)
            .reduce_with(cheaper);
    }

    candidates.iter().enumerate().filter_map(score).reduce(cheaper)
}

fn cheaper(a: (usize, f64), b: (usize, f64)) -> (usize, f64) {
    if b.1 < a.1 || (b.1 == a.1 && b.0 < a.0) {
        b
    } else {
        a
    }
}
