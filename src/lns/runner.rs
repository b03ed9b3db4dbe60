//! LNS execution loop.
//!
//! # Algorithm
//!
//! 1. Validate the initial schedule
//! 2. For each iteration:
//!    a. Select workers with the destroy operator and clear their rows
//!    b. Ask the repair solver to complete the partial schedule
//!    c. Adopt the completion if it is feasible, keeps every other row and
//!    costs strictly less than the current schedule
//! 3. Return the current schedule
//!
//! A repair failure or a rejected completion leaves the current schedule
//! untouched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, trace};

use super::config::LnsConfig;
use super::types::{Destroy, DestroyOperator};
use crate::error::SearchError;
use crate::io::{Checkpoint, NoCheckpoint};
use crate::problem::RosterProblem;
use crate::repair::{RepairRequest, RepairSolver};
use crate::schedule::ScheduleModel;

/// Result of an LNS run.
#[derive(Debug, Clone)]
pub struct LnsResult {
    /// The final schedule.
    pub best: ScheduleModel,

    /// Cost of `best`.
    pub best_cost: f64,

    /// Cost of the initial schedule.
    pub initial_cost: f64,

    /// Iterations performed.
    pub iterations: usize,

    /// Completions adopted.
    pub improvements: usize,

    /// Iterations where the solver returned no schedule.
    pub solver_failures: usize,

    /// Completions discarded as infeasible, touching pinned rows, or not
    /// cheaper.
    pub rejected: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Name of the destroy operator.
    pub destroy: String,

    /// Initial cost followed by the current cost after each iteration.
    pub cost_history: Vec<f64>,
}

/// Results of [`LnsRunner::run_trials`], one per destroy operator.
#[derive(Debug, Clone)]
pub struct LnsTrials {
    /// One result per destroy operator, in input order.
    pub results: Vec<LnsResult>,

    /// Index of the cheapest result; ties go to the first.
    pub best: usize,
}

impl LnsTrials {
    pub fn best_result(&self) -> &LnsResult {
        &self.results[self.best]
    }
}

/// Executes destroy-and-repair Large Neighborhood Search.
pub struct LnsRunner;

impl LnsRunner {
    /// Runs LNS from `initial`.
    ///
    /// # Errors
    ///
    /// [`SearchError::InfeasibleStart`] if `initial` violates a constraint.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid.
    pub fn run<D, S>(
        problem: &RosterProblem,
        initial: ScheduleModel,
        destroy: &D,
        solver: &S,
        config: &LnsConfig,
    ) -> Result<LnsResult, SearchError>
    where
        D: DestroyOperator,
        S: RepairSolver + ?Sized,
    {
        Self::run_with(problem, initial, destroy, solver, config, &mut NoCheckpoint, None)
    }

    /// Runs LNS, handing every adopted schedule to `checkpoint` and
    /// stopping early when `cancel` is set.
    pub fn run_with<D, S>(
        problem: &RosterProblem,
        initial: ScheduleModel,
        destroy: &D,
        solver: &S,
        config: &LnsConfig,
        checkpoint: &mut dyn Checkpoint,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<LnsResult, SearchError>
    where
        D: DestroyOperator,
        S: RepairSolver + ?Sized,
    {
        config.validate().expect("invalid LnsConfig");

        problem.validate(&initial)?;

        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        let mut current = initial;
        let mut current_cost = problem.cost(&current);
        let initial_cost = current_cost;

        let mut iterations = 0usize;
        let mut improvements = 0usize;
        let mut solver_failures = 0usize;
        let mut rejected = 0usize;
        let mut cost_history = Vec::with_capacity(config.max_iterations + 1);
        cost_history.push(current_cost);
        let mut cancelled = false;

        info!(
            event = "lns_start",
            destroy = destroy.name(),
            solver = solver.name(),
            max_iterations = config.max_iterations,
            initial_cost,
        );

        for iteration in 0..config.max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            iterations += 1;

            let workers = destroy.select(problem, &current, &mut rng);
            let partial = current.with_workers_unassigned(&workers);
            let outcome = solver.repair(&RepairRequest::new(problem, &partial));

            match outcome.into_solution() {
                Err(reason) => {
                    solver_failures += 1;
                    trace!(
                        event = "lns_iteration",
                        iteration,
                        destroyed = ?workers,
                        outcome = %reason,
                    );
                }
                Ok((candidate, _)) => {
                    // Feasibility and cost are recomputed, not taken from the solver.
                    let cost = problem.cost(&candidate);
                    let accepted = cost < current_cost
                        && keeps_pinned_rows(&current, &candidate, &workers)
                        && problem.is_feasible(&candidate);
                    trace!(
                        event = "lns_iteration",
                        iteration,
                        destroyed = ?workers,
                        cost,
                        accepted,
                    );
                    if accepted {
                        current = candidate;
                        current_cost = cost;
                        improvements += 1;
                        checkpoint.save(&current, cost)?;
                        debug!(
                            event = "lns_improvement",
                            iteration,
                            improvement = improvements,
                            cost,
                        );
                    } else {
                        rejected += 1;
                    }
                }
            }

            cost_history.push(current_cost);
        }

        info!(
            event = "lns_end",
            destroy = destroy.name(),
            iterations,
            improvements,
            solver_failures,
            rejected,
            best_cost = current_cost,
            cancelled,
        );

        Ok(LnsResult {
            best: current,
            best_cost: current_cost,
            initial_cost,
            iterations,
            improvements,
            solver_failures,
            rejected,
            cancelled,
            destroy: destroy.name().to_string(),
            cost_history,
        })
    }

    /// Runs one independent LNS trial per destroy operator from the same
    /// start and reports every result.
    ///
    /// With a seed, trial `i` uses `seed + i`. Trials run in parallel when
    /// the `parallel` feature is enabled and `config.parallel` is set.
    ///
    /// # Panics
    ///
    /// Panics if `destroys` is empty or `config` is invalid.
    pub fn run_trials<S>(
        problem: &RosterProblem,
        initial: &ScheduleModel,
        destroys: &[Destroy],
        solver: &S,
        config: &LnsConfig,
    ) -> Result<LnsTrials, SearchError>
    where
        S: RepairSolver + ?Sized,
    {
        assert!(!destroys.is_empty(), "at least one destroy operator required");
        config.validate().expect("invalid LnsConfig");

        let trial = |(index, destroy): (usize, &Destroy)| {
            let mut trial_config = config.clone();
            if let Some(seed) = config.seed {
                trial_config.seed = Some(seed.wrapping_add(index as u64));
            }
            Self::run(problem, initial.clone(), destroy, solver, &trial_config)
        };

        #[cfg(feature = "parallel")]
        let results: Vec<LnsResult> = if config.parallel {
            destroys
                .par_iter()
                .enumerate()
                .map(trial)
                .collect::<Result<_, _>>()?
        } else {
            destroys.iter().enumerate().map(trial).collect::<Result<_, _>>()?
        };

        #[cfg(not(feature = "parallel"))]
        let results: Vec<LnsResult> = destroys
            .iter()
            .enumerate()
            .map(trial)
            .collect::<Result<_, _>>()?;

        let mut best = 0;
        for (index, result) in results.iter().enumerate() {
            if result.best_cost < results[best].best_cost {
                best = index;
            }
        }

        Ok(LnsTrials { results, best })
    }
}

/// Whether `candidate` matches `current` on every row not in `freed`.
fn keeps_pinned_rows(current: &ScheduleModel, candidate: &ScheduleModel, freed: &[usize]) -> bool {
    current.worker_count() == candidate.worker_count()
        && current
            .rows()
            .iter()
            .zip(candidate.rows())
            .enumerate()
            .all(|(w, (a, b))| freed.contains(&w) || a == b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConstraintConfig;
    use crate::error::RosterError;
    use crate::repair::{DepthFirstConfig, DepthFirstRepair, RepairOutcome, RepairStatus};
    use crate::testing::{self, small_config, small_costs};

    fn small_problem() -> RosterProblem {
        RosterProblem::new(small_config(), small_costs()).unwrap()
    }

    /// Ignores the request and hands back a fixed schedule.
    struct FixedSolver(ScheduleModel);

    impl RepairSolver for FixedSolver {
        fn name(&self) -> &str {
            "fixed"
        }

        fn repair(&self, request: &RepairRequest<'_>) -> RepairOutcome {
            RepairOutcome {
                status: RepairStatus::Optimal,
                schedule: Some(self.0.clone()),
                cost: Some(request.problem.cost(&self.0)),
                nodes: 1,
            }
        }
    }

    #[test]
    fn test_costliest_worker_is_repaired() {
        let problem = small_problem();
        let config = LnsConfig::default().with_max_iterations(3).with_seed(1);
        let result = LnsRunner::run(
            &problem,
            testing::small_schedule(),
            &Destroy::CostliestWorkers { count: 1 },
            &DepthFirstRepair::default(),
            &config,
        )
        .unwrap();

        assert!((result.initial_cost - 10.4).abs() < 1e-9);
        assert!((result.best_cost - 10.0).abs() < 1e-9);
        assert_eq!(result.iterations, 3);
        assert_eq!(result.improvements, 1);
        // Later repairs of worker 2 only tie.
        assert_eq!(result.rejected, 2);
        assert_eq!(result.solver_failures, 0);
        assert_eq!(result.destroy, "costliest_workers");
        assert!(problem.is_feasible(&result.best));
        for w in [0, 1, 3, 4, 5] {
            assert_eq!(result.best.row(w), testing::small_schedule().row(w));
        }
        assert_eq!(result.cost_history.len(), 4);
    }

    #[test]
    fn test_random_destroy_never_increases_cost() {
        let problem =
            RosterProblem::new(ConstraintConfig::default(), testing::hashed_costs(20)).unwrap();
        let solver = DepthFirstRepair::new(DepthFirstConfig::default().with_max_nodes(200_000));
        let config = LnsConfig::default().with_max_iterations(8).with_seed(11);

        let result = LnsRunner::run(
            &problem,
            testing::firefighter_schedule(),
            &Destroy::RandomWorkers { count: 1 },
            &solver,
            &config,
        )
        .unwrap();

        assert!(problem.is_feasible(&result.best));
        assert!(result.best_cost <= result.initial_cost);
        assert!((problem.cost(&result.best) - result.best_cost).abs() < 1e-9);
        assert_eq!(
            result.improvements + result.rejected + result.solver_failures,
            result.iterations
        );
        for window in result.cost_history.windows(2) {
            assert!(window[1] <= window[0]);
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let problem = small_problem();
        let config = LnsConfig::default().with_max_iterations(6).with_seed(99);
        let run = || {
            LnsRunner::run(
                &problem,
                testing::small_schedule(),
                &Destroy::WorkerBlock { count: 2 },
                &DepthFirstRepair::default(),
                &config,
            )
            .unwrap()
        };
        let a = run();
        let b = run();
        assert_eq!(a.best, b.best);
        assert_eq!(a.cost_history, b.cost_history);
    }

    #[test]
    fn test_solver_failures_keep_current() {
        let problem = small_problem();
        let solver = DepthFirstRepair::new(DepthFirstConfig::default().with_max_nodes(1));
        let config = LnsConfig::default().with_max_iterations(4).with_seed(3);

        let result = LnsRunner::run(
            &problem,
            testing::small_schedule(),
            &Destroy::RandomWorkers { count: 2 },
            &solver,
            &config,
        )
        .unwrap();

        assert_eq!(result.solver_failures, 4);
        assert_eq!(result.improvements, 0);
        assert_eq!(result.best, testing::small_schedule());
        assert!(result.cost_history.iter().all(|&c| c == result.initial_cost));
    }

    #[test]
    fn test_completion_touching_pinned_rows_is_rejected() {
        let problem = small_problem();
        // Cheaper and feasible, but it rewrites worker 0, which stays pinned.
        let cheaper = testing::small_schedule().with_rows_swapped(0, 2);
        assert!(problem.cost(&cheaper) < problem.cost(&testing::small_schedule()));

        let result = LnsRunner::run(
            &problem,
            testing::small_schedule(),
            &Destroy::CostliestWorkers { count: 1 },
            &FixedSolver(cheaper),
            &LnsConfig::default().with_max_iterations(2),
        )
        .unwrap();

        assert_eq!(result.improvements, 0);
        assert_eq!(result.rejected, 2);
        assert_eq!(result.best, testing::small_schedule());
    }

    #[test]
    fn test_infeasible_completion_is_rejected() {
        let problem = small_problem();
        let broken = testing::small_with_row(2, "FAAMMNNFMMMMFF");
        let result = LnsRunner::run(
            &problem,
            testing::small_schedule(),
            &Destroy::CostliestWorkers { count: 1 },
            &FixedSolver(broken),
            &LnsConfig::default().with_max_iterations(1),
        )
        .unwrap();
        assert_eq!(result.rejected, 1);
        assert_eq!(result.best, testing::small_schedule());
    }

    #[test]
    fn test_infeasible_start_is_rejected() {
        let problem = small_problem();
        let start = testing::small_with_row(0, "NNFFMMMMFAAAFN");
        let err = LnsRunner::run(
            &problem,
            start,
            &Destroy::RandomWorkers { count: 1 },
            &DepthFirstRepair::default(),
            &LnsConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SearchError::InfeasibleStart(_)));
    }

    #[test]
    fn test_checkpoint_and_cancellation() {
        let problem = small_problem();
        let mut saved = Vec::new();
        let mut sink = |_: &ScheduleModel, cost: f64| -> crate::error::Result<()> {
            saved.push(cost);
            Ok(())
        };
        let result = LnsRunner::run_with(
            &problem,
            testing::small_schedule(),
            &Destroy::CostliestWorkers { count: 1 },
            &DepthFirstRepair::default(),
            &LnsConfig::default().with_max_iterations(2),
            &mut sink,
            None,
        )
        .unwrap();
        assert_eq!(saved.len(), result.improvements);

        let mut failing = |_: &ScheduleModel, _: f64| -> crate::error::Result<()> {
            Err(RosterError::Config("read-only".into()))
        };
        let err = LnsRunner::run_with(
            &problem,
            testing::small_schedule(),
            &Destroy::CostliestWorkers { count: 1 },
            &DepthFirstRepair::default(),
            &LnsConfig::default().with_max_iterations(2),
            &mut failing,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, SearchError::Checkpoint(_)));

        let result = LnsRunner::run_with(
            &problem,
            testing::small_schedule(),
            &Destroy::CostliestWorkers { count: 1 },
            &DepthFirstRepair::default(),
            &LnsConfig::default(),
            &mut NoCheckpoint,
            Some(Arc::new(AtomicBool::new(true))),
        )
        .unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.cost_history, vec![result.initial_cost]);
    }

    #[test]
    fn test_trials_report_best() {
        let problem = small_problem();
        let destroys = [
            Destroy::RandomWorkers { count: 2 },
            Destroy::CostliestWorkers { count: 1 },
            Destroy::WorkerBlock { count: 2 },
        ];
        let config = LnsConfig::default().with_max_iterations(5).with_seed(7);

        let trials = LnsRunner::run_trials(
            &problem,
            &testing::small_schedule(),
            &destroys,
            &DepthFirstRepair::default(),
            &config,
        )
        .unwrap();

        assert_eq!(trials.results.len(), 3);
        let names: Vec<_> = trials.results.iter().map(|r| r.destroy.as_str()).collect();
        assert_eq!(names, vec!["random_workers", "costliest_workers", "worker_block"]);
        let best = trials.best_result().best_cost;
        assert!(trials.results.iter().all(|r| r.best_cost >= best));
        assert!(trials.results.iter().all(|r| r.best_cost <= r.initial_cost));
        assert!((best - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_keeps_pinned_rows() {
        let base = testing::small_schedule();
        let swapped = base.with_rows_swapped(0, 2);
        assert!(keeps_pinned_rows(&base, &swapped, &[0, 2]));
        assert!(!keeps_pinned_rows(&base, &swapped, &[2]));
    }
}
