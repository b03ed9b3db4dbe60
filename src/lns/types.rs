//! Destroy operators.

use rand::Rng;

use crate::problem::RosterProblem;
use crate::schedule::ScheduleModel;

/// Chooses the worker rows a destroy step clears.
///
/// The remaining rows are pinned: the repair must keep them unchanged.
pub trait DestroyOperator: Send + Sync {
    /// Returns a human-readable name for this operator.
    fn name(&self) -> &str;

    /// Worker indices to clear, ascending and without duplicates. Only
    /// indices below the configured worker count are returned.
    fn select<R: Rng>(
        &self,
        problem: &RosterProblem,
        schedule: &ScheduleModel,
        rng: &mut R,
    ) -> Vec<usize>;
}

/// The destroy operators shipped with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destroy {
    /// `count` workers drawn uniformly without replacement.
    RandomWorkers { count: usize },
    /// The `count` workers with the highest row cost; ties go to the lower
    /// index.
    CostliestWorkers { count: usize },
    /// `count` consecutive workers from a random start, wrapping past the
    /// last worker.
    WorkerBlock { count: usize },
}

impl DestroyOperator for Destroy {
    fn name(&self) -> &str {
        match self {
            Destroy::RandomWorkers { .. } => "random_workers",
            Destroy::CostliestWorkers { .. } => "costliest_workers",
            Destroy::WorkerBlock { .. } => "worker_block",
        }
    }

    fn select<R: Rng>(
        &self,
        problem: &RosterProblem,
        schedule: &ScheduleModel,
        rng: &mut R,
    ) -> Vec<usize> {
        let workers = problem.config().workers.min(schedule.worker_count());
        let mut selected = match *self {
            Destroy::RandomWorkers { count } => {
                rand::seq::index::sample(rng, workers, count.min(workers)).into_vec()
            }
            Destroy::CostliestWorkers { count } => {
                let model = problem.cost_model();
                let mut ranked: Vec<(usize, f64)> = (0..workers)
                    .map(|w| (w, model.worker_cost(schedule, w)))
                    .collect();
                ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
                ranked.into_iter().take(count).map(|(w, _)| w).collect()
            }
            Destroy::WorkerBlock { count } => {
                if workers == 0 {
                    Vec::new()
                } else {
                    let start = rng.random_range(0..workers);
                    (0..count.min(workers)).map(|i| (start + i) % workers).collect()
                }
            }
        };
        selected.sort_unstable();
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, small_config, small_costs};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_problem() -> RosterProblem {
        RosterProblem::new(small_config(), small_costs()).unwrap()
    }

    #[test]
    fn test_costliest_workers() {
        let problem = small_problem();
        let schedule = testing::small_schedule();
        let mut rng = StdRng::seed_from_u64(1);

        let one = Destroy::CostliestWorkers { count: 1 }.select(&problem, &schedule, &mut rng);
        assert_eq!(one, vec![2]);

        // Workers other than 2 tie at 1.0; lower indices win.
        let three = Destroy::CostliestWorkers { count: 3 }.select(&problem, &schedule, &mut rng);
        assert_eq!(three, vec![0, 1, 2]);
    }

    #[test]
    fn test_random_workers_are_distinct_and_in_range() {
        let problem = small_problem();
        let schedule = testing::small_schedule();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let picked = Destroy::RandomWorkers { count: 4 }.select(&problem, &schedule, &mut rng);
            assert_eq!(picked.len(), 4);
            assert!(picked.windows(2).all(|w| w[0] < w[1]));
            assert!(picked.iter().all(|&w| w < 6));
        }
        let all = Destroy::RandomWorkers { count: 99 }.select(&problem, &schedule, &mut rng);
        assert_eq!(all, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_worker_block_is_cyclically_contiguous() {
        let problem = small_problem();
        let schedule = testing::small_schedule();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let block = Destroy::WorkerBlock { count: 3 }.select(&problem, &schedule, &mut rng);
            assert_eq!(block.len(), 3);
            let contiguous = (0..6).any(|start| {
                let mut expected: Vec<usize> = (0..3).map(|i| (start + i) % 6).collect();
                expected.sort_unstable();
                expected == block
            });
            assert!(contiguous, "{block:?}");
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(Destroy::RandomWorkers { count: 1 }.name(), "random_workers");
        assert_eq!(Destroy::CostliestWorkers { count: 1 }.name(), "costliest_workers");
        assert_eq!(Destroy::WorkerBlock { count: 1 }.name(), "worker_block");
    }
}
