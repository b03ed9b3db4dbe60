//! Repair solver interface and a depth-first reference implementation.

use tracing::debug;

use super::types::{RepairOutcome, RepairRequest, RepairStatus};
use crate::calendar::DAYS_PER_WEEK;
use crate::config::ConstraintConfig;
use crate::cost::CostTable;
use crate::problem::RosterProblem;
use crate::schedule::{ScheduleModel, WorkerSchedule};
use crate::shift::{ShiftType, Slot};
use crate::validation::order_allows;

/// Completes partial schedules.
///
/// Implementors may wrap an external optimizer or provide their own
/// search. A returned schedule must be complete, pass the validator and
/// keep every pinned row of the request unchanged.
pub trait RepairSolver: Send + Sync {
    /// Returns a human-readable name for this solver.
    fn name(&self) -> &str;

    /// Completes `request.partial`, preferring cheaper schedules.
    fn repair(&self, request: &RepairRequest<'_>) -> RepairOutcome;
}

/// Configuration for [`DepthFirstRepair`].
#[derive(Debug, Clone)]
pub struct DepthFirstConfig {
    /// Maximum number of assignments tried before giving up.
    pub max_nodes: usize,
}

impl Default for DepthFirstConfig {
    fn default() -> Self {
        Self { max_nodes: 1_000_000 }
    }
}

impl DepthFirstConfig {
    pub fn with_max_nodes(mut self, n: usize) -> Self {
        self.max_nodes = n;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_nodes == 0 {
            return Err("max_nodes must be at least 1".into());
        }
        Ok(())
    }
}

/// Branch-and-bound completion of free rows.
///
/// Free rows are filled one at a time, day by day. Off-duty is tried
/// first, then work shifts from cheapest to dearest. A branch is cut when
///
/// - the off-day quota can no longer be met exactly,
/// - a run would exceed its maximum or a closed run is below its minimum,
/// - the next work shift breaks the M → A → N order,
/// - the day's staffing shortfall exceeds the free rows still to fill,
/// - the cost lower bound reaches the best completion found so far.
///
/// Wrap-around runs and order are settled by the row check run on every
/// completed row; the full validator runs on every complete schedule.
///
/// # Examples
///
/// ```
/// use u_roster::config::ConstraintConfig;
/// use u_roster::cost::CostTable;
/// use u_roster::problem::RosterProblem;
/// use u_roster::repair::{DepthFirstRepair, RepairRequest, RepairSolver, RepairStatus};
/// use u_roster::schedule::ScheduleModel;
///
/// let config = ConstraintConfig::default()
///     .with_workers(1)
///     .with_weeks(1)
///     .with_off_days(0)
///     .with_staffing(Default::default());
/// let problem = RosterProblem::new(config, CostTable::new(1)).unwrap();
/// let partial = ScheduleModel::from_text(".......\n").unwrap();
///
/// // Seven work days exceed the maximum work run.
/// let outcome = DepthFirstRepair::default().repair(&RepairRequest::new(&problem, &partial));
/// assert_eq!(outcome.status, RepairStatus::Infeasible);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DepthFirstRepair {
    config: DepthFirstConfig,
}

impl DepthFirstRepair {
    /// # Panics
    ///
    /// Panics if `config` is invalid.
    pub fn new(config: DepthFirstConfig) -> Self {
        config.validate().expect("invalid DepthFirstConfig");
        Self { config }
    }

    pub fn config(&self) -> &DepthFirstConfig {
        &self.config
    }
}

impl RepairSolver for DepthFirstRepair {
    fn name(&self) -> &str {
        "depth_first"
    }

    fn repair(&self, request: &RepairRequest<'_>) -> RepairOutcome {
        let problem = request.problem;
        let partial = request.partial;
        let config = problem.config();
        let horizon = problem.horizon();

        if partial.worker_count() < config.workers
            || partial.rows()[..config.workers].iter().any(|r| r.len() < horizon)
        {
            return RepairOutcome::empty(RepairStatus::InvalidRequest, 0);
        }

        let free = request.free_workers();
        debug!(
            event = "repair_start",
            solver = self.name(),
            free = free.len(),
            max_nodes = self.config.max_nodes,
        );

        if free.is_empty() {
            let outcome = match problem.validate(partial) {
                Ok(()) => RepairOutcome {
                    status: RepairStatus::Optimal,
                    cost: Some(problem.cost(partial)),
                    schedule: Some(partial.clone()),
                    nodes: 0,
                },
                Err(_) => RepairOutcome::empty(RepairStatus::Infeasible, 0),
            };
            debug!(event = "repair_end", status = ?outcome.status, nodes = 0usize);
            return outcome;
        }

        let mut search = Search::new(problem, partial, free, self.config.max_nodes);
        let pinned_cost = search.pinned_cost();
        let finished = search.visit(0, 0, pinned_cost).is_ok();

        let status = match (finished, search.best.is_some()) {
            (true, true) => RepairStatus::Optimal,
            (true, false) => RepairStatus::Infeasible,
            (false, true) => RepairStatus::Feasible,
            (false, false) => RepairStatus::BudgetExhausted,
        };
        let nodes = search.nodes;
        let outcome = match search.best {
            Some((schedule, _)) => RepairOutcome {
                status,
                cost: Some(problem.cost(&schedule)),
                schedule: Some(schedule),
                nodes,
            },
            None => RepairOutcome::empty(status, nodes),
        };

        debug!(
            event = "repair_end",
            status = ?outcome.status,
            nodes,
            cost = outcome.cost,
        );
        outcome
    }
}

/// Raised when the node budget runs out; unwinds the whole search.
struct BudgetHit;

struct Search<'a> {
    problem: &'a RosterProblem,
    partial: &'a ScheduleModel,
    free: Vec<usize>,
    horizon: usize,
    max_nodes: usize,
    nodes: usize,
    /// Per day, number of rows on each label (indexed by `ShiftType::index`).
    counts: Vec<[usize; 4]>,
    /// `row_bounds[k][d0][n]`: least cost of `n` work days among days
    /// `d0..horizon` for free row `k`.
    row_bounds: Vec<Vec<Vec<f64>>>,
    /// `future[k]`: lower bound on the cost of free rows after `k`.
    future: Vec<f64>,
    /// Shifts placed so far in the row being filled.
    row: Vec<ShiftType>,
    /// Completed free rows, in `free` order.
    done: Vec<WorkerSchedule>,
    best: Option<(ScheduleModel, f64)>,
}

impl<'a> Search<'a> {
    fn new(
        problem: &'a RosterProblem,
        partial: &'a ScheduleModel,
        free: Vec<usize>,
        max_nodes: usize,
    ) -> Self {
        let config = problem.config();
        let horizon = problem.horizon();
        let table = problem.cost_model().table();

        let mut counts = vec![[0usize; 4]; horizon];
        for worker in (0..config.workers).filter(|w| !free.contains(w)) {
            for (day, count) in counts.iter_mut().enumerate() {
                if let Some(shift) = partial.slot(worker, day).shift() {
                    count[shift.index()] += 1;
                }
            }
        }

        let row_bounds: Vec<_> = free
            .iter()
            .map(|&w| suffix_bounds(table, w, horizon))
            .collect();
        let full_work = horizon.saturating_sub(config.off_days);
        let mut future = vec![0.0; free.len()];
        for k in (0..free.len().saturating_sub(1)).rev() {
            future[k] = future[k + 1] + row_bounds[k + 1][0][full_work];
        }

        Self {
            problem,
            partial,
            free,
            horizon,
            max_nodes,
            nodes: 0,
            counts,
            row_bounds,
            future,
            row: Vec::with_capacity(horizon),
            done: Vec::new(),
            best: None,
        }
    }

    fn config(&self) -> &'a ConstraintConfig {
        self.problem.config()
    }

    fn best_cost(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, |(_, c)| *c)
    }

    fn pinned_cost(&self) -> f64 {
        let model = self.problem.cost_model();
        (0..self.config().workers)
            .filter(|w| !self.free.contains(w))
            .map(|w| model.worker_cost(self.partial, w))
            .sum()
    }

    /// Fills day `row.len()` of free row `k`.
    fn visit(&mut self, k: usize, off: usize, acc: f64) -> Result<(), BudgetHit> {
        let day = self.row.len();
        if day == self.horizon {
            return self.complete_row(k, acc);
        }

        let worker = self.free[k];
        let table = self.problem.cost_model().table();
        let rows_after = self.free.len() - k - 1;

        for shift in self.options(k, day) {
            self.nodes += 1;
            if self.nodes > self.max_nodes {
                return Err(BudgetHit);
            }

            let off_next = off + usize::from(!shift.is_work());
            if !self.admissible(day, shift, off_next) {
                continue;
            }

            self.counts[day][shift.index()] += 1;
            let cost = table.get(worker, day % DAYS_PER_WEEK, shift);
            let bound = acc + cost + self.row_bound(k, day + 1, off_next) + self.future[k];
            let result = if self.shortfall(day) <= rows_after && bound < self.best_cost() {
                self.row.push(shift);
                let result = self.visit(k, off_next, acc + cost);
                self.row.pop();
                result
            } else {
                Ok(())
            };
            self.counts[day][shift.index()] -= 1;
            result?;
        }
        Ok(())
    }

    fn complete_row(&mut self, k: usize, acc: f64) -> Result<(), BudgetHit> {
        let worker = self.free[k];
        let template = self.partial.row(worker);
        let mut slots = template.slots().to_vec();
        for (slot, &shift) in slots.iter_mut().zip(&self.row) {
            *slot = Slot::Assigned(shift);
        }
        let row = WorkerSchedule::new(slots);
        if self.problem.validator().check_worker(worker, &row).is_err() {
            return Ok(());
        }

        let filled = std::mem::take(&mut self.row);
        self.done.push(row);
        let result = if k + 1 == self.free.len() {
            self.record(acc);
            Ok(())
        } else {
            self.visit(k + 1, 0, acc)
        };
        self.done.pop();
        self.row = filled;
        result
    }

    fn record(&mut self, acc: f64) {
        let mut schedule = self.partial.clone();
        for (&worker, row) in self.free.iter().zip(&self.done) {
            schedule = schedule.with_row(worker, row.clone());
        }
        if acc < self.best_cost() && self.problem.is_feasible(&schedule) {
            self.best = Some((schedule, acc));
        }
    }

    /// Candidate shifts for `day` of free row `k`, most promising first.
    fn options(&self, k: usize, day: usize) -> Vec<ShiftType> {
        let worker = self.free[k];
        if let Some(fixed) = self.partial.slot(worker, day).shift() {
            return vec![fixed];
        }
        let table = self.problem.cost_model().table();
        let dow = day % DAYS_PER_WEEK;
        let mut work = ShiftType::WORK;
        work.sort_by(|a, b| table.get(worker, dow, *a).total_cmp(&table.get(worker, dow, *b)));
        let mut options = Vec::with_capacity(4);
        options.push(ShiftType::OffDuty);
        options.extend(work);
        options
    }

    /// Whether `shift` may follow the current row prefix on `day`.
    fn admissible(&self, day: usize, shift: ShiftType, off_next: usize) -> bool {
        let config = self.config();
        if off_next > config.off_days || off_next + (self.horizon - day - 1) < config.off_days {
            return false;
        }

        let row = &self.row;
        let is_off = |s: ShiftType| !s.is_work();
        if shift.is_work() {
            if tail_len(row, ShiftType::is_work) + 1 > config.work_run.max
                || tail_len(row, |s| s == shift) + 1 > config.same_shift_run.max
            {
                return false;
            }
        } else if tail_len(row, is_off) + 1 > config.off_run.max {
            return false;
        }

        let Some(&previous) = row.last() else {
            return true;
        };

        if previous != shift {
            // Runs closed by this day; a run touching day 0 may continue
            // from the end of the row and is left to the row check.
            let closes_short = |len: usize, min: usize| day > len && len < min;
            let same_run = tail_len(row, |s| s == previous);
            if previous.is_work() && closes_short(same_run, config.same_shift_run.min) {
                return false;
            }
            if previous.is_work() != shift.is_work() {
                let short = if previous.is_work() {
                    closes_short(tail_len(row, ShiftType::is_work), config.work_run.min)
                } else {
                    closes_short(tail_len(row, is_off), config.off_run.min)
                };
                if short {
                    return false;
                }
            }
        }

        if shift.is_work() {
            if previous.is_work() {
                return order_allows(previous, shift, false);
            }
            if let Some(&last_work) = row.iter().rev().find(|s| s.is_work()) {
                return order_allows(last_work, shift, true);
            }
        }
        true
    }

    /// Staffing still missing on `day` after the rows placed so far.
    fn shortfall(&self, day: usize) -> usize {
        self.config()
            .staffing
            .iter()
            .map(|(shift, required)| required.saturating_sub(self.counts[day][shift.index()]))
            .sum()
    }

    /// Least cost of the rest of free row `k` from day `from`.
    fn row_bound(&self, k: usize, from: usize, off: usize) -> f64 {
        let remaining = self.horizon - from;
        let off_left = self.config().off_days.saturating_sub(off);
        let work_left = remaining.saturating_sub(off_left);
        self.row_bounds[k][from][work_left]
    }
}

/// Number of trailing entries of `row` satisfying `pred`.
fn tail_len(row: &[ShiftType], pred: impl Fn(ShiftType) -> bool) -> usize {
    row.iter().rev().take_while(|&&s| pred(s)).count()
}

/// `out[d0][n]`: sum of the `n` smallest daily minimum costs over days
/// `d0..horizon`.
fn suffix_bounds(table: &CostTable, worker: usize, horizon: usize) -> Vec<Vec<f64>> {
    let cheapest: Vec<f64> = (0..horizon)
        .map(|d| table.cheapest(worker, d % DAYS_PER_WEEK))
        .collect();
    (0..=horizon)
        .map(|from| {
            let mut tail = cheapest[from..].to_vec();
            tail.sort_by(f64::total_cmp);
            let mut prefix = Vec::with_capacity(tail.len() + 1);
            let mut sum = 0.0;
            prefix.push(sum);
            for c in tail {
                sum += c;
                prefix.push(sum);
            }
            prefix
        })
        .collect()
}
