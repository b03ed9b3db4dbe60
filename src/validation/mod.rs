//! Labor-rule validation.
//!
//! [`ConstraintValidator`] is the feasibility oracle of every search in the
//! crate. It runs nine checks in a fixed order and stops at the first
//! failure:
//!
//! | Id | Rule |
//! |----|------|
//! | C0 | enough workers, rows at least one horizon long |
//! | C1 | every cell holds a shift |
//! | C2 | exact off-day quota per worker |
//! | C3 | same-shift run lengths |
//! | C4 | work run lengths |
//! | C5 | off run lengths |
//! | C6 | at least one Saturday+Sunday off |
//! | C7 | daily staffing minimums (Morning, Afternoon, Night) |
//! | C8 | cyclic shift order M → A → N → M |
//!
//! Row checks (C1 to C6) are applied to every worker before the next check
//! starts, so the reported violation is the lowest constraint broken by any
//! worker. Runs and shift order are evaluated cyclically.

mod violation;

pub use violation::{ConstraintId, RunClass, Violation};

use crate::config::{ConstraintConfig, RunBounds};
use crate::runs::shift_runs;
use crate::schedule::{ScheduleModel, WorkerSchedule};
use crate::shift::{ShiftSet, ShiftType, Slot};

type RowCheck = fn(&ConstraintValidator, usize, &[Slot]) -> Result<(), Violation>;

/// Checks schedules against a [`ConstraintConfig`].
///
/// The validator is immutable and `Sync`; share it by reference across
/// threads.
///
/// # Examples
///
/// ```
/// use u_roster::config::ConstraintConfig;
/// use u_roster::schedule::ScheduleModel;
/// use u_roster::validation::{ConstraintId, ConstraintValidator};
///
/// let validator = ConstraintValidator::new(ConstraintConfig::default());
/// let schedule = ScheduleModel::from_text("MMMFAAAFNNNF\n").unwrap();
/// let violation = validator.validate(&schedule).unwrap_err();
/// assert_eq!(violation.constraint(), ConstraintId::Shape);
/// ```
#[derive(Debug, Clone)]
pub struct ConstraintValidator {
    config: ConstraintConfig,
}

impl ConstraintValidator {
    /// Row checks C1 to C6, in order.
    const ROW_CHECKS: [RowCheck; 6] = [
        Self::check_alphabet,
        Self::check_quota,
        Self::check_same_shift_runs,
        Self::check_work_runs,
        Self::check_off_runs,
        Self::check_weekend,
    ];

    pub fn new(config: ConstraintConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConstraintConfig {
        &self.config
    }

    #[inline]
    pub fn horizon(&self) -> usize {
        self.config.horizon()
    }

    /// Returns the first violation in check order, or `Ok(())` when the
    /// schedule is feasible.
    pub fn validate(&self, schedule: &ScheduleModel) -> Result<(), Violation> {
        self.check_shape(schedule)?;

        let horizon = self.horizon();
        let workers = self.config.workers;
        for check in Self::ROW_CHECKS {
            for (worker, row) in schedule.rows()[..workers].iter().enumerate() {
                check(self, worker, &row.slots()[..horizon])?;
            }
        }

        self.check_staffing(schedule)?;

        for (worker, row) in schedule.rows()[..workers].iter().enumerate() {
            self.check_order(worker, &row.slots()[..horizon])?;
        }
        Ok(())
    }

    pub fn is_feasible(&self, schedule: &ScheduleModel) -> bool {
        self.validate(schedule).is_ok()
    }

    /// Checks one row in isolation: length, C1 to C6 and C8.
    ///
    /// Staffing is a cross-worker rule and is not checked here.
    pub fn check_worker(&self, worker: usize, row: &WorkerSchedule) -> Result<(), Violation> {
        let horizon = self.horizon();
        if row.len() < horizon {
            return Err(Violation::Shape {
                worker: Some(worker),
                expected: horizon,
                found: row.len(),
            });
        }
        let slots = &row.slots()[..horizon];
        for check in Self::ROW_CHECKS {
            check(self, worker, slots)?;
        }
        self.check_order(worker, slots)
    }

    /// Collects diagnostics: the worker-count failure if any, the first
    /// violation of each row, then the first staffing shortfall.
    ///
    /// Staffing is only reported when every considered row is long enough
    /// to be counted.
    pub fn violations(&self, schedule: &ScheduleModel) -> Vec<Violation> {
        let mut out = Vec::new();
        let workers = self.config.workers.min(schedule.worker_count());
        if workers < self.config.workers {
            out.push(Violation::Shape {
                worker: None,
                expected: self.config.workers,
                found: schedule.worker_count(),
            });
        }

        let mut rows_ok = true;
        for (worker, row) in schedule.rows()[..workers].iter().enumerate() {
            if let Err(v) = self.check_worker(worker, row) {
                rows_ok &= !matches!(v, Violation::Shape { .. });
                out.push(v);
            }
        }

        if rows_ok && workers == self.config.workers {
            if let Err(v) = self.check_staffing(schedule) {
                out.push(v);
            }
        }
        out
    }

    /// C0.
    fn check_shape(&self, schedule: &ScheduleModel) -> Result<(), Violation> {
        let workers = self.config.workers;
        if schedule.worker_count() < workers {
            return Err(Violation::Shape {
                worker: None,
                expected: workers,
                found: schedule.worker_count(),
            });
        }
        let horizon = self.horizon();
        for (worker, row) in schedule.rows()[..workers].iter().enumerate() {
            if row.len() < horizon {
                return Err(Violation::Shape {
                    worker: Some(worker),
                    expected: horizon,
                    found: row.len(),
                });
            }
        }
        Ok(())
    }

    /// C1.
    fn check_alphabet(&self, worker: usize, row: &[Slot]) -> Result<(), Violation> {
        match row.iter().position(|s| !s.is_assigned()) {
            Some(day) => Err(Violation::Alphabet { worker, day }),
            None => Ok(()),
        }
    }

    /// C2.
    fn check_quota(&self, worker: usize, row: &[Slot]) -> Result<(), Violation> {
        let found = row.iter().filter(|s| s.is(ShiftType::OffDuty)).count();
        if found != self.config.off_days {
            return Err(Violation::Quota {
                worker,
                expected: self.config.off_days,
                found,
            });
        }
        Ok(())
    }

    /// C3.
    fn check_same_shift_runs(&self, worker: usize, row: &[Slot]) -> Result<(), Violation> {
        for shift in ShiftType::WORK {
            check_runs(
                worker,
                row,
                ShiftSet::only(shift),
                RunClass::SameShift(shift),
                self.config.same_shift_run,
            )?;
        }
        Ok(())
    }

    /// C4.
    fn check_work_runs(&self, worker: usize, row: &[Slot]) -> Result<(), Violation> {
        check_runs(worker, row, ShiftSet::WORK, RunClass::Work, self.config.work_run)
    }

    /// C5.
    fn check_off_runs(&self, worker: usize, row: &[Slot]) -> Result<(), Violation> {
        check_runs(worker, row, ShiftSet::OFF, RunClass::OffDuty, self.config.off_run)
    }

    /// C6.
    fn check_weekend(&self, worker: usize, row: &[Slot]) -> Result<(), Violation> {
        let off = |day: usize| row[day].is(ShiftType::OffDuty);
        if self
            .config
            .calendar()
            .weekends()
            .any(|(sat, sun)| off(sat) && off(sun))
        {
            Ok(())
        } else {
            Err(Violation::Weekend { worker })
        }
    }

    /// C7.
    fn check_staffing(&self, schedule: &ScheduleModel) -> Result<(), Violation> {
        let workers = self.config.workers;
        for (shift, required) in self.config.staffing.iter() {
            if required == 0 {
                continue;
            }
            for day in 0..self.horizon() {
                let found = schedule.staffing(workers, day, shift);
                if found < required {
                    return Err(Violation::Staffing {
                        shift,
                        day,
                        required,
                        found,
                    });
                }
            }
        }
        Ok(())
    }

    /// C8.
    fn check_order(&self, worker: usize, row: &[Slot]) -> Result<(), Violation> {
        let horizon = row.len();
        let mut previous: Option<ShiftType> = None;
        let mut across_gap = false;

        for step in 0..2 * horizon {
            let day = step % horizon;
            let Some(next) = row[day].shift() else {
                continue;
            };
            if !next.is_work() {
                across_gap = true;
                continue;
            }
            if let Some(prev) = previous {
                if !order_allows(prev, next, across_gap) {
                    return Err(Violation::Order {
                        worker,
                        day,
                        previous: prev,
                        next,
                        across_gap,
                    });
                }
            }
            previous = Some(next);
            across_gap = false;
        }
        Ok(())
    }
}

/// Whether `next` may follow `previous` on the next work day.
///
/// Without an off gap the shift may repeat or advance one step; across a
/// gap it must advance.
#[inline]
pub fn order_allows(previous: ShiftType, next: ShiftType, across_gap: bool) -> bool {
    next == previous.successor() || (!across_gap && next == previous)
}

fn check_runs(
    worker: usize,
    row: &[Slot],
    set: ShiftSet,
    class: RunClass,
    bounds: RunBounds,
) -> Result<(), Violation> {
    for run in shift_runs(row, row.len(), set) {
        if !bounds.contains(run.length) {
            return Err(Violation::RunBound {
                class,
                worker,
                start: run.start,
                length: run.length,
                min: bounds.min,
                max: bounds.max,
            });
        }
    }
    Ok(())
}
