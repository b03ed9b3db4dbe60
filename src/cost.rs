//! Assignment costs.
//!
//! A [`CostTable`] prices every (worker, day-of-week, work shift) triple.
//! Off-duty and unassigned cells cost nothing. [`CostModel`] sums the table
//! over a schedule's configured horizon.
//!
//! # Cost file
//!
//! Whitespace-separated decimal values, row-major over
//! `(worker, day-of-week, shift)` with shifts in the order Afternoon,
//! Morning, Night: `workers × 7 × 3` values. Extra values are ignored.

use std::path::Path;

use crate::calendar::DAYS_PER_WEEK;
use crate::config::ConstraintConfig;
use crate::error::{Result, RosterError};
use crate::schedule::{ScheduleModel, WorkerSchedule};
use crate::shift::ShiftType;

/// Shift order of the values in a cost file.
const FILE_SHIFT_ORDER: [ShiftType; 3] =
    [ShiftType::Afternoon, ShiftType::Morning, ShiftType::Night];

/// Per-worker, per-weekday, per-work-shift costs.
#[derive(Debug, Clone, PartialEq)]
pub struct CostTable {
    workers: usize,
    /// Indexed by `(worker * 7 + dow) * 3 + shift.index()`.
    values: Vec<f64>,
}

impl CostTable {
    /// A table of `workers` rows with every cost zero.
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            values: vec![0.0; workers * DAYS_PER_WEEK * 3],
        }
    }

    /// Builds a table from `f(worker, day_of_week, shift)`.
    pub fn from_fn<F>(workers: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize, ShiftType) -> f64,
    {
        let mut values = Vec::with_capacity(workers * DAYS_PER_WEEK * 3);
        for worker in 0..workers {
            for dow in 0..DAYS_PER_WEEK {
                for shift in ShiftType::WORK {
                    values.push(f(worker, dow, shift));
                }
            }
        }
        Self { workers, values }
    }

    /// Builds a table from values in cost-file order.
    ///
    /// # Errors
    ///
    /// [`RosterError::CostFile`] if fewer than `workers × 21` values are
    /// given or a value is negative or not finite.
    pub fn from_values(workers: usize, file_values: &[f64]) -> Result<Self> {
        let needed = workers * DAYS_PER_WEEK * 3;
        if file_values.len() < needed {
            return Err(RosterError::CostFile(format!(
                "expected {needed} values for {workers} workers, found {}",
                file_values.len()
            )));
        }
        if let Some((i, v)) = file_values[..needed]
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(RosterError::CostFile(format!(
                "value {} is invalid: {v}",
                i + 1
            )));
        }

        let mut table = Self::new(workers);
        for (i, &v) in file_values[..needed].iter().enumerate() {
            let (cell, k) = (i / 3, i % 3);
            let (worker, dow) = (cell / DAYS_PER_WEEK, cell % DAYS_PER_WEEK);
            table.set(worker, dow, FILE_SHIFT_ORDER[k], v);
        }
        Ok(table)
    }

    /// Parses the cost-file format.
    pub fn from_text(text: &str, workers: usize) -> Result<Self> {
        let values = text
            .split_whitespace()
            .enumerate()
            .map(|(i, token)| {
                token.parse::<f64>().map_err(|_| {
                    RosterError::CostFile(format!("value {} is not a number: {token:?}", i + 1))
                })
            })
            .take(workers * DAYS_PER_WEEK * 3)
            .collect::<Result<Vec<_>>>()?;
        Self::from_values(workers, &values)
    }

    /// Reads a cost file.
    pub fn load(path: impl AsRef<Path>, workers: usize) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_text(&text, workers)
    }

    /// Renders the cost-file format on a single line.
    pub fn to_text(&self) -> String {
        let mut parts = Vec::with_capacity(self.values.len());
        for worker in 0..self.workers {
            for dow in 0..DAYS_PER_WEEK {
                for shift in FILE_SHIFT_ORDER {
                    parts.push(self.get(worker, dow, shift).to_string());
                }
            }
        }
        let mut out = parts.join(" ");
        out.push('\n');
        out
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Cost of `worker` taking `shift` on weekday `dow`; 0 for off-duty.
    #[inline]
    pub fn get(&self, worker: usize, dow: usize, shift: ShiftType) -> f64 {
        if !shift.is_work() {
            return 0.0;
        }
        self.values[(worker * DAYS_PER_WEEK + dow) * 3 + shift.index()]
    }

    /// Sets one work-shift cost. Off-duty is ignored.
    pub fn set(&mut self, worker: usize, dow: usize, shift: ShiftType, value: f64) {
        if shift.is_work() {
            self.values[(worker * DAYS_PER_WEEK + dow) * 3 + shift.index()] = value;
        }
    }

    /// Cheapest work-shift cost for `worker` on weekday `dow`.
    pub fn cheapest(&self, worker: usize, dow: usize) -> f64 {
        ShiftType::WORK
            .into_iter()
            .map(|s| self.get(worker, dow, s))
            .fold(f64::INFINITY, f64::min)
    }
}

/// Scores schedules against a cost table over the configured horizon.
#[derive(Debug, Clone)]
pub struct CostModel {
    workers: usize,
    horizon: usize,
    table: CostTable,
}

impl CostModel {
    /// # Errors
    ///
    /// [`RosterError::Dimension`] if the table has fewer rows than the
    /// configuration has workers.
    pub fn new(config: &ConstraintConfig, table: CostTable) -> Result<Self> {
        if table.workers() < config.workers {
            return Err(RosterError::Dimension(format!(
                "cost table covers {} workers, configuration needs {}",
                table.workers(),
                config.workers
            )));
        }
        Ok(Self {
            workers: config.workers,
            horizon: config.horizon(),
            table,
        })
    }

    pub fn table(&self) -> &CostTable {
        &self.table
    }

    /// Total cost of the first `workers` rows over the horizon.
    pub fn cost(&self, schedule: &ScheduleModel) -> f64 {
        schedule
            .rows()
            .iter()
            .take(self.workers)
            .enumerate()
            .map(|(worker, row)| self.row_cost(worker, row))
            .sum()
    }

    /// Cost of one worker's row in `schedule`.
    pub fn worker_cost(&self, schedule: &ScheduleModel, worker: usize) -> f64 {
        self.row_cost(worker, schedule.row(worker))
    }

    /// Cost of `row` if it belonged to `worker`.
    pub fn row_cost(&self, worker: usize, row: &WorkerSchedule) -> f64 {
        row.slots()
            .iter()
            .take(self.horizon)
            .enumerate()
            .filter_map(|(day, slot)| {
                slot.shift()
                    .map(|s| self.table.get(worker, day % DAYS_PER_WEEK, s))
            })
            .sum()
    }
}
