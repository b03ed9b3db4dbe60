//! Shared fixtures for unit tests.

use crate::config::{ConstraintConfig, StaffingMinimums};
use crate::cost::CostTable;
use crate::schedule::ScheduleModel;
use crate::shift::ShiftType;

/// Feasible 20 × 21 roster under the default configuration.
pub(crate) const FIREFIGHTER_SCHEDULE: &str = include_str!("../data/firefighter.sched");

/// Feasible 6 × 14 roster under [`small_config`].
pub(crate) const SMALL_SCHEDULE: &str = include_str!("../data/small.sched");

/// Six workers over two weeks, one worker per shift per day.
pub(crate) fn small_config() -> ConstraintConfig {
    ConstraintConfig::default()
        .with_workers(6)
        .with_weeks(2)
        .with_off_days(4)
        .with_staffing(StaffingMinimums::new(1, 1, 1))
}

pub(crate) fn firefighter_schedule() -> ScheduleModel {
    ScheduleModel::from_text(FIREFIGHTER_SCHEDULE).unwrap()
}

pub(crate) fn small_schedule() -> ScheduleModel {
    ScheduleModel::from_text(SMALL_SCHEDULE).unwrap()
}

/// Parses a schedule from row literals.
pub(crate) fn schedule(rows: &[&str]) -> ScheduleModel {
    ScheduleModel::from_lines(rows).unwrap()
}

/// Small fixture with row `worker` replaced.
pub(crate) fn small_with_row(worker: usize, row: &str) -> ScheduleModel {
    let base = small_schedule();
    let lines: Vec<String> = base
        .rows()
        .iter()
        .enumerate()
        .map(|(w, r)| if w == worker { row.to_string() } else { r.to_string() })
        .collect();
    ScheduleModel::from_lines(lines).unwrap()
}

/// Costs of 0.1 for every work shift except worker 2, who costs 0.5 and
/// 0.9 for a Thursday night.
pub(crate) fn small_costs() -> CostTable {
    CostTable::from_fn(6, |worker, dow, shift| {
        if worker != 2 {
            0.1
        } else if dow == 3 && shift == ShiftType::Night {
            0.9
        } else {
            0.5
        }
    })
}

/// Deterministic pseudo-random costs in `[0, 1)` for `workers` rows.
pub(crate) fn hashed_costs(workers: usize) -> CostTable {
    CostTable::from_fn(workers, |worker, dow, shift| {
        let key = (worker * 7 + dow) * 3 + shift.index();
        let mixed = (key as u64)
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            .rotate_left(17)
            .wrapping_mul(0xBF58_476D_1CE4_E5B9);
        (mixed >> 11) as f64 / (1u64 << 53) as f64
    })
}
