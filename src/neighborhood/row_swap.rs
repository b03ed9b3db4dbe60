//! Row swap: exchange the full rows of two workers.

use super::{worker_scope, Feasibility, MoveGenerator, PreservesFeasibility};
use crate::config::ConstraintConfig;
use crate::schedule::ScheduleModel;

/// Exchanges the rows of workers `i < j`.
///
/// Every rule except staffing is evaluated row by row, and staffing counts
/// are unchanged by a permutation of rows, so a swap of a feasible schedule
/// is feasible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowSwap;

impl MoveGenerator for RowSwap {
    const GUARANTEE: Feasibility = Feasibility::Preserved;

    fn name(&self) -> &'static str {
        "row_swap"
    }

    fn generate(
        &self,
        schedule: &ScheduleModel,
        config: &ConstraintConfig,
        out: &mut Vec<ScheduleModel>,
    ) {
        let workers = worker_scope(schedule, config);
        for i in 0..workers {
            for j in (i + 1)..workers {
                out.push(schedule.with_rows_swapped(i, j));
            }
        }
    }
}

impl PreservesFeasibility for RowSwap {}
