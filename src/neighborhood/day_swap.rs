//! Day swap: exchange two workers' cells on one day.

use super::{worker_scope, Feasibility, MoveGenerator};
use crate::config::ConstraintConfig;
use crate::schedule::ScheduleModel;

/// For every day and every pair of workers `i < j` holding different
/// cells, exchanges the two cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaySwap;

impl MoveGenerator for DaySwap {
    const GUARANTEE: Feasibility = Feasibility::Checked;

    fn name(&self) -> &'static str {
        "day_swap"
    }

    fn generate(
        &self,
        schedule: &ScheduleModel,
        config: &ConstraintConfig,
        out: &mut Vec<ScheduleModel>,
    ) {
        let workers = worker_scope(schedule, config);
        for day in 0..config.horizon() {
            for i in 0..workers {
                for j in (i + 1)..workers {
                    let (a, b) = (schedule.slot(i, day), schedule.slot(j, day));
                    if a == b {
                        continue;
                    }
                    out.push(schedule.with_slot(i, day, b).with_slot(j, day, a));
                }
            }
        }
    }
}
