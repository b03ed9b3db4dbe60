//! Day change: reassign one work day to another work shift.

use super::{worker_scope, Feasibility, MoveGenerator};
use crate::config::ConstraintConfig;
use crate::schedule::ScheduleModel;
use crate::shift::{ShiftType, Slot};

/// Replaces a work shift on one day of one worker with each of the other
/// two work shifts. Off-duty cells are left alone, so the off-day quota
/// never moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayChange;

impl MoveGenerator for DayChange {
    const GUARANTEE: Feasibility = Feasibility::Checked;

    fn name(&self) -> &'static str {
        "day_change"
    }

    fn generate(
        &self,
        schedule: &ScheduleModel,
        config: &ConstraintConfig,
        out: &mut Vec<ScheduleModel>,
    ) {
        for worker in 0..worker_scope(schedule, config) {
            for day in 0..config.horizon() {
                let current = schedule.slot(worker, day).shift();
                let Some(current) = current.filter(|s| s.is_work()) else {
                    continue;
                };
                for shift in ShiftType::WORK {
                    if shift != current {
                        out.push(schedule.with_slot(worker, day, Slot::Assigned(shift)));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, small_config};
    use crate::validation::ConstraintValidator;

    #[test]
    fn test_two_moves_per_work_cell() {
        let config = ConstraintConfig::default().with_workers(1).with_weeks(1);
        let schedule = testing::schedule(&["MFFFFFF"]);
        let candidates = DayChange.candidates(&schedule, &config);
        assert_eq!(
            candidates,
            vec![
                testing::schedule(&["AFFFFFF"]),
                testing::schedule(&["NFFFFFF"]),
            ]
        );
    }

    #[test]
    fn test_single_feasible_move_on_small_fixture() {
        let config = small_config();
        let validator = ConstraintValidator::new(config);
        let neighbours = DayChange.neighbours(&testing::small_schedule(), &validator);
        assert_eq!(neighbours.len(), 1);
        assert_eq!(neighbours[0].row(2).to_string(), "FAAANNNFMMMMFF");
    }
}
