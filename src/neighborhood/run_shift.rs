//! Run shift: grow or shrink a run by one day at either end.

use super::{worker_scope, Feasibility, MoveGenerator};
use crate::config::ConstraintConfig;
use crate::schedule::ScheduleModel;
use crate::shift::{ShiftSet, ShiftType, Slot};

/// For every cyclic run of a single label (each work shift and off-duty),
/// emits four moves:
///
/// 1. extend left: the day before the run takes the run's label,
/// 2. extend right: the day after the run takes the run's label,
/// 3. contract left: the first day takes the label of the day before,
/// 4. contract right: the last day takes the label of the day after.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunShift;

impl MoveGenerator for RunShift {
    const GUARANTEE: Feasibility = Feasibility::Checked;

    fn name(&self) -> &'static str {
        "run_shift"
    }

    fn generate(
        &self,
        schedule: &ScheduleModel,
        config: &ConstraintConfig,
        out: &mut Vec<ScheduleModel>,
    ) {
        let horizon = config.horizon();
        for worker in 0..worker_scope(schedule, config) {
            let row = schedule.row(worker);
            for label in ShiftType::ALL {
                let slot = Slot::Assigned(label);
                for run in row.runs(horizon, ShiftSet::only(label)) {
                    let (before, after) = (run.before(horizon), run.after(horizon));
                    out.push(schedule.with_slot(worker, before, slot));
                    out.push(schedule.with_slot(worker, after, slot));
                    out.push(schedule.with_slot(worker, run.start, row.slot(before)));
                    out.push(schedule.with_slot(worker, run.last(horizon), row.slot(after)));
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
    fn test_moves_of_one_run() {
        let config = ConstraintConfig::default().with_workers(1).with_weeks(1);
        let schedule = testing::schedule(&["FMMAAFF"]);
        let rows: Vec<String> = RunShift
            .candidates(&schedule, &config)
            .iter()
            .map(|c| c.row(0).to_string())
            .collect();
        // Morning run, then Afternoon; every move of the wrapping off run
        // repeats an earlier one.
        assert_eq!(
            rows,
            vec!["MMMAAFF", "FMMMAFF", "FFMAAFF", "FMAAAFF", "FMMAAAF", "FMMAFFF"]
        );
    }

    #[test]
    fn test_wrapping_run_moves_across_horizon_end() {
        let config = ConstraintConfig::default().with_workers(1).with_weeks(1);
        let schedule = testing::schedule(&["NMMAAFN"]);
        let candidates = RunShift.candidates(&schedule, &config);
        // Extending the night run (days 6, 0) to the left sets day 5.
        assert!(candidates.contains(&testing::schedule(&["NMMAANN"])));
        // Contracting it on the right sets day 0 to the following Morning.
        assert!(candidates.contains(&testing::schedule(&["MMMAAFN"])));
    }

    #[test]
    fn test_single_feasible_move_on_small_fixture() {
        let validator = ConstraintValidator::new(small_config());
        let neighbours = RunShift.neighbours(&testing::small_schedule(), &validator);
        assert_eq!(neighbours.len(), 1);
        assert_eq!(neighbours[0].row(2).to_string(), "FAAANNNFMMMMFF");
    }
}
