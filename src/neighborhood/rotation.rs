//! Rotation: advance work shifts one step along M → A → N → M.

use super::{worker_scope, Feasibility, MoveGenerator};
use crate::config::ConstraintConfig;
use crate::schedule::{ScheduleModel, WorkerSchedule};
use crate::shift::Slot;

/// Which rows a rotation move touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationScope {
    /// One candidate per worker, rotating that worker only.
    EachWorker,
    /// A single candidate rotating every worker.
    AllWorkers,
}

/// Replaces every work shift by its successor; off days stay in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    pub scope: RotationScope,
}

impl Rotation {
    pub fn each_worker() -> Self {
        Self {
            scope: RotationScope::EachWorker,
        }
    }

    pub fn all_workers() -> Self {
        Self {
            scope: RotationScope::AllWorkers,
        }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::each_worker()
    }
}

fn rotate(row: &WorkerSchedule, horizon: usize) -> WorkerSchedule {
    let mut slots = row.slots().to_vec();
    for slot in slots.iter_mut().take(horizon) {
        if let Slot::Assigned(shift) = *slot {
            *slot = Slot::Assigned(shift.successor());
        }
    }
    WorkerSchedule::new(slots)
}

impl MoveGenerator for Rotation {
    const GUARANTEE: Feasibility = Feasibility::Checked;

    fn name(&self) -> &'static str {
        match self.scope {
            RotationScope::EachWorker => "rotation",
            RotationScope::AllWorkers => "rotation_all",
        }
    }

    fn generate(
        &self,
        schedule: &ScheduleModel,
        config: &ConstraintConfig,
        out: &mut Vec<ScheduleModel>,
    ) {
        let horizon = config.horizon();
        let workers = worker_scope(schedule, config);
        match self.scope {
            RotationScope::EachWorker => {
                for worker in 0..workers {
                    out.push(schedule.with_row(worker, rotate(schedule.row(worker), horizon)));
                }
            }
            RotationScope::AllWorkers => {
                let mut rotated = schedule.clone();
                for worker in 0..workers {
                    rotated = rotated.with_row(worker, rotate(schedule.row(worker), horizon));
                }
                out.push(rotated);
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
    fn test_rotate_keeps_off_days() {
        let row = WorkerSchedule::parse("MAN.F").unwrap();
        assert_eq!(rotate(&row, 5).to_string(), "ANM.F");
    }

    #[test]
    fn test_all_workers_rotation_is_feasible_on_small_fixture() {
        let validator = ConstraintValidator::new(small_config());
        let schedule = testing::small_schedule();

        assert!(Rotation::each_worker()
            .neighbours(&schedule, &validator)
            .is_empty());

        let rotated = Rotation::all_workers().neighbours(&schedule, &validator);
        assert_eq!(rotated.len(), 1);
        assert_eq!(
            rotated[0],
            testing::schedule(&[
                "MMMFAAAAFNNNFF",
                "AAAFNNNNFMMMFF",
                "FNNMMMMFAAAAFF",
                "NFMMMFFAAAFNNN",
                "FAAAAFFNNNFMMM",
                "AFNNNFFMMMFAAA",
            ])
        );
    }

    #[test]
    fn test_three_rotations_are_identity() {
        let config = small_config();
        let schedule = testing::small_schedule();
        let mut current = schedule.clone();
        for _ in 0..3 {
            current = Rotation::all_workers().candidates(&current, &config).remove(0);
        }
        assert_eq!(current, schedule);
    }
}
