//! Neighborhood operators.
//!
//! Each operator enumerates the schedules reachable from a base schedule
//! by one structural move. Candidates are distinct and never equal to the
//! base. Whether a candidate built from a feasible base is itself feasible
//! is a property of the operator type ([`MoveGenerator::GUARANTEE`]):
//! operators with [`Feasibility::Checked`] filter their candidates through
//! the validator, operators with [`Feasibility::Preserved`] do not need to.
//!
//! [`Neighborhood`] is the closed set of operators used by the searches.
//!
//! | Operator | Move | Guarantee |
//! |----------|------|-----------|
//! | [`RowSwap`] | exchange two workers' rows | Preserved |
//! | [`DaySwap`] | exchange two workers' cells on one day | Checked |
//! | [`DayChange`] | change one work cell to another work shift | Checked |
//! | [`RunShift`] | move one end of a run by one day | Checked |
//! | [`Rotation`] | advance work shifts one step in the cycle | Checked |

mod day_change;
mod day_swap;
mod rotation;
mod row_swap;
mod run_shift;

pub use day_change::DayChange;
pub use day_swap::DaySwap;
pub use rotation::{Rotation, RotationScope};
pub use row_swap::RowSwap;
pub use run_shift::RunShift;

use std::collections::HashSet;

use crate::config::ConstraintConfig;
use crate::schedule::ScheduleModel;
use crate::validation::ConstraintValidator;

/// Whether a candidate is known to be feasible or must be validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feasibility {
    /// Feasible whenever the base schedule is.
    Preserved,
    /// Must be validated before it is scored.
    Checked,
}

/// A family of one-move perturbations.
pub trait MoveGenerator: Send + Sync {
    /// Feasibility of candidates generated from a feasible base.
    const GUARANTEE: Feasibility;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Appends every raw move of `schedule` to `out`.
    ///
    /// Only the first `config.workers` rows and `config.horizon()` days are
    /// touched. Raw moves may repeat or reproduce the base.
    fn generate(
        &self,
        schedule: &ScheduleModel,
        config: &ConstraintConfig,
        out: &mut Vec<ScheduleModel>,
    );

    /// Distinct candidates different from `schedule`, in generation order.
    fn candidates(
        &self,
        schedule: &ScheduleModel,
        config: &ConstraintConfig,
    ) -> Vec<ScheduleModel> {
        let mut raw = Vec::new();
        self.generate(schedule, config, &mut raw);
        distinct(schedule, raw)
    }

    /// Candidates that the searches may score directly.
    ///
    /// Checked operators drop candidates the validator rejects.
    fn neighbours(
        &self,
        schedule: &ScheduleModel,
        validator: &ConstraintValidator,
    ) -> Vec<ScheduleModel> {
        let candidates = self.candidates(schedule, validator.config());
        match Self::GUARANTEE {
            Feasibility::Preserved => candidates,
            Feasibility::Checked => candidates
                .into_iter()
                .filter(|c| validator.is_feasible(c))
                .collect(),
        }
    }
}

/// Marker for operators whose moves keep a feasible schedule feasible.
///
/// Implementors must declare [`Feasibility::Preserved`]; [`unchecked_neighbours`]
/// fails to compile for any that do not.
pub trait PreservesFeasibility: MoveGenerator {}

/// Candidates of a feasibility-preserving operator, without validation.
pub fn unchecked_neighbours<G: PreservesFeasibility>(
    op: &G,
    schedule: &ScheduleModel,
    config: &ConstraintConfig,
) -> Vec<ScheduleModel> {
    const { assert!(matches!(G::GUARANTEE, Feasibility::Preserved)) };
    op.candidates(schedule, config)
}

/// Drops duplicates and copies of `base`, keeping first occurrences.
fn distinct(base: &ScheduleModel, raw: Vec<ScheduleModel>) -> Vec<ScheduleModel> {
    let mut seen: HashSet<ScheduleModel> = HashSet::with_capacity(raw.len());
    let mut out = Vec::with_capacity(raw.len());
    for candidate in raw {
        if candidate != *base && seen.insert(candidate.clone()) {
            out.push(candidate);
        }
    }
    out
}

/// Number of rows an operator may touch.
fn worker_scope(schedule: &ScheduleModel, config: &ConstraintConfig) -> usize {
    config.workers.min(schedule.worker_count())
}

/// The operators available to the searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighborhood {
    RowSwap(RowSwap),
    DaySwap(DaySwap),
    DayChange(DayChange),
    RunShift(RunShift),
    Rotation(Rotation),
}

impl Neighborhood {
    /// Default descent order: row swap first, then the moves of growing
    /// reach.
    pub fn standard() -> Vec<Neighborhood> {
        vec![
            Neighborhood::RowSwap(RowSwap),
            Neighborhood::DayChange(DayChange),
            Neighborhood::RunShift(RunShift),
            Neighborhood::DaySwap(DaySwap),
            Neighborhood::Rotation(Rotation::each_worker()),
            Neighborhood::Rotation(Rotation::all_workers()),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Neighborhood::RowSwap(op) => op.name(),
            Neighborhood::DaySwap(op) => op.name(),
            Neighborhood::DayChange(op) => op.name(),
            Neighborhood::RunShift(op) => op.name(),
            Neighborhood::Rotation(op) => op.name(),
        }
    }

    pub fn guarantee(&self) -> Feasibility {
        match self {
            Neighborhood::RowSwap(_) => RowSwap::GUARANTEE,
            Neighborhood::DaySwap(_) => DaySwap::GUARANTEE,
            Neighborhood::DayChange(_) => DayChange::GUARANTEE,
            Neighborhood::RunShift(_) => RunShift::GUARANTEE,
            Neighborhood::Rotation(_) => Rotation::GUARANTEE,
        }
    }

    pub fn candidates(
        &self,
        schedule: &ScheduleModel,
        config: &ConstraintConfig,
    ) -> Vec<ScheduleModel> {
        match self {
            Neighborhood::RowSwap(op) => op.candidates(schedule, config),
            Neighborhood::DaySwap(op) => op.candidates(schedule, config),
            Neighborhood::DayChange(op) => op.candidates(schedule, config),
            Neighborhood::RunShift(op) => op.candidates(schedule, config),
            Neighborhood::Rotation(op) => op.candidates(schedule, config),
        }
    }

    pub fn neighbours(
        &self,
        schedule: &ScheduleModel,
        validator: &ConstraintValidator,
    ) -> Vec<ScheduleModel> {
        match self {
            Neighborhood::RowSwap(op) => {
                unchecked_neighbours(op, schedule, validator.config())
            }
            Neighborhood::DaySwap(op) => op.neighbours(schedule, validator),
            Neighborhood::DayChange(op) => op.neighbours(schedule, validator),
            Neighborhood::RunShift(op) => op.neighbours(schedule, validator),
            Neighborhood::Rotation(op) => op.neighbours(schedule, validator),
        }
    }
}
