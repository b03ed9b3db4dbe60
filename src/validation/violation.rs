//! Constraint identifiers and violation reports.

use std::fmt;

use thiserror::Error;

use crate::shift::ShiftType;

/// Labor rules, in the order the validator checks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintId {
    /// C0: worker count and row lengths.
    Shape,
    /// C1: every cell holds a shift.
    Alphabet,
    /// C2: exact off-day quota.
    OffQuota,
    /// C3: same-shift run bounds.
    SameShiftRun,
    /// C4: work run bounds.
    WorkRun,
    /// C5: off run bounds.
    OffRun,
    /// C6: at least one full weekend off.
    WeekendOff,
    /// C7: daily staffing minimums.
    Staffing,
    /// C8: cyclic shift order.
    ShiftOrder,
}

impl ConstraintId {
    /// All constraints in check order.
    pub const ALL: [ConstraintId; 9] = [
        ConstraintId::Shape,
        ConstraintId::Alphabet,
        ConstraintId::OffQuota,
        ConstraintId::SameShiftRun,
        ConstraintId::WorkRun,
        ConstraintId::OffRun,
        ConstraintId::WeekendOff,
        ConstraintId::Staffing,
        ConstraintId::ShiftOrder,
    ];

    /// Position in check order (`C0` is 0).
    pub fn number(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.number())
    }
}

/// The label set a run-bound violation was measured over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunClass {
    SameShift(ShiftType),
    Work,
    OffDuty,
}

impl fmt::Display for RunClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunClass::SameShift(s) => write!(f, "{s} run"),
            RunClass::Work => f.write_str("work run"),
            RunClass::OffDuty => f.write_str("off run"),
        }
    }
}

/// The first labor rule a schedule breaks.
///
/// A violation is ordinary data: it is the infeasibility verdict of
/// [`ConstraintValidator::validate`](super::ConstraintValidator::validate),
/// not a failure of the program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// Too few rows (`worker` is `None`) or a row shorter than the horizon.
    #[error("{}", shape_message(.worker, .expected, .found))]
    Shape {
        worker: Option<usize>,
        expected: usize,
        found: usize,
    },

    #[error("worker {worker} has no shift on day {day}")]
    Alphabet { worker: usize, day: usize },

    #[error("worker {worker} has {found} off days, expected {expected}")]
    Quota {
        worker: usize,
        expected: usize,
        found: usize,
    },

    #[error("worker {worker}: {class} of {length} days starting on day {start} is outside [{min}, {max}]")]
    RunBound {
        class: RunClass,
        worker: usize,
        start: usize,
        length: usize,
        min: usize,
        max: usize,
    },

    #[error("worker {worker} has no full weekend off")]
    Weekend { worker: usize },

    #[error("only {found} workers on shift {shift} on day {day}, {required} required")]
    Staffing {
        shift: ShiftType,
        day: usize,
        required: usize,
        found: usize,
    },

    #[error(
        "wrong shift order for worker {worker} on day {day} ({previous} -> {next}{})",
        gap_suffix(.across_gap)
    )]
    Order {
        worker: usize,
        day: usize,
        previous: ShiftType,
        next: ShiftType,
        across_gap: bool,
    },
}

fn shape_message(worker: &Option<usize>, expected: &usize, found: &usize) -> String {
    match worker {
        None => format!("expected at least {expected} workers, found {found}"),
        Some(w) => format!("worker {w} has {found} days, expected at least {expected}"),
    }
}

fn gap_suffix(across_gap: &bool) -> &'static str {
    if *across_gap {
        " across off days"
    } else {
        ""
    }
}

impl Violation {
    /// The constraint this violation breaks.
    pub fn constraint(&self) -> ConstraintId {
        match self {
            Violation::Shape { .. } => ConstraintId::Shape,
            Violation::Alphabet { .. } => ConstraintId::Alphabet,
            Violation::Quota { .. } => ConstraintId::OffQuota,
            Violation::RunBound { class, .. } => match class {
                RunClass::SameShift(_) => ConstraintId::SameShiftRun,
                RunClass::Work => ConstraintId::WorkRun,
                RunClass::OffDuty => ConstraintId::OffRun,
            },
            Violation::Weekend { .. } => ConstraintId::WeekendOff,
            Violation::Staffing { .. } => ConstraintId::Staffing,
            Violation::Order { .. } => ConstraintId::ShiftOrder,
        }
    }

    /// The offending worker, if the violation concerns a single row.
    pub fn worker(&self) -> Option<usize> {
        match *self {
            Violation::Shape { worker, .. } => worker,
            Violation::Alphabet { worker, .. }
            | Violation::Quota { worker, .. }
            | Violation::RunBound { worker, .. }
            | Violation::Weekend { worker }
            | Violation::Order { worker, .. } => Some(worker),
            Violation::Staffing { .. } => None,
        }
    }

    /// The offending day (run start for run bounds), if any.
    pub fn day(&self) -> Option<usize> {
        match *self {
            Violation::Alphabet { day, .. }
            | Violation::Staffing { day, .. }
            | Violation::Order { day, .. } => Some(day),
            Violation::RunBound { start, .. } => Some(start),
            Violation::Shape { .. } | Violation::Quota { .. } | Violation::Weekend { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_numbering() {
        for (i, id) in ConstraintId::ALL.iter().enumerate() {
            assert_eq!(id.number(), i);
        }
        assert_eq!(ConstraintId::ShiftOrder.to_string(), "C8");
    }

    #[test]
    fn test_run_bound_maps_to_class_constraint() {
        let v = |class| Violation::RunBound {
            class,
            worker: 1,
            start: 4,
            length: 5,
            min: 2,
            max: 4,
        };
        assert_eq!(
            v(RunClass::SameShift(ShiftType::Night)).constraint(),
            ConstraintId::SameShiftRun
        );
        assert_eq!(v(RunClass::Work).constraint(), ConstraintId::WorkRun);
        assert_eq!(v(RunClass::OffDuty).constraint(), ConstraintId::OffRun);
        assert_eq!(v(RunClass::Work).day(), Some(4));
        assert_eq!(v(RunClass::Work).worker(), Some(1));
    }

    #[test]
    fn test_display() {
        let shape = Violation::Shape {
            worker: None,
            expected: 20,
            found: 19,
        };
        assert_eq!(shape.to_string(), "expected at least 20 workers, found 19");

        let order = Violation::Order {
            worker: 2,
            day: 8,
            previous: ShiftType::Night,
            next: ShiftType::Night,
            across_gap: true,
        };
        assert_eq!(
            order.to_string(),
            "wrong shift order for worker 2 on day 8 (N -> N across off days)"
        );
        assert_eq!(order.worker(), Some(2));

        let staffing = Violation::Staffing {
            shift: ShiftType::Morning,
            day: 3,
            required: 3,
            found: 2,
        };
        assert_eq!(staffing.worker(), None);
        assert_eq!(staffing.constraint(), ConstraintId::Staffing);
    }
}
