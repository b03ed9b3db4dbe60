//! Shift labels, schedule cells and label sets.
//!
//! Work shifts follow the cyclic order Morning → Afternoon → Night →
//! Morning. Off-duty is not part of the cycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The label of one worker on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    Morning,
    Afternoon,
    Night,
    OffDuty,
}

impl ShiftType {
    /// All labels, work shifts first.
    pub const ALL: [ShiftType; 4] = [
        ShiftType::Morning,
        ShiftType::Afternoon,
        ShiftType::Night,
        ShiftType::OffDuty,
    ];

    /// Work shifts in cycle order.
    pub const WORK: [ShiftType; 3] = [ShiftType::Morning, ShiftType::Afternoon, ShiftType::Night];

    /// Whether this is a work shift (not off-duty).
    #[inline]
    pub fn is_work(self) -> bool {
        !matches!(self, ShiftType::OffDuty)
    }

    /// Next work shift in the cycle. Off-duty maps to itself.
    #[inline]
    pub fn successor(self) -> ShiftType {
        match self {
            ShiftType::Morning => ShiftType::Afternoon,
            ShiftType::Afternoon => ShiftType::Night,
            ShiftType::Night => ShiftType::Morning,
            ShiftType::OffDuty => ShiftType::OffDuty,
        }
    }

    /// Dense index: Morning 0, Afternoon 1, Night 2, OffDuty 3.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            ShiftType::Morning => 0,
            ShiftType::Afternoon => 1,
            ShiftType::Night => 2,
            ShiftType::OffDuty => 3,
        }
    }

    /// Single-character code used in schedule files.
    pub fn code(self) -> char {
        match self {
            ShiftType::Morning => 'M',
            ShiftType::Afternoon => 'A',
            ShiftType::Night => 'N',
            ShiftType::OffDuty => 'F',
        }
    }

    /// Parses a schedule-file code.
    pub fn from_code(c: char) -> Option<ShiftType> {
        match c {
            'M' => Some(ShiftType::Morning),
            'A' => Some(ShiftType::Afternoon),
            'N' => Some(ShiftType::Night),
            'F' => Some(ShiftType::OffDuty),
            _ => None,
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One cell of a schedule.
///
/// `Unassigned` marks a cell whose value is unknown (e.g. a row cleared by
/// a destroy operator). It is distinct from every shift, never belongs to a
/// [`ShiftSet`], and makes a schedule infeasible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slot {
    Assigned(ShiftType),
    #[default]
    Unassigned,
}

impl Slot {
    /// Code written for unassigned cells.
    pub const UNASSIGNED_CODE: char = '.';

    /// The assigned shift, if any.
    #[inline]
    pub fn shift(self) -> Option<ShiftType> {
        match self {
            Slot::Assigned(s) => Some(s),
            Slot::Unassigned => None,
        }
    }

    #[inline]
    pub fn is_assigned(self) -> bool {
        matches!(self, Slot::Assigned(_))
    }

    /// Whether the cell holds a work shift.
    #[inline]
    pub fn is_work(self) -> bool {
        self.shift().is_some_and(ShiftType::is_work)
    }

    #[inline]
    pub fn is(self, shift: ShiftType) -> bool {
        self == Slot::Assigned(shift)
    }

    pub fn code(self) -> char {
        match self {
            Slot::Assigned(s) => s.code(),
            Slot::Unassigned => Self::UNASSIGNED_CODE,
        }
    }

    /// Parses a cell code, accepting the unassigned marker.
    pub fn from_code(c: char) -> Option<Slot> {
        if c == Self::UNASSIGNED_CODE {
            return Some(Slot::Unassigned);
        }
        ShiftType::from_code(c).map(Slot::Assigned)
    }
}

impl From<ShiftType> for Slot {
    fn from(shift: ShiftType) -> Self {
        Slot::Assigned(shift)
    }
}

/// A set of shift labels, used to select runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShiftSet(u8);

impl ShiftSet {
    pub const EMPTY: ShiftSet = ShiftSet(0);
    /// Morning, Afternoon and Night.
    pub const WORK: ShiftSet = ShiftSet(0b0111);
    /// Off-duty only.
    pub const OFF: ShiftSet = ShiftSet(0b1000);

    /// Set containing a single label.
    pub fn only(shift: ShiftType) -> ShiftSet {
        ShiftSet(shift.bit())
    }

    /// Returns a copy with `shift` added.
    pub fn with(self, shift: ShiftType) -> ShiftSet {
        ShiftSet(self.0 | shift.bit())
    }

    #[inline]
    pub fn contains(self, shift: ShiftType) -> bool {
        self.0 & shift.bit() != 0
    }

    /// Whether the cell's shift is in the set. Unassigned cells never are.
    #[inline]
    pub fn contains_slot(self, slot: Slot) -> bool {
        slot.shift().is_some_and(|s| self.contains(s))
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in [`ShiftType::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = ShiftType> {
        ShiftType::ALL.into_iter().filter(move |&s| self.contains(s))
    }
}

impl FromIterator<ShiftType> for ShiftSet {
    fn from_iter<I: IntoIterator<Item = ShiftType>>(iter: I) -> Self {
        iter.into_iter().fold(ShiftSet::EMPTY, ShiftSet::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successor_cycle() {
        assert_eq!(ShiftType::Morning.successor(), ShiftType::Afternoon);
        assert_eq!(ShiftType::Afternoon.successor(), ShiftType::Night);
        assert_eq!(ShiftType::Night.successor(), ShiftType::Morning);
        assert_eq!(ShiftType::OffDuty.successor(), ShiftType::OffDuty);
    }

    #[test]
    fn test_codes_round_trip() {
        for s in ShiftType::ALL {
            assert_eq!(ShiftType::from_code(s.code()), Some(s));
            assert_eq!(Slot::from_code(s.code()), Some(Slot::Assigned(s)));
        }
        assert_eq!(ShiftType::from_code('P'), None);
        assert_eq!(Slot::from_code('.'), Some(Slot::Unassigned));
        assert_eq!(Slot::Unassigned.code(), '.');
    }

    #[test]
    fn test_shift_set_membership() {
        assert!(ShiftSet::WORK.contains(ShiftType::Night));
        assert!(!ShiftSet::WORK.contains(ShiftType::OffDuty));
        assert!(ShiftSet::OFF.contains(ShiftType::OffDuty));
        assert!(!ShiftSet::WORK.contains_slot(Slot::Unassigned));
        assert!(!ShiftSet::OFF.contains_slot(Slot::Unassigned));

        let set: ShiftSet = [ShiftType::Morning, ShiftType::Night].into_iter().collect();
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![ShiftType::Morning, ShiftType::Night]
        );
        let built = ShiftSet::only(ShiftType::Morning)
            .with(ShiftType::Afternoon)
            .with(ShiftType::Night);
        assert_eq!(built, ShiftSet::WORK);
    }

    #[test]
    fn test_slot_work() {
        assert!(Slot::Assigned(ShiftType::Morning).is_work());
        assert!(!Slot::Assigned(ShiftType::OffDuty).is_work());
        assert!(!Slot::Unassigned.is_work());
        assert!(Slot::default() == Slot::Unassigned);
    }
}
