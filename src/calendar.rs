//! Planning horizon and weekend layout.
//!
//! Day 0 is a Monday. The horizon is a whole number of weeks and is
//! interpreted cyclically by run and order analysis.

/// Days in one week.
pub const DAYS_PER_WEEK: usize = 7;

/// Offset of Saturday within a week (Monday = 0).
pub const SATURDAY_OFFSET: usize = 5;

/// A multi-week planning horizon.
///
/// # Examples
///
/// ```
/// use u_roster::calendar::ShiftCalendar;
///
/// let calendar = ShiftCalendar::new(3);
/// assert_eq!(calendar.horizon(), 21);
/// assert_eq!(calendar.saturdays().collect::<Vec<_>>(), vec![5, 12, 19]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShiftCalendar {
    weeks: usize,
}

impl ShiftCalendar {
    pub fn new(weeks: usize) -> Self {
        Self { weeks }
    }

    /// Number of scheduled days (`weeks × 7`).
    #[inline]
    pub fn horizon(&self) -> usize {
        self.weeks * DAYS_PER_WEEK
    }

    /// Saturday indices within the horizon.
    pub fn saturdays(&self) -> impl Iterator<Item = usize> {
        (0..self.weeks).map(|w| w * DAYS_PER_WEEK + SATURDAY_OFFSET)
    }

    /// `(saturday, sunday)` pairs within the horizon.
    pub fn weekends(&self) -> impl Iterator<Item = (usize, usize)> {
        self.saturdays().map(|sat| (sat, sat + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_and_weekends() {
        let cal = ShiftCalendar::new(2);
        assert_eq!(cal.horizon(), 14);
        assert_eq!(cal.weekends().collect::<Vec<_>>(), vec![(5, 6), (12, 13)]);
    }

    #[test]
    fn test_empty_calendar() {
        let cal = ShiftCalendar::new(0);
        assert_eq!(cal.horizon(), 0);
        assert_eq!(cal.saturdays().count(), 0);
    }
}
