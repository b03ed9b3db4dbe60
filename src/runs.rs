//! Cyclic run detection.
//!
//! A *run* is a maximal block of consecutive days whose labels belong to a
//! given set. Schedules repeat, so the day after the last day is day 0 and a
//! run may wrap across the end of the horizon.
//!
//! # Algorithm
//!
//! The sequence is scanned twice (`0..2n`, index taken modulo `n`).
//! Counting only starts after a day *outside* the set has been seen, so the
//! run already in progress at day 0 is never counted from its middle, and a
//! run is only recorded when a closing non-member is seen, so the run still
//! open at the end of the doubled scan is dropped. Every run of the cycle is
//! closed at least once during the scan; a run found again on the second
//! pass maps to the same start once reduced modulo `n`.
//!
//! If every day belongs to the set there is no boundary at all and no run
//! is reported.

use std::collections::BTreeMap;

use crate::shift::{ShiftSet, Slot};

/// A run of consecutive days, possibly wrapping past the horizon end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Run {
    /// First day of the run, in `[0, horizon)`.
    pub start: usize,
    /// Number of days in the run.
    pub length: usize,
}

impl Run {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Last day of the run, reduced modulo `horizon`.
    pub fn last(&self, horizon: usize) -> usize {
        (self.start + self.length - 1) % horizon
    }

    /// Day immediately before the run.
    pub fn before(&self, horizon: usize) -> usize {
        (self.start + horizon - 1) % horizon
    }

    /// Day immediately after the run.
    pub fn after(&self, horizon: usize) -> usize {
        (self.start + self.length) % horizon
    }

    /// Days covered by the run, in order.
    pub fn days(&self, horizon: usize) -> impl Iterator<Item = usize> {
        let start = self.start;
        (0..self.length).map(move |k| (start + k) % horizon)
    }
}

/// Detects the maximal cyclic runs of members in `sequence[..horizon]`.
///
/// Returns a map from run start (in `[0, horizon)`) to run length.
///
/// # Examples
///
/// ```
/// use u_roster::runs::detect_runs;
///
/// let seq: Vec<char> = "AAAXXAAAXA".chars().collect();
/// let runs = detect_runs(&seq, seq.len(), |&c| c == 'A');
/// assert_eq!(runs.into_iter().collect::<Vec<_>>(), vec![(5, 3), (9, 4)]);
/// ```
///
/// # Panics
///
/// Panics if `horizon > sequence.len()`.
pub fn detect_runs<T, F>(sequence: &[T], horizon: usize, mut is_member: F) -> BTreeMap<usize, usize>
where
    F: FnMut(&T) -> bool,
{
    assert!(
        horizon <= sequence.len(),
        "horizon {horizon} exceeds sequence length {}",
        sequence.len()
    );

    let mut runs = BTreeMap::new();
    let mut primed = false;
    let mut count = 0usize;

    for i in 0..2 * horizon {
        if is_member(&sequence[i % horizon]) {
            if primed {
                count += 1;
            }
        } else {
            primed = true;
            if count != 0 {
                runs.insert((i - count) % horizon, count);
            }
            count = 0;
        }
    }

    runs
}

/// Runs of cells whose shift is in `set`, ordered by start day.
pub fn shift_runs(row: &[Slot], horizon: usize, set: ShiftSet) -> Vec<Run> {
    detect_runs(row, horizon, |&slot| set.contains_slot(slot))
        .into_iter()
        .map(|(start, length)| Run::new(start, length))
        .collect()
}
