//! Schedule representation.
//!
//! A [`ScheduleModel`] is an ordered list of [`WorkerSchedule`] rows. Rows
//! are immutable, reference-counted slices: every transform builds a new
//! model that shares the untouched rows with its source, so candidates
//! generated from one base schedule never alias mutable state.
//!
//! # Text format
//!
//! One line per worker, one character per day: `M`, `A`, `N`, `F`, or `.`
//! for an unassigned cell. Trailing `\r` is stripped and trailing blank
//! lines are ignored.

use std::fmt;
use std::sync::Arc;

use crate::error::{Result, RosterError};
use crate::runs::{shift_runs, Run};
use crate::shift::{ShiftSet, ShiftType, Slot};

/// The day-by-day assignment of one worker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkerSchedule {
    slots: Arc<[Slot]>,
}

impl WorkerSchedule {
    pub fn new(slots: Vec<Slot>) -> Self {
        Self {
            slots: slots.into(),
        }
    }

    /// A row of `len` unassigned cells.
    pub fn unassigned(len: usize) -> Self {
        Self::new(vec![Slot::Unassigned; len])
    }

    /// Parses one line of the text format.
    ///
    /// On failure returns the 0-based column and the offending character.
    pub fn parse(line: &str) -> std::result::Result<Self, (usize, char)> {
        line.chars()
            .enumerate()
            .map(|(col, c)| Slot::from_code(c).ok_or((col, c)))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Self::new)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Cell on `day`.
    ///
    /// # Panics
    ///
    /// Panics if `day` is out of range.
    #[inline]
    pub fn slot(&self, day: usize) -> Slot {
        self.slots[day]
    }

    /// Whether every cell is assigned.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| s.is_assigned())
    }

    /// Cyclic runs over `[0, horizon)` of cells whose shift is in `set`.
    pub fn runs(&self, horizon: usize, set: ShiftSet) -> Vec<Run> {
        shift_runs(&self.slots, horizon, set)
    }

    /// Copy with one cell replaced.
    pub fn with_slot(&self, day: usize, slot: Slot) -> Self {
        let mut slots = self.slots.to_vec();
        slots[day] = slot;
        Self::new(slots)
    }
}

impl fmt::Display for WorkerSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in self.slots.iter() {
            write!(f, "{}", slot.code())?;
        }
        Ok(())
    }
}

/// A complete or partial roster: one row per worker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ScheduleModel {
    rows: Vec<WorkerSchedule>,
}

impl ScheduleModel {
    pub fn new(rows: Vec<WorkerSchedule>) -> Self {
        Self { rows }
    }

    /// Parses a schedule from lines of text.
    ///
    /// # Errors
    ///
    /// [`RosterError::Parse`] on the first character that is not a cell code.
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rows = Vec::new();
        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref().trim_end_matches(['\r', '\n']);
            let row = WorkerSchedule::parse(line).map_err(|(col, found)| RosterError::Parse {
                line: idx + 1,
                column: col + 1,
                found,
            })?;
            rows.push(row);
        }
        Ok(Self::new(rows))
    }

    /// Parses the text format, ignoring trailing blank lines.
    pub fn from_text(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();
        let used = lines
            .iter()
            .rposition(|l| !l.trim_end_matches('\r').is_empty())
            .map_or(0, |last| last + 1);
        Self::from_lines(&lines[..used])
    }

    /// Renders the text format, one newline-terminated line per worker.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.rows.iter().map(|r| r.len() + 1).sum());
        for row in &self.rows {
            out.push_str(&row.to_string());
            out.push('\n');
        }
        out
    }

    #[inline]
    pub fn worker_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn rows(&self) -> &[WorkerSchedule] {
        &self.rows
    }

    #[inline]
    pub fn row(&self, worker: usize) -> &WorkerSchedule {
        &self.rows[worker]
    }

    #[inline]
    pub fn slot(&self, worker: usize, day: usize) -> Slot {
        self.rows[worker].slot(day)
    }

    /// Whether every cell of every row is assigned.
    pub fn is_complete(&self) -> bool {
        self.rows.iter().all(WorkerSchedule::is_complete)
    }

    /// Workers whose rows contain at least one unassigned cell.
    pub fn free_workers(&self) -> Vec<usize> {
        (0..self.rows.len())
            .filter(|&w| !self.rows[w].is_complete())
            .collect()
    }

    /// Number of workers among the first `workers` rows on `shift` on `day`.
    pub fn staffing(&self, workers: usize, day: usize, shift: ShiftType) -> usize {
        self.rows[..workers.min(self.rows.len())]
            .iter()
            .filter(|r| r.slot(day).is(shift))
            .count()
    }

    /// Copy with row `worker` replaced.
    pub fn with_row(&self, worker: usize, row: WorkerSchedule) -> Self {
        let mut rows = self.rows.clone();
        rows[worker] = row;
        Self::new(rows)
    }

    /// Copy with one cell replaced.
    pub fn with_slot(&self, worker: usize, day: usize, slot: Slot) -> Self {
        self.with_row(worker, self.rows[worker].with_slot(day, slot))
    }

    /// Copy with the rows of two workers exchanged.
    pub fn with_rows_swapped(&self, a: usize, b: usize) -> Self {
        let mut rows = self.rows.clone();
        rows.swap(a, b);
        Self::new(rows)
    }

    /// Copy where every listed worker's row is cleared to unassigned cells.
    ///
    /// Row lengths are kept, so the pinned rows remain valid context.
    pub fn with_workers_unassigned(&self, workers: &[usize]) -> Self {
        let mut rows = self.rows.clone();
        for &w in workers {
            rows[w] = WorkerSchedule::unassigned(rows[w].len());
        }
        Self::new(rows)
    }
}

impl fmt::Display for ScheduleModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl std::str::FromStr for ScheduleModel {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_text(s)
    }
}
