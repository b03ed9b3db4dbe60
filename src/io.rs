//! Schedule files and checkpoint sinks.
//!
//! Searches never look for "the last saved file". The current solution is
//! threaded through the loop and every adopted improvement is handed to a
//! [`Checkpoint`].

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::schedule::ScheduleModel;

/// File extension of schedule files.
pub const SCHEDULE_EXTENSION: &str = "sched";

/// Reads a schedule file.
pub fn load_schedule(path: impl AsRef<Path>) -> Result<ScheduleModel> {
    let text = fs::read_to_string(path)?;
    ScheduleModel::from_text(&text)
}

/// Writes a schedule file, one line per worker.
pub fn save_schedule(path: impl AsRef<Path>, schedule: &ScheduleModel) -> Result<()> {
    fs::write(path, schedule.to_text())?;
    Ok(())
}

/// Receives every improvement a search adopts.
pub trait Checkpoint {
    fn save(&mut self, schedule: &ScheduleModel, cost: f64) -> Result<()>;
}

/// Discards every checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCheckpoint;

impl Checkpoint for NoCheckpoint {
    fn save(&mut self, _schedule: &ScheduleModel, _cost: f64) -> Result<()> {
        Ok(())
    }
}

impl<F> Checkpoint for F
where
    F: FnMut(&ScheduleModel, f64) -> Result<()>,
{
    fn save(&mut self, schedule: &ScheduleModel, cost: f64) -> Result<()> {
        self(schedule, cost)
    }
}

/// Writes each checkpoint to `<dir>/<prefix><seq>.sched`, with a zero
/// padded sequence number that continues after existing files.
#[derive(Debug, Clone)]
pub struct DirectoryCheckpoint {
    dir: PathBuf,
    prefix: String,
    next: usize,
}

impl DirectoryCheckpoint {
    /// Creates `dir` if needed, using the prefix `"schedule-"`.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_prefix(dir, "schedule-")
    }

    pub fn with_prefix(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Result<Self> {
        let dir = dir.into();
        let prefix = prefix.into();
        fs::create_dir_all(&dir)?;
        let next = sequence_numbers(&dir, &prefix)?
            .into_iter()
            .max()
            .map_or(0, |n| n + 1);
        Ok(Self { dir, prefix, next })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the next checkpoint will be written to. Callers that resume
    /// from a checkpoint keep this path rather than searching the
    /// directory.
    pub fn next_path(&self) -> PathBuf {
        self.path_for(self.next)
    }

    fn path_for(&self, seq: usize) -> PathBuf {
        self.dir
            .join(format!("{}{seq:06}.{SCHEDULE_EXTENSION}", self.prefix))
    }
}

impl Checkpoint for DirectoryCheckpoint {
    fn save(&mut self, schedule: &ScheduleModel, _cost: f64) -> Result<()> {
        save_schedule(self.next_path(), schedule)?;
        self.next += 1;
        Ok(())
    }
}

fn sequence_numbers(dir: &Path, prefix: &str) -> Result<Vec<usize>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let seq = name
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(SCHEDULE_EXTENSION))
            .and_then(|rest| rest.strip_suffix('.'))
            .and_then(|digits| digits.parse::<usize>().ok());
        if let Some(seq) = seq {
            out.push(seq);
        }
    }
    Ok(out)
}
