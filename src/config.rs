//! Labor-rule configuration.
//!
//! [`ConstraintConfig`] holds every scalar parameter of a rostering
//! instance. The default is the firefighter instance: 20 workers over three
//! weeks.
//!
//! # TOML
//!
//! ```
//! use u_roster::config::ConstraintConfig;
//!
//! let config = ConstraintConfig::from_toml_str(r#"
//!     workers = 6
//!     weeks = 2
//!     off_days = 4
//!
//!     [same_shift_run]
//!     min = 2
//!     max = 4
//!
//!     [work_run]
//!     min = 3
//!     max = 6
//!
//!     [off_run]
//!     min = 1
//!     max = 3
//!
//!     [staffing]
//!     morning = 1
//!     afternoon = 1
//!     night = 1
//! "#).unwrap();
//! assert_eq!(config.horizon(), 14);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calendar::ShiftCalendar;
use crate::error::{Result, RosterError};
use crate::shift::ShiftType;

/// Inclusive bounds on a run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunBounds {
    pub min: usize,
    pub max: usize,
}

impl RunBounds {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, length: usize) -> bool {
        length >= self.min && length <= self.max
    }
}

/// Minimum number of workers on each work shift, every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StaffingMinimums {
    #[serde(default)]
    pub morning: usize,
    #[serde(default)]
    pub afternoon: usize,
    #[serde(default)]
    pub night: usize,
}

impl StaffingMinimums {
    pub fn new(morning: usize, afternoon: usize, night: usize) -> Self {
        Self {
            morning,
            afternoon,
            night,
        }
    }

    /// Minimum for `shift`; always 0 for off-duty.
    pub fn get(&self, shift: ShiftType) -> usize {
        match shift {
            ShiftType::Morning => self.morning,
            ShiftType::Afternoon => self.afternoon,
            ShiftType::Night => self.night,
            ShiftType::OffDuty => 0,
        }
    }

    /// `(shift, minimum)` pairs in Morning, Afternoon, Night order.
    pub fn iter(&self) -> impl Iterator<Item = (ShiftType, usize)> + '_ {
        ShiftType::WORK.into_iter().map(move |s| (s, self.get(s)))
    }
}

/// Parameters of the labor rules.
///
/// # Examples
///
/// ```
/// use u_roster::config::{ConstraintConfig, StaffingMinimums};
///
/// let config = ConstraintConfig::default()
///     .with_workers(6)
///     .with_weeks(2)
///     .with_off_days(4)
///     .with_staffing(StaffingMinimums::new(1, 1, 1));
/// assert!(config.validate().is_ok());
/// assert_eq!(config.horizon(), 14);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintConfig {
    /// Number of workers (rows) that are scheduled.
    pub workers: usize,
    /// Horizon length in weeks.
    pub weeks: usize,
    /// Exact number of off-duty days per worker over the horizon.
    pub off_days: usize,
    /// Bounds on consecutive days of the same work shift.
    pub same_shift_run: RunBounds,
    /// Bounds on consecutive work days (any work shift).
    pub work_run: RunBounds,
    /// Bounds on consecutive off-duty days.
    pub off_run: RunBounds,
    /// Per-shift daily staffing minimums.
    #[serde(default)]
    pub staffing: StaffingMinimums,
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            workers: 20,
            weeks: 3,
            off_days: 7,
            same_shift_run: RunBounds::new(2, 4),
            work_run: RunBounds::new(3, 6),
            off_run: RunBounds::new(1, 3),
            staffing: StaffingMinimums::new(3, 4, 2),
        }
    }
}

impl ConstraintConfig {
    /// Loads a configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates a TOML configuration.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_workers(mut self, n: usize) -> Self {
        self.workers = n;
        self
    }

    pub fn with_weeks(mut self, n: usize) -> Self {
        self.weeks = n;
        self
    }

    pub fn with_off_days(mut self, n: usize) -> Self {
        self.off_days = n;
        self
    }

    pub fn with_same_shift_run(mut self, min: usize, max: usize) -> Self {
        self.same_shift_run = RunBounds::new(min, max);
        self
    }

    pub fn with_work_run(mut self, min: usize, max: usize) -> Self {
        self.work_run = RunBounds::new(min, max);
        self
    }

    pub fn with_off_run(mut self, min: usize, max: usize) -> Self {
        self.off_run = RunBounds::new(min, max);
        self
    }

    pub fn with_staffing(mut self, staffing: StaffingMinimums) -> Self {
        self.staffing = staffing;
        self
    }

    /// Number of scheduled days.
    #[inline]
    pub fn horizon(&self) -> usize {
        self.calendar().horizon()
    }

    pub fn calendar(&self) -> ShiftCalendar {
        ShiftCalendar::new(self.weeks)
    }

    /// Checks that the parameters are internally consistent.
    ///
    /// This does not prove the instance feasible; it rejects parameter sets
    /// that are meaningless (empty horizon, inverted bounds).
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(RosterError::Config("workers must be positive".into()));
        }
        if self.weeks == 0 {
            return Err(RosterError::Config("weeks must be positive".into()));
        }
        for (name, bounds) in [
            ("same_shift_run", self.same_shift_run),
            ("work_run", self.work_run),
            ("off_run", self.off_run),
        ] {
            if bounds.min == 0 || bounds.min > bounds.max {
                return Err(RosterError::Config(format!(
                    "{name} bounds must satisfy 1 <= min <= max, got {}..{}",
                    bounds.min, bounds.max
                )));
            }
        }
        if self.off_days > self.horizon() {
            return Err(RosterError::Config(format!(
                "off_days ({}) exceeds the horizon ({} days)",
                self.off_days,
                self.horizon()
            )));
        }
        Ok(())
    }
}
