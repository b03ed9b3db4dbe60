//! Cyclic shift rostering.
//!
//! Builds and improves repeating rosters in which every worker follows a
//! row of Morning, Afternoon, Night and Off-duty labels over a horizon of
//! whole weeks:
//!
//! - **Validation**: labor rules C0-C8 (shape, labels, off-day quota,
//!   run-length bounds, weekends off, staffing minimums, forward shift
//!   rotation), evaluated cyclically.
//! - **Cost model**: additive per worker, weekday and shift.
//! - **Neighborhoods**: row swap, day swap, day change, run shift and
//!   rotation moves.
//! - **Variable Neighborhood Descent (VND)**: best-improvement descent over
//!   an ordered list of neighborhoods.
//! - **Large Neighborhood Search (LNS)**: destroy-and-repair around a
//!   pluggable [`RepairSolver`](repair::RepairSolver).
//! - **I/O**: schedule files, cost files, TOML configuration and
//!   checkpoint sinks.
//!
//! # Example
//!
//! ```no_run
//! use u_roster::config::ConstraintConfig;
//! use u_roster::cost::CostTable;
//! use u_roster::io::load_schedule;
//! use u_roster::neighborhood::Neighborhood;
//! use u_roster::problem::RosterProblem;
//! use u_roster::vnd::{VndConfig, VndRunner};
//!
//! let config = ConstraintConfig::from_toml_file("roster.toml")?;
//! let costs = CostTable::load("costs.txt", config.workers)?;
//! let problem = RosterProblem::new(config, costs)?;
//!
//! let start = load_schedule("start.sched")?;
//! let result = VndRunner::run(&problem, start, &Neighborhood::standard(), &VndConfig::default())?;
//! println!("cost {:.3} after {} steps", result.best_cost, result.steps);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Features
//!
//! - `parallel`: scores neighborhood candidates and LNS trials with rayon.

pub mod calendar;
pub mod config;
pub mod cost;
pub mod error;
pub mod io;
pub mod lns;
pub mod neighborhood;
pub mod problem;
pub mod repair;
pub mod runs;
pub mod schedule;
pub mod shift;
pub mod validation;
pub mod vnd;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Result, RosterError, SearchError};
pub use problem::RosterProblem;
pub use schedule::{ScheduleModel, WorkerSchedule};
pub use shift::{ShiftType, Slot};
