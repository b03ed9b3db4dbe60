//! Destroy-and-repair Large Neighborhood Search (LNS).
//!
//! Each iteration clears a few worker rows of the current schedule, asks a
//! [`RepairSolver`](crate::repair::RepairSolver) to complete them around
//! the pinned rows, and keeps the result only if it is feasible, leaves
//! the pinned rows untouched and is strictly cheaper. The current cost
//! never increases.
//!
//! # References
//!
//! Shaw, P. (1998), "Using Constraint Programming and Local Search Methods
//! to Solve Vehicle Routing Problems", *CP-98*, 417-431.

mod config;
mod runner;
mod types;

pub use config::LnsConfig;
pub use runner::{LnsResult, LnsRunner, LnsTrials};
pub use types::{Destroy, DestroyOperator};
