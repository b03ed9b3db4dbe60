//! Repair oracle for destroy-and-repair search.
//!
//! A [`RepairSolver`] receives a partial schedule whose free rows are
//! (partly) unassigned and returns a complete feasible schedule that keeps
//! the pinned rows. The search loop only depends on the trait;
//! [`DepthFirstRepair`] is a bounded branch-and-bound implementation that
//! is exact on small neighbourhoods.

mod solver;
mod types;

pub use solver::{DepthFirstConfig, DepthFirstRepair, RepairSolver};
pub use types::{RepairError, RepairOutcome, RepairRequest, RepairStatus};
