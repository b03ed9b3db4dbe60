//! Variable Neighborhood Descent (VND).
//!
//! Best-improvement descent over an ordered list of neighborhoods: the
//! first neighborhood is searched until it yields no improving feasible
//! candidate, then the next one; any improvement restarts from the first.
//! The search ends at a schedule that no neighborhood can improve.
//!
//! # References
//!
//! Hansen, P. & Mladenović, N. (2001), "Variable neighborhood search:
//! Principles and applications", *EJOR* 130(3), 449-467.

mod config;
mod runner;

pub use config::VndConfig;
pub use runner::{PassRecord, VndResult, VndRunner};
