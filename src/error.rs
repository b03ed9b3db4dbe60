//! Error types for loading and configuring roster problems.
//!
//! Only conditions that make a run meaningless live here: unreadable or
//! malformed files, dimension mismatches and inconsistent configuration.
//! Infeasible schedules are ordinary data, reported as [`Violation`];
//! a search refuses to start from one ([`SearchError`]).

use thiserror::Error;

use crate::validation::Violation;

/// Fatal error raised at the boundary of the crate (loading, configuration).
#[derive(Debug, Error)]
pub enum RosterError {
    /// Underlying I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A schedule file contains a character that is not a shift code.
    #[error("line {line}, column {column}: unexpected shift code {found:?}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        column: usize,
        /// The offending character.
        found: char,
    },

    /// Data does not match the dimensions of the problem.
    #[error("dimension mismatch: {0}")]
    Dimension(String),

    /// A cost file is truncated or contains an invalid value.
    #[error("cost file: {0}")]
    CostFile(String),

    /// Constraint configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// TOML configuration could not be parsed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;

/// Why a search could not run or could not persist its progress.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Searches start from a feasible schedule.
    #[error("initial schedule is infeasible: {0}")]
    InfeasibleStart(#[from] Violation),

    /// The checkpoint sink failed to store an improvement.
    #[error("checkpoint failed: {0}")]
    Checkpoint(#[from] RosterError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = RosterError::Parse {
            line: 3,
            column: 7,
            found: 'X',
        };
        assert_eq!(err.to_string(), "line 3, column 7: unexpected shift code 'X'");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: RosterError = io.into();
        assert!(matches!(err, RosterError::Io(_)));
    }

    #[test]
    fn test_search_error_wraps_sources() {
        let err: SearchError = Violation::Weekend { worker: 4 }.into();
        assert_eq!(
            err.to_string(),
            "initial schedule is infeasible: worker 4 has no full weekend off"
        );
        let err: SearchError = RosterError::Config("bad".into()).into();
        assert!(matches!(err, SearchError::Checkpoint(_)));
    }
}
