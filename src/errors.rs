// src/errors.rs

//! Crate-wide error type and the solver status it maps onto.

use std::fmt;

use thiserror::Error;

/// Terminal status of a single solve.
///
/// Every failed solve maps onto one of the non-`Optimal` variants through
/// [`CritpathError::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
    SolverError,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Optimal => "Optimal",
            SolveStatus::Infeasible => "Infeasible",
            SolveStatus::Unbounded => "Unbounded",
            SolveStatus::SolverError => "Solver error",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug)]
pub enum CritpathError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Infeasible schedule: {0}")]
    Infeasible(String),

    #[error("Unbounded schedule: {0}")]
    Unbounded(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CritpathError {
    /// Solver status carried by this error, if it came out of a solve.
    ///
    /// Configuration and IO problems are detected before any solve starts
    /// and therefore have no status.
    pub fn status(&self) -> Option<SolveStatus> {
        match self {
            CritpathError::Infeasible(_) => Some(SolveStatus::Infeasible),
            CritpathError::Unbounded(_) => Some(SolveStatus::Unbounded),
            CritpathError::Solver(_) => Some(SolveStatus::SolverError),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CritpathError>;
