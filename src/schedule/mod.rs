// src/schedule/mod.rs

//! Schedule computation.
//!
//! - [`network`] resolves one scenario of a project into an index-based
//!   precedence network.
//! - [`lp`] formulates the earliest-start schedule as a linear program and
//!   solves it.
//! - [`critical_path`] computes the same schedule by longest-path traversal.
//! - [`backend`] puts both behind the [`SolverBackend`] trait.
//! - [`solution`] holds the solved [`Schedule`] and its slack analysis.
//! - [`solver`] is the entry point: scenario name in, schedule out.

pub mod backend;
pub mod budget;
pub mod critical_path;
pub mod lp;
pub mod network;
pub mod solution;
pub mod solver;

pub use backend::{backend_for, CriticalPathBackend, LpBackend, RawSolution, SolverBackend};
pub use budget::SolveBudget;
pub use network::Network;
pub use solution::{AggregateSpan, Schedule, StartTimes};
pub use solver::{SolveOptions, Solver};
