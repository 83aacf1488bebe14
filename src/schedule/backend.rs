// src/schedule/backend.rs

//! Pluggable solver backends.
//!
//! The [`Solver`](crate::schedule::Solver) talks to a `SolverBackend` instead
//! of a specific algorithm:
//!
//! - [`LpBackend`] formulates the schedule as a linear program and runs the
//!   simplex engine. This is the default.
//! - [`CriticalPathBackend`] walks the network in topological order. It gives
//!   the same starts and completion and serves as a cross-check.

use tracing::debug;

use crate::errors::Result;
use crate::schedule::budget::SolveBudget;
use crate::schedule::critical_path;
use crate::schedule::lp::formulate;
use crate::schedule::network::Network;
use crate::types::SolveMethod;

/// Start times (network order) and completion time from a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSolution {
    pub starts: Vec<f64>,
    pub completion: f64,
}

/// Trait abstracting how an earliest-start schedule is computed.
pub trait SolverBackend {
    fn method(&self) -> SolveMethod;

    /// Compute earliest starts for `network` within `budget`.
    ///
    /// Failures carry their status: infeasible, unbounded, or solver error.
    fn solve(&self, network: &Network, budget: &SolveBudget) -> Result<RawSolution>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LpBackend;

impl SolverBackend for LpBackend {
    fn method(&self) -> SolveMethod {
        SolveMethod::Lp
    }

    fn solve(&self, network: &Network, budget: &SolveBudget) -> Result<RawSolution> {
        // Zero-duration cycles are feasible as an LP; reject them up front.
        network.topological_order()?;
        let model = formulate(network);
        let solution = model.program.solve(budget)?;

        debug!(
            pivots = solution.iterations(),
            objective = solution.objective(),
            "lp backend finished"
        );

        Ok(RawSolution {
            starts: model.starts.iter().map(|&v| solution.value(v)).collect(),
            completion: solution.value(model.completion),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CriticalPathBackend;

impl SolverBackend for CriticalPathBackend {
    fn method(&self) -> SolveMethod {
        SolveMethod::CriticalPath
    }

    fn solve(&self, network: &Network, budget: &SolveBudget) -> Result<RawSolution> {
        budget.start().check_deadline()?;
        let (starts, completion) = critical_path::earliest_starts(network)?;
        Ok(RawSolution { starts, completion })
    }
}

/// Backend implementing `method`.
pub fn backend_for(method: SolveMethod) -> Box<dyn SolverBackend> {
    match method {
        SolveMethod::Lp => Box::new(LpBackend),
        SolveMethod::CriticalPath => Box::new(CriticalPathBackend),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{CritpathError, SolveStatus};

    fn zero_duration_cycle() -> Network {
        Network::new(
            vec!["A".into(), "B".into()],
            vec![0.0, 0.0],
            vec![vec![1], vec![0]],
            vec![0, 1],
        )
        .unwrap()
    }

    #[test]
    fn zero_duration_cycle_is_infeasible_for_every_backend() {
        let network = zero_duration_cycle();
        for method in [SolveMethod::Lp, SolveMethod::CriticalPath] {
            let err = backend_for(method)
                .solve(&network, &SolveBudget::default())
                .unwrap_err();
            assert!(matches!(err, CritpathError::Infeasible(_)), "{method}: {err:?}");
            assert_eq!(err.status(), Some(SolveStatus::Infeasible));
        }
    }

    #[test]
    fn backends_report_their_method() {
        assert_eq!(backend_for(SolveMethod::Lp).method(), SolveMethod::Lp);
        assert_eq!(
            backend_for(SolveMethod::CriticalPath).method(),
            SolveMethod::CriticalPath
        );
    }
}
