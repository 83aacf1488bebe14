// src/schedule/budget.rs

//! Resource limits for a single solve.

use std::time::{Duration, Instant};

use crate::errors::{CritpathError, Result};

/// Default cap on simplex pivots. Far above what a small project needs.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Limits applied to one solve invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveBudget {
    /// Wall-clock budget; `None` means no time limit.
    pub time_limit: Option<Duration>,
    /// Maximum number of engine steps (simplex pivots).
    pub max_iterations: usize,
}

impl Default for SolveBudget {
    fn default() -> Self {
        Self {
            time_limit: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolveBudget {
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Start the clock for one solve.
    pub fn start(&self) -> BudgetClock {
        let started = Instant::now();
        BudgetClock {
            started,
            deadline: self.time_limit.map(|limit| started + limit),
            limit: self.time_limit,
            max_iterations: self.max_iterations,
            iterations: 0,
        }
    }
}

/// Running clock created by [`SolveBudget::start`].
#[derive(Debug)]
pub struct BudgetClock {
    started: Instant,
    deadline: Option<Instant>,
    limit: Option<Duration>,
    max_iterations: usize,
    iterations: usize,
}

impl BudgetClock {
    /// Check the time budget without counting a step.
    pub fn check_deadline(&self) -> Result<()> {
        if let (Some(deadline), Some(limit)) = (self.deadline, self.limit) {
            if Instant::now() >= deadline {
                return Err(CritpathError::Solver(format!(
                    "time budget of {:?} exceeded after {} steps",
                    limit, self.iterations
                )));
            }
        }
        Ok(())
    }

    /// Count one engine step and fail once either limit is exhausted.
    pub fn tick(&mut self) -> Result<()> {
        self.check_deadline()?;
        self.iterations += 1;
        if self.iterations > self.max_iterations {
            return Err(CritpathError::Solver(format!(
                "iteration limit of {} steps reached",
                self.max_iterations
            )));
        }
        Ok(())
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SolveStatus;

    #[test]
    fn zero_time_budget_fails_on_first_check() {
        let budget = SolveBudget::default().with_time_limit(Duration::ZERO);
        let mut clock = budget.start();
        let err = clock.tick().unwrap_err();
        assert_eq!(err.status(), Some(SolveStatus::SolverError));
        assert!(err.to_string().contains("time budget"));
    }

    #[test]
    fn iteration_cap_is_enforced() {
        let budget = SolveBudget {
            time_limit: None,
            max_iterations: 2,
        };
        let mut clock = budget.start();
        clock.tick().unwrap();
        clock.tick().unwrap();
        let err = clock.tick().unwrap_err();
        assert!(err.to_string().contains("iteration limit"));
    }
}
