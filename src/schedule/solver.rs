// src/schedule/solver.rs

use std::time::Duration;

use tracing::{info, warn};

use crate::config::model::{Project, SolverSection};
use crate::errors::Result;
use crate::schedule::backend::backend_for;
use crate::schedule::budget::SolveBudget;
use crate::schedule::network::Network;
use crate::schedule::solution::Schedule;
use crate::types::SolveMethod;

/// Per-invocation solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolveOptions {
    pub method: SolveMethod,
    pub budget: SolveBudget,
}

impl SolveOptions {
    /// Options from a project's `[solver]` section.
    pub fn from_section(section: &SolverSection) -> Self {
        let mut budget = SolveBudget::default();
        budget.time_limit = section.time_limit_ms.map(Duration::from_millis);
        Self {
            method: section.method,
            budget,
        }
    }

    pub fn with_method(mut self, method: SolveMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.budget.time_limit = Some(limit);
        self
    }
}

/// Solves scenarios of an immutable project.
///
/// Each call to [`Solver::solve`] is independent: it resolves the scenario,
/// runs the configured backend once, and returns a fresh [`Schedule`].
#[derive(Debug, Clone)]
pub struct Solver<'a> {
    project: &'a Project,
    options: SolveOptions,
}

impl<'a> Solver<'a> {
    /// Solver using the project's own `[solver]` settings.
    pub fn new(project: &'a Project) -> Self {
        Self::with_options(project, SolveOptions::from_section(&project.solver))
    }

    pub fn with_options(project: &'a Project, options: SolveOptions) -> Self {
        Self { project, options }
    }

    pub fn options(&self) -> &SolveOptions {
        &self.options
    }

    /// Earliest-start schedule for `scenario`.
    ///
    /// Unknown scenarios and missing durations fail with a configuration
    /// error before anything is solved. Engine failures carry their status
    /// (see [`crate::errors::CritpathError::status`]).
    pub fn solve(&self, scenario: &str) -> Result<Schedule> {
        let network = Network::from_project(self.project, scenario)?;

        for &t in network.terminals() {
            if network.duration(t) == 0.0 {
                warn!(task = network.name(t), scenario, "terminal task has zero duration");
            }
        }

        info!(
            project = self.project.name(),
            scenario,
            method = %self.options.method,
            tasks = network.len(),
            "solving schedule"
        );

        let backend = backend_for(self.options.method);
        let raw = backend.solve(&network, &self.options.budget)?;
        let schedule = Schedule::from_solution(&network, scenario, backend.method(), raw)?;

        info!(
            scenario,
            completion = schedule.completion_time(),
            status = %schedule.status(),
            "schedule solved"
        );

        Ok(schedule)
    }
}
