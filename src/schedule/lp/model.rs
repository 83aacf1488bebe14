// src/schedule/lp/model.rs

//! Minimal linear-program model.
//!
//! Every variable is continuous with lower bound 0, every constraint has the
//! form `sum(coef * var) >= rhs`, and the objective is minimized. That is all
//! the schedule formulation needs.

use crate::errors::Result;
use crate::schedule::budget::SolveBudget;

use super::simplex;

/// Handle to a variable of a [`LinearProgram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub(crate) usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Constraint {
    pub name: String,
    pub terms: Vec<(VarId, f64)>,
    pub rhs: f64,
}

#[derive(Debug, Clone)]
pub struct LinearProgram {
    name: String,
    variables: Vec<String>,
    constraints: Vec<Constraint>,
    objective: Vec<(VarId, f64)>,
}

impl LinearProgram {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a variable with lower bound 0.
    pub fn add_variable(&mut self, name: impl Into<String>) -> VarId {
        self.variables.push(name.into());
        VarId(self.variables.len() - 1)
    }

    /// Add `sum(terms) >= rhs`.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        terms: Vec<(VarId, f64)>,
        rhs: f64,
    ) {
        self.constraints.push(Constraint {
            name: name.into(),
            terms,
            rhs,
        });
    }

    /// Replace the objective (minimized).
    pub fn minimize(&mut self, terms: Vec<(VarId, f64)>) {
        self.objective = terms;
    }

    pub fn variable_name(&self, var: VarId) -> &str {
        &self.variables[var.0]
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Dense objective coefficients, one per variable.
    pub(crate) fn objective_coefficients(&self) -> Vec<f64> {
        let mut costs = vec![0.0; self.variables.len()];
        for &(var, coef) in self.objective.iter() {
            costs[var.0] += coef;
        }
        costs
    }

    /// Solve with the in-crate simplex engine.
    ///
    /// Errors carry the failure status: infeasible, unbounded, or solver
    /// error (budget exhausted).
    pub fn solve(&self, budget: &SolveBudget) -> Result<LpSolution> {
        simplex::solve(self, budget)
    }
}

/// Optimal solution of a [`LinearProgram`].
#[derive(Debug, Clone)]
pub struct LpSolution {
    pub(crate) values: Vec<f64>,
    pub(crate) objective: f64,
    pub(crate) iterations: usize,
}

impl LpSolution {
    pub fn value(&self, var: VarId) -> f64 {
        self.values[var.0]
    }

    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Number of pivots across both phases.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}
