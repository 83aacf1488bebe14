// src/schedule/lp/simplex.rs

//! Dense two-phase simplex, run on the dual of the model.
//!
//! The primal is `min c.x  s.t.  A x >= b, x >= 0`. Its dual,
//! `max b.y  s.t.  A^T y <= c, y >= 0`, has one row per primal variable and
//! slack columns that form a starting basis whenever `c >= 0`, which is
//! always the case for schedule models. Rows with a negative cost are
//! negated and given an artificial variable, and phase 1 drives those out.
//!
//! Outcome mapping:
//! - dual optimal: primal optimal; primal values are the reduced costs of
//!   the dual slack columns,
//! - dual unbounded: primal infeasible,
//! - dual infeasible: primal unbounded.
//!
//! Entering and leaving variables are chosen with Bland's rule, so the
//! method terminates on degenerate models.

use tracing::{debug, trace};

use crate::errors::{CritpathError, Result};
use crate::schedule::budget::{BudgetClock, SolveBudget};

use super::model::{LinearProgram, LpSolution};

const EPS: f64 = 1e-9;
const FEASIBILITY_TOLERANCE: f64 = 1e-7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Optimal,
    Unbounded,
}

/// Simplex tableau in canonical form.
///
/// Every row and the objective row carry the right-hand side as their last
/// entry. `obj[k]` is the reduced cost of column `k`; the last entry of
/// `obj` is the current objective value of the maximization.
#[derive(Debug)]
struct Tableau {
    rows: Vec<Vec<f64>>,
    obj: Vec<f64>,
    basis: Vec<usize>,
    cols: usize,
}

impl Tableau {
    fn rhs(&self, r: usize) -> f64 {
        self.rows[r][self.cols]
    }

    fn objective_value(&self) -> f64 {
        self.obj[self.cols]
    }

    fn pivot(&mut self, r: usize, k: usize) {
        let p = self.rows[r][k];
        for v in self.rows[r].iter_mut() {
            *v /= p;
        }
        let pivot_row = self.rows[r].clone();

        for (i, row) in self.rows.iter_mut().enumerate() {
            if i == r {
                continue;
            }
            let f = row[k];
            if f != 0.0 {
                for (v, pv) in row.iter_mut().zip(pivot_row.iter()) {
                    *v -= f * pv;
                }
            }
        }

        let f = self.obj[k];
        if f != 0.0 {
            for (v, pv) in self.obj.iter_mut().zip(pivot_row.iter()) {
                *v -= f * pv;
            }
        }

        self.basis[r] = k;
    }

    /// Install `max gains.v` as the objective and price out the basis.
    fn set_objective(&mut self, gains: &[f64]) {
        self.obj = gains.iter().map(|g| -g).collect();
        self.obj.push(0.0);

        for r in 0..self.rows.len() {
            let f = self.obj[self.basis[r]];
            if f != 0.0 {
                for (v, rv) in self.obj.iter_mut().zip(self.rows[r].iter()) {
                    *v -= f * rv;
                }
            }
        }
    }

    fn entering(&self, allowed: &dyn Fn(usize) -> bool) -> Option<usize> {
        (0..self.cols).find(|&k| allowed(k) && self.obj[k] < -EPS)
    }

    fn leaving(&self, k: usize) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, row) in self.rows.iter().enumerate() {
            let a = row[k];
            if a <= EPS {
                continue;
            }
            let ratio = row[self.cols] / a;
            best = match best {
                None => Some((i, ratio)),
                Some((bi, br)) => {
                    if ratio < br - EPS || (ratio <= br + EPS && self.basis[i] < self.basis[bi]) {
                        Some((i, ratio))
                    } else {
                        Some((bi, br))
                    }
                }
            };
        }
        best.map(|(i, _)| i)
    }

    fn optimize(
        &mut self,
        allowed: &dyn Fn(usize) -> bool,
        clock: &mut BudgetClock,
    ) -> Result<Outcome> {
        loop {
            clock.tick()?;

            let Some(k) = self.entering(allowed) else {
                return Ok(Outcome::Optimal);
            };
            let Some(r) = self.leaving(k) else {
                return Ok(Outcome::Unbounded);
            };

            trace!(entering = k, leaving = self.basis[r], "pivot");
            self.pivot(r, k);
        }
    }
}

pub(crate) fn solve(lp: &LinearProgram, budget: &SolveBudget) -> Result<LpSolution> {
    let n = lp.num_variables();
    let m = lp.constraints().len();
    let costs = lp.objective_coefficients();

    // Column layout: dual y (0..m), slacks (m..m+n), artificials after.
    let negative_rows: Vec<usize> = (0..n).filter(|&j| costs[j] < 0.0).collect();
    let art_start = m + n;
    let cols = art_start + negative_rows.len();

    let mut rows = vec![vec![0.0; cols + 1]; n];
    for (r, constraint) in lp.constraints().iter().enumerate() {
        for &(var, coef) in constraint.terms.iter() {
            rows[var.index()][r] += coef;
        }
    }

    let mut basis = vec![0; n];
    for j in 0..n {
        rows[j][m + j] = 1.0;
        rows[j][cols] = costs[j];
        basis[j] = m + j;
    }

    for (a, &j) in negative_rows.iter().enumerate() {
        for v in rows[j].iter_mut() {
            *v = -*v;
        }
        rows[j][art_start + a] = 1.0;
        basis[j] = art_start + a;
    }

    let mut tableau = Tableau {
        rows,
        obj: Vec::new(),
        basis,
        cols,
    };
    let mut clock = budget.start();

    debug!(
        program = lp.name(),
        variables = n,
        constraints = m,
        artificials = negative_rows.len(),
        "solving linear program"
    );

    if !negative_rows.is_empty() {
        let mut gains = vec![0.0; cols];
        for g in gains[art_start..].iter_mut() {
            *g = -1.0;
        }
        tableau.set_objective(&gains);

        if tableau.optimize(&|_: usize| true, &mut clock)? == Outcome::Unbounded {
            return Err(CritpathError::Solver(
                "phase 1 reported an unbounded auxiliary problem".to_string(),
            ));
        }
        if tableau.objective_value() < -FEASIBILITY_TOLERANCE {
            return Err(CritpathError::Unbounded(format!(
                "objective of '{}' decreases without limit",
                lp.name()
            )));
        }

        drive_out_artificials(&mut tableau, art_start);
        debug!(pivots = clock.iterations(), "phase 1 complete");
    }

    let mut gains = vec![0.0; cols];
    for (r, constraint) in lp.constraints().iter().enumerate() {
        gains[r] = constraint.rhs;
    }
    tableau.set_objective(&gains);

    if tableau.optimize(&|k: usize| k < art_start, &mut clock)? == Outcome::Unbounded {
        return Err(CritpathError::Infeasible(format!(
            "no assignment satisfies every constraint of '{}'",
            lp.name()
        )));
    }

    let values: Vec<f64> = (0..n).map(|j| tableau.obj[m + j].max(0.0)).collect();
    let objective = tableau.objective_value();

    debug!(
        pivots = clock.iterations(),
        objective,
        elapsed = ?clock.elapsed(),
        "linear program solved"
    );

    Ok(LpSolution {
        values,
        objective,
        iterations: clock.iterations(),
    })
}

/// Pivot zero-level artificials out of the basis where possible.
///
/// A row with no usable column is redundant and keeps its artificial at zero;
/// phase 2 never lets an artificial column enter.
fn drive_out_artificials(tableau: &mut Tableau, art_start: usize) {
    for r in 0..tableau.rows.len() {
        if tableau.basis[r] < art_start {
            continue;
        }
        debug_assert!(tableau.rhs(r).abs() <= FEASIBILITY_TOLERANCE);
        if let Some(k) = (0..art_start).find(|&k| tableau.rows[r][k].abs() > EPS) {
            tableau.pivot(r, k);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::errors::SolveStatus;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn single_lower_bound() {
        let mut lp = LinearProgram::new("bound");
        let x = lp.add_variable("x");
        lp.add_constraint("x_min", vec![(x, 1.0)], 3.0);
        lp.minimize(vec![(x, 1.0)]);

        let sol = lp.solve(&SolveBudget::default()).unwrap();
        assert!(approx(sol.value(x), 3.0));
        assert!(approx(sol.objective(), 3.0));
    }

    #[test]
    fn two_variable_covering_problem() {
        // min 2x + 3y  s.t.  x + y >= 4,  x + 3y >= 6
        // optimum at x = 3, y = 1, objective 9.
        let mut lp = LinearProgram::new("cover");
        let x = lp.add_variable("x");
        let y = lp.add_variable("y");
        lp.add_constraint("c1", vec![(x, 1.0), (y, 1.0)], 4.0);
        lp.add_constraint("c2", vec![(x, 1.0), (y, 3.0)], 6.0);
        lp.minimize(vec![(x, 2.0), (y, 3.0)]);

        let sol = lp.solve(&SolveBudget::default()).unwrap();
        assert!(approx(sol.value(x), 3.0), "x = {}", sol.value(x));
        assert!(approx(sol.value(y), 1.0), "y = {}", sol.value(y));
        assert!(approx(sol.objective(), 9.0));
    }

    #[test]
    fn difference_constraints_chain() {
        // b - a >= 2, c - b >= 5, done - c >= 1; min done.
        let mut lp = LinearProgram::new("chain");
        let a = lp.add_variable("a");
        let b = lp.add_variable("b");
        let c = lp.add_variable("c");
        let done = lp.add_variable("done");
        lp.add_constraint("ab", vec![(b, 1.0), (a, -1.0)], 2.0);
        lp.add_constraint("bc", vec![(c, 1.0), (b, -1.0)], 5.0);
        lp.add_constraint("cd", vec![(done, 1.0), (c, -1.0)], 1.0);
        lp.minimize(vec![(done, 1.0), (a, 0.1), (b, 0.1), (c, 0.1)]);

        let sol = lp.solve(&SolveBudget::default()).unwrap();
        assert!(approx(sol.value(a), 0.0));
        assert!(approx(sol.value(b), 2.0));
        assert!(approx(sol.value(c), 7.0));
        assert!(approx(sol.value(done), 8.0));
    }

    #[test]
    fn contradictory_constraints_are_infeasible() {
        let mut lp = LinearProgram::new("loop");
        let a = lp.add_variable("a");
        let b = lp.add_variable("b");
        lp.add_constraint("ab", vec![(b, 1.0), (a, -1.0)], 1.0);
        lp.add_constraint("ba", vec![(a, 1.0), (b, -1.0)], 1.0);
        lp.minimize(vec![(a, 1.0), (b, 1.0)]);

        let err = lp.solve(&SolveBudget::default()).unwrap_err();
        assert_eq!(err.status(), Some(SolveStatus::Infeasible), "{err}");
    }

    #[test]
    fn negative_cost_without_upper_bound_is_unbounded() {
        let mut lp = LinearProgram::new("runaway");
        let x = lp.add_variable("x");
        lp.add_constraint("x_min", vec![(x, 1.0)], 1.0);
        lp.minimize(vec![(x, -1.0)]);

        let err = lp.solve(&SolveBudget::default()).unwrap_err();
        assert_eq!(err.status(), Some(SolveStatus::Unbounded), "{err}");
    }

    #[test]
    fn negative_cost_with_upper_bound_is_solved_after_phase_one() {
        // min -x  s.t.  -x >= -5  (x <= 5)
        let mut lp = LinearProgram::new("capped");
        let x = lp.add_variable("x");
        lp.add_constraint("x_max", vec![(x, -1.0)], -5.0);
        lp.minimize(vec![(x, -1.0)]);

        let sol = lp.solve(&SolveBudget::default()).unwrap();
        assert!(approx(sol.value(x), 5.0), "x = {}", sol.value(x));
        assert!(approx(sol.objective(), -5.0));
    }

    #[test]
    fn exhausted_time_budget_is_a_solver_error() {
        let mut lp = LinearProgram::new("bound");
        let x = lp.add_variable("x");
        lp.add_constraint("x_min", vec![(x, 1.0)], 3.0);
        lp.minimize(vec![(x, 1.0)]);

        let budget = SolveBudget::default().with_time_limit(Duration::ZERO);
        let err = lp.solve(&budget).unwrap_err();
        assert_eq!(err.status(), Some(SolveStatus::SolverError));
    }
}
