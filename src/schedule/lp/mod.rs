// src/schedule/lp/mod.rs

//! Linear-programming formulation of the earliest-start schedule.
//!
//! - [`model`] is a small LP model (non-negative variables, `>=` rows,
//!   minimization).
//! - [`simplex`] is the engine that solves it.
//! - [`formulate`] turns a [`Network`] into a model.

pub mod model;
pub mod simplex;

pub use model::{Constraint, LinearProgram, LpSolution, VarId};

use tracing::debug;

use crate::schedule::network::Network;

/// LP for one network plus the handles needed to read the schedule back.
#[derive(Debug, Clone)]
pub struct ScheduleModel {
    pub program: LinearProgram,
    /// One start variable per task, in network order.
    pub starts: Vec<VarId>,
    pub completion: VarId,
}

/// Build the schedule LP:
///
/// ```text
/// minimize   completion + w * sum(start[t])
/// subject to start[task] - start[pred] >= duration[pred]   for every edge
///            completion - start[t]     >= duration[t]      for every terminal t
///            all variables >= 0
/// ```
///
/// Difference constraints are closed under componentwise minimum, so the
/// earliest-start schedule is the unique minimizer for any `w > 0` and the
/// optimal `completion` equals the critical-path length either way.
pub fn formulate(network: &Network) -> ScheduleModel {
    let mut program = LinearProgram::new("project_min_time");

    let starts: Vec<VarId> = network
        .names()
        .iter()
        .map(|name| program.add_variable(format!("start[{name}]")))
        .collect();
    let completion = program.add_variable("completion");

    for (p, t) in network.edges() {
        program.add_constraint(
            format!("precedence[{}->{}]", network.name(p), network.name(t)),
            vec![(starts[t], 1.0), (starts[p], -1.0)],
            network.duration(p),
        );
    }

    for &t in network.terminals() {
        program.add_constraint(
            format!("completion_after[{}]", network.name(t)),
            vec![(completion, 1.0), (starts[t], -1.0)],
            network.duration(t),
        );
    }

    let weight = 1.0 / (network.len() as f64 + 1.0);
    let mut objective = vec![(completion, 1.0)];
    objective.extend(starts.iter().map(|&s| (s, weight)));
    program.minimize(objective);

    debug!(
        variables = program.num_variables(),
        precedence_rows = network.edges().count(),
        terminal_rows = network.terminals().len(),
        "formulated schedule LP"
    );

    ScheduleModel {
        program,
        starts,
        completion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_row_per_edge_and_terminal() {
        let net = Network::new(
            vec!["A".into(), "B".into(), "C".into()],
            vec![15.0, 18.0, 12.0],
            vec![vec![], vec![], vec![0]],
            vec![1, 2],
        )
        .unwrap();

        let model = formulate(&net);
        assert_eq!(model.program.num_variables(), 4);
        assert_eq!(model.program.constraints().len(), 3);

        let names: Vec<&str> = model
            .program
            .constraints()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["precedence[A->C]", "completion_after[B]", "completion_after[C]"]
        );
        assert_eq!(model.program.constraints()[0].rhs, 15.0);
        assert_eq!(model.program.variable_name(model.completion), "completion");
    }
}
