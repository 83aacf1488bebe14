// src/schedule/network.rs

//! Index-based precedence network for one scenario.
//!
//! A [`Network`] is what the solver backends consume: task names in project
//! order, one duration per task, predecessor and successor lists by index,
//! and the terminal set. It is resolved from a [`Project`] for a single
//! scenario, so every number in it is already scenario-specific.

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::Project;
use crate::errors::{CritpathError, Result};
use crate::types::TaskName;

#[derive(Debug, Clone)]
pub struct Network {
    names: Vec<TaskName>,
    durations: Vec<f64>,
    preds: Vec<Vec<usize>>,
    succs: Vec<Vec<usize>>,
    terminals: Vec<usize>,
}

impl Network {
    /// Build a network from raw parts.
    ///
    /// Indices and durations are checked; acyclicity is not, so that the
    /// engines can be exercised on inconsistent input.
    pub fn new(
        names: Vec<TaskName>,
        durations: Vec<f64>,
        preds: Vec<Vec<usize>>,
        terminals: Vec<usize>,
    ) -> Result<Self> {
        let n = names.len();
        if durations.len() != n || preds.len() != n {
            return Err(CritpathError::Configuration(format!(
                "network has {} tasks but {} durations and {} predecessor lists",
                n,
                durations.len(),
                preds.len()
            )));
        }

        for (i, d) in durations.iter().enumerate() {
            if !d.is_finite() || *d < 0.0 {
                return Err(CritpathError::Configuration(format!(
                    "task '{}' has invalid duration {}",
                    names[i], d
                )));
            }
        }

        let mut succs = vec![Vec::new(); n];
        for (task, list) in preds.iter().enumerate() {
            for &p in list {
                if p >= n {
                    return Err(CritpathError::Configuration(format!(
                        "task '{}' references predecessor index {} outside the network",
                        names[task], p
                    )));
                }
                succs[p].push(task);
            }
        }

        if let Some(&t) = terminals.iter().find(|&&t| t >= n) {
            return Err(CritpathError::Configuration(format!(
                "terminal index {} outside the network",
                t
            )));
        }

        if let Some(sink) = (0..n).find(|&i| succs[i].is_empty() && !terminals.contains(&i)) {
            return Err(CritpathError::Configuration(format!(
                "task '{}' has no successor but is not terminal",
                names[sink]
            )));
        }

        Ok(Self {
            names,
            durations,
            preds,
            succs,
            terminals,
        })
    }

    /// Resolve `scenario` of a project into a network.
    ///
    /// Fails with a configuration error if the scenario is unknown or any
    /// task lacks a duration, before anything is solved.
    pub fn from_project(project: &Project, scenario: &str) -> Result<Self> {
        let table = project.durations(scenario)?;
        let order = project.task_order();

        let index_of = |name: &str| -> Result<usize> {
            order.iter().position(|t| t == name).ok_or_else(|| {
                CritpathError::Configuration(format!("unknown task '{}'", name))
            })
        };

        let mut durations = Vec::with_capacity(order.len());
        let mut preds = Vec::with_capacity(order.len());
        for name in order {
            let d = table.get(name).copied().ok_or_else(|| {
                CritpathError::Configuration(format!(
                    "scenario '{}' has no duration for '{}'",
                    scenario, name
                ))
            })?;
            durations.push(d);

            let list = project
                .predecessors_of(name)
                .iter()
                .map(|p| index_of(p))
                .collect::<Result<Vec<_>>>()?;
            preds.push(list);
        }

        let terminals = project
            .terminal_tasks()
            .iter()
            .map(|t| index_of(t))
            .collect::<Result<Vec<_>>>()?;

        Self::new(order.to_vec(), durations, preds, terminals)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[TaskName] {
        &self.names
    }

    pub fn name(&self, i: usize) -> &str {
        &self.names[i]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|t| t == name)
    }

    pub fn duration(&self, i: usize) -> f64 {
        self.durations[i]
    }

    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    pub fn predecessors(&self, i: usize) -> &[usize] {
        &self.preds[i]
    }

    pub fn successors(&self, i: usize) -> &[usize] {
        &self.succs[i]
    }

    pub fn terminals(&self) -> &[usize] {
        &self.terminals
    }

    pub fn is_terminal(&self, i: usize) -> bool {
        self.terminals.contains(&i)
    }

    /// All precedence edges as `(pred, task)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.preds
            .iter()
            .enumerate()
            .flat_map(|(task, list)| list.iter().map(move |&p| (p, task)))
    }

    /// Task indices in an order where every predecessor comes first.
    ///
    /// A cycle makes every schedule infeasible and is reported as such.
    pub fn topological_order(&self) -> Result<Vec<usize>> {
        let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();
        for i in 0..self.len() {
            graph.add_node(i);
        }
        for (p, t) in self.edges() {
            graph.add_edge(p, t, ());
        }

        toposort(&graph, None).map_err(|cycle| {
            CritpathError::Infeasible(format!(
                "cycle detected in precedence graph involving task '{}'",
                self.names[cycle.node_id()]
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::reference_project;
    use crate::errors::SolveStatus;

    #[test]
    fn resolves_reference_scenario() {
        let project = reference_project().unwrap();
        let net = Network::from_project(&project, "expected").unwrap();

        assert_eq!(net.len(), 15);
        let c = net.index_of("C").unwrap();
        assert_eq!(net.duration(c), 12.0);
        assert_eq!(net.predecessors(c), &[net.index_of("A").unwrap()]);
        assert_eq!(net.terminals(), &[net.index_of("H").unwrap()]);
        assert_eq!(net.edges().count(), 19);
    }

    #[test]
    fn unknown_scenario_is_a_configuration_error() {
        let project = reference_project().unwrap();
        let err = Network::from_project(&project, "optimistic").unwrap_err();
        assert!(matches!(err, CritpathError::Configuration(_)), "{err:?}");
        assert!(err.to_string().contains("best, expected, worst"));
    }

    #[test]
    fn topological_order_respects_edges() {
        let project = reference_project().unwrap();
        let net = Network::from_project(&project, "best").unwrap();
        let order = net.topological_order().unwrap();
        let pos = |i: usize| order.iter().position(|&x| x == i).unwrap();
        for (p, t) in net.edges() {
            assert!(pos(p) < pos(t), "{} must precede {}", net.name(p), net.name(t));
        }
    }

    #[test]
    fn cycle_is_infeasible() {
        let net = Network::new(
            vec!["A".into(), "B".into()],
            vec![1.0, 1.0],
            vec![vec![1], vec![0]],
            vec![1],
        )
        .unwrap();
        let err = net.topological_order().unwrap_err();
        assert_eq!(err.status(), Some(SolveStatus::Infeasible));
    }

    #[test]
    fn rejects_negative_durations_and_bad_indices() {
        assert!(Network::new(vec!["A".into()], vec![-1.0], vec![vec![]], vec![]).is_err());
        assert!(Network::new(vec!["A".into()], vec![1.0], vec![vec![3]], vec![]).is_err());
        assert!(Network::new(vec!["A".into()], vec![1.0], vec![vec![]], vec![2]).is_err());
    }

    #[test]
    fn every_sink_must_be_terminal() {
        let err = Network::new(
            vec!["A".into(), "B".into(), "C".into()],
            vec![1.0, 1.0, 50.0],
            vec![vec![], vec![0], vec![0]],
            vec![1],
        )
        .unwrap_err();
        assert!(matches!(err, CritpathError::Configuration(_)), "{err:?}");
        assert!(err.to_string().contains("'C'"));
    }
}
