// src/schedule/solution.rs

//! Solved schedule and the analysis derived from it.

use std::collections::BTreeMap;

use crate::config::model::Durations;
use crate::errors::{Result, SolveStatus};
use crate::schedule::backend::RawSolution;
use crate::schedule::network::Network;
use crate::types::{SolveMethod, TaskName};

/// Start-time assignment keyed by task.
pub type StartTimes = BTreeMap<TaskName, f64>;

/// Values closer than this are treated as equal when deciding criticality.
const TIME_TOLERANCE: f64 = 1e-6;

/// Round away floating-point noise from the engine (nine decimals).
pub(crate) fn snap(v: f64) -> f64 {
    let r = (v * 1e9).round() / 1e9;
    if r == 0.0 { 0.0 } else { r }
}

/// Earliest-start schedule for one scenario.
///
/// Besides the solver output this holds a backward pass: latest starts and
/// total slack for every task.
#[derive(Debug, Clone)]
pub struct Schedule {
    scenario: String,
    method: SolveMethod,
    status: SolveStatus,
    tasks: Vec<TaskName>,
    durations: Vec<f64>,
    preds: Vec<Vec<usize>>,
    starts: Vec<f64>,
    latest_starts: Vec<f64>,
    completion: f64,
}

/// Span of an aggregate over the schedule of its parts.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateSpan {
    pub name: TaskName,
    /// Earliest start among the parts.
    pub start: f64,
    /// Latest finish among the parts.
    pub finish: f64,
    /// Sum of the part durations.
    pub work: f64,
}

impl Schedule {
    /// Wrap a backend solution and run the backward pass over `network`.
    pub fn from_solution(
        network: &Network,
        scenario: &str,
        method: SolveMethod,
        raw: RawSolution,
    ) -> Result<Self> {
        let starts: Vec<f64> = raw.starts.into_iter().map(snap).collect();
        let completion = snap(raw.completion);
        let latest_starts = latest_starts(network, completion)?;

        Ok(Self {
            scenario: scenario.to_string(),
            method,
            status: SolveStatus::Optimal,
            tasks: network.names().to_vec(),
            durations: network.durations().to_vec(),
            preds: (0..network.len())
                .map(|i| network.predecessors(i).to_vec())
                .collect(),
            starts,
            latest_starts,
            completion,
        })
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn method(&self) -> SolveMethod {
        self.method
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Tasks in project order.
    pub fn tasks(&self) -> &[TaskName] {
        &self.tasks
    }

    pub fn completion_time(&self) -> f64 {
        self.completion
    }

    pub fn start_times(&self) -> StartTimes {
        self.tasks
            .iter()
            .cloned()
            .zip(self.starts.iter().copied())
            .collect()
    }

    /// Durations used for this solve.
    pub fn durations(&self) -> Durations {
        self.tasks
            .iter()
            .cloned()
            .zip(self.durations.iter().copied())
            .collect()
    }

    fn index_of(&self, task: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t == task)
    }

    pub fn start_of(&self, task: &str) -> Option<f64> {
        self.index_of(task).map(|i| self.starts[i])
    }

    pub fn finish_of(&self, task: &str) -> Option<f64> {
        self.index_of(task)
            .map(|i| snap(self.starts[i] + self.durations[i]))
    }

    pub fn latest_start_of(&self, task: &str) -> Option<f64> {
        self.index_of(task).map(|i| self.latest_starts[i])
    }

    /// Total slack: how far the task can slip without delaying completion.
    pub fn slack_of(&self, task: &str) -> Option<f64> {
        self.index_of(task)
            .map(|i| snap(self.latest_starts[i] - self.starts[i]).max(0.0))
    }

    pub fn is_critical(&self, task: &str) -> bool {
        self.slack_of(task)
            .is_some_and(|slack| slack <= TIME_TOLERANCE)
    }

    /// Zero-slack tasks in project order.
    pub fn critical_tasks(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .filter(|t| self.is_critical(t))
            .map(|t| t.as_str())
            .collect()
    }

    /// One critical chain from a source to the task finishing last.
    ///
    /// Walks backwards through predecessors that finish exactly when their
    /// successor starts; ties go to the first predecessor listed.
    pub fn critical_path(&self) -> Vec<&str> {
        let n = self.tasks.len();
        let last = (0..n)
            .filter(|&i| self.is_critical(&self.tasks[i]))
            .find(|&i| {
                (self.starts[i] + self.durations[i] - self.completion).abs() <= TIME_TOLERANCE
            });

        let Some(mut current) = last else {
            return Vec::new();
        };

        let mut chain = vec![current];
        while let Some(&prev) = self.preds[current].iter().find(|&&p| {
            self.is_critical(&self.tasks[p])
                && (self.starts[p] + self.durations[p] - self.starts[current]).abs()
                    <= TIME_TOLERANCE
        }) {
            chain.push(prev);
            current = prev;
        }

        chain.reverse();
        chain.into_iter().map(|i| self.tasks[i].as_str()).collect()
    }

    /// Span of an aggregate over its parts. `None` if a part is unknown or
    /// the part list is empty.
    pub fn aggregate_span(&self, name: &str, parts: &[TaskName]) -> Option<AggregateSpan> {
        if parts.is_empty() {
            return None;
        }

        let mut start = f64::INFINITY;
        let mut finish = 0.0_f64;
        let mut work = 0.0;
        for part in parts {
            let i = self.index_of(part)?;
            start = start.min(self.starts[i]);
            finish = finish.max(self.starts[i] + self.durations[i]);
            work += self.durations[i];
        }

        Some(AggregateSpan {
            name: name.to_string(),
            start: snap(start),
            finish: snap(finish),
            work: snap(work),
        })
    }
}

/// Backward pass: latest start of every task that keeps `completion`.
///
/// A task's latest finish is bounded by the latest starts of its successors
/// and, for terminal tasks and tasks without successors, by completion.
fn latest_starts(network: &Network, completion: f64) -> Result<Vec<f64>> {
    let order = network.topological_order()?;
    let mut latest = vec![0.0_f64; network.len()];

    for &t in order.iter().rev() {
        let mut finish = network
            .successors(t)
            .iter()
            .map(|&s| latest[s])
            .fold(f64::INFINITY, f64::min);
        if network.is_terminal(t) || network.successors(t).is_empty() {
            finish = finish.min(completion);
        }
        latest[t] = snap(finish - network.duration(t));
    }

    Ok(latest)
}
