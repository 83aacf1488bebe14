// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::errors::{CritpathError, Result};
use crate::types::{SolveMethod, TaskName};

/// Duration lookup for one scenario (hours).
pub type Durations = BTreeMap<TaskName, f64>;

/// Raw project file as read from TOML, before validation.
///
/// ```toml
/// [project]
/// name = "Website relaunch"
/// tasks = ["A", "B", "C"]
/// terminal = ["C"]
///
/// [solver]
/// method = "lp"
/// time_limit_ms = 500
///
/// [task.C]
/// after = ["A", "B"]
///
/// [scenario.expected]
/// A = 15
/// B = 18
/// C = 12
/// ```
///
/// Only `[project]` and at least one `[scenario.<name>]` are required.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProjectFile {
    pub project: ProjectSection,

    #[serde(default)]
    pub solver: SolverSection,

    /// Precedence entries from `[task.<name>]`. Tasks without predecessors
    /// may be omitted.
    #[serde(default)]
    pub task: BTreeMap<TaskName, TaskConfig>,

    /// Roll-ups from `[aggregate.<name>]`.
    #[serde(default)]
    pub aggregate: BTreeMap<TaskName, AggregateConfig>,

    /// Duration tables from `[scenario.<name>]`.
    #[serde(default)]
    pub scenario: BTreeMap<String, Durations>,
}

/// Validated project. Construct through `Project::try_from(raw)` or
/// [`crate::config::load_and_validate`].
///
/// Guarantees:
/// - the task list is non-empty and free of duplicates,
/// - every `after`, `terminal` and aggregate reference names a known task,
/// - the precedence graph is acyclic,
/// - every scenario has a finite, non-negative duration for every task and
///   aggregate, and no entry for anything else,
/// - every aggregate duration equals the sum of its parts.
#[derive(Debug, Clone)]
pub struct Project {
    pub project: ProjectSection,
    pub solver: SolverSection,
    pub task: BTreeMap<TaskName, TaskConfig>,
    pub aggregate: BTreeMap<TaskName, AggregateConfig>,
    pub scenario: BTreeMap<String, Durations>,
}

/// `[project]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSection {
    #[serde(default = "default_project_name")]
    pub name: String,

    /// Ordered task list. Drives report order and Gantt row order.
    pub tasks: Vec<TaskName>,

    /// Tasks whose finish bounds the project completion time.
    ///
    /// If `None`, every task without a successor is terminal.
    #[serde(default)]
    pub terminal: Option<Vec<TaskName>>,
}

fn default_project_name() -> String {
    "project".to_string()
}

/// `[solver]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SolverSection {
    #[serde(default)]
    pub method: SolveMethod,

    /// Wall-clock budget for a single solve, in milliseconds.
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskConfig {
    /// Tasks that must finish before this one may start.
    #[serde(default)]
    pub after: Vec<TaskName>,
}

/// `[aggregate.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AggregateConfig {
    pub parts: Vec<TaskName>,
}

impl Project {
    pub(crate) fn new_unchecked(raw: RawProjectFile) -> Self {
        Self {
            project: raw.project,
            solver: raw.solver,
            task: raw.task,
            aggregate: raw.aggregate,
            scenario: raw.scenario,
        }
    }

    pub fn name(&self) -> &str {
        &self.project.name
    }

    /// Tasks in declaration order.
    pub fn task_order(&self) -> &[TaskName] {
        &self.project.tasks
    }

    /// Immediate predecessors of a task (its `after` list).
    pub fn predecessors_of(&self, task: &str) -> &[TaskName] {
        self.task
            .get(task)
            .map(|t| t.after.as_slice())
            .unwrap_or(&[])
    }

    pub fn scenario_names(&self) -> impl Iterator<Item = &str> {
        self.scenario.keys().map(|s| s.as_str())
    }

    /// Duration table for `scenario`.
    ///
    /// Unknown names fail with a configuration error listing what is known.
    pub fn durations(&self, scenario: &str) -> Result<&Durations> {
        self.scenario.get(scenario).ok_or_else(|| {
            let known: Vec<&str> = self.scenario_names().collect();
            CritpathError::Configuration(format!(
                "unknown scenario '{}' (known scenarios: {})",
                scenario,
                known.join(", ")
            ))
        })
    }

    /// Tasks whose finish bounds completion, in task order.
    pub fn terminal_tasks(&self) -> Vec<TaskName> {
        if let Some(ref terminal) = self.project.terminal {
            return self
                .project
                .tasks
                .iter()
                .filter(|t| terminal.contains(t))
                .cloned()
                .collect();
        }

        self.project
            .tasks
            .iter()
            .filter(|t| {
                !self
                    .task
                    .values()
                    .any(|cfg| cfg.after.iter().any(|dep| dep == *t))
            })
            .cloned()
            .collect()
    }
}
