#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fmt::Write as _;

use critpath::config::{
    AggregateConfig, Durations, Project, ProjectSection, RawProjectFile, SolverSection, TaskConfig,
};
use critpath::types::SolveMethod;

/// Builder for `RawProjectFile` / `Project` to simplify test setup.
pub struct ProjectBuilder {
    raw: RawProjectFile,
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawProjectFile {
                project: ProjectSection {
                    name: "test project".to_string(),
                    tasks: vec![],
                    terminal: None,
                },
                solver: SolverSection::default(),
                task: BTreeMap::new(),
                aggregate: BTreeMap::new(),
                scenario: BTreeMap::new(),
            },
        }
    }

    /// Append a task to the ordered task list.
    pub fn with_task(mut self, name: &str, task: TaskConfig) -> Self {
        self.raw.project.tasks.push(name.to_string());
        if !task.after.is_empty() {
            self.raw.task.insert(name.to_string(), task);
        }
        self
    }

    pub fn with_terminal(mut self, names: &[&str]) -> Self {
        self.raw.project.terminal = Some(names.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_aggregate(mut self, name: &str, parts: &[&str]) -> Self {
        self.raw.aggregate.insert(
            name.to_string(),
            AggregateConfig {
                parts: parts.iter().map(|s| s.to_string()).collect(),
            },
        );
        self
    }

    pub fn with_scenario(mut self, name: &str, durations: &[(&str, f64)]) -> Self {
        let table: Durations = durations
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        self.raw.scenario.insert(name.to_string(), table);
        self
    }

    pub fn with_method(mut self, method: SolveMethod) -> Self {
        self.raw.solver.method = method;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.raw.solver.time_limit_ms = Some(ms);
        self
    }

    /// Generic DAG: tasks `T0..Tn` with the given durations in scenario
    /// `"expected"` and `edges` as (pred, task) index pairs.
    pub fn from_dag(durations: &[f64], edges: &[(usize, usize)]) -> Self {
        let mut builder = Self::new();
        for (i, _) in durations.iter().enumerate() {
            let mut task = TaskConfigBuilder::new();
            for &(p, t) in edges {
                if t == i {
                    task = task.after(&task_name(p));
                }
            }
            builder = builder.with_task(&task_name(i), task.build());
        }
        let names: Vec<String> = (0..durations.len()).map(task_name).collect();
        let table: Vec<(&str, f64)> = names
            .iter()
            .map(String::as_str)
            .zip(durations.iter().copied())
            .collect();
        builder.with_scenario("expected", &table)
    }

    pub fn build_raw(self) -> RawProjectFile {
        self.raw
    }

    pub fn build(self) -> Project {
        Project::try_from(self.raw).expect("Failed to build valid project from builder")
    }

    /// Render the project as a TOML document, for on-disk tests.
    pub fn to_toml(&self) -> String {
        let raw = &self.raw;
        let mut out = String::new();

        let _ = writeln!(out, "[project]");
        let _ = writeln!(out, "name = {:?}", raw.project.name);
        let _ = writeln!(out, "tasks = {}", toml_list(&raw.project.tasks));
        if let Some(ref terminal) = raw.project.terminal {
            let _ = writeln!(out, "terminal = {}", toml_list(terminal));
        }

        let _ = writeln!(out, "\n[solver]");
        let _ = writeln!(out, "method = \"{}\"", raw.solver.method);
        if let Some(ms) = raw.solver.time_limit_ms {
            let _ = writeln!(out, "time_limit_ms = {ms}");
        }

        for (name, task) in raw.task.iter() {
            let _ = writeln!(out, "\n[task.{name}]");
            let _ = writeln!(out, "after = {}", toml_list(&task.after));
        }

        for (name, agg) in raw.aggregate.iter() {
            let _ = writeln!(out, "\n[aggregate.{name}]");
            let _ = writeln!(out, "parts = {}", toml_list(&agg.parts));
        }

        for (name, table) in raw.scenario.iter() {
            let _ = writeln!(out, "\n[scenario.{name}]");
            for (task, d) in table.iter() {
                let _ = writeln!(out, "{task} = {d:?}");
            }
        }

        out
    }
}

impl Default for ProjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new() -> Self {
        Self {
            task: TaskConfig { after: vec![] },
        }
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.after.push(dep.to_string());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}

impl Default for TaskConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `T{i}`.
pub fn task_name(i: usize) -> String {
    format!("T{i}")
}

fn toml_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| format!("{s:?}")).collect();
    format!("[{}]", quoted.join(", "))
}
