// src/config/validate.rs

use std::collections::HashSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::config::model::{Project, RawProjectFile};
use crate::errors::{CritpathError, Result};

/// Aggregate durations may differ from the sum of their parts by this much.
const AGGREGATE_TOLERANCE: f64 = 1e-6;

impl TryFrom<RawProjectFile> for Project {
    type Error = CritpathError;

    fn try_from(raw: RawProjectFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_project(&raw)?;
        Ok(Project::new_unchecked(raw))
    }
}

fn validate_raw_project(cfg: &RawProjectFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_task_dependencies(cfg)?;
    validate_terminals(cfg)?;
    validate_aggregates(cfg)?;
    validate_scenarios(cfg)?;
    validate_dag(cfg)?;
    validate_aggregate_sums(cfg)?;
    debug!(
        tasks = cfg.project.tasks.len(),
        scenarios = cfg.scenario.len(),
        "project file validated"
    );
    Ok(())
}

fn config_error(msg: String) -> CritpathError {
    CritpathError::Configuration(msg)
}

fn ensure_has_tasks(cfg: &RawProjectFile) -> Result<()> {
    if cfg.project.tasks.is_empty() {
        return Err(config_error(
            "[project].tasks must list at least one task".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for name in cfg.project.tasks.iter() {
        if name.trim().is_empty() {
            return Err(config_error(
                "[project].tasks contains an empty task name".to_string(),
            ));
        }
        if !seen.insert(name.as_str()) {
            return Err(config_error(format!(
                "task '{}' is listed more than once in [project].tasks",
                name
            )));
        }
    }
    Ok(())
}

fn is_task(cfg: &RawProjectFile, name: &str) -> bool {
    cfg.project.tasks.iter().any(|t| t == name)
}

fn validate_task_dependencies(cfg: &RawProjectFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        if !is_task(cfg, name) {
            return Err(config_error(format!(
                "[task.{}] does not name a task from [project].tasks",
                name
            )));
        }
        for dep in task.after.iter() {
            if !is_task(cfg, dep) {
                return Err(config_error(format!(
                    "task '{}' has unknown dependency '{}' in `after`",
                    name, dep
                )));
            }
        }
    }
    Ok(())
}

fn validate_terminals(cfg: &RawProjectFile) -> Result<()> {
    let Some(ref terminal) = cfg.project.terminal else {
        return Ok(());
    };

    if terminal.is_empty() {
        return Err(config_error(
            "[project].terminal must name at least one task when present".to_string(),
        ));
    }
    for name in terminal.iter() {
        if !is_task(cfg, name) {
            return Err(config_error(format!(
                "unknown terminal task '{}' in [project].terminal",
                name
            )));
        }
    }

    // Completion must cover every task nothing else waits for.
    for name in cfg.project.tasks.iter() {
        let has_successor = cfg
            .task
            .values()
            .any(|task| task.after.iter().any(|dep| dep == name));
        if !has_successor && !terminal.contains(name) {
            return Err(config_error(format!(
                "task '{}' has no successor and must be listed in [project].terminal",
                name
            )));
        }
    }
    Ok(())
}

fn validate_aggregates(cfg: &RawProjectFile) -> Result<()> {
    for (name, agg) in cfg.aggregate.iter() {
        if is_task(cfg, name) {
            return Err(config_error(format!(
                "aggregate '{}' clashes with a task of the same name",
                name
            )));
        }
        if agg.parts.is_empty() {
            return Err(config_error(format!(
                "aggregate '{}' must list at least one part",
                name
            )));
        }
        for part in agg.parts.iter() {
            if !is_task(cfg, part) {
                return Err(config_error(format!(
                    "aggregate '{}' has unknown part '{}'",
                    name, part
                )));
            }
        }
    }
    Ok(())
}

fn validate_scenarios(cfg: &RawProjectFile) -> Result<()> {
    if cfg.scenario.is_empty() {
        return Err(config_error(
            "project must contain at least one [scenario.<name>] section".to_string(),
        ));
    }

    for (scenario, durations) in cfg.scenario.iter() {
        for name in cfg.project.tasks.iter().chain(cfg.aggregate.keys()) {
            if !durations.contains_key(name) {
                return Err(config_error(format!(
                    "scenario '{}' has no duration for '{}'",
                    scenario, name
                )));
            }
        }

        for (name, value) in durations.iter() {
            if !is_task(cfg, name) && !cfg.aggregate.contains_key(name) {
                return Err(config_error(format!(
                    "scenario '{}' sets a duration for unknown task '{}'",
                    scenario, name
                )));
            }
            if !value.is_finite() || *value < 0.0 {
                return Err(config_error(format!(
                    "scenario '{}' has invalid duration {} for '{}' (must be finite and >= 0)",
                    scenario, value, name
                )));
            }
        }
    }
    Ok(())
}

fn validate_dag(cfg: &RawProjectFile) -> Result<()> {
    // Edge direction: dep -> task, so `after = ["A"]` on B adds A -> B.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in cfg.project.tasks.iter() {
        graph.add_node(name.as_str());
    }

    for (name, task) in cfg.task.iter() {
        for dep in task.after.iter() {
            graph.add_edge(dep.as_str(), name.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(CritpathError::Infeasible(format!(
            "cycle detected in precedence graph involving task '{}'",
            cycle.node_id()
        ))),
    }
}

fn validate_aggregate_sums(cfg: &RawProjectFile) -> Result<()> {
    for (name, agg) in cfg.aggregate.iter() {
        for (scenario, durations) in cfg.scenario.iter() {
            let declared = durations[name];
            let summed: f64 = agg.parts.iter().map(|p| durations[p]).sum();
            if (declared - summed).abs() > AGGREGATE_TOLERANCE {
                return Err(config_error(format!(
                    "aggregate '{}' in scenario '{}' is {} but its parts sum to {}",
                    name, scenario, declared, summed
                )));
            }
        }
    }
    Ok(())
}
