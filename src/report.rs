// src/report.rs

//! Plain-text reports printed by the CLI.

use std::fmt::Write as _;

use crate::config::model::Project;
use crate::gantt::format_hours;
use crate::schedule::Schedule;

/// Start time per task, aggregate spans, critical path and total time.
pub fn schedule_report(project: &Project, schedule: &Schedule) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Project plan for the '{}' scenario.",
        schedule.scenario()
    );
    let _ = writeln!(out, "Status: {}", schedule.status());
    let _ = writeln!(out, "Method: {}", schedule.method());

    for task in schedule.tasks() {
        if let Some(start) = schedule.start_of(task) {
            let _ = writeln!(out, "Start_{task} = {}", format_hours(start));
        }
    }

    for (name, agg) in project.aggregate.iter() {
        if let Some(span) = schedule.aggregate_span(name, &agg.parts) {
            let _ = writeln!(
                out,
                "Aggregate {} = {} → {} ({}h of work in {} parts)",
                span.name,
                format_hours(span.start),
                format_hours(span.finish),
                format_hours(span.work),
                agg.parts.len()
            );
        }
    }

    let path = schedule.critical_path();
    if !path.is_empty() {
        let _ = writeln!(out, "Critical path: {}", path.join(" -> "));
    }
    let _ = writeln!(
        out,
        "Total Project Time = {}",
        format_hours(schedule.completion_time())
    );

    out
}

/// Validated project summary for `--dry-run`.
pub fn project_summary(project: &Project) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "critpath dry-run: {}", project.name());
    let _ = writeln!(out, "  solver.method = {}", project.solver.method);
    if let Some(ms) = project.solver.time_limit_ms {
        let _ = writeln!(out, "  solver.time_limit_ms = {ms}");
    }
    let scenarios: Vec<&str> = project.scenario_names().collect();
    let _ = writeln!(out, "  scenarios = {}", scenarios.join(", "));
    let _ = writeln!(out, "  terminal = {}", project.terminal_tasks().join(", "));
    let _ = writeln!(out);

    let _ = writeln!(out, "tasks ({}):", project.task_order().len());
    for name in project.task_order() {
        let _ = writeln!(out, "  - {name}");
        let after = project.predecessors_of(name);
        if !after.is_empty() {
            let _ = writeln!(out, "      after: {:?}", after);
        }
    }

    if !project.aggregate.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "aggregates ({}):", project.aggregate.len());
        for (name, agg) in project.aggregate.iter() {
            let _ = writeln!(out, "  - {name}: {:?}", agg.parts);
        }
    }

    out
}
