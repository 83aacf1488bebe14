// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs;
pub mod gantt;
pub mod logging;
pub mod report;
pub mod schedule;
pub mod types;

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::model::Project;
use crate::fs::{FileSystem, RealFileSystem};
use crate::gantt::{save_chart, GanttChart, GanttRenderer, SvgRenderer, TextRenderer};
use crate::schedule::{SolveOptions, Solver};

/// High-level entry point used by `main.rs`.
///
/// Output goes to stdout; logs go to stderr.
pub fn run(args: CliArgs) -> Result<()> {
    let output = run_with(&RealFileSystem, &args)?;
    print!("{output}");
    Ok(())
}

/// Everything `run` does, against an arbitrary filesystem, returning the
/// text that would be printed.
///
/// This wires together:
/// - project loading (file or embedded reference)
/// - solver options from `[solver]` plus CLI overrides
/// - the report
/// - terminal and SVG Gantt charts
pub fn run_with(fs: &dyn FileSystem, args: &CliArgs) -> Result<String> {
    let project = load_project(fs, args)?;

    // Unknown scenario names fail here, dry-run or not.
    project.durations(&args.scenario)?;

    if args.dry_run {
        debug!("dry-run complete (no solve)");
        return Ok(report::project_summary(&project));
    }

    let options = solve_options(&project, args);
    let schedule = Solver::with_options(&project, options).solve(&args.scenario)?;

    let mut output = report::schedule_report(&project, &schedule);

    let chart = GanttChart::from_schedule(&schedule)?;
    if !args.no_chart {
        output.push('\n');
        output.push_str(&TextRenderer::default().with_color(args.color).render(&chart)?);
    }

    if let Some(ref svg) = args.svg {
        save_chart(fs, Path::new(svg), &SvgRenderer::default(), &chart)?;
    }

    Ok(output)
}

fn load_project(fs: &dyn FileSystem, args: &CliArgs) -> Result<Project> {
    if args.reference {
        info!("using embedded reference project");
        return Ok(config::reference_project()?);
    }
    Ok(config::load_and_validate_with(fs, &args.config)?)
}

/// `[solver]` settings with any CLI overrides applied.
fn solve_options(project: &Project, args: &CliArgs) -> SolveOptions {
    let mut options = SolveOptions::from_section(&project.solver);
    if let Some(method) = args.method {
        options = options.with_method(method);
    }
    if let Some(ms) = args.time_limit_ms {
        options = options.with_time_limit(Duration::from_millis(ms));
    }
    options
}
