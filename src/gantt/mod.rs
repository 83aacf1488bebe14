// src/gantt/mod.rs

//! Gantt chart rendering.
//!
//! A [`GanttChart`] is the renderer-independent input: one bar per task in
//! row order, built from start times, durations and a task order. Renderers
//! turn it into an artifact:
//!
//! - [`SvgRenderer`] produces a vector image for saving to disk.
//! - [`TextRenderer`] produces a terminal chart.

pub mod palette;
pub mod svg_chart;
pub mod text;

use std::path::Path;

use tracing::info;

use crate::config::model::Durations;
use crate::errors::{CritpathError, Result};
use crate::fs::FileSystem;
use crate::schedule::{Schedule, StartTimes};
use crate::types::TaskName;

pub use self::svg_chart::SvgRenderer;
pub use self::text::TextRenderer;

/// One row of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct GanttBar {
    pub task: TaskName,
    pub start: f64,
    pub duration: f64,
    pub critical: bool,
}

impl GanttBar {
    pub fn finish(&self) -> f64 {
        self.start + self.duration
    }

    /// `"{task} ({duration}h)"`.
    pub fn label(&self) -> String {
        format!("{} ({}h)", self.task, format_hours(self.duration))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GanttChart {
    scenario: String,
    bars: Vec<GanttBar>,
}

impl GanttChart {
    /// Build a chart with one bar per entry of `task_order`, top to bottom.
    ///
    /// Every task in the order must have a start time and a duration;
    /// anything missing is a configuration error, never skipped.
    pub fn new(
        start_times: &StartTimes,
        durations: &Durations,
        scenario: &str,
        task_order: &[TaskName],
    ) -> Result<Self> {
        if task_order.is_empty() {
            return Err(CritpathError::Configuration(
                "cannot render a Gantt chart without tasks".to_string(),
            ));
        }

        let bars = task_order
            .iter()
            .map(|task| {
                let start = start_times.get(task).copied().ok_or_else(|| {
                    CritpathError::Configuration(format!(
                        "no start time for task '{}' in the render list",
                        task
                    ))
                })?;
                let duration = durations.get(task).copied().ok_or_else(|| {
                    CritpathError::Configuration(format!(
                        "no duration for task '{}' in scenario '{}'",
                        task, scenario
                    ))
                })?;
                Ok(GanttBar {
                    task: task.clone(),
                    start,
                    duration,
                    critical: false,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            scenario: scenario.to_string(),
            bars,
        })
    }

    /// Chart of a solved schedule with its critical tasks marked.
    pub fn from_schedule(schedule: &Schedule) -> Result<Self> {
        let chart = Self::new(
            &schedule.start_times(),
            &schedule.durations(),
            schedule.scenario(),
            schedule.tasks(),
        )?;
        Ok(chart.with_critical(&schedule.critical_tasks()))
    }

    /// Mark the named tasks as critical.
    pub fn with_critical(mut self, critical: &[&str]) -> Self {
        for bar in self.bars.iter_mut() {
            bar.critical = critical.contains(&bar.task.as_str());
        }
        self
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn bars(&self) -> &[GanttBar] {
        &self.bars
    }

    /// `"Gantt Chart Expected Scenario"`.
    pub fn title(&self) -> String {
        let mut chars = self.scenario.chars();
        let scenario = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        format!("Gantt Chart {scenario} Scenario")
    }

    /// Latest finish over all bars.
    pub fn horizon(&self) -> f64 {
        self.bars.iter().map(GanttBar::finish).fold(0.0, f64::max)
    }
}

/// Turns a chart into an artifact.
pub trait GanttRenderer {
    fn render(&self, chart: &GanttChart) -> Result<String>;
}

/// Render `chart` and write the result to `path`.
pub fn save_chart(
    fs: &dyn FileSystem,
    path: &Path,
    renderer: &dyn GanttRenderer,
    chart: &GanttChart,
) -> Result<()> {
    let artifact = renderer.render(chart)?;
    fs.write(path, artifact.as_bytes())?;
    info!(path = %path.display(), rows = chart.bars().len(), "wrote Gantt chart");
    Ok(())
}

/// Whole hours print without decimals; fractions keep up to three.
pub fn format_hours(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        let s = format!("{v:.3}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
