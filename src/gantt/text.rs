// src/gantt/text.rs

//! Terminal Gantt chart.
//!
//! ```text
//! Gantt Chart Expected Scenario
//! A |██████████          |  0 → 15 (15h) *
//! C |          ████████  | 15 → 27 (12h)
//!    0                 30
//! ```

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::errors::Result;

use super::{format_hours, GanttChart, GanttRenderer};

const BAR: char = '█';

#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    /// Number of character cells spanning the whole horizon.
    pub width: usize,
    /// Emit ANSI colours (critical bars red, others cyan).
    pub color: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            width: 60,
            color: false,
        }
    }
}

impl TextRenderer {
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn cell(&self, t: f64, horizon: f64) -> usize {
        if horizon <= 0.0 {
            return 0;
        }
        ((t / horizon) * self.width as f64).round() as usize
    }
}

impl GanttRenderer for TextRenderer {
    fn render(&self, chart: &GanttChart) -> Result<String> {
        let horizon = chart.horizon();
        let label_width = chart
            .bars()
            .iter()
            .map(|b| b.task.chars().count())
            .max()
            .unwrap_or(0);
        let time_width = format_hours(horizon).len();

        let mut out = String::new();
        let _ = writeln!(out, "{}", chart.title());

        for bar in chart.bars() {
            let mut from = self.cell(bar.start, horizon).min(self.width);
            let mut to = self.cell(bar.finish(), horizon).min(self.width);
            // Short bars still get one cell.
            if bar.duration > 0.0 && to == from {
                if to < self.width {
                    to += 1;
                } else if from > 0 {
                    from -= 1;
                }
            }

            let cells = BAR.to_string().repeat(to - from);
            let painted = if !self.color {
                cells
            } else if bar.critical {
                cells.red().to_string()
            } else {
                cells.cyan().to_string()
            };

            let _ = writeln!(
                out,
                "{:>lw$} |{}{}{}| {:>tw$} → {:<tw$} ({}h){}",
                bar.task,
                " ".repeat(from),
                painted,
                " ".repeat(self.width - to),
                format_hours(bar.start),
                format_hours(bar.finish()),
                format_hours(bar.duration),
                if bar.critical { " *" } else { "" },
                lw = label_width,
                tw = time_width,
            );
        }

        let _ = writeln!(
            out,
            "{:>lw$} 0{}{}",
            "",
            " ".repeat(self.width.saturating_sub(time_width) + 1),
            format_hours(horizon),
            lw = label_width,
        );

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::Durations;
    use crate::schedule::StartTimes;
    use crate::types::TaskName;

    fn chart() -> GanttChart {
        let starts: StartTimes = [("A", 0.0), ("C", 15.0), ("E", 27.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let durations: Durations = [("A", 15.0), ("C", 12.0), ("E", 3.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let order: Vec<TaskName> = vec!["A".into(), "C".into(), "E".into()];
        GanttChart::new(&starts, &durations, "worst", &order)
            .unwrap()
            .with_critical(&["A"])
    }

    #[test]
    fn rows_are_positioned_by_start_and_duration() {
        let renderer = TextRenderer {
            width: 30,
            color: false,
        };
        let out = renderer.render(&chart()).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Gantt Chart Worst Scenario");
        assert_eq!(lines.len(), 5);

        // Horizon 30 over 30 cells: one cell per hour.
        assert!(lines[1].starts_with(&format!("A |{}{}|", "█".repeat(15), " ".repeat(15))));
        assert!(lines[2].starts_with(&format!("C |{}{}{}|", " ".repeat(15), "█".repeat(12), " ".repeat(3))));
        assert!(lines[1].ends_with("(15h) *"));
        assert!(lines[3].contains("27 → 30"));
    }

    #[test]
    fn colour_is_optional() {
        let plain = TextRenderer::default().render(&chart()).unwrap();
        assert!(!plain.contains('\u{1b}'));

        let coloured = TextRenderer::default().with_color(true).render(&chart()).unwrap();
        assert!(coloured.contains('\u{1b}'));
    }
}
