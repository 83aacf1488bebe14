// src/gantt/svg_chart.rs

//! SVG Gantt chart built with the `svg` crate.

use ::svg::node::element::{Line, Rectangle, Text};
use ::svg::node::Text as TextNode;
use ::svg::Document;

use crate::errors::Result;

use super::palette::{color_for_row, CRITICAL_OUTLINE};
use super::{format_hours, GanttChart, GanttRenderer};

/// Vector renderer. Geometry is in pixels.
#[derive(Debug, Clone, Copy)]
pub struct SvgRenderer {
    pub width: f64,
    pub row_height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            width: 1000.0,
            row_height: 32.0,
            margin_left: 70.0,
            margin_right: 40.0,
            margin_top: 50.0,
            margin_bottom: 50.0,
        }
    }
}

impl SvgRenderer {
    fn plot_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    fn height(&self, rows: usize) -> f64 {
        self.margin_top + self.row_height * rows as f64 + self.margin_bottom
    }

    /// Build the SVG document for `chart`.
    pub fn document(&self, chart: &GanttChart) -> Document {
        let rows = chart.bars().len();
        let height = self.height(rows);
        let plot_bottom = self.margin_top + self.row_height * rows as f64;
        let horizon = chart.horizon();
        let scale = if horizon > 0.0 {
            self.plot_width() / horizon
        } else {
            self.plot_width()
        };
        let x_of = |t: f64| self.margin_left + t * scale;

        let mut doc = Document::new()
            .set("width", self.width)
            .set("height", height)
            .set("viewBox", (0.0, 0.0, self.width, height))
            .set("font-family", "sans-serif")
            .set("font-size", 12);

        doc = doc.add(
            Text::new()
                .set("x", self.width / 2.0)
                .set("y", self.margin_top / 2.0)
                .set("text-anchor", "middle")
                .set("font-size", 16)
                .add(TextNode::new(chart.title())),
        );

        for tick in ticks(horizon) {
            let x = x_of(tick);
            doc = doc
                .add(
                    Line::new()
                        .set("x1", x)
                        .set("y1", self.margin_top)
                        .set("x2", x)
                        .set("y2", plot_bottom)
                        .set("stroke", "#dddddd")
                        .set("stroke-width", 1),
                )
                .add(
                    Text::new()
                        .set("x", x)
                        .set("y", plot_bottom + 18.0)
                        .set("text-anchor", "middle")
                        .add(TextNode::new(format_hours(tick))),
                );
        }

        doc = doc.add(
            Text::new()
                .set("x", self.margin_left + self.plot_width() / 2.0)
                .set("y", height - 10.0)
                .set("text-anchor", "middle")
                .add(TextNode::new("Time")),
        );

        for (i, bar) in chart.bars().iter().enumerate() {
            let top = self.margin_top + self.row_height * i as f64;
            let mid = top + self.row_height / 2.0;
            let bar_height = self.row_height * 0.7;

            let mut rect = Rectangle::new()
                .set("x", x_of(bar.start))
                .set("y", mid - bar_height / 2.0)
                .set("width", bar.duration * scale)
                .set("height", bar_height)
                .set("fill", color_for_row(i));
            if bar.critical {
                rect = rect
                    .set("stroke", CRITICAL_OUTLINE)
                    .set("stroke-width", 2);
            }

            doc = doc
                .add(
                    Text::new()
                        .set("x", self.margin_left - 8.0)
                        .set("y", mid)
                        .set("text-anchor", "end")
                        .set("dominant-baseline", "middle")
                        .add(TextNode::new(bar.task.clone())),
                )
                .add(rect)
                .add(
                    Text::new()
                        .set("x", x_of(bar.start + bar.duration / 2.0))
                        .set("y", mid)
                        .set("text-anchor", "start")
                        .set("dominant-baseline", "middle")
                        .add(TextNode::new(bar.label())),
                );
        }

        doc
    }
}

impl GanttRenderer for SvgRenderer {
    fn render(&self, chart: &GanttChart) -> Result<String> {
        Ok(self.document(chart).to_string())
    }
}

/// Axis ticks at the smallest 1/2/5 step giving at most ten intervals.
fn ticks(horizon: f64) -> Vec<f64> {
    if horizon <= 0.0 {
        return vec![0.0];
    }

    let magnitude = 10f64.powf((horizon / 10.0).log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|&s| (horizon / s).floor() <= 10.0)
        .unwrap_or(10.0 * magnitude);

    let count = (horizon / step).floor() as usize;
    (0..=count).map(|i| i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::StartTimes;
    use crate::config::model::Durations;

    fn chart() -> GanttChart {
        let starts: StartTimes = [("A", 0.0), ("B", 0.0), ("C", 15.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let durations: Durations = [("A", 15.0), ("B", 18.0), ("C", 12.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let order = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        GanttChart::new(&starts, &durations, "expected", &order)
            .unwrap()
            .with_critical(&["A", "C"])
    }

    #[test]
    fn one_rect_per_task_with_labels() {
        let svg = SvgRenderer::default().render(&chart()).unwrap();

        assert!(svg.contains("<svg"));
        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(svg.contains("Gantt Chart Expected Scenario"));
        assert!(svg.contains("C (12h)"));
        assert_eq!(svg.matches(CRITICAL_OUTLINE).count(), 2);
    }

    #[test]
    fn ticks_use_round_steps() {
        assert_eq!(ticks(210.0).len(), 11);
        assert_eq!(ticks(210.0)[1], 20.0);
        assert_eq!(ticks(27.0), vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0]);
        assert_eq!(ticks(0.0), vec![0.0]);
    }
}
