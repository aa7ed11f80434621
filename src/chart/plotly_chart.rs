//! Plotly backend

use plotly::{
    Configuration, Layout, Plot, Scatter,
    common::{HoverInfo, Marker, Mode, Position, TickMode, Title},
    layout::{Axis, AxisType, DragMode, HoverMode, Shape, ShapeLayer, ShapeLine, ShapeType},
};

use super::colors::COLOR_GRID;
use super::html::{escape, script_json, section};
use super::{ChartError, PlotSeries, RenderBackend, TimelineChart, TooltipContent};
use crate::selection::SelectedPoint;

pub struct PlotlyBackend {
    div_id: String,
    plot: Plot,
    selections: Vec<Vec<SelectedPoint>>,
}

impl PlotlyBackend {
    pub fn new(div_id: &str) -> Self {
        Self {
            div_id: div_id.to_string(),
            plot: Plot::new(),
            selections: Vec::new(),
        }
    }
}

/// Plotly sizes markers by diameter; the shared size is a radius
fn marker_diameter(size: f64) -> usize {
    (size * 2.0).round() as usize
}

/// One full-width line per category row, in the row color, behind the markers
fn row_guides(chart: &TimelineChart) -> Vec<Shape> {
    chart
        .series
        .iter()
        .map(|s| {
            let row = s.row as f64;
            Shape::new()
                .shape_type(ShapeType::Line)
                .layer(ShapeLayer::Below)
                .x_ref("paper")
                .x0(0.0)
                .x1(1.0)
                .y_ref("y")
                .y0(row)
                .y1(row)
                .line(ShapeLine::new().color(s.color.clone()).width(1.0))
                .opacity(0.6)
        })
        .collect()
}

impl RenderBackend for PlotlyBackend {
    fn name(&self) -> &'static str {
        "Plotly"
    }

    fn render_axes(&mut self, chart: &TimelineChart) {
        let rows = chart.series.len();
        let tick_values: Vec<f64> = (0..rows).map(|r| r as f64).collect();
        let tick_text: Vec<String> = chart.categories().iter().map(|c| c.to_string()).collect();

        let layout = Layout::new()
            .title(Title::with_text(&chart.title))
            .height(400)
            .drag_mode(DragMode::Pan)
            .hover_mode(HoverMode::Closest)
            .x_axis(
                Axis::new()
                    .type_(AxisType::Date)
                    .title(Title::with_text("Year"))
                    .show_grid(true)
                    .grid_color(COLOR_GRID),
            )
            // Fixed range: zooming and panning only move the time axis
            .y_axis(
                Axis::new()
                    .title(Title::with_text("Event Types"))
                    .tick_mode(TickMode::Array)
                    .tick_values(tick_values)
                    .tick_text(tick_text)
                    .range(vec![-1.0, rows as f64])
                    .fixed_range(true)
                    .zero_line(false)
                    .show_grid(false),
            )
            .shapes(row_guides(chart));

        self.plot.set_layout(layout);
        self.plot
            .set_configuration(Configuration::new().scroll_zoom(true).responsive(true));
    }

    fn render_series(&mut self, series: &PlotSeries) {
        let dates: Vec<String> = series.points.iter().map(|p| p.iso_date()).collect();
        let rows: Vec<usize> = vec![series.row; series.points.len()];
        let sizes: Vec<usize> = series.points.iter().map(|p| marker_diameter(p.size)).collect();
        let labels: Vec<String> = series
            .points
            .iter()
            .map(|p| p.label.clone().unwrap_or_default())
            .collect();
        let hover: Vec<String> = series
            .points
            .iter()
            .map(|p| self.render_tooltip(&TooltipContent::new(series, p)))
            .collect();

        let trace = Scatter::new(dates, rows)
            .name(series.category.as_str())
            .mode(Mode::MarkersText)
            .text_array(labels)
            .text_position(Position::MiddleCenter)
            .hover_text_array(hover)
            .hover_info(HoverInfo::Text)
            .marker(
                Marker::new()
                    .size_array(sizes)
                    .color(series.color.clone()),
            );
        self.plot.add_trace(trace);

        let selections = series
            .points
            .iter()
            .map(|p| self.on_point_click(series, p))
            .collect();
        self.selections.push(selections);
    }

    fn render_tooltip(&self, tooltip: &TooltipContent) -> String {
        let mut out = format!(
            "<b>{}</b><br>Main Date: {}<br>Total Events: {}",
            escape(&tooltip.category),
            escape(&tooltip.main_date),
            tooltip.total
        );
        for (date, title) in &tooltip.items {
            out.push_str(&format!("<br>• <b>{}</b>: {}", escape(date), escape(title)));
        }
        out
    }

    fn finish(self) -> Result<String, ChartError> {
        let plot_html = self.plot.to_inline_html(Some(self.div_id.as_str()));
        let selections = script_json(&self.selections)?;
        let id = script_json(&self.div_id)?;

        // to_inline_html brings its own container div and newPlot script
        let script = format!(
            r#"(function () {{
  var id = {id};
  var selections = {selections};
  var el = document.getElementById(id);
  if (!el || !el.on) {{ return; }}
  el.on('plotly_click', function (data) {{
    var p = data.points[0];
    var row = selections[p.curveNumber];
    eventlineShowSelection(id + '-selection', row && row[p.pointIndex]);
  }});
}})();"#
        );

        let placeholder = format!("<div id=\"{}\" class=\"chart\"></div>", escape(&self.div_id));
        let section = section(
            &format!("Timeline Chart ({})", self.name()),
            &self.div_id,
            &script,
        );
        Ok(section.replacen(&placeholder, &plot_html, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartConfig;
    use crate::events::Event;
    use crate::grouping::group_events;

    fn chart() -> TimelineChart {
        let events = [
            Event::new("1", "08-04-2024", "Account Created", "Account Maintenance"),
            Event::new("2", "30-12-2025", "Stock Split A", "Trading Events"),
            Event::new("3", "30-12-2025", "Stock Split B", "Trading Events"),
            Event::new("4", "30-12-2025", "Stock Split C", "Trading Events"),
        ];
        TimelineChart::build(&group_events(&events).series, &ChartConfig::default())
    }

    #[test]
    fn test_marker_diameter() {
        assert_eq!(marker_diameter(6.0), 12);
        assert_eq!(marker_diameter(10.0), 20);
    }

    #[test]
    fn test_guide_line_per_row_in_row_color() {
        let events: Vec<Event> = (0..6)
            .map(|i| Event::new(&i.to_string(), "08-04-2024", "t", &format!("cat-{}", i)))
            .collect();
        let chart = TimelineChart::build(&group_events(&events).series, &ChartConfig::default());
        let mut backend = PlotlyBackend::new("test");
        backend.render_axes(&chart);

        let plot: serde_json::Value = serde_json::from_str(&backend.plot.to_json()).unwrap();
        let shapes = plot["layout"]["shapes"].as_array().unwrap();
        assert_eq!(shapes.len(), 6);
        for (row, shape) in shapes.iter().enumerate() {
            assert_eq!(shape["type"], "line");
            assert_eq!(shape["y0"], serde_json::json!(row as f64));
            assert_eq!(shape["y1"], serde_json::json!(row as f64));
            assert_eq!(shape["line"]["color"], serde_json::json!(chart.series[row].color));
        }
        // Palette of five wraps around
        assert_eq!(shapes[5]["line"]["color"], "#FF4560");
    }

    #[test]
    fn test_tooltip_lines() {
        let chart = chart();
        let backend = PlotlyBackend::new("test");
        let text = backend.render_tooltip(&chart.tooltip(1, 0).unwrap());

        assert!(text.starts_with("<b>Trading Events</b>"));
        assert!(text.contains("Main Date: 2025-12-30"));
        assert!(text.contains("Total Events: 3"));
        assert_eq!(text.matches("<br>• ").count(), 3);
        assert!(text.ends_with("Stock Split C"));
    }

    #[test]
    fn test_section_contains_plot_and_click_hook() {
        let out = chart().render_with(PlotlyBackend::new("eventline-plotly")).unwrap();

        assert!(out.contains("eventline-plotly"));
        assert!(out.contains("eventline-plotly-selection"));
        assert!(out.contains("plotly_click"));
        assert!(out.contains("Plotly.newPlot"));
        // count label for the three-event bucket
        assert!(out.contains("\"text\":[\"3\"]"));
        assert!(out.contains("\"size\":[20]"));
        assert!(out.contains("\"titles\":[\"Stock Split A\",\"Stock Split B\",\"Stock Split C\"]"));
    }
}
