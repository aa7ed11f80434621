//! ECharts backend (option built with charming, embedded in HTML)

use charming::{
    Chart,
    component::{Axis, DataZoom, DataZoomType, Grid, Legend, Title},
    element::{
        AxisLabel, AxisType, Color, ItemStyle, LineStyle, SplitLine, TextStyle, Tooltip, Trigger,
    },
    series::Scatter,
};
use serde_json::{Value, json};

use super::colors::{COLOR_BACKGROUND, COLOR_GRID, COLOR_LABEL, COLOR_TEXT};
use super::html::{escape, script_json, section};
use super::{ChartError, PlotSeries, RenderBackend, TimelineChart, TooltipContent};
use crate::selection::SelectedPoint;

/// Renders the timeline as an ECharts scatter chart.
///
/// charming builds the static option (axes, zoom, series colors). Per-point
/// marker sizes, count labels and tooltip markup are written into the
/// serialized option afterwards, because they vary inside a series.
pub struct EChartsBackend {
    div_id: String,
    chart: Option<Chart>,
    /// Per series: ECharts data items
    items: Vec<Vec<Value>>,
    /// Per series: click payloads, indexed like `items`
    selections: Vec<Vec<SelectedPoint>>,
    /// Per series: (row, color) of the horizontal guide line
    guides: Vec<(usize, String)>,
}

impl EChartsBackend {
    pub fn new(div_id: &str) -> Self {
        Self {
            div_id: div_id.to_string(),
            chart: None,
            items: Vec::new(),
            selections: Vec::new(),
            guides: Vec::new(),
        }
    }

    /// Final ECharts option with per-point items merged in
    fn option(&self) -> Result<Value, ChartError> {
        let chart = self.chart.as_ref().map(|c| c.to_string()).unwrap_or_default();
        let mut option: Value = if chart.is_empty() {
            json!({})
        } else {
            serde_json::from_str(&chart)?
        };

        if let Some(series) = option.get_mut("series").and_then(Value::as_array_mut) {
            for ((entry, items), (row, color)) in
                series.iter_mut().zip(&self.items).zip(&self.guides)
            {
                entry["data"] = Value::Array(items.clone());
                entry["markLine"] = guide_line(*row, color);
            }
        }
        if self.chart.is_some() {
            // Zoom in, zoom out and reset on the time axis
            option["toolbox"] = json!({
                "right": "4%",
                "feature": {
                    "dataZoom": { "yAxisIndex": "none" },
                    "restore": {},
                },
            });
        }
        Ok(option)
    }
}

/// Row-wide line in the row color, drawn behind the markers
fn guide_line(row: usize, color: &str) -> Value {
    json!({
        "silent": true,
        "symbol": "none",
        "label": { "show": false },
        "lineStyle": { "color": color, "type": "solid", "width": 1, "opacity": 0.6 },
        "data": [{ "yAxis": row }],
    })
}

impl RenderBackend for EChartsBackend {
    fn name(&self) -> &'static str {
        "ECharts"
    }

    fn render_axes(&mut self, chart: &TimelineChart) {
        let categories: Vec<String> = chart.categories().iter().map(|c| c.to_string()).collect();

        let echart = Chart::new()
            .background_color(Color::Value(COLOR_BACKGROUND.to_string()))
            .title(
                Title::new()
                    .text(chart.title.as_str())
                    .left("center")
                    .text_style(TextStyle::new().color(COLOR_TEXT).font_size(18)),
            )
            .tooltip(Tooltip::new().trigger(Trigger::Item))
            .legend(Legend::new().bottom("0%"))
            .grid(
                Grid::new()
                    .left("3%")
                    .right("4%")
                    .bottom("18%")
                    .top("12%")
                    .contain_label(true),
            )
            // Zoom and pan on the time axis only
            .data_zoom(DataZoom::new().type_(DataZoomType::Inside))
            .data_zoom(DataZoom::new().type_(DataZoomType::Slider))
            .x_axis(
                Axis::new()
                    .type_(AxisType::Time)
                    .name("Year")
                    .name_text_style(TextStyle::new().color(COLOR_TEXT))
                    .axis_label(AxisLabel::new().color(COLOR_TEXT))
                    .split_line(
                        SplitLine::new().line_style(LineStyle::new().width(1).color(COLOR_GRID)),
                    ),
            )
            .y_axis(
                Axis::new()
                    .type_(AxisType::Category)
                    .name("Event Types")
                    .data(categories)
                    .name_text_style(TextStyle::new().color(COLOR_TEXT))
                    .axis_label(AxisLabel::new().color(COLOR_TEXT)),
            );

        self.chart = Some(echart);
    }

    fn render_series(&mut self, series: &PlotSeries) {
        let Some(chart) = self.chart.take() else {
            return;
        };

        self.chart = Some(
            chart.series(
                Scatter::new()
                    .name(series.category.as_str())
                    .item_style(ItemStyle::new().color(series.color.as_str())),
            ),
        );

        let mut items = Vec::with_capacity(series.points.len());
        let mut selections = Vec::with_capacity(series.points.len());
        for point in &series.points {
            let tooltip = self.render_tooltip(&TooltipContent::new(series, point));
            let label = match &point.label {
                Some(text) => json!({
                    "show": true,
                    "position": "inside",
                    "formatter": text,
                    "color": COLOR_LABEL,
                    "fontSize": 10,
                    "fontWeight": "bold",
                }),
                None => json!({ "show": false }),
            };
            // y is the category index on the category axis
            items.push(json!({
                "value": [point.bucket.timestamp, series.row],
                "symbolSize": point.size * 2.0,
                "label": label,
                "detail": tooltip,
            }));
            selections.push(self.on_point_click(series, point));
        }
        self.items.push(items);
        self.selections.push(selections);
        self.guides.push((series.row, series.color.clone()));
    }

    fn render_tooltip(&self, tooltip: &TooltipContent) -> String {
        let items: String = tooltip
            .items
            .iter()
            .map(|(date, title)| {
                format!("<li><strong>{}</strong>: {}</li>", escape(date), escape(title))
            })
            .collect();
        format!(
            "<div style=\"padding: 10px;\"><div><strong>{}</strong></div>\
             <div><strong>Main Date:</strong> {}</div>\
             <div><strong>Total Events:</strong> {}</div>\
             <ul style=\"padding-left: 18px; margin-top: 5px;\">{}</ul></div>",
            escape(&tooltip.category),
            escape(&tooltip.main_date),
            tooltip.total,
            items
        )
    }

    fn finish(self) -> Result<String, ChartError> {
        let option = script_json(&self.option()?)?;
        let selections = script_json(&self.selections)?;
        let id = script_json(&self.div_id)?;

        let script = format!(
            r#"(function () {{
  var id = {id};
  var option = {option};
  var selections = {selections};
  var chart = echarts.init(document.getElementById(id));
  option.tooltip = option.tooltip || {{}};
  option.tooltip.formatter = function (p) {{ return p.data && p.data.detail; }};
  chart.setOption(option);
  chart.on('click', function (p) {{
    var row = selections[p.seriesIndex];
    eventlineShowSelection(id + '-selection', row && row[p.dataIndex]);
  }});
  window.addEventListener('resize', function () {{ chart.resize(); }});
}})();"#
        );

        Ok(section(
            &format!("Timeline Chart ({})", self.name()),
            &self.div_id,
            &script,
        ))
    }
}
