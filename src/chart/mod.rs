//! Timeline chart model and rendering
//!
//! The chart is computed once from the grouped series: every category gets a
//! row and a palette color, its points are bucketed by day, and each bucket
//! gets a marker size and an optional count label. Backends only translate
//! that model into their own markup through [`RenderBackend`].

mod colors;
mod echarts;
mod html;
mod plotly_chart;
mod terminal;

pub use echarts::EChartsBackend;
pub use plotly_chart::PlotlyBackend;
pub use terminal::{MAX_WIDTH, TerminalBackend};

use chrono::NaiveDate;
use thiserror::Error;

use crate::grouping::{CategorySeries, DateBucket, bucket_points, format_date};
use crate::selection::SelectedPoint;

/// Marker size for a single-event bucket before the per-event increment
pub const DEFAULT_BASE_SIZE: f64 = 4.0;
pub const DEFAULT_SIZE_INCREMENT: f64 = 2.0;
pub const DEFAULT_DISPLAY_DATE_FORMAT: &str = "%-m/%-d/%Y";
pub const DEFAULT_TITLE: &str = "Events Timeline";

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no point {point} in series {series}")]
    NoSuchPoint { series: usize, point: usize },

    #[error("no events for {category:?} on {date}")]
    UnknownClickTarget { category: String, date: NaiveDate },

    #[error("failed to serialize chart options: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Rendering knobs shared by every backend
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    /// Row colors, reused cyclically when there are more rows than colors
    pub palette: Vec<String>,
    pub base_size: f64,
    pub size_increment: f64,
    /// chrono strftime format for per-event dates in tooltips and selections
    pub display_date_format: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            palette: colors::DEFAULT_PALETTE
                .iter()
                .map(|c| c.to_string())
                .collect(),
            base_size: DEFAULT_BASE_SIZE,
            size_increment: DEFAULT_SIZE_INCREMENT,
            display_date_format: DEFAULT_DISPLAY_DATE_FORMAT.to_string(),
        }
    }
}

impl ChartConfig {
    /// `base_size + count * size_increment`
    pub fn marker_size(&self, count: usize) -> f64 {
        self.base_size + count as f64 * self.size_increment
    }

    /// Palette color for a row: `palette[row % palette.len()]`
    pub fn color_for_row(&self, row: usize) -> &str {
        if self.palette.is_empty() {
            return colors::DEFAULT_PALETTE[row % colors::DEFAULT_PALETTE.len()];
        }
        &self.palette[row % self.palette.len()]
    }
}

/// Count label drawn over a marker; only buckets with more than one event get one
pub fn count_label(count: usize) -> Option<String> {
    (count > 1).then(|| count.to_string())
}

/// One plotted marker: a day bucket with its derived presentation
#[derive(Debug, Clone)]
pub struct PlotPoint {
    pub bucket: DateBucket,
    pub size: f64,
    pub label: Option<String>,
    /// The bucket's day in the display date format
    pub display_date: String,
}

impl PlotPoint {
    /// ISO `YYYY-MM-DD` form of the bucket day
    pub fn iso_date(&self) -> String {
        self.bucket.date.format("%Y-%m-%d").to_string()
    }
}

/// One category row
#[derive(Debug, Clone)]
pub struct PlotSeries {
    pub category: String,
    pub row: usize,
    pub color: String,
    pub points: Vec<PlotPoint>,
}

/// Everything a tooltip shows for one point, independent of markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipContent {
    pub category: String,
    pub main_date: String,
    pub total: usize,
    /// (display date, title) in accumulation order
    pub items: Vec<(String, String)>,
}

impl TooltipContent {
    pub fn new(series: &PlotSeries, point: &PlotPoint) -> Self {
        let bucket = &point.bucket;
        Self {
            category: series.category.clone(),
            main_date: point.iso_date(),
            total: bucket.count,
            items: bucket
                .display_dates
                .iter()
                .cloned()
                .zip(bucket.titles.iter().cloned())
                .collect(),
        }
    }
}

/// A chart library adapter.
///
/// [`TimelineChart::render_with`] calls `render_axes` once, then
/// `render_series` for every row in order, then `finish`.
pub trait RenderBackend {
    fn name(&self) -> &'static str;

    fn render_axes(&mut self, chart: &TimelineChart);

    fn render_series(&mut self, series: &PlotSeries);

    /// Tooltip markup for one point
    fn render_tooltip(&self, tooltip: &TooltipContent) -> String;

    /// Selection payload produced when a point is clicked
    fn on_point_click(&self, series: &PlotSeries, point: &PlotPoint) -> SelectedPoint {
        SelectedPoint::from_point(series, point)
    }

    fn finish(self) -> Result<String, ChartError>;
}

/// Chart libraries that can be embedded in the HTML page
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BackendKind {
    Echarts,
    Plotly,
}

/// The fully computed timeline
#[derive(Debug, Clone)]
pub struct TimelineChart {
    pub title: String,
    pub series: Vec<PlotSeries>,
}

impl TimelineChart {
    pub fn build(series: &[CategorySeries], config: &ChartConfig) -> Self {
        let series = series
            .iter()
            .enumerate()
            .map(|(row, s)| PlotSeries {
                category: s.category.clone(),
                row,
                color: config.color_for_row(row).to_string(),
                points: bucket_points(&s.points, &config.display_date_format)
                    .into_iter()
                    .map(|bucket| PlotPoint {
                        size: config.marker_size(bucket.count),
                        label: count_label(bucket.count),
                        display_date: format_date(bucket.date, &config.display_date_format),
                        bucket,
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: config.title.clone(),
            series,
        }
    }

    /// Y axis tick labels, one per row
    pub fn categories(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.category.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Earliest and latest bucket timestamps across all rows
    pub fn time_range(&self) -> Option<(i64, i64)> {
        let mut stamps = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.bucket.timestamp));
        let first = stamps.next()?;
        Some(stamps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }

    pub fn point(&self, series: usize, point: usize) -> Result<&PlotPoint, ChartError> {
        self.series
            .get(series)
            .and_then(|s| s.points.get(point))
            .ok_or(ChartError::NoSuchPoint { series, point })
    }

    #[cfg(test)]
    pub fn tooltip(&self, series: usize, point: usize) -> Result<TooltipContent, ChartError> {
        let p = self.point(series, point)?;
        Ok(TooltipContent::new(&self.series[series], p))
    }

    /// Locate the bucket of `category` on `date`
    pub fn find_point(&self, category: &str, date: NaiveDate) -> Option<(usize, usize)> {
        let series_idx = self.series.iter().position(|s| s.category == category)?;
        let point_idx = self.series[series_idx]
            .points
            .iter()
            .position(|p| p.bucket.date == date)?;
        Some((series_idx, point_idx))
    }

    /// Drive a backend over the whole chart
    pub fn render_with<B: RenderBackend>(&self, mut backend: B) -> Result<String, ChartError> {
        backend.render_axes(self);
        for series in &self.series {
            backend.render_series(series);
        }
        backend.finish()
    }

    /// Standalone HTML page with one section per backend
    pub fn render_page(&self, backends: &[BackendKind]) -> Result<String, ChartError> {
        let mut sections = Vec::with_capacity(backends.len());
        for kind in backends {
            let section = match kind {
                BackendKind::Echarts => self.render_with(EChartsBackend::new("eventline-echarts"))?,
                BackendKind::Plotly => self.render_with(PlotlyBackend::new("eventline-plotly"))?,
            };
            sections.push(section);
        }
        Ok(html::render_page(&self.title, &sections))
    }

    /// Render the HTML page and write it to `output_path`
    pub fn save_page(&self, backends: &[BackendKind], output_path: &str) -> Result<(), ChartError> {
        let page = self.render_page(backends)?;
        std::fs::write(output_path, page).map_err(|source| ChartError::Write {
            path: output_path.to_string(),
            source,
        })
    }
}
