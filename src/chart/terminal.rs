//! Terminal backend: one text strip per category

use chrono::DateTime;
use colored::*;

use super::colors::hex_to_rgb;
use super::{ChartError, PlotSeries, RenderBackend, TimelineChart, TooltipContent};

/// Strip width in columns
const DEFAULT_WIDTH: usize = 60;
/// Widest strip that will be drawn
pub const MAX_WIDTH: usize = 1000;

/// Marker for a single event; larger buckets show their count
const SINGLE_MARKER: char = '●';
/// Shown when a column holds ten or more events
const OVERFLOW_MARKER: char = '+';

pub struct TerminalBackend {
    width: usize,
    show_details: bool,
    label_width: usize,
    range: Option<(i64, i64)>,
    out: String,
}

impl TerminalBackend {
    pub fn new(show_details: bool) -> Self {
        Self {
            width: DEFAULT_WIDTH,
            show_details,
            label_width: 0,
            range: None,
            out: String::new(),
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.clamp(2, MAX_WIDTH);
        self
    }

    fn column(&self, timestamp: i64) -> usize {
        match self.range {
            Some((lo, hi)) if hi > lo => {
                let span = (hi - lo) as i128;
                let offset = (timestamp - lo) as i128;
                (offset * (self.width as i128 - 1) / span) as usize
            }
            _ => self.width / 2,
        }
    }

    fn push_line(&mut self, line: &str) {
        self.out.push_str(line);
        self.out.push('\n');
    }
}

fn iso_day(timestamp: i64) -> String {
    DateTime::from_timestamp_millis(timestamp)
        .map(|dt| dt.date_naive().format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn marker_for(count: usize) -> char {
    match count {
        0 => ' ',
        1 => SINGLE_MARKER,
        2..=9 => char::from_digit(count as u32, 10).unwrap_or(OVERFLOW_MARKER),
        _ => OVERFLOW_MARKER,
    }
}

fn paint(text: &str, color: &str) -> ColoredString {
    match hex_to_rgb(color) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

impl RenderBackend for TerminalBackend {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn render_axes(&mut self, chart: &TimelineChart) {
        self.label_width = chart
            .categories()
            .iter()
            .map(|c| c.chars().count())
            .max()
            .unwrap_or(0);
        self.range = chart.time_range();

        let title = chart.title.as_str().bold().to_string();
        self.push_line(&title);

        let Some((lo, hi)) = self.range else {
            self.push_line("(no events)");
            return;
        };

        let indent = " ".repeat(self.label_width + 1);
        let first = iso_day(lo);
        let last = iso_day(hi);
        let header = if lo == hi {
            format!("{}{:^width$}", indent, first, width = self.width)
        } else {
            let gap = self.width.saturating_sub(first.len() + last.len()).max(1);
            format!("{}{}{}{}", indent, first, " ".repeat(gap), last)
        };
        self.push_line(&header);

        let axis = format!("{}+{}+", indent, "-".repeat(self.width.saturating_sub(2)));
        self.push_line(&axis);
    }

    fn render_series(&mut self, series: &PlotSeries) {
        let mut cells = vec![0usize; self.width];
        for point in &series.points {
            let col = self.column(point.bucket.timestamp).min(self.width - 1);
            cells[col] += point.bucket.count;
        }

        let strip: String = cells.iter().map(|&c| marker_for(c)).collect();
        let label = format!("{:<width$}", series.category, width = self.label_width);
        let line = format!(
            "{} {}",
            paint(&label, &series.color).bold(),
            paint(strip.trim_end(), &series.color)
        );
        self.push_line(&line);

        if self.show_details {
            for point in &series.points {
                let tooltip = self.render_tooltip(&TooltipContent::new(series, point));
                self.out.push_str(&tooltip);
            }
        }
    }

    fn render_tooltip(&self, tooltip: &TooltipContent) -> String {
        let mut out = format!(
            "  {}  {}: {} event{}\n",
            tooltip.main_date,
            tooltip.category,
            tooltip.total,
            if tooltip.total == 1 { "" } else { "s" }
        );
        for (date, title) in &tooltip.items {
            out.push_str(&format!("    - {}: {}\n", date, title));
        }
        out
    }

    fn finish(self) -> Result<String, ChartError> {
        Ok(self.out)
    }
}
