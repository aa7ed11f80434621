//! Click selection state

use chrono::NaiveDate;
use serde::Serialize;

use crate::chart::{ChartError, PlotPoint, PlotSeries, TimelineChart};

/// Payload of a clicked point, as shown in the detail panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedPoint {
    pub category: String,
    /// The bucket day in the display date format
    pub date: String,
    pub titles: Vec<String>,
}

impl SelectedPoint {
    pub fn from_point(series: &PlotSeries, point: &PlotPoint) -> Self {
        Self {
            category: series.category.clone(),
            date: point.display_date.clone(),
            titles: point.bucket.titles.clone(),
        }
    }
}

/// At most one point is selected; a click always replaces the previous one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    NoSelection,
    PointSelected(SelectedPoint),
}

impl Selection {
    pub fn click(&mut self, point: SelectedPoint) {
        *self = Selection::PointSelected(point);
    }

    pub fn current(&self) -> Option<&SelectedPoint> {
        match self {
            Selection::NoSelection => None,
            Selection::PointSelected(p) => Some(p),
        }
    }
}

/// A rendered chart together with the selection it owns
pub struct TimelineView<'a> {
    chart: &'a TimelineChart,
    selection: Selection,
}

impl<'a> TimelineView<'a> {
    pub fn new(chart: &'a TimelineChart) -> Self {
        Self {
            chart,
            selection: Selection::NoSelection,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Click the `point`-th marker of the `series`-th row. A click on a
    /// nonexistent point leaves the selection untouched.
    pub fn click(&mut self, series: usize, point: usize) -> Result<&SelectedPoint, ChartError> {
        let chart = self.chart;
        let p = chart.point(series, point)?;
        self.selection
            .click(SelectedPoint::from_point(&chart.series[series], p));
        self.selection
            .current()
            .ok_or(ChartError::NoSuchPoint { series, point })
    }

    /// Click the marker of `category` on `date`
    pub fn click_at(&mut self, category: &str, date: NaiveDate) -> Result<&SelectedPoint, ChartError> {
        let (series, point) =
            self.chart
                .find_point(category, date)
                .ok_or_else(|| ChartError::UnknownClickTarget {
                    category: category.to_string(),
                    date,
                })?;
        self.click(series, point)
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
            Event::new("1", "08-04-2024", "Account Statement Generated", "Account Maintenance"),
            Event::new("2", "10-04-2024", "Trade Cancelled", "Trading Events"),
            Event::new("3", "30-12-2025", "Stock Split A", "Trading Events"),
            Event::new("4", "30-12-2025", "Stock Split B", "Trading Events"),
        ];
        TimelineChart::build(&group_events(&events).series, &ChartConfig::default())
    }

    #[test]
    fn test_starts_with_no_selection() {
        let chart = chart();
        let view = TimelineView::new(&chart);
        assert_eq!(view.selection(), &Selection::NoSelection);
        assert!(view.selection().current().is_none());
    }

    #[test]
    fn test_click_selects_bucket_payload() {
        let chart = chart();
        let mut view = TimelineView::new(&chart);

        let selected = view.click(1, 1).unwrap().clone();
        assert_eq!(
            selected,
            SelectedPoint {
                category: "Trading Events".to_string(),
                date: "12/30/2025".to_string(),
                titles: vec!["Stock Split A".to_string(), "Stock Split B".to_string()],
            }
        );
        assert_eq!(view.selection(), &Selection::PointSelected(selected));
    }

    #[test]
    fn test_second_click_replaces_selection() {
        let chart = chart();
        let mut view = TimelineView::new(&chart);

        view.click(1, 1).unwrap();
        view.click(0, 0).unwrap();

        let current = view.selection().current().unwrap();
        assert_eq!(current.category, "Account Maintenance");
        assert_eq!(current.titles, ["Account Statement Generated"]);
    }

    #[test]
    fn test_click_on_missing_point_keeps_selection() {
        let chart = chart();
        let mut view = TimelineView::new(&chart);

        view.click(0, 0).unwrap();
        assert!(view.click(0, 7).is_err());
        assert!(view.click(5, 0).is_err());
        assert_eq!(
            view.selection().current().unwrap().category,
            "Account Maintenance"
        );
    }

    #[test]
    fn test_click_at_date() {
        let chart = chart();
        let mut view = TimelineView::new(&chart);
        let date = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();

        let selected = view.click_at("Trading Events", date).unwrap();
        assert_eq!(selected.titles, ["Trade Cancelled"]);

        let missing = view.click_at("Trading Events", NaiveDate::from_ymd_opt(2024, 4, 11).unwrap());
        assert!(matches!(missing, Err(ChartError::UnknownClickTarget { .. })));
        assert!(view.click_at("Nope", date).is_err());
    }

    #[test]
    fn test_selection_click_from_either_state() {
        let mut selection = Selection::default();
        let a = SelectedPoint {
            category: "A".to_string(),
            date: "1/1/2024".to_string(),
            titles: vec!["x".to_string()],
        };
        let b = SelectedPoint {
            category: "B".to_string(),
            date: "1/2/2024".to_string(),
            titles: vec!["y".to_string(), "z".to_string()],
        };

        selection.click(a.clone());
        assert_eq!(selection.current(), Some(&a));
        selection.click(b.clone());
        assert_eq!(selection.current(), Some(&b));
    }
}
