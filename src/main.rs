mod chart;
mod events;
mod grouping;
mod output;
mod selection;

use chrono::NaiveDate;
use clap::Parser;

use chart::{
    BackendKind, ChartConfig, DEFAULT_DISPLAY_DATE_FORMAT, DEFAULT_TITLE, MAX_WIDTH,
    TerminalBackend, TimelineChart,
};
use events::load_events;
use grouping::{group_events, validate_date_format};
use output::{
    get_display_name, print_error, print_input_info, print_legend, print_selection, print_warning,
};
use selection::TimelineView;

#[derive(Parser)]
#[command(
    name = "eventline",
    version,
    about = "Categorized event timeline renderer with interactive scatter charts",
    after_help = "Examples:
  eventline events.json                                  Timeline summary in the terminal
  eventline events.json --html timeline.html             Interactive page (ECharts + Plotly)
  eventline events.json --html t.html -b plotly          Plotly chart only
  eventline events.csv --click 'Trading Events@2025-12-30'  Show the detail panel for a point
  eventline --date-format '%d.%m.%Y' events.json         Custom per-event date format"
)]
struct Args {
    /// Event file: JSON array, or CSV with an id,date,title,category header.
    /// Dates are DD-MM-YYYY.
    #[arg(required = true)]
    file: String,

    /// Write an interactive HTML page
    #[arg(short = 'o', long, value_name = "PATH")]
    html: Option<String>,

    /// Chart library for the HTML page (repeatable; default: all)
    #[arg(short, long = "backend", value_enum, value_name = "BACKEND")]
    backends: Vec<BackendKind>,

    /// Display format for per-event dates (strftime syntax)
    #[arg(long, default_value = DEFAULT_DISPLAY_DATE_FORMAT, value_name = "FORMAT")]
    date_format: String,

    /// Click the point of CATEGORY on a day (repeatable; the last click wins)
    #[arg(long, value_name = "CATEGORY@YYYY-MM-DD", value_parser = parse_click)]
    click: Vec<ClickTarget>,

    /// Chart title
    #[arg(short, long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Width of the terminal timeline in columns
    #[arg(short, long, default_value = "60", value_name = "COLUMNS")]
    width: usize,

    /// Suppress explanations (show data only)
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

const MIN_WIDTH: usize = 10;

#[derive(Debug, Clone)]
struct ClickTarget {
    category: String,
    date: NaiveDate,
}

fn parse_click(value: &str) -> Result<ClickTarget, String> {
    let (category, date) = value
        .rsplit_once('@')
        .ok_or_else(|| format!("expected CATEGORY@YYYY-MM-DD, got {:?}", value))?;
    if category.is_empty() {
        return Err("category is empty".to_string());
    }
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date {:?}: {}", date, e))?;
    Ok(ClickTarget {
        category: category.to_string(),
        date,
    })
}

fn run(args: &Args) -> Result<(), String> {
    let loaded = load_events(&args.file).map_err(|e| e.to_string())?;
    for row in &loaded.skipped_rows {
        print_warning(&format!("skipping {}", row));
    }

    let grouping = group_events(&loaded.events);
    for rejected in &grouping.rejected {
        print_warning(&format!(
            "skipping event {:?} ({}): {}",
            rejected.event.id, rejected.event.title, rejected.error
        ));
    }

    if !args.quiet {
        print_input_info(
            get_display_name(&args.file),
            loaded.events.len() + loaded.skipped_rows.len(),
            grouping.accepted_count(),
            grouping.series.len(),
        );
    }

    let config = ChartConfig {
        title: args.title.clone(),
        display_date_format: args.date_format.clone(),
        ..ChartConfig::default()
    };
    let chart = TimelineChart::build(&grouping.series, &config);

    if chart.is_empty() {
        print_warning("no events to plot");
    }

    let summary = chart
        .render_with(TerminalBackend::new(!args.quiet).with_width(args.width))
        .map_err(|e| e.to_string())?;
    print!("{}", summary);

    let mut view = TimelineView::new(&chart);
    for target in &args.click {
        view.click_at(&target.category, target.date)
            .map_err(|e| e.to_string())?;
    }
    if let Some(selected) = view.selection().current() {
        print_selection(selected);
    }

    if !args.quiet {
        print_legend(&config);
    }

    if let Some(path) = &args.html {
        let backends = if args.backends.is_empty() {
            vec![BackendKind::Echarts, BackendKind::Plotly]
        } else {
            args.backends.clone()
        };
        chart
            .save_page(&backends, path)
            .map_err(|e| e.to_string())?;
        eprintln!("Chart saved to: {}", path);
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    // Handle --no-color
    if args.no_color {
        colored::control::set_override(false);
    }

    if !args.backends.is_empty() && args.html.is_none() {
        print_error("--backend can only be used with --html");
        std::process::exit(1);
    }

    if !(MIN_WIDTH..=MAX_WIDTH).contains(&args.width) {
        print_error(&format!(
            "--width must be between {} and {}",
            MIN_WIDTH, MAX_WIDTH
        ));
        std::process::exit(1);
    }

    if let Err(e) = validate_date_format(&args.date_format) {
        print_error(&e);
        std::process::exit(1);
    }

    // Validate HTML output path
    if let Some(ref path) = args.html {
        use std::path::Path;
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            print_error(&format!("Directory does not exist: {}", parent.display()));
            std::process::exit(1);
        }
    }

    if let Err(e) = run(&args) {
        print_error(&e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_click() {
        let target = parse_click("Trading Events@2025-12-30").unwrap();
        assert_eq!(target.category, "Trading Events");
        assert_eq!(target.date, NaiveDate::from_ymd_opt(2025, 12, 30).unwrap());
    }

    #[test]
    fn test_parse_click_uses_last_at_sign() {
        let target = parse_click("ops@team@2024-01-02").unwrap();
        assert_eq!(target.category, "ops@team");
    }

    #[test]
    fn test_parse_click_errors() {
        assert!(parse_click("Trading Events").is_err());
        assert!(parse_click("@2025-12-30").is_err());
        assert!(parse_click("X@30-12-2025").is_err());
    }
}
