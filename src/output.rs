use colored::*;

use crate::chart::ChartConfig;
use crate::selection::SelectedPoint;

fn style_label(label: &str) -> ColoredString {
    label.bold()
}

pub(crate) fn print_error(msg: &str) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub(crate) fn print_warning(msg: &str) {
    eprintln!("{}: {}", "warning".yellow().bold(), msg);
}

pub(crate) fn get_display_name(filename: &str) -> &str {
    std::path::Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename)
}

pub(crate) fn print_input_info(
    display_name: &str,
    total: usize,
    accepted: usize,
    categories: usize,
) {
    println!("File: {}", display_name);
    println!(
        "Events: {} read, {} placed, Categories: {}",
        total, accepted, categories
    );
    println!();
}

/// Detail panel for the current selection
pub(crate) fn print_selection(selected: &SelectedPoint) {
    println!();
    println!("[Selection]");
    println!("{} {}", style_label("Event Type:"), selected.category);
    println!("{} {}", style_label("Date:"), selected.date);
    println!("{}", style_label("Titles:"));
    for title in &selected.titles {
        println!("  - {}", title);
    }
}

pub(crate) fn print_legend(config: &ChartConfig) {
    println!();
    println!("●: One event on that day");
    println!("2-9: Number of events on that day (+ for ten or more)");
    println!(
        "Marker size: {} + {} per event on that day",
        config.base_size, config.size_increment
    );
    println!("Rows cycle through {} colors", config.palette.len());
}
