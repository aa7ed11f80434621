//! Common test utilities

use std::io::Write;
use std::path::{Path, PathBuf};

/// (id, date, title, category)
pub type Row<'a> = (&'a str, &'a str, &'a str, &'a str);

/// The portfolio history used across tests: three categories, one
/// four-event day
pub const PORTFOLIO: &[Row] = &[
    ("50", "08-04-2024", "Account Statement Generated", "Account Maintenance"),
    ("51", "10-04-2024", "Trade Cancelled", "Trading Events"),
    ("53", "27-08-2024", "KYC Verified", "Account Maintenance"),
    ("56", "25-04-2025", "Capital Loss Realized", "Tax Loss Harvesting"),
    ("57", "25-04-2025", "Cash Withdrawal Processed", "Tax Loss Harvesting"),
    ("60", "30-12-2025", "Stock Split Occurred", "Trading Events"),
    ("60", "30-12-2025", "Stock Split Occurred", "Trading Events"),
    ("60", "30-12-2025", "Stock Split Occurred", "Trading Events"),
    ("60", "30-12-2025", "Stock Split Occurred", "Trading Events"),
];

fn json_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Write rows as a JSON array of event objects
pub fn write_json(path: &Path, rows: &[Row]) -> std::io::Result<()> {
    let objects: Vec<String> = rows
        .iter()
        .map(|(id, date, title, category)| {
            format!(
                "{{\"id\": {}, \"date\": {}, \"title\": {}, \"category\": {}}}",
                json_string(id),
                json_string(date),
                json_string(title),
                json_string(category)
            )
        })
        .collect();
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "[\n  {}\n]", objects.join(",\n  "))
}

/// Write rows as CSV with an id,date,title,category header
pub fn write_csv(path: &Path, rows: &[Row]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "id,date,title,category")?;
    for (id, date, title, category) in rows {
        writeln!(file, "{},{},{},{}", id, date, title, category)?;
    }
    Ok(())
}

/// Write `rows` to `name` inside `dir`, picking the format from the extension
pub fn write_events(dir: &Path, name: &str, rows: &[Row]) -> PathBuf {
    let path = dir.join(name);
    if name.ends_with(".csv") {
        write_csv(&path, rows).unwrap();
    } else {
        write_json(&path, rows).unwrap();
    }
    path
}
