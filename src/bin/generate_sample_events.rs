use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

#[derive(Serialize)]
struct SampleEvent {
    id: &'static str,
    date: &'static str,
    title: &'static str,
    category: &'static str,
}

const fn event(
    id: &'static str,
    date: &'static str,
    title: &'static str,
    category: &'static str,
) -> SampleEvent {
    SampleEvent {
        id,
        date,
        title,
        category,
    }
}

const ACCOUNT: &str = "Account Maintenance";
const TRADING: &str = "Trading Events";
const TAX: &str = "Tax Loss Harvesting";

fn portfolio_events() -> Vec<SampleEvent> {
    vec![
        event("50", "08-04-2024", "Account Statement Generated", ACCOUNT),
        event("51", "10-04-2024", "Trade Cancelled", TRADING),
        event("52", "11-07-2024", "Dividend Reinvested", TRADING),
        event("53", "27-08-2024", "KYC Verified", ACCOUNT),
        event("54", "11-11-2024", "Funds Withdrawn", TRADING),
        event("55", "30-11-2024", "Account Created", ACCOUNT),
        event("56", "25-04-2025", "Capital Loss Realized", TAX),
        event("57", "25-04-2025", "Cash Withdrawal Processed", TAX),
        event("58", "27-10-2025", "Position Opened", TRADING),
        event("59", "01-11-2025", "Account Closed", ACCOUNT),
        // Same id and day four times: one bucket of four
        event("60", "30-12-2025", "Stock Split Occurred", TRADING),
        event("60", "30-12-2025", "Stock Split Occurred", TRADING),
        event("60", "30-12-2025", "Stock Split Occurred", TRADING),
        event("60", "30-12-2025", "Stock Split Occurred", TRADING),
    ]
}

/// More categories than palette colors, so row colors wrap
fn many_categories() -> Vec<SampleEvent> {
    const CATEGORIES: [&str; 7] = [
        "Deposits",
        "Withdrawals",
        "Transfers",
        "Fees",
        "Interest",
        "Corporate Actions",
        "Compliance",
    ];
    static DATES: [&str; 3] = ["03-01-2025", "14-02-2025", "14-02-2025"];

    CATEGORIES
        .iter()
        .enumerate()
        .flat_map(|(i, &category)| {
            DATES
                .iter()
                .map(move |&date| event("", date, "Sample Event", category))
                .skip(i % 2)
        })
        .collect()
}

fn with_malformed_dates() -> Vec<SampleEvent> {
    vec![
        event("1", "08-04-2024", "Valid", ACCOUNT),
        event("2", "08042024", "Missing separators", ACCOUNT),
        event("3", "2024-04-08", "Year first", TRADING),
        event("4", "31-02-2024", "No such day", TRADING),
        event("5", "09-04-2024", "Also valid", TRADING),
    ]
}

fn write_json(path: &Path, events: &[SampleEvent]) -> std::io::Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, events)?;
    Ok(())
}

fn write_csv(path: &Path, events: &[SampleEvent]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "id,date,title,category")?;
    for e in events {
        writeln!(writer, "{},{},{},{}", e.id, e.date, e.title, e.category)?;
    }
    Ok(())
}

fn main() -> std::io::Result<()> {
    let dir = Path::new("test_data");
    std::fs::create_dir_all(dir)?;

    write_json(&dir.join("portfolio.json"), &portfolio_events())?;
    write_csv(&dir.join("portfolio.csv"), &portfolio_events())?;
    write_json(&dir.join("many_categories.json"), &many_categories())?;
    write_json(&dir.join("malformed.json"), &with_malformed_dates())?;

    println!("Generated: portfolio.json, portfolio.csv, many_categories.json, malformed.json");
    Ok(())
}
