//! Event records and event file loading

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A single dated, categorized event as supplied by the event source.
///
/// `id` is carried for display only. It is not guaranteed to be unique and
/// plays no part in grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub id: String,
    /// Day-month-year, e.g. `30-12-2025`. Null or absent reads as empty
    /// and is rejected later as a malformed date.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub date: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,
    pub category: String,
}

impl Event {
    #[cfg(test)]
    pub fn new(id: &str, date: &str, title: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            date: date.to_string(),
            title: title.to_string(),
            category: category.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("malformed date {input:?}: {reason}")]
    MalformedDate { input: String, reason: &'static str },

    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Text fields show up as strings, bare numbers or null depending on the producer
#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Int(i64),
    Float(f64),
}

fn deserialize_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<RawText>::deserialize(deserializer)? {
        None => String::new(),
        Some(RawText::Text(s)) => s,
        Some(RawText::Int(n)) => n.to_string(),
        Some(RawText::Float(f)) => f.to_string(),
    })
}

/// Events read from a file, plus records that could not be decoded
pub struct LoadedEvents {
    pub events: Vec<Event>,
    pub skipped_rows: Vec<String>,
}

/// Load events from a JSON array or, for `.csv` files, a CSV table with an
/// `id,date,title,category` header
pub fn load_events(filename: &str) -> Result<LoadedEvents, EventError> {
    let path = Path::new(filename);
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let file = File::open(path).map_err(|source| EventError::Io {
        path: filename.to_string(),
        source,
    })?;

    if is_csv {
        load_csv(file, filename)
    } else {
        load_json(file, filename)
    }
}

fn load_json(file: File, filename: &str) -> Result<LoadedEvents, EventError> {
    // Only the array itself must be well formed; each record is decoded on its own
    let records: Vec<serde_json::Value> = serde_json::from_reader(std::io::BufReader::new(file))
        .map_err(|source| EventError::Json {
            path: filename.to_string(),
            source,
        })?;

    let mut events = Vec::with_capacity(records.len());
    let mut skipped_rows = Vec::new();
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Event>(record) {
            Ok(event) => events.push(event),
            Err(e) => skipped_rows.push(format!("record {}: {}", index, e)),
        }
    }

    Ok(LoadedEvents {
        events,
        skipped_rows,
    })
}

fn load_csv(file: File, filename: &str) -> Result<LoadedEvents, EventError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    // A broken header makes every row meaningless
    reader.headers().map_err(|source| EventError::Csv {
        path: filename.to_string(),
        source,
    })?;

    let mut events = Vec::new();
    let mut skipped_rows = Vec::new();
    for (row, record) in reader.deserialize::<Event>().enumerate() {
        match record {
            Ok(event) => events.push(event),
            // Header is line 1
            Err(e) => skipped_rows.push(format!("row {}: {}", row + 2, e)),
        }
    }

    Ok(LoadedEvents {
        events,
        skipped_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> String {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_json_ids_may_be_numbers() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_temp(
            &dir,
            "events.json",
            r#"[
                {"id": 50, "date": "08-04-2024", "title": "A", "category": "X"},
                {"id": "51", "date": "10-04-2024", "title": "B", "category": "Y"}
            ]"#,
        );

        let loaded = load_events(&path).unwrap();
        assert_eq!(loaded.events.len(), 2);
        assert_eq!(loaded.events[0].id, "50");
        assert_eq!(loaded.events[1].id, "51");
        assert!(loaded.skipped_rows.is_empty());
    }

    #[test]
    fn test_json_missing_date_defaults_to_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_temp(
            &dir,
            "events.json",
            r#"[{"id": "1", "title": "No date", "category": "X"}]"#,
        );

        let loaded = load_events(&path).unwrap();
        assert_eq!(loaded.events[0].date, "");
    }

    #[test]
    fn test_json_null_date_reads_as_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_temp(
            &dir,
            "events.json",
            r#"[
                {"id": "1", "date": "08-04-2024", "title": "A", "category": "X"},
                {"id": "2", "date": null, "title": "B", "category": "X"},
                {"id": "3", "date": 20240408, "title": 7, "category": "X"}
            ]"#,
        );

        let loaded = load_events(&path).unwrap();
        assert_eq!(loaded.events.len(), 3);
        assert_eq!(loaded.events[1].date, "");
        assert_eq!(loaded.events[2].date, "20240408");
        assert_eq!(loaded.events[2].title, "7");
        assert!(loaded.skipped_rows.is_empty());
    }

    #[test]
    fn test_json_bad_record_is_skipped() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_temp(
            &dir,
            "events.json",
            r#"[
                {"id": "1", "date": "08-04-2024", "title": "A", "category": "X"},
                {"id": "2", "date": "09-04-2024", "title": "no category"},
                "not an object",
                {"id": "4", "date": "10-04-2024", "title": "C", "category": "Y"}
            ]"#,
        );

        let loaded = load_events(&path).unwrap();
        let ids: Vec<&str> = loaded.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["1", "4"]);
        assert_eq!(loaded.skipped_rows.len(), 2);
        assert!(loaded.skipped_rows[0].starts_with("record 1"));
        assert!(loaded.skipped_rows[0].contains("category"));
        assert!(loaded.skipped_rows[1].starts_with("record 2"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_temp(&dir, "events.json", "{ not json");

        let err = load_events(&path).err().unwrap();
        assert!(matches!(err, EventError::Json { .. }));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_events("/nonexistent/events.json").err().unwrap();
        assert!(matches!(err, EventError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/events.json"));
    }

    #[test]
    fn test_csv_rows() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_temp(
            &dir,
            "events.csv",
            "id,date,title,category\n\
             50,08-04-2024,Account Statement Generated,Account Maintenance\n\
             51, 10-04-2024 ,Trade Cancelled,Trading Events\n",
        );

        let loaded = load_events(&path).unwrap();
        assert_eq!(loaded.events.len(), 2);
        assert_eq!(loaded.events[1].date, "10-04-2024");
        assert_eq!(loaded.events[1].category, "Trading Events");
    }

    #[test]
    fn test_csv_bad_row_is_skipped() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_temp(
            &dir,
            "events.csv",
            "id,date,title,category\n\
             1,08-04-2024,A,X\n\
             2,09-04-2024\n\
             3,10-04-2024,C,X\n",
        );

        let loaded = load_events(&path).unwrap();
        assert_eq!(loaded.events.len(), 2);
        assert_eq!(loaded.skipped_rows.len(), 1);
        assert!(loaded.skipped_rows[0].starts_with("row 3"));
    }
}
