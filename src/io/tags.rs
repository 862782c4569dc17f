//! Tag list CSV ingest.
//!
//! Expected schema (header row required, column order free, names
//! case-insensitive):
//!
//! ```text
//! id,frequency_mhz,dual_pulse
//! 1,149.922727,false
//! 2,149.928381,true
//! ```
//!
//! `dual_pulse` is optional. Bad rows are skipped and reported with their line
//! number; a file with no usable rows is an error.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use log::{debug, warn};

use crate::domain::Tag;
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub id: Option<u32>,
    pub message: String,
}

/// Ingest output: parsed tags (file order) plus the rows that were rejected.
#[derive(Debug, Clone)]
pub struct IngestedTags {
    pub tags: Vec<Tag>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load tags from a CSV file.
pub fn load_tags_csv(path: &Path) -> Result<IngestedTags, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open tags CSV '{}': {e}", path.display()))
    })?;
    let ingested = read_tags_csv(file)?;
    debug!(
        "read {} rows from '{}', {} usable",
        ingested.rows_read,
        path.display(),
        ingested.tags.len()
    );
    Ok(ingested)
}

/// Parse tags from any CSV source.
pub fn read_tags_csv<R: Read>(source: R) -> Result<IngestedTags, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read tags CSV header: {e}")))?
        .clone();
    let columns = Columns::resolve(&headers)?;

    let mut tags = Vec::new();
    let mut row_errors = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut rows_read = 0usize;

    for result in reader.records() {
        rows_read += 1;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map(|p| p.line() as usize).unwrap_or(0);
                row_errors.push(RowError {
                    line,
                    id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);

        match columns.parse_row(&record) {
            Ok(tag) if !seen_ids.insert(tag.id) => row_errors.push(RowError {
                line,
                id: Some(tag.id),
                message: "duplicate tag id".to_string(),
            }),
            Ok(tag) => tags.push(tag),
            Err((id, message)) => row_errors.push(RowError { line, id, message }),
        }
    }

    for err in &row_errors {
        match err.id {
            Some(id) => warn!("tags CSV line {} (id {id}): {}", err.line, err.message),
            None => warn!("tags CSV line {}: {}", err.line, err.message),
        }
    }

    if tags.is_empty() {
        return Err(AppError::new(2, "Tags CSV contains no valid tag rows."));
    }

    Ok(IngestedTags {
        tags,
        row_errors,
        rows_read,
    })
}

/// Column positions resolved from the header row.
struct Columns {
    id: usize,
    frequency: usize,
    dual_pulse: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, AppError> {
        let map = build_header_map(headers);
        let find = |names: &[&str]| names.iter().find_map(|n| map.get(*n).copied());

        let id = find(&["id", "tag_id"])
            .ok_or_else(|| AppError::new(2, "Tags CSV is missing required column 'id'."))?;
        let frequency = find(&["frequency_mhz", "freq_mhz", "frequency"]).ok_or_else(|| {
            AppError::new(2, "Tags CSV is missing required column 'frequency_mhz'.")
        })?;
        let dual_pulse = find(&["dual_pulse", "second_pulse"]);

        Ok(Self {
            id,
            frequency,
            dual_pulse,
        })
    }

    fn parse_row(&self, record: &StringRecord) -> Result<Tag, (Option<u32>, String)> {
        let raw_id = record.get(self.id).unwrap_or("");
        let id = raw_id
            .parse::<u32>()
            .map_err(|_| (None, format!("invalid id '{raw_id}'")))?;

        let raw_freq = record.get(self.frequency).unwrap_or("");
        let frequency_mhz = raw_freq
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && *f > 0.0)
            .ok_or_else(|| (Some(id), format!("invalid frequency_mhz '{raw_freq}'")))?;

        let dual_pulse = match self.dual_pulse.and_then(|i| record.get(i)) {
            None => false,
            Some(raw) => parse_flag(raw)
                .ok_or_else(|| (Some(id), format!("invalid dual_pulse '{raw}'")))?,
        };

        Ok(Tag {
            id,
            frequency_mhz,
            dual_pulse,
        })
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports may prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "n" => Some(false),
        "1" | "true" | "yes" | "y" => Some(true),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_ids_frequencies_and_flags() {
        let csv = "id,frequency_mhz,dual_pulse\n3,150.1,true\n1,150.2,\n2,150.3,0\n";
        let ingested = read_tags_csv(csv.as_bytes()).unwrap();

        assert_eq!(ingested.rows_read, 3);
        assert!(ingested.row_errors.is_empty());
        let ids: Vec<u32> = ingested.tags.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(ingested.tags[0].dual_pulse);
        assert!(!ingested.tags[1].dual_pulse);
        assert_eq!(ingested.tags[2].frequency_mhz, 150.3);
    }

    #[test]
    fn header_names_are_case_insensitive_and_bom_tolerant() {
        let csv = "\u{feff}Frequency_MHz,ID\n150.5,9\n";
        let ingested = read_tags_csv(csv.as_bytes()).unwrap();
        assert_eq!(ingested.tags.len(), 1);
        assert_eq!(ingested.tags[0].id, 9);
        assert_eq!(ingested.tags[0].frequency_mhz, 150.5);
    }

    #[test]
    fn bad_rows_are_reported_with_line_numbers() {
        let csv = "id,frequency_mhz,dual_pulse\n1,150.1,no\nx,150.2,no\n3,abc,no\n4,150.4,maybe\n1,150.5,no\n";
        let ingested = read_tags_csv(csv.as_bytes()).unwrap();

        assert_eq!(ingested.tags.len(), 1);
        let lines: Vec<usize> = ingested.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4, 5, 6]);
        assert_eq!(ingested.row_errors[0].id, None);
        assert_eq!(ingested.row_errors[1].id, Some(3));
        assert!(ingested.row_errors[3].message.contains("duplicate"));
    }

    #[test]
    fn missing_frequency_column_is_an_error() {
        let err = read_tags_csv("id,freq_hz\n1,150100000\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("frequency_mhz"));
    }

    #[test]
    fn file_without_valid_rows_is_an_error() {
        let err = read_tags_csv("id,frequency_mhz\n1,-5\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id,frequency_mhz").unwrap();
        writeln!(file, "10,149.957471").unwrap();
        writeln!(file, "11,149.997192").unwrap();
        file.flush().unwrap();

        let ingested = load_tags_csv(file.path()).unwrap();
        assert_eq!(ingested.tags.len(), 2);
        assert_eq!(ingested.tags[1].id, 11);
    }
}
