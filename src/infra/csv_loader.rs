use csv::{ErrorKind, ReaderBuilder, StringRecord};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::{CleanerError, Result};
use crate::table::{Table, Value};

/// Reads CSV sources into in-memory tables
pub struct CsvLoader {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load the source file for `dataset` from `path`
    pub fn load_file(&self, dataset: Dataset, path: &Path) -> Result<Table> {
        let file = File::open(path).map_err(|source| CleanerError::MissingSource {
            dataset,
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Reading {} from {}", dataset, path.display());
        self.load_reader(dataset, file)
    }

    /// Parse CSV content from any reader; the first record is the header
    pub fn load_reader<R: Read>(&self, dataset: Dataset, reader: R) -> Result<Table> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(CleanerError::MalformedSource {
                dataset,
                reason: "no header row".to_string(),
            });
        }
        let headers = dedupe_headers(&headers);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| malformed_or_csv(dataset, e))?;
            rows.push(record.iter().map(Value::from_field).collect());
        }

        Table::from_records(dataset, headers, rows)
    }
}

fn malformed_or_csv(dataset: Dataset, error: csv::Error) -> CleanerError {
    match error.kind() {
        ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => {
            let line = pos.as_ref().map(|p| p.line()).unwrap_or(0);
            CleanerError::MalformedSource {
                dataset,
                reason: format!(
                    "line {} has {} fields, expected {}",
                    line, len, expected_len
                ),
            }
        }
        _ => CleanerError::Csv(error),
    }
}

/// Repeated header names get a numeric suffix: `a`, `a.1`, `a.2`
fn dedupe_headers(headers: &StringRecord) -> Vec<String> {
    let mut used = HashSet::new();
    let mut names = Vec::with_capacity(headers.len());

    for header in headers.iter() {
        let mut candidate = header.to_string();
        let mut suffix = 0;
        while used.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}.{}", header, suffix);
        }
        used.insert(candidate.clone());
        names.push(candidate);
    }

    names
}
