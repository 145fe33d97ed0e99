use csv::WriterBuilder;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::error::{CleanerError, Result};
use crate::table::{Column, Table, Value};

/// Serializes tables back to CSV: header row, no index column
pub struct CsvTableWriter {
    delimiter: u8,
}

impl Default for CsvTableWriter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvTableWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the destination directory (and parents) before any write
    pub fn prepare_destination(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|source| CleanerError::DestinationUnavailable {
            path: dir.to_path_buf(),
            source,
        })?;
        info!("Destination directory ready: {}", dir.display());
        Ok(())
    }

    /// Write `table` to `path`, truncating any existing file. Returns rows written.
    pub fn write_file(&self, table: &Table, path: &Path) -> Result<usize> {
        let file = fs::File::create(path)?;
        self.write_to(table, file)
    }

    pub fn write_to<W: Write>(&self, table: &Table, writer: W) -> Result<usize> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        writer.write_record(table.column_names())?;

        let date_only: Vec<bool> = table.columns().iter().map(Column::is_date_only).collect();
        let rows = table.row_count();

        for i in 0..rows {
            let record: Vec<String> = table
                .columns()
                .iter()
                .zip(&date_only)
                .map(|(column, &date_only)| render(&column.values()[i], date_only))
                .collect();
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(rows)
    }
}

fn render(value: &Value, date_only: bool) -> String {
    match value {
        Value::Timestamp(ts) if date_only => ts.format("%Y-%m-%d").to_string(),
        other => other.to_string(),
    }
}
