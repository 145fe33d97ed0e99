use metrics::counter;
use std::path::PathBuf;
use tracing::info;

use super::{PipelineStep, StepResult};
use crate::dataset::TableSet;
use crate::error::Result;
use crate::infra::CsvTableWriter;

/// Pipeline step that writes one cleaned CSV per table
pub struct WriteStep {
    dest_dir: PathBuf,
    writer: CsvTableWriter,
}

impl WriteStep {
    pub fn new(dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            dest_dir: dest_dir.into(),
            writer: CsvTableWriter::new(),
        }
    }
}

impl PipelineStep for WriteStep {
    fn step_name(&self) -> &'static str {
        "write"
    }

    fn execute(&self, tables: &mut TableSet) -> Result<StepResult> {
        info!("📤 Exporting cleaned data to {}", self.dest_dir.display());
        self.writer.prepare_destination(&self.dest_dir)?;

        let mut artifacts = Vec::with_capacity(tables.len());
        let mut rows = 0;
        for table in tables.iter() {
            let path = self.dest_dir.join(table.dataset().file_name());
            let written = self.writer.write_file(table, &path)?;
            info!("💾 Wrote {} rows to {}", written, path.display());
            counter!("shop_cleaner_rows_written_total", "dataset" => table.dataset().key())
                .increment(written as u64);
            rows += written;
            artifacts.push(path);
        }

        Ok(StepResult::success(
            self.step_name(),
            rows,
            format!("Wrote {} files", artifacts.len()),
        )
        .with_artifacts(artifacts))
    }
}
