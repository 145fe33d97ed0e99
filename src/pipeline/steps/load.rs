use metrics::counter;
use std::path::PathBuf;
use tracing::info;

use super::{PipelineStep, StepResult};
use crate::dataset::{Dataset, TableSet};
use crate::error::Result;
use crate::infra::CsvLoader;

/// Pipeline step that reads the eight source files
pub struct LoadStep {
    source_dir: PathBuf,
    loader: CsvLoader,
}

impl LoadStep {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            loader: CsvLoader::new(),
        }
    }
}

impl PipelineStep for LoadStep {
    fn step_name(&self) -> &'static str {
        "load"
    }

    fn execute(&self, tables: &mut TableSet) -> Result<StepResult> {
        info!("📥 Loading datasets from {}", self.source_dir.display());

        // Nothing is inserted until every source has loaded
        let mut loaded = Vec::with_capacity(Dataset::ALL.len());
        for dataset in Dataset::ALL {
            let path = self.source_dir.join(dataset.file_name());
            let table = self.loader.load_file(dataset, &path)?;
            info!(
                "Loaded {}: {} rows, {} columns",
                dataset,
                table.row_count(),
                table.column_names().len()
            );
            counter!("shop_cleaner_rows_loaded_total", "dataset" => dataset.key())
                .increment(table.row_count() as u64);
            loaded.push(table);
        }

        let total_rows: usize = loaded.iter().map(|t| t.row_count()).sum();
        let count = loaded.len();
        for table in loaded {
            tables.insert(table);
        }

        info!("✅ Datasets loaded successfully");
        Ok(StepResult::success(
            self.step_name(),
            total_rows,
            format!("Loaded {} datasets ({} rows)", count, total_rows),
        ))
    }
}
