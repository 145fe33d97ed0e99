use serde::Serialize;
use std::path::PathBuf;

use crate::dataset::TableSet;
use crate::error::Result;

/// Common trait for all pipeline steps
pub trait PipelineStep {
    /// Get the name of this pipeline step
    fn step_name(&self) -> &'static str;

    /// Run this step over the run's table set
    fn execute(&self, tables: &mut TableSet) -> Result<StepResult>;
}

/// Result of executing a pipeline step
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    pub step: String,
    /// Rows loaded, rewritten or written, depending on the step
    pub processed_count: usize,
    pub message: String,
    /// Files produced by the step
    pub artifacts: Vec<PathBuf>,
}

impl StepResult {
    pub fn success(step: &str, processed: usize, message: String) -> Self {
        Self {
            step: step.to_string(),
            processed_count: processed,
            message,
            artifacts: Vec::new(),
        }
    }

    pub fn with_artifacts(mut self, artifacts: Vec<PathBuf>) -> Self {
        self.artifacts = artifacts;
        self
    }
}

pub mod coerce_numeric;
pub mod load;
pub mod parse_dates;
pub mod resolve_duplicates;
pub mod validate;
pub mod write;

pub use coerce_numeric::CoerceNumericStep;
pub use load::LoadStep;
pub use parse_dates::ParseDatesStep;
pub use resolve_duplicates::ResolveDuplicatesStep;
pub use validate::ValidateStep;
pub use write::WriteStep;
