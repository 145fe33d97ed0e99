use tracing::info;

use super::{PipelineStep, StepResult};
use crate::dataset::TableSet;
use crate::error::Result;
use crate::pipeline::processing::summary::{render, summarize};

/// Prints a schema and type summary for every table. Never alters data.
pub struct ValidateStep;

impl PipelineStep for ValidateStep {
    fn step_name(&self) -> &'static str {
        "validate"
    }

    fn execute(&self, tables: &mut TableSet) -> Result<StepResult> {
        info!("🔍 Validating data types after cleaning");
        println!("\n🔍 Validating Data Types After Cleaning...");

        for table in tables.iter() {
            println!("\n{}", render(&summarize(table)));
        }

        Ok(StepResult::success(
            self.step_name(),
            tables.len(),
            format!("Reported on {} datasets", tables.len()),
        ))
    }
}
